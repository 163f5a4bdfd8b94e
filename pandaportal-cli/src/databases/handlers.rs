use anyhow::Result;
use clap::ArgMatches;

use pandaportal_core::Settings;
use pandaportal_core::genomes::{list_databases, list_species};

pub fn run_databases(matches: &ArgMatches) -> Result<()> {
    let settings = Settings::load()?;

    let names = if matches.get_flag("species") {
        list_species(&settings.genome_data_dir)?
    } else {
        list_databases(&settings.blast_db_dir)?
    };

    for name in names {
        println!("{name}");
    }
    Ok(())
}

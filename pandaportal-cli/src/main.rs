mod blast;
mod databases;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "pandaportal";
    pub const BIN_NAME: &str = "pandaportal";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Pandaportal")
        .about("Backend tools for the panda genomics portal: submit sequence-similarity searches and inspect the sequence store.")
        .subcommand_required(true)
        .subcommand(blast::cli::create_blast_cli())
        .subcommand(databases::cli::create_databases_cli())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("pandaportal=info,pandaportal_blast=info,pandaportal_core=info")
    });
    // try_init also routes the libraries' `log` records through this
    // subscriber via the default tracing-log bridge.
    let _ = FmtSubscriber::builder().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    init_logging();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SIMILARITY SEARCH
        //
        Some((blast::cli::BLAST_CMD, matches)) => {
            blast::handlers::run_blast(matches)?;
        }

        //
        // SEQUENCE STORE LISTINGS
        //
        Some((databases::cli::DATABASES_CMD, matches)) => {
            databases::handlers::run_databases(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

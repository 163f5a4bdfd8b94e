use std::env;
use std::fs;

use anyhow::{Context, Result};
use clap::ArgMatches;

use pandaportal_blast::{BlastService, SearchRequest};
use pandaportal_core::Settings;

pub fn run_blast(matches: &ArgMatches) -> Result<()> {
    let mut settings = Settings::load()?;
    if matches.get_flag("no-fallback") {
        settings.blast_fallback = false;
    }

    let query = match matches.get_one::<String>("query") {
        Some(query) => query.clone(),
        None => {
            let path = matches
                .get_one::<String>("query-file")
                .expect("clap enforces query or query-file");
            fs::read_to_string(path).with_context(|| format!("Could not read query file '{path}'"))?
        }
    };

    let mut request = SearchRequest::new(query);
    if let Some(database) = matches.get_one::<String>("database") {
        request.database = database.clone();
    }
    if let Some(program) = matches.get_one::<String>("program") {
        request.program = program.clone();
    }
    if let Some(evalue) = matches.get_one::<String>("evalue") {
        request.expect = evalue
            .parse()
            .with_context(|| format!("Invalid --evalue '{evalue}'"))?;
    }
    if let Some(count) = matches.get_one::<String>("num-results") {
        request.num_results = count
            .parse()
            .with_context(|| format!("Invalid --num-results '{count}'"))?;
    }

    let service = BlastService::new(&settings)?;
    let requester = env::var("USER").unwrap_or_else(|_| "cli".to_string());
    let result = service.submit(&requester, &request)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

use clap::{Command, arg};

pub const DATABASES_CMD: &str = "databases";

pub fn create_databases_cli() -> Command {
    Command::new(DATABASES_CMD)
        .author("Pandaportal")
        .about("List searchable target databases, or species with genome data")
        .arg(arg!(--species "List species directories under the genome data root instead"))
}

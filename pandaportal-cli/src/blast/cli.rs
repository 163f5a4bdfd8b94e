use clap::{Command, arg};

pub const BLAST_CMD: &str = "blast";

pub fn create_blast_cli() -> Command {
    Command::new(BLAST_CMD)
        .author("Pandaportal")
        .about("Submit a sequence-similarity search")
        .arg_required_else_help(true)
        .arg(
            arg!(-q --query <sequence> "The query sequence (raw residues or FASTA)")
                .required_unless_present("query-file"),
        )
        .arg(arg!(-f --"query-file" <path> "Read the query from a file instead"))
        .arg(arg!(-d --database <name> "Target database name"))
        .arg(arg!(-p --program <name> "Alignment program to invoke"))
        .arg(arg!(-e --evalue <threshold> "Expect (significance) threshold"))
        .arg(arg!(-n --"num-results" <count> "Maximum number of hits to return"))
        .arg(arg!(--"no-fallback" "Fail instead of synthesizing results when the tool is unavailable"))
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Can't read settings file {0}: {1}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Invalid settings file {0}: {1}")]
    Parse(String, String),

    #[error("Invalid value for {0}: {1}")]
    InvalidEnv(&'static str, String),
}

#[derive(Error, Debug)]
pub enum GenomeError {
    #[error("Invalid path segment: {0}")]
    InvalidSegment(String),

    #[error("Genome file not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

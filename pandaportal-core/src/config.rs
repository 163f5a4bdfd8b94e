//! Portal settings.
//!
//! Settings come from three layers, weakest first: built-in defaults, an
//! optional TOML file (`PANDAPORTAL_CONFIG`, falling back to
//! `./pandaportal.toml` when present), and `PANDAPORTAL_*` environment
//! variables.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::errors::ConfigError;

/// Wall-clock limit for one external alignment run.
///
/// Five minutes matches the upstream service: long enough for a nucleotide
/// search against a mammalian genome, short enough that a wedged child
/// process cannot hold a request slot indefinitely.
pub const DEFAULT_BLAST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding formatted BLAST target databases, keyed by name.
    pub blast_db_dir: PathBuf,
    /// Scratch space for per-job query and output files.
    pub temp_dir: PathBuf,
    /// Root of per-species genome reference and annotation files.
    pub genome_data_dir: PathBuf,
    /// Append-only job record log (one JSON object per line).
    pub job_log: PathBuf,
    /// Seconds before a running alignment child process is killed.
    pub blast_timeout_secs: u64,
    /// Degrade failed tool runs to synthesized results instead of erroring.
    pub blast_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            blast_db_dir: PathBuf::from("./data/blast_db"),
            temp_dir: PathBuf::from("./data/tmp"),
            genome_data_dir: PathBuf::from("./data/genomes"),
            job_log: PathBuf::from("./data/jobs.jsonl"),
            blast_timeout_secs: DEFAULT_BLAST_TIMEOUT.as_secs(),
            blast_fallback: true,
        }
    }
}

impl Settings {
    /// Load settings from the default locations plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = match env::var_os("PANDAPORTAL_CONFIG") {
            Some(path) => Self::from_toml_file(Path::new(&path))?,
            None => {
                let default_file = Path::new("pandaportal.toml");
                if default_file.exists() {
                    Self::from_toml_file(default_file)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e))?;
        toml::from_str(&text)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(v) = env::var("PANDAPORTAL_BLAST_DB_DIR") {
            self.blast_db_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PANDAPORTAL_TEMP_DIR") {
            self.temp_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PANDAPORTAL_GENOME_DATA_DIR") {
            self.genome_data_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PANDAPORTAL_JOB_LOG") {
            self.job_log = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PANDAPORTAL_BLAST_TIMEOUT_SECS") {
            self.blast_timeout_secs = v
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("PANDAPORTAL_BLAST_TIMEOUT_SECS", v))?;
        }
        if let Ok(v) = env::var("PANDAPORTAL_BLAST_FALLBACK") {
            self.blast_fallback = match v.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidEnv("PANDAPORTAL_BLAST_FALLBACK", v)),
            };
        }
        Ok(())
    }

    pub fn blast_timeout(&self) -> Duration {
        Duration::from_secs(self.blast_timeout_secs)
    }

    /// Filesystem path of a named BLAST target database.
    pub fn database_path(&self, database: &str) -> PathBuf {
        self.blast_db_dir.join(database)
    }

    /// Create the directories the portal writes to. Safe to call repeatedly.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(&self.blast_db_dir)?;
        fs::create_dir_all(&self.temp_dir)?;
        fs::create_dir_all(&self.genome_data_dir)?;
        if let Some(parent) = self.job_log.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.blast_timeout_secs, 300);
        assert!(settings.blast_fallback);
        assert_eq!(
            settings.database_path("giant_panda"),
            PathBuf::from("./data/blast_db/giant_panda")
        );
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "blast_db_dir = \"/srv/blast\"").unwrap();
        writeln!(file, "blast_timeout_secs = 60").unwrap();
        writeln!(file, "blast_fallback = false").unwrap();

        let settings = Settings::from_toml_file(file.path()).unwrap();
        assert_eq!(settings.blast_db_dir, PathBuf::from("/srv/blast"));
        assert_eq!(settings.blast_timeout(), Duration::from_secs(60));
        assert!(!settings.blast_fallback);
        // Unspecified fields keep their defaults
        assert_eq!(settings.temp_dir, PathBuf::from("./data/tmp"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "blast_timeout_secs = \"soon\"").unwrap();

        let err = Settings::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_, _)));
    }
}

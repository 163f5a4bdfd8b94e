//! # Core library for the panda genomics portal backend
//!
//! Shared pieces used by the search service and the CLI:
//!
//! - `config` - portal settings (data directories, search limits), loaded
//!   from an optional TOML file with `PANDAPORTAL_*` environment overrides
//! - `genomes` - filesystem layout of the read-only sequence store
//! - `errors` - typed error enums for the above

pub mod config;
pub mod errors;
pub mod genomes;

pub use config::Settings;
pub use errors::{ConfigError, GenomeError};

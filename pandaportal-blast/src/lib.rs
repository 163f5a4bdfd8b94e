//! # Sequence-similarity search service for the panda genomics portal
//!
//! This crate runs one BLAST search end-to-end: it stages the query in a
//! per-job scratch file, invokes the external alignment tool as a child
//! process under a wall-clock timeout, parses its XML report into a uniform
//! hit shape, and - when the tool is missing, times out, or fails -
//! degrades to synthesized placeholder hits with the exact same shape, so
//! the submission boundary always answers synchronously.
//!
//! # Module Structure
//!
//! - `models` - request/result/hit types and query cleaning rules
//! - `process` - `ProcessRunner` capability over the child process
//! - `scratch` - per-job temporary files, removed on every exit path
//! - `xml` - BLAST `-outfmt 5` report parsing
//! - `synth` - fallback hit synthesis from a seedable RNG
//! - `runner` - the end-to-end search with its single fallback decision
//! - `service` - the submission boundary; validates, runs, records the job
//! - `jobs` - job records and the collaborator store trait
//! - `errors` - typed errors surfaced by the above

pub mod errors;
pub mod jobs;
pub mod models;
pub mod process;
pub mod runner;
pub mod scratch;
pub mod service;
pub mod synth;
pub mod xml;

pub use errors::BlastError;
pub use jobs::{JobRecord, JobStore, JsonlJobStore};
pub use models::{Hit, JobStatus, SearchRequest, SearchResult};
pub use process::{ProcessRunner, SystemProcessRunner, ToolOutcome};
pub use runner::{BlastRunner, FallbackPolicy, generate_job_id};
pub use service::BlastService;
pub use synth::synthesize_hits;

//! Request, result, and hit types for one similarity search.
//!
//! Field names match the portal's wire format, so these types serialize
//! directly at the submission boundary and into persisted job records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE: &str = "giant_panda";
pub const DEFAULT_PROGRAM: &str = "blastn";
pub const DEFAULT_EXPECT: f64 = 0.001;
pub const DEFAULT_NUM_RESULTS: u32 = 20;

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_expect() -> f64 {
    DEFAULT_EXPECT
}

fn default_num_results() -> u32 {
    DEFAULT_NUM_RESULTS
}

/// One search submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw query text; may carry FASTA headers and line breaks.
    #[serde(alias = "sequence", alias = "query")]
    pub query_sequence: String,
    /// Target database name, resolved under the configured database dir.
    #[serde(default = "default_database")]
    pub database: String,
    /// Alignment program to invoke (nucleotide-nucleotide by default).
    #[serde(default = "default_program")]
    pub program: String,
    /// Expect (significance) threshold passed to the tool.
    #[serde(default = "default_expect")]
    pub expect: f64,
    /// Maximum number of hits requested.
    #[serde(default = "default_num_results")]
    pub num_results: u32,
}

impl SearchRequest {
    pub fn new(query_sequence: impl Into<String>) -> Self {
        SearchRequest {
            query_sequence: query_sequence.into(),
            database: default_database(),
            program: default_program(),
            expect: default_expect(),
            num_results: default_num_results(),
        }
    }

    /// The query as the aligner sees it: FASTA headers dropped, all
    /// whitespace removed, uppercased.
    pub fn cleaned_query(&self) -> String {
        cleaned_sequence(&self.query_sequence)
    }

    /// The query length as the search reports it.
    pub fn query_length(&self) -> usize {
        query_length(&self.query_sequence)
    }
}

/// Search outcome visible to callers.
///
/// There is no failed variant at this layer: tool failures degrade to
/// synthesized hits under the default policy, and everything else surfaces
/// as an error before a result exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Completed,
}

/// The synchronous answer to one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub job_id: String,
    pub status: JobStatus,
    pub program: String,
    pub database: String,
    pub query_length: usize,
    pub results: Vec<Hit>,
    pub completed_at: DateTime<Utc>,
}

/// One matching reference region.
///
/// Real and synthesized paths produce this exact shape; callers cannot
/// tell them apart structurally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub hit_id: String,
    pub hit_def: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession: Option<String>,
    /// Full length of the matched reference sequence.
    pub length: u64,
    pub score: f64,
    /// Scientific-notation text, carried as the tool printed it.
    pub evalue: String,
    /// Percent of aligned positions that match exactly, 0-100.
    pub identity: f64,
    pub query_start: u64,
    pub query_end: u64,
    pub hit_start: u64,
    pub hit_end: u64,
    pub alignment: String,
}

/// Character count of the raw query with space and newline characters
/// removed. Both search paths report this same number.
pub fn query_length(raw: &str) -> usize {
    raw.chars().filter(|c| *c != ' ' && *c != '\n').count()
}

/// Strip FASTA header lines and all whitespace, uppercasing the residue
/// letters. An empty result means there is no sequence to search with.
pub fn cleaned_sequence(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

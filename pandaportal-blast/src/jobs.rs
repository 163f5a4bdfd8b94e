//! Job records and their persistence boundary.
//!
//! The portal does not own the job store's schema or retention; it hands
//! over exactly one record per submission, written at completion.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::JobStatus;

pub const JOB_TYPE_BLAST: &str = "blast";

/// One persisted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub requester_id: String,
    pub job_type: String,
    pub status: JobStatus,
    /// The raw request, kept for audit and replay.
    pub input_params: serde_json::Value,
    /// Opaque pointer to the result (the job id here).
    pub result_reference: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

pub trait JobStore {
    fn record(&self, job: &JobRecord) -> Result<()>;
}

/// Append-only JSON-lines store, one object per submission.
pub struct JsonlJobStore {
    path: PathBuf,
}

impl JsonlJobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonlJobStore { path: path.into() }
    }
}

impl JobStore for JsonlJobStore {
    fn record(&self, job: &JobRecord) -> Result<()> {
        let mut line = serde_json::to_string(job).context("Could not serialize job record")?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Could not open job log '{}'", self.path.display()))?;
        // One write per record keeps concurrent appends line-atomic.
        file.write_all(line.as_bytes())
            .with_context(|| format!("Could not append to job log '{}'", self.path.display()))?;
        Ok(())
    }
}

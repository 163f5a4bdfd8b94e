//! Submission boundary consumed by the portal's API layer.

use anyhow::Context;
use chrono::Utc;
use log::info;

use pandaportal_core::Settings;

use crate::errors::BlastError;
use crate::jobs::{JOB_TYPE_BLAST, JobRecord, JobStore, JsonlJobStore};
use crate::models::{SearchRequest, SearchResult};
use crate::runner::BlastRunner;

/// Accepts one submission, runs it synchronously, and records the outcome.
pub struct BlastService {
    runner: BlastRunner,
    jobs: Box<dyn JobStore + Send + Sync>,
}

impl BlastService {
    /// Production service: real child processes, JSON-lines job log, data
    /// directories created up front.
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        settings
            .ensure_dirs()
            .context("Could not create portal data directories")?;
        Ok(BlastService {
            runner: BlastRunner::new(settings),
            jobs: Box::new(JsonlJobStore::new(settings.job_log.clone())),
        })
    }

    pub fn with_parts(runner: BlastRunner, jobs: Box<dyn JobStore + Send + Sync>) -> Self {
        BlastService { runner, jobs }
    }

    /// Validate and run one search, then persist exactly one job record.
    ///
    /// Validation happens before any scratch file exists or any process is
    /// spawned; a rejected request leaves no trace.
    pub fn submit(
        &self,
        requester_id: &str,
        request: &SearchRequest,
    ) -> Result<SearchResult, BlastError> {
        if request.cleaned_query().is_empty() {
            return Err(BlastError::EmptyQuery);
        }
        if request.num_results < 1 {
            return Err(BlastError::InvalidResultCount(request.num_results));
        }

        let started_at = Utc::now();
        let result = self.runner.run(request)?;

        let input_params =
            serde_json::to_value(request).map_err(|source| BlastError::Record {
                job_id: result.job_id.clone(),
                source: source.into(),
            })?;
        let record = JobRecord {
            requester_id: requester_id.to_string(),
            job_type: JOB_TYPE_BLAST.to_string(),
            status: result.status,
            input_params,
            result_reference: result.job_id.clone(),
            started_at,
            completed_at: result.completed_at,
        };
        self.jobs.record(&record).map_err(|source| BlastError::Record {
            job_id: result.job_id.clone(),
            source,
        })?;

        info!(
            "job {}: {} hits against {} for {}",
            result.job_id,
            result.results.len(),
            result.database,
            requester_id
        );
        Ok(result)
    }
}

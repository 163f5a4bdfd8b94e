//! One alignment search end-to-end.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use rand::Rng;
use rand::thread_rng;

use pandaportal_core::Settings;

use crate::errors::BlastError;
use crate::models::{Hit, JobStatus, SearchRequest, SearchResult, query_length};
use crate::process::{ProcessRunner, SystemProcessRunner, ToolOutcome};
use crate::scratch::JobScratch;
use crate::synth::synthesize_hits;
use crate::xml;

const JOB_ID_LEN: usize = 8;
const JOB_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fresh opaque job identifier: eight base-36 characters, distinct across
/// concurrent submissions with overwhelming probability.
pub fn generate_job_id<R: Rng>(rng: &mut R) -> String {
    (0..JOB_ID_LEN)
        .map(|_| JOB_ID_ALPHABET[rng.gen_range(0..JOB_ID_ALPHABET.len())] as char)
        .collect()
}

/// What to do when the external tool cannot produce a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Degrade to synthesized hits; the caller still sees a completed
    /// result. This is the portal's default and masks tool failures.
    Synthesize,
    /// Surface the failure as an error instead.
    Error,
}

/// Runs one search: staging, invocation, parse-or-fallback.
pub struct BlastRunner {
    blast_db_dir: PathBuf,
    temp_dir: PathBuf,
    timeout: Duration,
    fallback: FallbackPolicy,
    process: Box<dyn ProcessRunner + Send + Sync>,
}

impl BlastRunner {
    pub fn new(settings: &Settings) -> Self {
        Self::with_process_runner(settings, Box::new(SystemProcessRunner))
    }

    pub fn with_process_runner(
        settings: &Settings,
        process: Box<dyn ProcessRunner + Send + Sync>,
    ) -> Self {
        BlastRunner {
            blast_db_dir: settings.blast_db_dir.clone(),
            temp_dir: settings.temp_dir.clone(),
            timeout: settings.blast_timeout(),
            fallback: if settings.blast_fallback {
                FallbackPolicy::Synthesize
            } else {
                FallbackPolicy::Error
            },
            process,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Run one search to completion.
    ///
    /// The caller has already validated the request. Tool failures degrade
    /// to synthesized hits under the `Synthesize` policy, so the returned
    /// status is always `completed`.
    pub fn run(&self, request: &SearchRequest) -> Result<SearchResult, BlastError> {
        let mut rng = thread_rng();
        let job_id = generate_job_id(&mut rng);
        let cleaned = request.cleaned_query();

        // Scratch files are named from the job id and removed when this
        // guard drops, on every exit path below.
        let scratch = JobScratch::stage(&self.temp_dir, &job_id, &cleaned).map_err(|source| {
            BlastError::Stage {
                job_id: job_id.clone(),
                source,
            }
        })?;

        let args = self.build_args(request, &scratch);
        debug!("job {job_id}: invoking {} with {args:?}", request.program);
        let outcome = self.process.run(&request.program, &args, self.timeout);

        let hits = match outcome {
            ToolOutcome::Exited(0) => match xml::parse_report_file(scratch.output_path()) {
                Ok(hits) => hits,
                Err(e) => {
                    // Known weak point: an unreadable report degrades to
                    // zero hits rather than failing the job.
                    warn!("job {job_id}: discarding unparseable report: {e:#}");
                    Vec::new()
                }
            },
            failure => self.degraded_hits(&job_id, failure, &cleaned, request, &mut rng)?,
        };

        Ok(SearchResult {
            job_id,
            status: JobStatus::Completed,
            program: request.program.clone(),
            database: request.database.clone(),
            query_length: query_length(&request.query_sequence),
            results: hits,
            completed_at: Utc::now(),
        })
    }

    /// The single decision point between masking a tool failure and
    /// surfacing it.
    fn degraded_hits<R: Rng>(
        &self,
        job_id: &str,
        failure: ToolOutcome,
        cleaned_query: &str,
        request: &SearchRequest,
        rng: &mut R,
    ) -> Result<Vec<Hit>, BlastError> {
        let reason = match &failure {
            ToolOutcome::Exited(code) => format!("{} exited with code {code}", request.program),
            ToolOutcome::TimedOut => {
                format!("{} timed out after {:?}", request.program, self.timeout)
            }
            ToolOutcome::Unavailable(e) => e.clone(),
        };

        match self.fallback {
            FallbackPolicy::Synthesize => {
                warn!("job {job_id}: {reason}; returning synthesized hits");
                Ok(synthesize_hits(rng, cleaned_query, request.num_results as usize))
            }
            FallbackPolicy::Error => Err(BlastError::ToolUnavailable(reason)),
        }
    }

    fn build_args(&self, request: &SearchRequest, scratch: &JobScratch) -> Vec<OsString> {
        vec![
            "-query".into(),
            scratch.query_path().into(),
            "-db".into(),
            self.blast_db_dir.join(&request.database).into(),
            "-evalue".into(),
            request.expect.to_string().into(),
            "-num_descriptions".into(),
            request.num_results.to_string().into(),
            "-outfmt".into(),
            "5".into(),
            "-out".into(),
            scratch.output_path().into(),
        ]
    }
}

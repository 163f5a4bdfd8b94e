use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlastError {
    #[error("Query sequence is empty")]
    EmptyQuery,

    #[error("num_results must be at least 1 (got {0})")]
    InvalidResultCount(u32),

    #[error("Alignment tool failed and fallback is disabled: {0}")]
    ToolUnavailable(String),

    #[error("Can't stage query for job {job_id}: {source}")]
    Stage {
        job_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Can't record job {job_id}: {source}")]
    Record {
        job_id: String,
        source: anyhow::Error,
    },
}

//! Error types for revsent-score
//!
//! Only pipeline-level failures live here. Per-line parse failures are absorbed
//! by the worker pool and never reach this type.

use thiserror::Error;

/// Pipeline error type
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source, storage, configuration or lexicon failure
    #[error(transparent)]
    Common(#[from] revsent_common::Error),

    /// Worker thread pool could not be created
    #[error("Worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Blocking scoring task panicked or was cancelled
    #[error("Scoring task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Summary export failed
    #[error("Summary export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Common(revsent_common::Error::Io(err))
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

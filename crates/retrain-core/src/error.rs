//! Error taxonomy for the retrain pipeline.

use crate::types::Variant;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, RetrainError>;

/// All the ways a pipeline run can go wrong.
#[derive(Debug, thiserror::Error)]
pub enum RetrainError {
    /// Input data drifted past the gate threshold. Fatal: the run
    /// aborts before any variant is trained.
    #[error("data drift exceeded: score {score:.2} > threshold {threshold:.2}")]
    DataDriftExceeded { score: f64, threshold: f64 },

    /// The selector could not find a performance record for a variant.
    /// Fatal: selection needs both records.
    #[error("missing metrics for variant {0}")]
    MissingMetrics(Variant),

    /// Notification transport failure. Logged by callers, never fatal
    /// to a run.
    #[error("channel error: {0}")]
    Channel(String),

    #[error("config error: {0}")]
    Config(String),
}

impl RetrainError {
    /// True when the error aborts the run before the notify stage can
    /// be considered at all (the drift gate fired).
    pub fn is_drift(&self) -> bool {
        matches!(self, RetrainError::DataDriftExceeded { .. })
    }
}

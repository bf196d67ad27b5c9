//! Data validation gate — the first stage of every run.
//!
//! A drift score above `DRIFT_THRESHOLD` aborts the run before any
//! variant is trained. The detector itself is a seam: production
//! would compute a real distributional-distance score, here we sample
//! one.

use retrain_core::{Result, RetrainError};

/// Drift scores above this abort the run.
pub const DRIFT_THRESHOLD: f64 = 0.95;

/// Produces a drift score in [0, 1) for the current input data.
pub trait DriftDetector: Send + Sync {
    fn sample(&self) -> f64;
}

/// Stand-in detector: uniform random drift.
#[derive(Debug, Default)]
pub struct RandomDrift;

impl DriftDetector for RandomDrift {
    fn sample(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Run the drift gate. Returns the sampled score on success.
pub fn check_drift(detector: &dyn DriftDetector) -> Result<f64> {
    let score = detector.sample();
    tracing::info!("🔎 Data drift check: {score:.2}");
    if score > DRIFT_THRESHOLD {
        return Err(RetrainError::DataDriftExceeded {
            score,
            threshold: DRIFT_THRESHOLD,
        });
    }
    tracing::info!("Data validated");
    Ok(score)
}

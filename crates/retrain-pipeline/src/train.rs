//! Variant training — simulated here, swappable for the real thing.
//!
//! The contract is the seam: variant in, `PerformanceRecord` out. A
//! real training routine can replace `SimulatedTrainer` without
//! touching the graph. Invocations share no mutable state, so the two
//! per-run variants may run concurrently.

use async_trait::async_trait;
use rand::Rng;
use retrain_core::{PerformanceRecord, Result, Variant};

/// Trains one variant and reports its evaluation scores.
#[async_trait]
pub trait Trainer: Send + Sync {
    async fn train(&self, variant: Variant) -> Result<PerformanceRecord>;
}

/// Stand-in trainer: each score sampled uniformly from [0.70, 0.95],
/// both ends inclusive.
#[derive(Debug, Default)]
pub struct SimulatedTrainer;

const SCORE_LOW: f64 = 0.70;
const SCORE_HIGH: f64 = 0.95;

#[async_trait]
impl Trainer for SimulatedTrainer {
    async fn train(&self, variant: Variant) -> Result<PerformanceRecord> {
        tracing::info!("🧪 Training experiment started: {variant}");
        let record = {
            let mut rng = rand::thread_rng();
            PerformanceRecord::new(
                variant,
                rng.gen_range(SCORE_LOW..=SCORE_HIGH),
                rng.gen_range(SCORE_LOW..=SCORE_HIGH),
                rng.gen_range(SCORE_LOW..=SCORE_HIGH),
                rng.gen_range(SCORE_LOW..=SCORE_HIGH),
            )
        };
        tracing::info!(
            "Experiment {variant} done: acc={:.4} f1={:.4}",
            record.accuracy,
            record.f1
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_scores_in_range() {
        let trainer = SimulatedTrainer;
        for _ in 0..50 {
            let rec = trainer.train(Variant::RandomForest).await.unwrap();
            assert_eq!(rec.variant, Variant::RandomForest);
            for score in [rec.accuracy, rec.precision, rec.recall, rec.f1] {
                assert!((SCORE_LOW..=SCORE_HIGH).contains(&score));
            }
        }
    }

    #[tokio::test]
    async fn test_trains_any_declared_variant() {
        let trainer = SimulatedTrainer;
        for variant in Variant::ALL {
            let rec = trainer.train(variant).await.unwrap();
            assert_eq!(rec.variant, variant);
        }
    }
}

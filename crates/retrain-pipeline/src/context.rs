//! Per-run context — the typed exchange between pipeline stages.
//!
//! One `RunContext` exists per scheduled invocation and is dropped
//! with it. Slots are write-once, read-many: each trainer publishes
//! its record exactly once, the selector reads both.

use retrain_core::{PerformanceRecord, Result, RetrainError, Variant};

/// Typed inter-stage exchange for a single run. The selection result
/// flows onward as a plain value; only the trainer outputs need a
/// rendezvous point.
#[derive(Debug, Default)]
pub struct RunContext {
    random_forest: Option<PerformanceRecord>,
    gradient_boosting: Option<PerformanceRecord>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a variant's record. Each slot is written at most once
    /// per run.
    pub fn publish(&mut self, record: PerformanceRecord) {
        let slot = self.slot_mut(record.variant);
        debug_assert!(slot.is_none(), "record published twice for {}", record.variant);
        *slot = Some(record);
    }

    /// Read a variant's record, failing when it was never published.
    pub fn metrics(&self, variant: Variant) -> Result<&PerformanceRecord> {
        self.slot(variant)
            .as_ref()
            .ok_or(RetrainError::MissingMetrics(variant))
    }

    /// True when no trainer has published anything yet.
    pub fn is_empty(&self) -> bool {
        self.random_forest.is_none() && self.gradient_boosting.is_none()
    }

    fn slot(&self, variant: Variant) -> &Option<PerformanceRecord> {
        match variant {
            Variant::RandomForest => &self.random_forest,
            Variant::GradientBoosting => &self.gradient_boosting,
        }
    }

    fn slot_mut(&mut self, variant: Variant) -> &mut Option<PerformanceRecord> {
        match variant {
            Variant::RandomForest => &mut self.random_forest,
            Variant::GradientBoosting => &mut self.gradient_boosting,
        }
    }
}

/// Cheap unique run identifier (no uuid crate needed). A process-wide
/// counter keeps ids distinct even on coarse clocks.
pub fn run_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let n = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("run-{:x}-{:x}", t.as_secs(), n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrain_core::PerformanceRecord;

    fn record(variant: Variant) -> PerformanceRecord {
        PerformanceRecord::new(variant, 0.9, 0.9, 0.9, 0.9)
    }

    #[test]
    fn test_publish_then_read() {
        let mut ctx = RunContext::new();
        assert!(ctx.is_empty());
        ctx.publish(record(Variant::RandomForest));
        assert!(!ctx.is_empty());
        assert_eq!(
            ctx.metrics(Variant::RandomForest).unwrap().variant,
            Variant::RandomForest
        );
    }

    #[test]
    fn test_missing_metrics_is_an_error() {
        let mut ctx = RunContext::new();
        ctx.publish(record(Variant::RandomForest));
        let err = ctx.metrics(Variant::GradientBoosting).unwrap_err();
        assert!(matches!(
            err,
            RetrainError::MissingMetrics(Variant::GradientBoosting)
        ));
    }

    #[test]
    fn test_run_ids_are_distinct() {
        let a = run_id();
        let b = run_id();
        assert!(a.starts_with("run-"));
        assert_ne!(a, b);
    }
}

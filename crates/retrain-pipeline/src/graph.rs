//! The pipeline graph executor.
//!
//! Wires validate → train ×2 → select → deploy|skip → notify as one
//! async run over injected stage seams. The branch is a typed `match`
//! on `Route`, so exactly one of deploy/skip happens per run. Failures
//! short-circuit; whether the notifier still fires is the configured
//! `NotifyPolicy`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use retrain_core::{
    NotifyPolicy, Notifier, Result, RetrainError, Route, SelectionResult, Variant,
};
use serde::Serialize;

use crate::context::{RunContext, run_id};
use crate::deploy::Deployer;
use crate::report;
use crate::select::select_best;
use crate::train::Trainer;
use crate::validate::{DriftDetector, check_drift};

/// Stages a run moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Validating,
    Training,
    Selecting,
    Deploying,
    Skipping,
    Notifying,
    Done,
    Failed,
}

/// What one completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub drift_score: f64,
    pub selection: SelectionResult,
    /// Ordered stage trace; contains exactly one of Deploying/Skipping.
    pub states: Vec<RunState>,
    /// Whether the notifier accepted the report.
    pub notified: bool,
}

/// The fixed five-stage retraining graph.
pub struct Pipeline {
    model_version: String,
    notify_policy: NotifyPolicy,
    detector: Arc<dyn DriftDetector>,
    trainer: Arc<dyn Trainer>,
    deployer: Arc<dyn Deployer>,
    notifier: Arc<dyn Notifier>,
}

impl Pipeline {
    pub fn new(
        model_version: impl Into<String>,
        notify_policy: NotifyPolicy,
        detector: Arc<dyn DriftDetector>,
        trainer: Arc<dyn Trainer>,
        deployer: Arc<dyn Deployer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            model_version: model_version.into(),
            notify_policy,
            detector,
            trainer,
            deployer,
            notifier,
        }
    }

    /// Execute one end-to-end run.
    pub async fn run(&self) -> Result<RunReport> {
        let run_id = run_id();
        let started_at = Utc::now();
        let mut states = vec![RunState::Validating];
        tracing::info!("▶️ Run {run_id} started (model {})", self.model_version);

        // Drift gate — nothing is trained past a failed gate.
        let drift_score = match check_drift(self.detector.as_ref()) {
            Ok(score) => score,
            Err(err) => {
                tracing::error!("❌ Run {run_id} failed at validation: {err}");
                if self.notify_policy == NotifyPolicy::Always
                    && let RetrainError::DataDriftExceeded { score, .. } = &err
                {
                    self.send(&report::drift_report(&self.model_version, *score))
                        .await;
                }
                states.push(RunState::Failed);
                return Err(err);
            }
        };

        // Both variants train concurrently; neither sees the other's
        // state. The join is the barrier the selector needs.
        states.push(RunState::Training);
        let mut ctx = RunContext::new();
        let (rf, gb) = tokio::join!(
            self.trainer.train(Variant::RandomForest),
            self.trainer.train(Variant::GradientBoosting),
        );
        for outcome in [rf, gb] {
            match outcome {
                Ok(record) => ctx.publish(record),
                Err(err) => tracing::warn!("⚠️ Training failed: {err}"),
            }
        }

        // Selection needs both records; a missing one is fatal here.
        states.push(RunState::Selecting);
        let selection = select_best(
            ctx.metrics(Variant::RandomForest)?,
            ctx.metrics(Variant::GradientBoosting)?,
        );

        match selection.route {
            Route::Deploy => {
                states.push(RunState::Deploying);
                self.deployer
                    .deploy(&self.model_version, &selection.chosen)
                    .await?;
            }
            Route::Skip => {
                states.push(RunState::Skipping);
                tracing::info!("⏭️ Deployment skipped: thresholds not met");
            }
        }

        // Notify runs after either branch. Transport errors are logged
        // and never fail the run.
        states.push(RunState::Notifying);
        let notified = self
            .send(&report::run_report(&self.model_version, &selection))
            .await;

        states.push(RunState::Done);
        tracing::info!("✅ Run {run_id} done: route={}", selection.route);
        Ok(RunReport {
            run_id,
            started_at,
            drift_score,
            selection,
            states,
            notified,
        })
    }

    async fn send(&self, text: &str) -> bool {
        match self.notifier.notify(text).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("⚠️ Notification via {} failed (ignored): {err}", self.notifier.name());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use retrain_core::PerformanceRecord;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedDrift(f64);

    impl DriftDetector for FixedDrift {
        fn sample(&self) -> f64 {
            self.0
        }
    }

    /// Returns canned records; counts invocations; optionally fails
    /// one variant.
    struct StubTrainer {
        rf: PerformanceRecord,
        gb: PerformanceRecord,
        fail: Option<Variant>,
        calls: AtomicUsize,
    }

    impl StubTrainer {
        fn new(rf: PerformanceRecord, gb: PerformanceRecord) -> Self {
            Self {
                rf,
                gb,
                fail: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Trainer for StubTrainer {
        async fn train(&self, variant: Variant) -> Result<PerformanceRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail == Some(variant) {
                return Err(RetrainError::Channel("training crashed".into()));
            }
            Ok(match variant {
                Variant::RandomForest => self.rf.clone(),
                Variant::GradientBoosting => self.gb.clone(),
            })
        }
    }

    #[derive(Default)]
    struct CountingDeployer {
        deploys: AtomicUsize,
    }

    #[async_trait]
    impl Deployer for CountingDeployer {
        async fn deploy(&self, _version: &str, _chosen: &PerformanceRecord) -> Result<()> {
            self.deploys.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        fn name(&self) -> &str {
            "recording"
        }

        async fn notify(&self, text: &str) -> Result<()> {
            self.messages.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn rec(variant: Variant, accuracy: f64, f1: f64) -> PerformanceRecord {
        PerformanceRecord::new(variant, accuracy, 0.82, 0.81, f1)
    }

    struct Harness {
        pipeline: Pipeline,
        trainer: Arc<StubTrainer>,
        deployer: Arc<CountingDeployer>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(drift: f64, trainer: StubTrainer, policy: NotifyPolicy) -> Harness {
        let trainer = Arc::new(trainer);
        let deployer = Arc::new(CountingDeployer::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let pipeline = Pipeline::new(
            "v2.0.0-pro",
            policy,
            Arc::new(FixedDrift(drift)),
            trainer.clone(),
            deployer.clone(),
            notifier.clone(),
        );
        Harness {
            pipeline,
            trainer,
            deployer,
            notifier,
        }
    }

    #[tokio::test]
    async fn test_deploy_route_end_to_end() {
        let trainer = StubTrainer::new(
            rec(Variant::RandomForest, 0.92, 0.90),
            rec(Variant::GradientBoosting, 0.85, 0.80),
        );
        let h = harness(0.10, trainer, NotifyPolicy::MinOneSuccess);

        let result = h.pipeline.run().await.unwrap();
        assert_eq!(result.selection.chosen.variant, Variant::RandomForest);
        assert_eq!(result.selection.route, Route::Deploy);
        assert_eq!(h.trainer.calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.deployer.deploys.load(Ordering::SeqCst), 1);
        assert!(result.states.contains(&RunState::Deploying));
        assert!(!result.states.contains(&RunState::Skipping));
        assert_eq!(*result.states.last().unwrap(), RunState::Done);

        let messages = h.notifier.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("*Accuracy:* 0.9200"));
        assert!(messages[0].contains("*F1-Score:* 0.9000"));
        assert!(result.notified);
    }

    #[tokio::test]
    async fn test_skip_route_still_notifies() {
        let trainer = StubTrainer::new(
            rec(Variant::RandomForest, 0.72, 0.70),
            rec(Variant::GradientBoosting, 0.68, 0.65),
        );
        let h = harness(0.10, trainer, NotifyPolicy::MinOneSuccess);

        let result = h.pipeline.run().await.unwrap();
        assert_eq!(result.selection.route, Route::Skip);
        assert_eq!(h.deployer.deploys.load(Ordering::SeqCst), 0);
        assert!(result.states.contains(&RunState::Skipping));
        assert!(!result.states.contains(&RunState::Deploying));

        let messages = h.notifier.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Deployment Skipped"));
        assert!(messages[0].contains("*F1-Score:* 0.7000"));
    }

    #[tokio::test]
    async fn test_drift_aborts_before_training() {
        let trainer = StubTrainer::new(
            rec(Variant::RandomForest, 0.92, 0.90),
            rec(Variant::GradientBoosting, 0.85, 0.80),
        );
        let h = harness(0.98, trainer, NotifyPolicy::MinOneSuccess);

        let err = h.pipeline.run().await.unwrap_err();
        assert!(err.is_drift());
        assert_eq!(h.trainer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.deployer.deploys.load(Ordering::SeqCst), 0);
        // min-one-success: nothing upstream succeeded, so no message.
        assert!(h.notifier.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drift_with_always_policy_sends_alert() {
        let trainer = StubTrainer::new(
            rec(Variant::RandomForest, 0.92, 0.90),
            rec(Variant::GradientBoosting, 0.85, 0.80),
        );
        let h = harness(0.98, trainer, NotifyPolicy::Always);

        assert!(h.pipeline.run().await.is_err());
        let messages = h.notifier.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Data drift detected: 0.98"));
    }

    #[tokio::test]
    async fn test_failed_trainer_surfaces_missing_metrics() {
        let mut trainer = StubTrainer::new(
            rec(Variant::RandomForest, 0.92, 0.90),
            rec(Variant::GradientBoosting, 0.85, 0.80),
        );
        trainer.fail = Some(Variant::GradientBoosting);
        let h = harness(0.10, trainer, NotifyPolicy::MinOneSuccess);

        let err = h.pipeline.run().await.unwrap_err();
        assert!(matches!(
            err,
            RetrainError::MissingMetrics(Variant::GradientBoosting)
        ));
        assert_eq!(h.deployer.deploys.load(Ordering::SeqCst), 0);
        assert!(h.notifier.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_run_report_serializes_for_audit_logs() {
        let trainer = StubTrainer::new(
            rec(Variant::RandomForest, 0.92, 0.90),
            rec(Variant::GradientBoosting, 0.85, 0.80),
        );
        let h = harness(0.10, trainer, NotifyPolicy::MinOneSuccess);

        let result = h.pipeline.run().await.unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["run_id"].as_str().unwrap().starts_with("run-"));
        assert_eq!(json["selection"]["route"], "Deploy");
        assert_eq!(json["selection"]["chosen"]["variant"], "RandomForest");
        assert_eq!(json["states"][0], "Validating");
        assert_eq!(json["states"].as_array().unwrap().last().unwrap(), "Done");
    }

    /// Delivery that takes wall time still lands before `run`
    /// resolves, so a single-run process can exit right afterwards
    /// without dropping the report mid-flight.
    #[tokio::test(start_paused = true)]
    async fn test_slow_delivery_lands_before_run_resolves() {
        #[derive(Default)]
        struct SlowNotifier {
            messages: Mutex<Vec<String>>,
        }

        #[async_trait]
        impl Notifier for SlowNotifier {
            fn name(&self) -> &str {
                "slow"
            }

            async fn notify(&self, text: &str) -> Result<()> {
                tokio::time::sleep(std::time::Duration::from_millis(250)).await;
                self.messages.lock().unwrap().push(text.to_string());
                Ok(())
            }
        }

        let notifier = Arc::new(SlowNotifier::default());
        let pipeline = Pipeline::new(
            "v2.0.0-pro",
            NotifyPolicy::MinOneSuccess,
            Arc::new(FixedDrift(0.10)),
            Arc::new(StubTrainer::new(
                rec(Variant::RandomForest, 0.92, 0.90),
                rec(Variant::GradientBoosting, 0.85, 0.80),
            )),
            Arc::new(CountingDeployer::default()),
            notifier.clone(),
        );

        let result = pipeline.run().await.unwrap();
        assert!(result.notified);
        assert_eq!(notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tie_break_prefers_gradient_boosting() {
        let trainer = StubTrainer::new(
            rec(Variant::RandomForest, 0.90, 0.85),
            rec(Variant::GradientBoosting, 0.88, 0.85),
        );
        let h = harness(0.10, trainer, NotifyPolicy::MinOneSuccess);

        let result = h.pipeline.run().await.unwrap();
        assert_eq!(result.selection.chosen.variant, Variant::GradientBoosting);
    }
}

//! Model selection — the pipeline's single branching decision.

use retrain_core::{PerformanceRecord, Route, SelectionResult};

/// Deployment gate: chosen accuracy must be at least this.
pub const ACCURACY_THRESHOLD: f64 = 0.80;
/// Deployment gate: chosen f1 must be at least this.
pub const F1_THRESHOLD: f64 = 0.75;

/// Compare two variants' records and decide the route.
///
/// The greater f1 wins; on an exact tie the second record wins, so
/// with declaration-order arguments GradientBoosting is preferred.
/// Route is Deploy iff the chosen record clears both gate thresholds.
pub fn select_best(first: &PerformanceRecord, second: &PerformanceRecord) -> SelectionResult {
    let chosen = if first.f1 > second.f1 { first } else { second };
    tracing::info!("🏆 Best variant: {} with F1={:.4}", chosen.variant, chosen.f1);

    let route = if chosen.accuracy >= ACCURACY_THRESHOLD && chosen.f1 >= F1_THRESHOLD {
        Route::Deploy
    } else {
        Route::Skip
    };

    SelectionResult {
        chosen: chosen.clone(),
        route,
    }
}

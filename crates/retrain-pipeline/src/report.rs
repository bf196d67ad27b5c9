//! Report text sent to the chat channel after a run.

use retrain_core::{Route, SelectionResult};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Markdown report for a completed run. All four scores are rendered
/// to four decimal places.
pub fn run_report(model_version: &str, selection: &SelectionResult) -> String {
    let chosen = &selection.chosen;
    let (headline, status) = match selection.route {
        Route::Deploy => (
            format!("*Model Deployed: {model_version}*"),
            "Status: system updated.",
        ),
        Route::Skip => (
            format!("*Deployment Skipped: {model_version}*"),
            "Status: thresholds not met, previous model kept.",
        ),
    };
    format!(
        "{headline}\n\
         {RULE}\n\
         *Best Variant:* {}\n\
         *Accuracy:* {:.4}\n\
         *F1-Score:* {:.4}\n\
         *Precision:* {:.4}\n\
         *Recall:* {:.4}\n\
         {RULE}\n\
         {status}",
        chosen.variant, chosen.accuracy, chosen.f1, chosen.precision, chosen.recall
    )
}

/// Metrics-free alert for a run that failed at the validation gate.
/// Only sent under `NotifyPolicy::Always`.
pub fn drift_report(model_version: &str, drift_score: f64) -> String {
    format!(
        "*Retrain Aborted: {model_version}*\n\
         {RULE}\n\
         Data drift detected: {drift_score:.2}\n\
         No variants were trained.",
    )
}

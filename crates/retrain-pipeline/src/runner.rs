//! Scheduled runner — the loop that fires pipeline runs on time.
//!
//! Tokio interval ticking against wall-clock fire times computed from
//! the cron-lite schedule. Zero overhead between checks. A failed run
//! is logged and the next one is scheduled; retry policy, if any,
//! belongs to whatever supervises the process.

use std::sync::Arc;

use chrono::Utc;

use crate::cron::Schedule;
use crate::graph::Pipeline;

/// Run the pipeline on a schedule, forever.
pub async fn run_scheduled(pipeline: Arc<Pipeline>, schedule: Schedule, check_interval_secs: u64) {
    tracing::info!(
        "⏰ Scheduler started: '{}' (check every {}s)",
        schedule.expression(),
        check_interval_secs
    );

    let mut next = schedule.next_fire(Utc::now());
    if let Some(due) = next {
        tracing::info!("📅 First run at {due}");
    }

    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs(check_interval_secs.max(1)));

    loop {
        interval.tick().await;

        let Some(due) = next else {
            tracing::error!("Schedule produced no next fire time, scheduler stopping");
            return;
        };
        if Utc::now() < due {
            continue;
        }

        match pipeline.run().await {
            Ok(report) => {
                tracing::info!(
                    "📣 Run {} finished: {} via {}",
                    report.run_id,
                    report.selection.chosen.variant,
                    report.selection.route
                );
            }
            Err(err) => {
                tracing::error!("❌ Scheduled run failed: {err}");
            }
        }

        next = schedule.next_fire(Utc::now());
        if let Some(due) = next {
            tracing::info!("📅 Next run at {due}");
        }
    }
}

//! # Retrain Pipeline
//!
//! The five-stage retraining graph with one conditional branch.
//!
//! ## Architecture
//! ```text
//! Pipeline::run
//!   ├── validate: DriftDetector → drift gate (abort on drift > 0.95)
//!   ├── train:    Trainer × {RandomForest, GradientBoosting} (parallel join)
//!   │               └── records published into RunContext (write-once slots)
//!   ├── select:   greater f1 wins → Route::{Deploy, Skip}
//!   ├── branch:   Deploy → Deployer | Skip → marker (exactly one)
//!   └── notify:   report text → Notifier (join policy, fire-and-forget)
//! ```
//!
//! Scheduling lives in `runner` (tokio interval loop over the
//! cron-lite parser in `cron`); the graph itself is schedule-agnostic.

pub mod context;
pub mod cron;
pub mod deploy;
pub mod graph;
pub mod report;
pub mod runner;
pub mod select;
pub mod train;
pub mod validate;

pub use context::{RunContext, run_id};
pub use deploy::{Deployer, LogDeployer};
pub use graph::{Pipeline, RunReport, RunState};
pub use select::{ACCURACY_THRESHOLD, F1_THRESHOLD, select_best};
pub use train::{SimulatedTrainer, Trainer};
pub use validate::{DRIFT_THRESHOLD, DriftDetector, RandomDrift, check_drift};

//! Pipeline data model — variants, performance records, and the
//! selection outcome that drives the deploy/skip branch.

use serde::{Deserialize, Serialize};

/// The closed set of candidate model configurations.
///
/// Declaration order matters: on an exact f1 tie the selector prefers
/// the later-declared variant (see `SelectionResult` docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    RandomForest,
    GradientBoosting,
}

impl Variant {
    /// All variants, in declaration order — the pipeline trains one
    /// of each per run.
    pub const ALL: [Variant; 2] = [Variant::RandomForest, Variant::GradientBoosting];
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::RandomForest => write!(f, "RandomForest"),
            Variant::GradientBoosting => write!(f, "GradientBoosting"),
        }
    }
}

/// One variant's evaluation scores for a single run. Immutable once
/// built; all scores live in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub variant: Variant,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl PerformanceRecord {
    pub fn new(variant: Variant, accuracy: f64, precision: f64, recall: f64, f1: f64) -> Self {
        Self {
            variant,
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// The branch taken after selection. Exactly one route per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Deploy,
    Skip,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Deploy => write!(f, "deploy"),
            Route::Skip => write!(f, "skip"),
        }
    }
}

/// Outcome of comparing the two trained variants.
///
/// `chosen` is the record with the greater f1; on an exact tie the
/// later-declared variant wins (deterministic, covered by tests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub chosen: PerformanceRecord,
    pub route: Route,
}

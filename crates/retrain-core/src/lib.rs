//! # Retrain Core
//!
//! Shared foundation for the retrain pipeline: the data model
//! (variants, performance records, selection results), the error
//! taxonomy, the validated configuration, and the notifier seam that
//! channel implementations plug into.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{NotifyPolicy, RetrainConfig, TelegramConfig};
pub use error::{Result, RetrainError};
pub use traits::Notifier;
pub use types::{PerformanceRecord, Route, SelectionResult, Variant};

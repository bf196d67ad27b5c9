//! # Retrain Channels
//!
//! Outbound notification transports. One real channel (Telegram Bot
//! API) and a log-only fallback for runs without credentials.

pub mod telegram;

pub use telegram::{TelegramNotifier, TelegramNotifierConfig};

use async_trait::async_trait;
use retrain_core::{Notifier, Result};

/// Fallback notifier: writes the report to the log and nothing else.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, text: &str) -> Result<()> {
        tracing::info!("📢 Report:\n{text}");
        Ok(())
    }
}

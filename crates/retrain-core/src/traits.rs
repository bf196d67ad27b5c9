//! Seam traits shared between the pipeline and channel crates.

use async_trait::async_trait;

use crate::error::Result;

/// Outbound notification channel.
///
/// Implementations decide their own delivery semantics; the pipeline
/// treats a returned error as non-fatal and only logs it. A
/// fire-and-forget implementation may return Ok before delivery
/// completes.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver a pre-formatted report text.
    async fn notify(&self, text: &str) -> Result<()>;
}

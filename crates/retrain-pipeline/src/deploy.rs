//! Deployment stage — only reached on the Deploy route.

use async_trait::async_trait;
use retrain_core::{PerformanceRecord, Result};

/// Rolls out the chosen variant under a model version.
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn deploy(&self, model_version: &str, chosen: &PerformanceRecord) -> Result<()>;
}

/// Default deployer: records the rollout in the log.
#[derive(Debug, Default)]
pub struct LogDeployer;

#[async_trait]
impl Deployer for LogDeployer {
    async fn deploy(&self, model_version: &str, chosen: &PerformanceRecord) -> Result<()> {
        tracing::info!(
            "🚀 Deploying version {model_version}, variant {} (f1={:.4})",
            chosen.variant,
            chosen.f1
        );
        Ok(())
    }
}

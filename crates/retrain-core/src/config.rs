//! Retrain configuration system.
//!
//! Loaded once at startup from TOML, then overlaid with the few
//! environment variables the deployment surface exposes, then
//! validated. Pipeline code never reads the environment itself.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, RetrainError};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrainConfig {
    /// Model version string stamped into deploy logs and reports.
    #[serde(default = "default_model_version")]
    pub model_version: String,
    /// Cron-lite schedule (5-field: MIN HOUR DOM MON DOW).
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// How often the scheduled loop wakes up to check the clock.
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
    /// When the notifier runs relative to upstream failures.
    #[serde(default)]
    pub notify_policy: NotifyPolicy,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
}

fn default_model_version() -> String {
    "v2.0.0-pro".into()
}
fn default_schedule() -> String {
    "0 8 * * *".into()
}
fn default_check_interval() -> u64 {
    30
}

impl Default for RetrainConfig {
    fn default() -> Self {
        Self {
            model_version: default_model_version(),
            schedule: default_schedule(),
            check_interval_secs: default_check_interval(),
            notify_policy: NotifyPolicy::default(),
            telegram: None,
        }
    }
}

/// Join policy for the notify stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyPolicy {
    /// Notify only when at least one upstream stage succeeded — a
    /// validation failure sends nothing.
    #[default]
    MinOneSuccess,
    /// Notify on every run; a validation failure sends a metrics-free
    /// drift alert.
    Always,
}

/// Telegram Bot API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
}

fn default_true() -> bool {
    true
}

impl RetrainConfig {
    /// Load config from the default path (~/.retrain/config.toml),
    /// falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RetrainError::Config(format!("failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| RetrainError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Overlay the environment variables the original deployment
    /// exposed: MODEL_VERSION, TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID.
    pub fn apply_env(&mut self) {
        if let Ok(version) = std::env::var("MODEL_VERSION")
            && !version.is_empty()
        {
            self.model_version = version;
        }
        let token = std::env::var("TELEGRAM_BOT_TOKEN").ok().filter(|t| !t.is_empty());
        let chat_id = std::env::var("TELEGRAM_CHAT_ID").ok().filter(|c| !c.is_empty());
        if token.is_some() || chat_id.is_some() {
            let tg = self.telegram.get_or_insert_with(|| TelegramConfig {
                enabled: true,
                bot_token: String::new(),
                chat_id: String::new(),
            });
            if let Some(token) = token {
                tg.bot_token = token;
            }
            if let Some(chat_id) = chat_id {
                tg.chat_id = chat_id;
            }
        }
    }

    /// Fail fast on an unusable configuration.
    pub fn validate(&self) -> Result<()> {
        if self.model_version.trim().is_empty() {
            return Err(RetrainError::Config("model_version must not be empty".into()));
        }
        if let Some(tg) = &self.telegram
            && tg.enabled
        {
            if tg.bot_token.trim().is_empty() {
                return Err(RetrainError::Config(
                    "telegram enabled but bot_token is empty".into(),
                ));
            }
            if tg.chat_id.trim().is_empty() {
                return Err(RetrainError::Config(
                    "telegram enabled but chat_id is empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".retrain")
            .join("config.toml")
    }
}

//! Telegram Bot API notifier — outbound `sendMessage` only.
//!
//! Delivery is fire-and-forget in the sense that nothing consumes the
//! response and nothing retries: one capped POST, and a failure only
//! reaches the log. The send itself runs to completion inside
//! `notify` so a single-run process cannot exit with the report still
//! in flight.

use async_trait::async_trait;
use retrain_core::{Notifier, Result, RetrainError};
use serde::Deserialize;

/// Telegram notifier configuration.
#[derive(Debug, Clone)]
pub struct TelegramNotifierConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub parse_mode: String,
}

impl TelegramNotifierConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            parse_mode: "Markdown".into(),
        }
    }
}

impl From<&retrain_core::TelegramConfig> for TelegramNotifierConfig {
    fn from(config: &retrain_core::TelegramConfig) -> Self {
        Self::new(config.bot_token.clone(), config.chat_id.clone())
    }
}

/// Sends run reports to a Telegram chat.
#[derive(Clone)]
pub struct TelegramNotifier {
    config: TelegramNotifierConfig,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramNotifierConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "https://api.telegram.org/bot{}/{}",
            self.config.bot_token, method
        )
    }

    fn payload(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": self.config.parse_mode,
        })
    }

    /// One synchronous-in-spirit send: POST, check the API's ok flag.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&self.payload(text))
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| RetrainError::Channel(format!("sendMessage failed: {e}")))?;

        let result: TelegramApiResponse = response
            .json()
            .await
            .map_err(|e| RetrainError::Channel(format!("invalid Telegram response: {e}")))?;

        if !result.ok {
            return Err(RetrainError::Channel(format!(
                "Telegram API error: {}",
                result.description.unwrap_or_default()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    /// One capped POST, no retry. The caller treats an error as
    /// non-fatal; completing the send here keeps the report from being
    /// dropped when the process exits right after the run.
    async fn notify(&self, text: &str) -> Result<()> {
        self.send_message(text).await?;
        tracing::info!("✅ Telegram report sent");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> TelegramNotifier {
        TelegramNotifier::new(TelegramNotifierConfig::new("123:abc", "-100200300"))
    }

    #[test]
    fn test_api_url_embeds_token_and_method() {
        assert_eq!(
            notifier().api_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_payload_shape() {
        let payload = notifier().payload("*hello*");
        assert_eq!(payload["chat_id"], "-100200300");
        assert_eq!(payload["text"], "*hello*");
        assert_eq!(payload["parse_mode"], "Markdown");
    }

    #[test]
    fn test_api_response_parses_failure() {
        let body = r#"{"ok": false, "description": "chat not found"}"#;
        let parsed: TelegramApiResponse = serde_json::from_str(body).unwrap();
        assert!(!parsed.ok);
        assert_eq!(parsed.description.as_deref(), Some("chat not found"));
    }
}

use std::time::Duration;

use monitor_logging::monitor_debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification transport error: {0}")]
    Transport(String),
    #[error("notification rejected with http status {0}")]
    HttpStatus(u16),
}

/// Delivers a rendered report. Failures surface to the caller; the engine
/// never retries a notification.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    /// Overridable for tests; production use keeps the default.
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
    pub request_timeout: Duration,
}

impl TelegramSettings {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            request_timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// Sends messages through the Telegram Bot API `sendMessage` method.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    settings: TelegramSettings,
}

impl TelegramNotifier {
    pub fn new(settings: TelegramSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let url = format!(
            "{}/bot{}/sendMessage",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.bot_token
        );
        let body = SendMessageBody {
            chat_id: &self.settings.chat_id,
            text,
            disable_web_page_preview: true,
        };

        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::HttpStatus(status.as_u16()));
        }

        monitor_debug!("Delivered notification of {} chars", text.chars().count());
        Ok(())
    }
}

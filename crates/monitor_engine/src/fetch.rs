use std::time::Duration;

use monitor_logging::{monitor_debug, monitor_warn};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

use crate::types::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(25),
            user_agent: "Mozilla/5.0 (compatible; ListingMonitor/1.0)".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                .to_string(),
            accept_language: "fr-FR,fr;q=0.9,en;q=0.7".to_string(),
        }
    }
}

/// Retry schedule for the page fetch: after failed attempt `n` (1-based)
/// the fetcher sleeps `backoff_unit * 2n` before the next attempt. No sleep
/// follows the final attempt. The unit is injectable so tests run in
/// milliseconds instead of seconds.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_unit * (2 * attempt)
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches the listing page over HTTP with a static header set and a
/// bounded, strictly sequential retry loop.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    settings: FetchSettings,
    retry: RetryPolicy,
}

impl PageFetcher {
    pub fn new(settings: FetchSettings, retry: RetryPolicy) -> Self {
        Self { settings, retry }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn attempt(
        &self,
        client: &reqwest::Client,
        url: &reqwest::Url,
    ) -> Result<String, FetchError> {
        let response = client
            .get(url.clone())
            .header(USER_AGENT, &self.settings.user_agent)
            .header(ACCEPT, &self.settings.accept)
            .header(ACCEPT_LANGUAGE, &self.settings.accept_language)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.text().await.map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl Fetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let mut last: Option<FetchError> = None;
        for attempt in 1..=self.retry.max_attempts {
            match self.attempt(&client, &parsed).await {
                Ok(body) => {
                    monitor_debug!("Fetched {} bytes on attempt {}", body.len(), attempt);
                    return Ok(body);
                }
                Err(err) => {
                    monitor_warn!(
                        "Fetch attempt {}/{} failed: {}",
                        attempt,
                        self.retry.max_attempts,
                        err
                    );
                    let exhausted = attempt == self.retry.max_attempts;
                    last = Some(err);
                    if !exhausted {
                        tokio::time::sleep(self.retry.delay_after(attempt)).await;
                    }
                }
            }
        }

        Err(last.unwrap_or_else(|| {
            FetchError::new(FailureKind::Network, "retry policy allows zero attempts")
        }))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

//! Resilient page fetching.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::CrawlSettings;

/// Identifying user agent so site operators can see who is crawling and why.
pub const USER_AGENT: &str =
    "RecipeHarvest/0.3 (recipe crawler; +https://github.com/recipeharvest/recipeharvest)";

/// Terminal fetch failure for one URL, after retries are exhausted.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Fetches a page body as HTML text.
///
/// The crawler only depends on this trait; tests substitute a fixture
/// implementation serving canned pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP fetcher with bounded retries and linear backoff.
pub struct HttpFetcher {
    client: reqwest::Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Create a fetcher from crawl settings.
    pub fn new(settings: &CrawlSettings) -> Self {
        let user_agent = settings.user_agent.as_deref().unwrap_or(USER_AGENT);
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(settings.fetch_timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_attempts: settings.fetch_attempts.max(1),
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
        }
    }

    async fn attempt(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetch with up to `max_attempts` tries. Backoff is linear in the
    /// attempt index and applied before each retry, never after the final
    /// attempt.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.attempt(url).await {
                Ok(body) => {
                    debug!(url, attempt, "fetched page");
                    return Ok(body);
                }
                Err(e) => {
                    if attempt >= self.max_attempts {
                        warn!(url, attempt, error = %e, "fetch failed, giving up");
                        return Err(e);
                    }
                    let backoff = self.retry_delay * attempt;
                    warn!(url, attempt, backoff_ms = backoff.as_millis() as u64, error = %e,
                        "fetch failed, retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_identifies_the_crawler() {
        assert!(USER_AGENT.contains("RecipeHarvest"));
        assert!(USER_AGENT.contains("+https://"));
    }

    #[test]
    fn test_custom_user_agent_from_settings() {
        let settings = CrawlSettings {
            user_agent: Some("TestBot/1.0".to_string()),
            ..Default::default()
        };
        // Construction applies the override; the client itself is opaque,
        // so just make sure the builder path accepts it.
        let fetcher = HttpFetcher::new(&settings);
        assert_eq!(fetcher.max_attempts, 3);
        assert_eq!(fetcher.retry_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_attempt_floor_is_one() {
        let settings = CrawlSettings {
            fetch_attempts: 0,
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(&settings);
        assert_eq!(fetcher.max_attempts, 1);
    }
}

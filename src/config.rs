//! Configuration management for RecipeHarvest.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default courtesy delay between detail-page requests (milliseconds).
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 2000;

/// Default number of fetch attempts per URL.
pub const DEFAULT_FETCH_ATTEMPTS: u32 = 3;

/// Default base delay for linear retry backoff (milliseconds).
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Default per-attempt fetch timeout (seconds).
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Default scheduler interval (hours).
pub const DEFAULT_SCHEDULE_HOURS: u64 = 24;

/// Application settings, loaded from a TOML file with environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the database and any working files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Crawl behavior tuning.
    #[serde(default)]
    pub crawl: CrawlSettings,
}

/// Crawl behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSettings {
    /// Courtesy delay between detail-page requests, in milliseconds.
    /// Applied per link, never parallelized away.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Number of fetch attempts per URL before giving up.
    #[serde(default = "default_fetch_attempts")]
    pub fetch_attempts: u32,

    /// Base delay for linear retry backoff, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Per-attempt fetch timeout, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Scheduler interval, in hours.
    #[serde(default = "default_schedule_hours")]
    pub schedule_hours: u64,

    /// Custom user agent string. None uses the default RecipeHarvest agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recipeharvest")
}

fn default_request_delay_ms() -> u64 {
    DEFAULT_REQUEST_DELAY_MS
}

fn default_fetch_attempts() -> u32 {
    DEFAULT_FETCH_ATTEMPTS
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_schedule_hours() -> u64 {
    DEFAULT_SCHEDULE_HOURS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            crawl: CrawlSettings::default(),
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            fetch_attempts: default_fetch_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            schedule_hours: default_schedule_hours(),
            user_agent: None,
        }
    }
}

impl Settings {
    /// Load settings from an explicit config file, or fall back to
    /// `recipeharvest.toml` in the data directory, then to defaults.
    ///
    /// The `RECIPEHARVEST_DATA_DIR` environment variable overrides the
    /// data directory from any source.
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = default_data_dir().join("recipeharvest.toml");
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(dir) = std::env::var("RECIPEHARVEST_DATA_DIR") {
            settings.data_dir = PathBuf::from(dir);
        }

        Ok(settings)
    }

    /// Parse settings from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path.display(), e))?;
        let settings = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(settings)
    }

    /// Path to the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("recipeharvest.db")
    }

    /// Courtesy delay between detail-page requests.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.crawl.request_delay_ms)
    }

    /// Base delay for linear retry backoff.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.crawl.retry_delay_ms)
    }

    /// Per-attempt fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.crawl.fetch_timeout_secs)
    }

    /// Scheduler interval.
    pub fn schedule_interval(&self) -> Duration {
        Duration::from_secs(self.crawl.schedule_hours * 3600)
    }
}

//! Configuration types for option-odds
//!
//! Every field has a default, so a missing or partial TOML file still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Market data provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Chart API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Lookback range requested from the provider
    #[serde(default = "default_range")]
    pub range: String,

    /// Bar interval
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Retries after the first failed request (0 = no retry)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry (milliseconds)
    #[serde(default = "default_initial_retry_delay_ms")]
    pub initial_retry_delay_ms: u64,

    /// Cap on the doubled retry delay (milliseconds)
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,
}

fn default_base_url() -> String {
    crate::market::YAHOO_API_URL.to_string()
}
fn default_range() -> String {
    "3mo".to_string()
}
fn default_interval() -> String {
    "1d".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    concat!("option-odds/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_max_retries() -> u32 {
    2
}
fn default_initial_retry_delay_ms() -> u64 {
    500
}
fn default_max_retry_delay_ms() -> u64 {
    5_000
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            range: default_range(),
            interval: default_interval(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            initial_retry_delay_ms: default_initial_retry_delay_ms(),
            max_retry_delay_ms: default_max_retry_delay_ms(),
        }
    }
}

/// Analysis thresholds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Fewest closes accepted (raised to 2 if lower)
    #[serde(default = "default_min_price_points")]
    pub min_price_points: usize,

    /// Warn when the history is shorter than this
    #[serde(default = "default_recommended_price_points")]
    pub recommended_price_points: usize,
}

fn default_min_price_points() -> usize {
    2
}
fn default_recommended_price_points() -> usize {
    20
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_price_points: default_min_price_points(),
            recommended_price_points: default_recommended_price_points(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Output format for the analysis
    #[serde(default)]
    pub format: OutputFormat,

    /// Where to write the chart specification, if anywhere
    #[serde(default)]
    pub chart_output: Option<PathBuf>,
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain-English report
    #[default]
    Text,
    /// Analysis record as JSON
    Json,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, returning `None` when the file does not exist
    ///
    /// Unreadable or malformed files are still errors.
    pub fn load_optional(path: impl AsRef<std::path::Path>) -> anyhow::Result<Option<Self>> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(anyhow::anyhow!("Failed to read {}: {}", path.display(), e)),
        };

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        Ok(Some(config))
    }
}

//! Yahoo Finance chart API client
//!
//! Fetches daily closes from the public v8 chart endpoint. Transient failures
//! (transport errors, HTTP 429, HTTP 5xx) are retried with exponential
//! backoff; everything else fails the fetch immediately.

use super::{PriceHistorySource, PricePoint, PriceSeries};
use crate::config::DataConfig;
use crate::error::AnalysisError;
use crate::telemetry::{self, CounterMetric, LatencyMetric};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Yahoo Finance API base URL
pub const YAHOO_API_URL: &str = "https://query1.finance.yahoo.com";

/// Configuration for the Yahoo client
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL for the chart API
    pub base_url: String,
    /// Lookback range (e.g. "3mo")
    pub range: String,
    /// Bar interval (e.g. "1d")
    pub interval: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header; the endpoint rejects requests without one
    pub user_agent: String,
    /// Retries after the first attempt (0 = no retry)
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_retry_delay: Duration,
    /// Upper bound for the doubled delay
    pub max_retry_delay: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_API_URL.to_string(),
            range: "3mo".to_string(),
            interval: "1d".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: concat!("option-odds/", env!("CARGO_PKG_VERSION")).to_string(),
            max_retries: 2,
            initial_retry_delay: Duration::from_millis(500),
            max_retry_delay: Duration::from_secs(5),
        }
    }
}

impl YahooConfig {
    /// Set the lookback range
    pub fn range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    /// Set maximum retries
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set initial retry delay
    pub fn initial_delay(mut self, d: Duration) -> Self {
        self.initial_retry_delay = d;
        self
    }

    /// Set maximum retry delay
    pub fn max_delay(mut self, d: Duration) -> Self {
        self.max_retry_delay = d;
        self
    }
}

impl From<&DataConfig> for YahooConfig {
    fn from(config: &DataConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            range: config.range.clone(),
            interval: config.interval.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            initial_retry_delay: Duration::from_millis(config.initial_retry_delay_ms),
            max_retry_delay: Duration::from_millis(config.max_retry_delay_ms),
        }
    }
}

/// Client for the Yahoo Finance chart API
pub struct YahooClient {
    config: YahooConfig,
    client: Client,
}

/// Outcome of a single failed request
#[derive(Debug)]
enum AttemptError {
    /// Worth retrying
    Transient(String),
    /// Retrying cannot help
    Permanent(String),
}

impl YahooClient {
    /// Create a client with default configuration
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: YahooConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// Fetch the chart payload, retrying transient failures
    async fn fetch_chart(&self, ticker: &str) -> Result<ChartResponse, AnalysisError> {
        let mut retries = 0;
        let mut retry_delay = self.config.initial_retry_delay;

        loop {
            let started = Instant::now();
            let attempt = self.fetch_once(ticker).await;
            telemetry::record_latency(LatencyMetric::PriceFetch, started.elapsed());

            match attempt {
                Ok(chart) => return Ok(chart),
                Err(AttemptError::Transient(reason)) if retries < self.config.max_retries => {
                    retries += 1;
                    telemetry::increment_counter(CounterMetric::FetchRetries);
                    tracing::warn!(
                        ticker,
                        attempt = retries,
                        delay_ms = retry_delay.as_millis() as u64,
                        error = %reason,
                        "Price history request failed, retrying..."
                    );

                    sleep(retry_delay).await;
                    retry_delay = (retry_delay * 2).min(self.config.max_retry_delay);
                }
                Err(AttemptError::Transient(reason)) | Err(AttemptError::Permanent(reason)) => {
                    return Err(AnalysisError::unavailable(ticker, reason));
                }
            }
        }
    }

    /// Chart endpoint for a ticker; the ticker is percent-encoded as one path segment
    fn chart_url(&self, ticker: &str) -> Result<Url, AttemptError> {
        let invalid = |reason: String| {
            AttemptError::Permanent(format!(
                "Invalid base URL {}: {}",
                self.config.base_url, reason
            ))
        };

        let mut url = Url::parse(&self.config.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        Ok(url)
    }

    async fn fetch_once(&self, ticker: &str) -> Result<ChartResponse, AttemptError> {
        let url = self.chart_url(ticker)?;

        tracing::debug!(url = %url, range = %self.config.range, "Fetching price history");

        let response = self
            .client
            .get(url)
            .query(&[
                ("range", self.config.range.as_str()),
                ("interval", self.config.interval.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AttemptError::Transient(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Transient(e.to_string()))?;

        if !status.is_success() {
            // Error responses usually still carry a chart.error description
            let reason = serde_json::from_str::<ChartResponse>(&body)
                .ok()
                .and_then(|c| c.chart.error)
                .map(|e| format!("{}: {}", e.code, e.description))
                .unwrap_or_else(|| format!("Yahoo API error: {} - {}", status, body));

            return Err(if is_transient(status) {
                AttemptError::Transient(reason)
            } else {
                AttemptError::Permanent(reason)
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| AttemptError::Permanent(format!("Malformed chart response: {}", e)))
    }
}

#[async_trait]
impl PriceHistorySource for YahooClient {
    async fn fetch_history(&self, ticker: &str) -> Result<PriceSeries, AnalysisError> {
        let chart = self.fetch_chart(ticker).await?;
        let series = parse_chart(ticker, chart)?;

        tracing::info!(
            ticker,
            points = series.len(),
            range = %self.config.range,
            "Fetched price history"
        );

        Ok(series)
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Chart endpoint envelope
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    /// Session timestamps in epoch seconds
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

/// Per-session quote arrays; halted sessions come back as nulls
#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Convert a chart payload into a price series
///
/// Null, non-finite, and non-representable closes are skipped.
fn parse_chart(ticker: &str, chart: ChartResponse) -> Result<PriceSeries, AnalysisError> {
    if let Some(error) = chart.chart.error {
        return Err(AnalysisError::unavailable(
            ticker,
            format!("{}: {}", error.code, error.description),
        ));
    }

    let result = chart
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| AnalysisError::unavailable(ticker, "Empty chart result"))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close.filter(|c| c.is_finite())?;
            let close = Decimal::try_from(close).ok()?.round_dp(6);
            let timestamp = DateTime::from_timestamp(ts, 0)?;
            Some(PricePoint::new(timestamp, close))
        })
        .collect();

    if points.is_empty() {
        return Err(AnalysisError::unavailable(ticker, "No closing prices returned"));
    }

    Ok(PriceSeries::new(ticker, points))
}

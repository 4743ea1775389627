//! Market data module
//!
//! Daily price history for a single ticker, fetched from an external provider

mod yahoo;

pub use yahoo::{YahooClient, YahooConfig, YAHOO_API_URL};

use crate::error::AnalysisError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Session timestamp
    pub timestamp: DateTime<Utc>,
    /// Closing price
    pub close: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self { timestamp, close }
    }
}

/// Chronologically ascending closes for one ticker, no duplicate timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, ordering points by timestamp
    ///
    /// When a timestamp appears more than once the later point wins.
    pub fn new(ticker: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            ticker: ticker.into(),
            points: deduped,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent closing price
    pub fn last_close(&self) -> Option<Decimal> {
        self.points.last().map(|p| p.close)
    }

    /// Closing prices in chronological order
    pub fn closes(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.close)
    }
}

/// Trait for price history providers
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Fetch the configured lookback of daily closes for `ticker`
    ///
    /// Provider failures of any kind surface as
    /// [`AnalysisError::DataUnavailable`].
    async fn fetch_history(&self, ticker: &str) -> Result<PriceSeries, AnalysisError>;
}

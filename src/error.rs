//! Error types shared by the analysis pipeline

use thiserror::Error;

/// Errors that terminate an analysis call
///
/// None of these are retried or recovered by the core; a failed call never
/// yields a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The market-data provider could not supply a price series
    #[error("Price data unavailable for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },
    /// Too few price points to compute return statistics
    #[error("Insufficient price data: {available} points available, {required} required")]
    InsufficientData { available: usize, required: usize },
    /// An input is non-positive, NaN, infinite, or otherwise out of domain
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl AnalysisError {
    pub(crate) fn unavailable(ticker: &str, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

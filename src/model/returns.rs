//! Return statistics estimation
//!
//! Realized volatility and daily move statistics from simple returns

use crate::error::AnalysisError;
use crate::market::PriceSeries;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Trading days per year used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Fewest closes that produce at least one return
pub const MIN_PRICE_POINTS: usize = 2;

/// Statistics derived from a series of daily returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatistics {
    /// Annualized sample standard deviation of daily returns
    pub volatility: f64,
    /// Mean absolute daily return
    pub avg_daily_move: f64,
    /// Largest daily return
    pub max_daily_gain: f64,
    /// Smallest daily return
    pub max_daily_loss: f64,
}

/// Daily fractional returns: `close[i] / close[i-1] - 1`
///
/// The result has one fewer element than the series. Every close must be a
/// positive finite value.
pub fn daily_returns(series: &PriceSeries) -> Result<Vec<f64>, AnalysisError> {
    let closes = series
        .closes()
        .map(|close| match close.to_f64() {
            Some(c) if c > 0.0 && c.is_finite() => Ok(c),
            _ => Err(AnalysisError::invalid(format!(
                "close price must be positive, got {}",
                close
            ))),
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
}

/// Compute return statistics for a price series
///
/// Requires at least [`MIN_PRICE_POINTS`] closes. A constant series is a
/// valid input and yields all-zero statistics. A single non-zero return has
/// no measurable spread and is rejected as [`AnalysisError::InsufficientData`].
pub fn compute_statistics(series: &PriceSeries) -> Result<ReturnStatistics, AnalysisError> {
    if series.len() < MIN_PRICE_POINTS {
        return Err(AnalysisError::InsufficientData {
            available: series.len(),
            required: MIN_PRICE_POINTS,
        });
    }

    let returns = daily_returns(series)?;
    let n = returns.len() as f64;

    let mean = returns.iter().sum::<f64>() / n;

    // Sample variance needs two returns unless the price never moved
    let variance = match returns.as_slice() {
        [only] if *only != 0.0 => {
            return Err(AnalysisError::InsufficientData {
                available: series.len(),
                required: MIN_PRICE_POINTS + 1,
            })
        }
        [_] => 0.0,
        _ => returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0),
    };
    let volatility = variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt();

    let avg_daily_move = returns.iter().map(|r| r.abs()).sum::<f64>() / n;
    let max_daily_gain = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_daily_loss = returns.iter().copied().fold(f64::INFINITY, f64::min);

    Ok(ReturnStatistics {
        volatility,
        avg_daily_move,
        max_daily_gain,
        max_daily_loss,
    })
}

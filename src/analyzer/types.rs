//! Analysis request and result types

use crate::error::AnalysisError;
use crate::market::PriceSeries;
use crate::model::{OptionType, ReturnStatistics};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default notional attached to a request
pub const DEFAULT_INVESTMENT: Decimal = dec!(1000);

/// Parameters of a single analysis call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Underlying ticker symbol
    pub ticker: String,
    /// Option strike price
    pub strike_price: Decimal,
    /// Calendar days until expiration
    pub days_to_expiry: u32,
    /// Call or put
    pub option_type: OptionType,
    /// Amount invested; informational only
    pub investment_amount: Decimal,
}

impl AnalysisRequest {
    /// Create a call request with the default investment amount
    pub fn new(ticker: impl Into<String>, strike_price: Decimal, days_to_expiry: u32) -> Self {
        Self {
            ticker: ticker.into(),
            strike_price,
            days_to_expiry,
            option_type: OptionType::default(),
            investment_amount: DEFAULT_INVESTMENT,
        }
    }

    /// Set the option direction
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Set the investment amount
    pub fn investment(mut self, amount: Decimal) -> Self {
        self.investment_amount = amount;
        self
    }

    /// Check everything that can be checked before fetching data
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.ticker.trim().is_empty() {
            return Err(AnalysisError::invalid("ticker must not be empty"));
        }
        if !is_valid_ticker(&self.ticker) {
            return Err(AnalysisError::invalid(format!(
                "ticker contains unsupported characters: {:?}",
                self.ticker
            )));
        }
        if self.strike_price <= Decimal::ZERO {
            return Err(AnalysisError::invalid(format!(
                "strike price must be positive, got {}",
                self.strike_price
            )));
        }
        if self.days_to_expiry == 0 {
            return Err(AnalysisError::invalid("days to expiry must be positive"));
        }
        if self.investment_amount <= Decimal::ZERO {
            return Err(AnalysisError::invalid(format!(
                "investment amount must be positive, got {}",
                self.investment_amount
            )));
        }
        Ok(())
    }
}

/// Exchange symbols, index symbols (`^GSPC`), share classes (`BRK-B`, `BF.B`)
/// and currency pairs (`EURUSD=X`)
fn is_valid_ticker(ticker: &str) -> bool {
    ticker
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
        && ticker.chars().any(|c| c.is_ascii_alphanumeric())
}

/// The option position being analyzed, priced at the latest close
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionPosition {
    pub ticker: String,
    /// Last close of the fetched series
    pub current_price: Decimal,
    pub strike_price: Decimal,
    pub days_to_expiry: u32,
    pub option_type: OptionType,
    pub investment_amount: Decimal,
}

/// Result of one analysis call
///
/// Serializes as a single flat record of position fields, return
/// statistics, and the probability of profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub position: OptionPosition,
    #[serde(flatten)]
    pub statistics: ReturnStatistics,
    /// Probability of finishing in-the-money, in [0, 1]
    pub probability_of_profit: f64,
}

/// An analysis result together with the history it was computed from
#[derive(Debug, Clone)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub history: PriceSeries,
}

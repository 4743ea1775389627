//! Statistical model module
//!
//! Realized return statistics and the log-normal probability-of-profit model

mod lognormal;
mod returns;

pub use lognormal::{probability_of_profit, LogNormalModel};
pub use returns::{
    compute_statistics, daily_returns, ReturnStatistics, MIN_PRICE_POINTS, TRADING_DAYS_PER_YEAR,
};

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar days per year used to scale time to expiry
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// Option direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Profits when the terminal price ends above the strike
    #[default]
    Call,
    /// Profits when the terminal price ends below the strike
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Parameters for probability-of-profit calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitParams {
    /// Current underlying price
    pub current_price: f64,
    /// Option strike price
    pub strike_price: f64,
    /// Calendar days until expiration
    pub days_to_expiry: u32,
    /// Annualized volatility estimate
    pub volatility: f64,
    /// Call or put
    pub option_type: OptionType,
}

/// Trait for probability-of-profit model implementations
pub trait ProfitModel: Send + Sync {
    /// Probability in [0, 1] that the option finishes in-the-money
    fn probability(&self, params: &ProfitParams) -> Result<f64, AnalysisError>;
}

//! Report module
//!
//! Plain-English report, payoff curve, and chart specification built from
//! an [`AnalysisResult`]. Nothing here feeds back into the analysis.

mod chart;
mod payoff;
mod text;

pub use chart::{write_chart, ChartSpec, PayoffPanel, PriceHistoryPanel, ProfitZone};
pub use payoff::{intrinsic_value, payoff_curve, PayoffPoint, PAYOFF_POINTS, PAYOFF_RANGE};
pub use text::render_text;

use crate::analyzer::{AnalysisResult, OptionPosition};
use crate::model::OptionType;
use rust_decimal::Decimal;
use std::fmt;

/// Where the current price sits relative to the strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moneyness {
    /// Positive intrinsic value of `amount` per share
    InTheMoney { amount: Decimal },
    /// The underlying must move `needed` per share to reach the strike
    OutOfTheMoney { needed: Decimal },
}

impl Moneyness {
    pub fn of(position: &OptionPosition) -> Self {
        let distance = match position.option_type {
            OptionType::Call => position.current_price - position.strike_price,
            OptionType::Put => position.strike_price - position.current_price,
        };

        if distance > Decimal::ZERO {
            Moneyness::InTheMoney { amount: distance }
        } else {
            Moneyness::OutOfTheMoney { needed: -distance }
        }
    }
}

/// Risk bucket derived from annualized volatility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility < 0.15 {
            RiskLevel::Low
        } else if volatility < 0.30 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Suggested handling for this level of risk
    pub fn recommendations(self) -> [&'static str; 2] {
        match self {
            RiskLevel::High => [
                "Consider using stop losses to manage risk",
                "Think about taking partial profits if available",
            ],
            RiskLevel::Medium => [
                "Monitor the position regularly",
                "Have a clear exit strategy",
            ],
            RiskLevel::Low => [
                "Stay within your investment plan",
                "Watch for changes in market conditions",
            ],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Urgency based on days left until expiration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePressure {
    /// Under a week
    Immediate,
    /// Under 30 days
    MonitorClosely,
    /// 30 days or more
    TimeOnYourSide,
}

impl TimePressure {
    pub fn from_days(days_to_expiry: u32) -> Self {
        if days_to_expiry < 7 {
            TimePressure::Immediate
        } else if days_to_expiry < 30 {
            TimePressure::MonitorClosely
        } else {
            TimePressure::TimeOnYourSide
        }
    }
}

/// Intrinsic value per share after a relative move in the underlying
pub fn scenario_value(result: &AnalysisResult, move_pct: Decimal) -> Decimal {
    let position = &result.position;
    let price = position.current_price * (Decimal::ONE + move_pct);
    intrinsic_value(position.option_type, position.strike_price, price)
}

//! Payoff curve at expiration
//!
//! P/L per share is measured against the option's current intrinsic value,
//! not against a premium paid.

use crate::analyzer::OptionPosition;
use crate::model::OptionType;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Number of terminal prices sampled
pub const PAYOFF_POINTS: usize = 100;

/// Fraction of the current price covered on each side
pub const PAYOFF_RANGE: Decimal = dec!(0.30);

/// P/L per share at one terminal price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffPoint {
    /// Underlying price at expiration
    pub price: Decimal,
    /// Profit or loss per share
    pub profit: Decimal,
}

/// Intrinsic value per share at `price`
pub fn intrinsic_value(option_type: OptionType, strike: Decimal, price: Decimal) -> Decimal {
    let value = match option_type {
        OptionType::Call => price - strike,
        OptionType::Put => strike - price,
    };
    value.max(Decimal::ZERO)
}

/// Sample P/L over current price +/- 30%
pub fn payoff_curve(position: &OptionPosition) -> Vec<PayoffPoint> {
    let current = position.current_price;
    let strike = position.strike_price;

    let baseline = match position.option_type {
        OptionType::Call => current - strike,
        OptionType::Put => strike - current,
    };

    let low = current * (Decimal::ONE - PAYOFF_RANGE);
    let span = current * PAYOFF_RANGE * dec!(2);
    let steps = Decimal::from(PAYOFF_POINTS as u64 - 1);

    (0..PAYOFF_POINTS)
        .map(|i| {
            let price = low + span * Decimal::from(i as u64) / steps;
            let profit = intrinsic_value(position.option_type, strike, price) - baseline;
            PayoffPoint { price, profit }
        })
        .collect()
}

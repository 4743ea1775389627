//! Log-normal probability-of-profit model
//!
//! Assumes ln(S_T / S) ~ N(0, sigma^2 * T) with no drift, so:
//! P(call in-the-money) = 1 - N(ln(K/S) / (sigma * sqrt(T)))
//! P(put in-the-money)  = N(ln(K/S) / (sigma * sqrt(T)))
//!
//! "Profit" here means finishing in-the-money by any amount. Premium paid is
//! not part of the model.

use super::{OptionType, ProfitModel, ProfitParams, CALENDAR_DAYS_PER_YEAR};
use crate::error::AnalysisError;
use statrs::distribution::{ContinuousCDF, Normal};

/// Driftless log-normal terminal price model
pub struct LogNormalModel {
    /// Standard normal distribution
    normal: Normal,
}

impl LogNormalModel {
    /// Create a new log-normal model
    pub fn new() -> Self {
        Self {
            normal: Normal::standard(),
        }
    }
}

impl Default for LogNormalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfitModel for LogNormalModel {
    fn probability(&self, params: &ProfitParams) -> Result<f64, AnalysisError> {
        validate(params)?;

        let t_years = f64::from(params.days_to_expiry) / CALENDAR_DAYS_PER_YEAR;
        let std_dev_at_expiry = params.volatility * t_years.sqrt();

        // Zero volatility leaves nothing to standardize against
        if !(std_dev_at_expiry > 0.0 && std_dev_at_expiry.is_finite()) {
            return Err(AnalysisError::invalid(format!(
                "volatility must be positive to estimate a probability, got {}",
                params.volatility
            )));
        }

        let threshold = (params.strike_price / params.current_price).ln() / std_dev_at_expiry;

        let prob = match params.option_type {
            OptionType::Call => 1.0 - self.normal.cdf(threshold),
            OptionType::Put => self.normal.cdf(threshold),
        };

        Ok(prob.clamp(0.0, 1.0))
    }
}

fn validate(params: &ProfitParams) -> Result<(), AnalysisError> {
    if !(params.current_price > 0.0 && params.current_price.is_finite()) {
        return Err(AnalysisError::invalid(format!(
            "current price must be positive and finite, got {}",
            params.current_price
        )));
    }
    if !(params.strike_price > 0.0 && params.strike_price.is_finite()) {
        return Err(AnalysisError::invalid(format!(
            "strike price must be positive and finite, got {}",
            params.strike_price
        )));
    }
    if params.days_to_expiry == 0 {
        return Err(AnalysisError::invalid("days to expiry must be positive"));
    }
    if !(params.volatility >= 0.0 && params.volatility.is_finite()) {
        return Err(AnalysisError::invalid(format!(
            "volatility must be non-negative and finite, got {}",
            params.volatility
        )));
    }
    Ok(())
}

/// Probability that the option finishes in-the-money at expiration
pub fn probability_of_profit(
    current_price: f64,
    strike_price: f64,
    days_to_expiry: u32,
    volatility: f64,
    option_type: OptionType,
) -> Result<f64, AnalysisError> {
    LogNormalModel::new().probability(&ProfitParams {
        current_price,
        strike_price,
        days_to_expiry,
        volatility,
        option_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_the_money_call() {
        let prob = probability_of_profit(100.0, 100.0, 30, 0.25, OptionType::Call).unwrap();
        // Driftless and symmetric in log space
        assert!((prob - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_the_money_call() {
        let prob = probability_of_profit(150.0, 170.0, 30, 0.25, OptionType::Call).unwrap();
        // z = ln(170/150) / (0.25 * sqrt(30/365)) ~= 1.746
        assert!(prob > 0.03 && prob < 0.05, "prob = {}", prob);
    }

    #[test]
    fn test_call_and_put_are_complementary() {
        let call = probability_of_profit(150.0, 170.0, 45, 0.35, OptionType::Call).unwrap();
        let put = probability_of_profit(150.0, 170.0, 45, 0.35, OptionType::Put).unwrap();
        assert!((call + put - 1.0).abs() < 1e-12);
        assert!(put > call);
    }

    #[test]
    fn test_call_non_increasing_in_strike() {
        let mut prev = f64::INFINITY;
        for strike in (50..=200).step_by(5) {
            let prob =
                probability_of_profit(100.0, strike as f64, 30, 0.4, OptionType::Call).unwrap();
            assert!(prob <= prev, "strike {} raised call probability", strike);
            prev = prob;
        }
    }

    #[test]
    fn test_put_non_decreasing_in_strike() {
        let mut prev = f64::NEG_INFINITY;
        for strike in (50..=200).step_by(5) {
            let prob =
                probability_of_profit(100.0, strike as f64, 30, 0.4, OptionType::Put).unwrap();
            assert!(prob >= prev, "strike {} lowered put probability", strike);
            prev = prob;
        }
    }

    #[test]
    fn test_probability_within_unit_interval() {
        let cases = [
            (100.0, 1.0, 1, 0.05),
            (1.0, 1000.0, 1, 0.05),
            (100.0, 100.0, 3650, 5.0),
            (250.0, 240.0, 7, 0.9),
        ];
        for (current, strike, days, vol) in cases {
            for option_type in [OptionType::Call, OptionType::Put] {
                let prob = probability_of_profit(current, strike, days, vol, option_type).unwrap();
                assert!((0.0..=1.0).contains(&prob));
            }
        }
    }

    #[test]
    fn test_volatility_pulls_out_of_the_money_toward_half() {
        let low = probability_of_profit(100.0, 120.0, 30, 0.2, OptionType::Call).unwrap();
        let high = probability_of_profit(100.0, 120.0, 30, 0.6, OptionType::Call).unwrap();
        assert!(low < high);
        assert!((high - 0.5).abs() < (low - 0.5).abs());
    }

    #[test]
    fn test_volatility_pushes_deep_in_the_money_away_from_one() {
        let low = probability_of_profit(150.0, 100.0, 30, 0.3, OptionType::Call).unwrap();
        let high = probability_of_profit(150.0, 100.0, 30, 0.8, OptionType::Call).unwrap();
        assert!(high < low);
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let err = probability_of_profit(100.0, 100.0, 30, 0.0, OptionType::Call).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let cases = [
            (0.0, 100.0, 30, 0.2),
            (-5.0, 100.0, 30, 0.2),
            (100.0, 0.0, 30, 0.2),
            (100.0, 100.0, 0, 0.2),
            (100.0, 100.0, 30, -0.2),
            (f64::NAN, 100.0, 30, 0.2),
            (100.0, f64::INFINITY, 30, 0.2),
            (100.0, 100.0, 30, f64::NAN),
        ];
        for (current, strike, days, vol) in cases {
            let result = probability_of_profit(current, strike, days, vol, OptionType::Put);
            assert!(
                matches!(result, Err(AnalysisError::InvalidParameter(_))),
                "accepted current={} strike={} days={} vol={}",
                current,
                strike,
                days,
                vol
            );
        }
    }

    #[test]
    fn test_trait_matches_free_function() {
        let model = LogNormalModel::default();
        let params = ProfitParams {
            current_price: 182.5,
            strike_price: 175.0,
            days_to_expiry: 21,
            volatility: 0.28,
            option_type: OptionType::Put,
        };
        let via_trait = model.probability(&params).unwrap();
        let via_fn = probability_of_profit(182.5, 175.0, 21, 0.28, OptionType::Put).unwrap();
        assert_eq!(via_trait, via_fn);
    }
}

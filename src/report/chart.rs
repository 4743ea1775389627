//! Chart specification export
//!
//! Describes the price-history and payoff panels as JSON. Drawing is left to
//! whatever consumes the file.

use super::payoff::{payoff_curve, PayoffPoint};
use crate::analyzer::AnalysisResult;
use crate::market::{PricePoint, PriceSeries};
use crate::model::OptionType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Price region in which the option finishes in-the-money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "side", content = "bound", rename_all = "lowercase")]
pub enum ProfitZone {
    /// Prices above the bound (calls)
    Above(Decimal),
    /// Prices below the bound (puts)
    Below(Decimal),
}

/// Price history with strike and profit-zone overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryPanel {
    pub title: String,
    pub closes: Vec<PricePoint>,
    pub strike_line: Decimal,
    pub current_marker: Option<PricePoint>,
    pub profit_zone: ProfitZone,
}

/// Profit/loss at expiration against terminal price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPanel {
    pub title: String,
    pub curve: Vec<PayoffPoint>,
    pub zero_line: Decimal,
    pub current_price: Decimal,
    pub strike_price: Decimal,
}

/// Both chart panels for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub ticker: String,
    pub option_type: OptionType,
    pub price_history: PriceHistoryPanel,
    pub payoff: PayoffPanel,
}

impl ChartSpec {
    /// Build the chart panels from a result and the history behind it
    pub fn build(result: &AnalysisResult, history: &PriceSeries) -> Self {
        let position = &result.position;

        let profit_zone = match position.option_type {
            OptionType::Call => ProfitZone::Above(position.strike_price),
            OptionType::Put => ProfitZone::Below(position.strike_price),
        };

        Self {
            ticker: position.ticker.clone(),
            option_type: position.option_type,
            price_history: PriceHistoryPanel {
                title: "Stock Price History and Profit Zones".to_string(),
                closes: history.points().to_vec(),
                strike_line: position.strike_price,
                current_marker: history.points().last().copied(),
                profit_zone,
            },
            payoff: PayoffPanel {
                title: "Potential Profit/Loss Scenarios".to_string(),
                curve: payoff_curve(position),
                zero_line: Decimal::ZERO,
                current_price: position.current_price,
                strike_price: position.strike_price,
            },
        }
    }
}

/// Write the chart specification as pretty JSON
pub fn write_chart(spec: &ChartSpec, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(spec)?;
    std::fs::write(path, json)?;

    tracing::info!(path = %path.display(), "Chart specification written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::OptionPosition;
    use crate::model::ReturnStatistics;
    use crate::report::PAYOFF_POINTS;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn fixture(option_type: OptionType) -> (AnalysisResult, PriceSeries) {
        let base_time = Utc.with_ymd_and_hms(2024, 6, 3, 20, 0, 0).unwrap();
        let history = PriceSeries::new(
            "AAPL",
            vec![
                PricePoint::new(base_time, dec!(148)),
                PricePoint::new(base_time + Duration::days(1), dec!(151)),
                PricePoint::new(base_time + Duration::days(2), dec!(150)),
            ],
        );
        let result = AnalysisResult {
            position: OptionPosition {
                ticker: "AAPL".to_string(),
                current_price: dec!(150),
                strike_price: dec!(170),
                days_to_expiry: 30,
                option_type,
                investment_amount: dec!(1000),
            },
            statistics: ReturnStatistics {
                volatility: 0.25,
                avg_daily_move: 0.013,
                max_daily_gain: 0.02,
                max_daily_loss: -0.0066,
            },
            probability_of_profit: 0.04,
        };
        (result, history)
    }

    #[test]
    fn test_build_call_chart() {
        let (result, history) = fixture(OptionType::Call);
        let spec = ChartSpec::build(&result, &history);

        assert_eq!(spec.price_history.closes.len(), 3);
        assert_eq!(spec.price_history.profit_zone, ProfitZone::Above(dec!(170)));
        assert_eq!(
            spec.price_history.current_marker.map(|p| p.close),
            Some(dec!(150))
        );
        assert_eq!(spec.payoff.curve.len(), PAYOFF_POINTS);
    }

    #[test]
    fn test_build_put_chart() {
        let (result, history) = fixture(OptionType::Put);
        let spec = ChartSpec::build(&result, &history);
        assert_eq!(spec.price_history.profit_zone, ProfitZone::Below(dec!(170)));
    }

    #[test]
    fn test_write_chart() {
        let (result, history) = fixture(OptionType::Call);
        let spec = ChartSpec::build(&result, &history);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        write_chart(&spec, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["ticker"], "AAPL");
        assert_eq!(written["price_history"]["profit_zone"]["side"], "above");
        assert_eq!(written["payoff"]["curve"].as_array().unwrap().len(), PAYOFF_POINTS);
    }

    #[test]
    fn test_write_chart_bad_path() {
        let (result, history) = fixture(OptionType::Call);
        let spec = ChartSpec::build(&result, &history);
        assert!(write_chart(&spec, "/nonexistent/dir/chart.json").is_err());
    }
}

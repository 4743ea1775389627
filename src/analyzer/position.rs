//! Position analyzer
//!
//! price history -> return statistics -> volatility -> probability -> result

use super::{Analysis, AnalysisRequest, AnalysisResult, OptionPosition};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::market::{PriceHistorySource, PriceSeries};
use crate::model::{compute_statistics, LogNormalModel, ProfitModel, ProfitParams, MIN_PRICE_POINTS};
use crate::telemetry::{self, GaugeMetric};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Analyzer thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Fewest closes accepted; never below two
    pub min_price_points: usize,
    /// Below this many closes the volatility estimate is flagged as noisy
    pub recommended_price_points: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_price_points: MIN_PRICE_POINTS,
            recommended_price_points: 20,
        }
    }
}

impl From<&AnalysisConfig> for AnalyzerConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            min_price_points: config.min_price_points.max(MIN_PRICE_POINTS),
            recommended_price_points: config.recommended_price_points,
        }
    }
}

/// Runs single-position analyses against a price history source
pub struct PositionAnalyzer<S> {
    source: S,
    config: AnalyzerConfig,
}

impl<S: PriceHistorySource> PositionAnalyzer<S> {
    /// Create an analyzer with default thresholds
    pub fn new(source: S) -> Self {
        Self::with_config(source, AnalyzerConfig::default())
    }

    /// Create an analyzer with custom thresholds
    pub fn with_config(source: S, config: AnalyzerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Analyze one option position
    ///
    /// Parameters are validated before any data is fetched. A provider
    /// failure ends the call with [`AnalysisError::DataUnavailable`] and no
    /// computation is performed.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis, AnalysisError> {
        request.validate()?;

        tracing::info!(
            ticker = %request.ticker,
            strike = %request.strike_price,
            days_to_expiry = request.days_to_expiry,
            option_type = %request.option_type,
            "Analyzing option position"
        );

        let history = self.source.fetch_history(&request.ticker).await?;

        if history.len() < self.config.min_price_points {
            return Err(AnalysisError::InsufficientData {
                available: history.len(),
                required: self.config.min_price_points,
            });
        }
        if history.len() < self.config.recommended_price_points {
            tracing::warn!(
                ticker = %request.ticker,
                points = history.len(),
                recommended = self.config.recommended_price_points,
                "Short price history, volatility estimate will be noisy"
            );
        }

        let result = analyze_series(request, &history)?;

        telemetry::set_gauge(GaugeMetric::Volatility, result.statistics.volatility);
        telemetry::set_gauge(GaugeMetric::ProbabilityOfProfit, result.probability_of_profit);

        tracing::info!(
            ticker = %request.ticker,
            current_price = %result.position.current_price,
            volatility = result.statistics.volatility,
            probability_of_profit = result.probability_of_profit,
            "Analysis complete"
        );

        Ok(Analysis { result, history })
    }
}

/// Assemble an analysis result from an already fetched series
///
/// Pure: identical inputs give identical results.
pub fn analyze_series(
    request: &AnalysisRequest,
    history: &PriceSeries,
) -> Result<AnalysisResult, AnalysisError> {
    request.validate()?;

    let statistics = compute_statistics(history)?;
    let current_price = history.last_close().ok_or(AnalysisError::InsufficientData {
        available: 0,
        required: MIN_PRICE_POINTS,
    })?;

    let probability_of_profit = LogNormalModel::new().probability(&ProfitParams {
        current_price: to_f64(current_price, "current price")?,
        strike_price: to_f64(request.strike_price, "strike price")?,
        days_to_expiry: request.days_to_expiry,
        volatility: statistics.volatility,
        option_type: request.option_type,
    })?;

    Ok(AnalysisResult {
        position: OptionPosition {
            ticker: request.ticker.clone(),
            current_price,
            strike_price: request.strike_price,
            days_to_expiry: request.days_to_expiry,
            option_type: request.option_type,
            investment_amount: request.investment_amount,
        },
        statistics,
        probability_of_profit,
    })
}

fn to_f64(value: Decimal, name: &str) -> Result<f64, AnalysisError> {
    value
        .to_f64()
        .ok_or_else(|| AnalysisError::invalid(format!("{} is not representable: {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::PricePoint;
    use crate::model::OptionType;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    struct FixedSource {
        closes: Vec<Decimal>,
    }

    #[async_trait]
    impl PriceHistorySource for FixedSource {
        async fn fetch_history(&self, ticker: &str) -> Result<PriceSeries, AnalysisError> {
            let base_time = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();
            let points = self
                .closes
                .iter()
                .enumerate()
                .map(|(i, &c)| PricePoint::new(base_time + Duration::days(i as i64), c))
                .collect();
            Ok(PriceSeries::new(ticker, points))
        }
    }

    fn wavy_closes(n: usize) -> Vec<Decimal> {
        (0..n)
            .map(|i| dec!(150) + Decimal::from((i % 5) as i64) - dec!(2))
            .collect()
    }

    #[test]
    fn test_analyzer_config_floor() {
        let config = AnalyzerConfig::from(&AnalysisConfig {
            min_price_points: 0,
            recommended_price_points: 20,
        });
        assert_eq!(config.min_price_points, MIN_PRICE_POINTS);
    }

    #[tokio::test]
    async fn test_analyze_uses_last_close() {
        let closes = wavy_closes(30);
        let last = *closes.last().unwrap();
        let analyzer = PositionAnalyzer::new(FixedSource { closes });

        let request = AnalysisRequest::new("AAPL", dec!(160), 30);
        let analysis = analyzer.analyze(&request).await.unwrap();

        assert_eq!(analysis.result.position.current_price, last);
        assert_eq!(analysis.history.len(), 30);
        assert!(analysis.result.statistics.volatility > 0.0);
        assert!(analysis.result.probability_of_profit < 0.5);
    }

    #[tokio::test]
    async fn test_analyze_respects_configured_minimum() {
        let analyzer = PositionAnalyzer::with_config(
            FixedSource {
                closes: wavy_closes(10),
            },
            AnalyzerConfig {
                min_price_points: 20,
                recommended_price_points: 20,
            },
        );

        let err = analyzer
            .analyze(&AnalysisRequest::new("AAPL", dec!(150), 30))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                available: 10,
                required: 20
            }
        );
    }

    #[test]
    fn test_analyze_series_put() {
        let base_time = Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap();
        let points = wavy_closes(25)
            .into_iter()
            .enumerate()
            .map(|(i, c)| PricePoint::new(base_time + Duration::days(i as i64), c))
            .collect();
        let series = PriceSeries::new("AAPL", points);

        let request = AnalysisRequest::new("AAPL", dec!(160), 30).option_type(OptionType::Put);
        let result = analyze_series(&request, &series).unwrap();

        assert_eq!(result.position.option_type, OptionType::Put);
        assert!(result.probability_of_profit > 0.5);
    }
}

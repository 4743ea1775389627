//! Metrics recorded through the `metrics` facade
//!
//! Nothing is exported unless the host installs a recorder.

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Single price history request
    PriceFetch,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Latest annualized volatility estimate
    Volatility,
    /// Latest probability of profit
    ProbabilityOfProfit,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Price history requests retried
    FetchRetries,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::PriceFetch => "option_odds_price_fetch_latency_ms",
        }
    }
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::Volatility => "option_odds_volatility",
            GaugeMetric::ProbabilityOfProfit => "option_odds_probability_of_profit",
        }
    }
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::FetchRetries => "option_odds_fetch_retries_total",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let value_ms = duration.as_secs_f64() * 1000.0;
    tracing::debug!(metric = metric.name(), value_ms, "Recording latency");
    ::metrics::histogram!(metric.name()).record(value_ms);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    tracing::debug!(metric = metric.name(), value, "Setting gauge");
    ::metrics::gauge!(metric.name()).set(value);
}

/// Increment a counter by one
pub fn increment_counter(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_prefixed() {
        assert!(LatencyMetric::PriceFetch.name().starts_with("option_odds_"));
        assert!(GaugeMetric::Volatility.name().starts_with("option_odds_"));
        assert!(CounterMetric::FetchRetries.name().ends_with("_total"));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_latency(LatencyMetric::PriceFetch, Duration::from_millis(12));
        set_gauge(GaugeMetric::ProbabilityOfProfit, 0.42);
        increment_counter(CounterMetric::FetchRetries);
    }
}

//! Plain-English analysis report

use super::{scenario_value, Moneyness, RiskLevel, TimePressure};
use crate::analyzer::AnalysisResult;
use crate::model::OptionType;
use rust_decimal_macros::dec;
use std::fmt::Write;

/// Render the analysis as a human-readable report
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    let position = &result.position;
    let stats = &result.statistics;

    writeln!(out, "\n=== COMPREHENSIVE OPTION ANALYSIS ===")?;

    writeln!(out, "\n🔍 BASIC INFORMATION:")?;
    writeln!(out, "Stock: {}", position.ticker)?;
    writeln!(out, "Current Stock Price: ${:.2}", position.current_price)?;
    writeln!(out, "Strike Price: ${:.2}", position.strike_price)?;
    writeln!(out, "Days until Expiration: {}", position.days_to_expiry)?;
    writeln!(
        out,
        "Option Type: {}",
        position.option_type.to_string().to_uppercase()
    )?;
    writeln!(out, "Investment: ${:.2}", position.investment_amount)?;

    writeln!(out, "\n📊 POSITION STATUS:")?;
    let (above, below) = match position.option_type {
        OptionType::Call => ("above", "below"),
        OptionType::Put => ("below", "above"),
    };
    match Moneyness::of(position) {
        Moneyness::InTheMoney { amount } => {
            writeln!(
                out,
                "✅ IN THE MONEY: The stock price is {} your strike price",
                above
            )?;
            writeln!(out, "   You're currently up ${:.2} per share", amount)?;
        }
        Moneyness::OutOfTheMoney { needed } => {
            writeln!(
                out,
                "⚠️ OUT OF THE MONEY: The stock price is {} your strike price",
                below
            )?;
            let direction = match position.option_type {
                OptionType::Call => "rise",
                OptionType::Put => "fall",
            };
            writeln!(
                out,
                "   You need the stock to {} ${:.2} to break even",
                direction, needed
            )?;
        }
    }

    let risk_level = RiskLevel::from_volatility(stats.volatility);
    writeln!(out, "\n⚠️ RISK ASSESSMENT:")?;
    writeln!(out, "Market Volatility: {}", percent(stats.volatility))?;
    writeln!(out, "Risk Level: {}", risk_level)?;
    writeln!(out, "\nDaily Price Movements:")?;
    writeln!(out, "- Average: {}", percent(stats.avg_daily_move))?;
    writeln!(out, "- Largest Gain: {}", percent(stats.max_daily_gain))?;
    writeln!(out, "- Largest Loss: {}", percent(stats.max_daily_loss))?;

    writeln!(out, "\n💰 PROFIT POTENTIAL:")?;
    writeln!(
        out,
        "Probability of Profit: {}",
        percent(result.probability_of_profit)
    )?;
    writeln!(
        out,
        "(chance of finishing in-the-money; premium paid is not included)"
    )?;

    writeln!(out, "\n🎯 POSSIBLE SCENARIOS:")?;
    writeln!(out, "If the stock goes up 10%:")?;
    writeln!(
        out,
        "- Option would be worth: ${:.2} per share",
        scenario_value(result, dec!(0.10))
    )?;
    writeln!(out, "\nIf the stock goes down 10%:")?;
    writeln!(
        out,
        "- Option would be worth: ${:.2} per share",
        scenario_value(result, dec!(-0.10))
    )?;

    writeln!(out, "\n💡 RECOMMENDATIONS:")?;
    match TimePressure::from_days(position.days_to_expiry) {
        TimePressure::Immediate => {
            writeln!(out, "⚡ IMMEDIATE ATTENTION NEEDED: Very close to expiration")?
        }
        TimePressure::MonitorClosely => {
            writeln!(out, "👀 MONITOR CLOSELY: Less than 30 days to expiration")?
        }
        TimePressure::TimeOnYourSide => {
            writeln!(out, "✅ TIME IS ON YOUR SIDE: More than 30 days to expiration")?
        }
    }
    for line in risk_level.recommendations() {
        writeln!(out, "- {}", line)?;
    }

    Ok(())
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::OptionPosition;
    use crate::model::ReturnStatistics;
    use rust_decimal::Decimal;

    fn result(option_type: OptionType, current: Decimal, days: u32, vol: f64) -> AnalysisResult {
        AnalysisResult {
            position: OptionPosition {
                ticker: "AAPL".to_string(),
                current_price: current,
                strike_price: dec!(170),
                days_to_expiry: days,
                option_type,
                investment_amount: dec!(1000),
            },
            statistics: ReturnStatistics {
                volatility: vol,
                avg_daily_move: 0.0123,
                max_daily_gain: 0.041,
                max_daily_loss: -0.0352,
            },
            probability_of_profit: 0.0404,
        }
    }

    #[test]
    fn test_report_sections() {
        let report = render_text(&result(OptionType::Call, dec!(150), 30, 0.25));

        for section in [
            "BASIC INFORMATION",
            "POSITION STATUS",
            "RISK ASSESSMENT",
            "PROFIT POTENTIAL",
            "POSSIBLE SCENARIOS",
            "RECOMMENDATIONS",
        ] {
            assert!(report.contains(section), "missing {}", section);
        }
        assert!(report.contains("Stock: AAPL"));
        assert!(report.contains("Current Stock Price: $150.00"));
        assert!(report.contains("Option Type: CALL"));
        assert!(report.contains("Market Volatility: 25.0%"));
        assert!(report.contains("Risk Level: MEDIUM"));
        assert!(report.contains("- Largest Loss: -3.5%"));
        assert!(report.contains("Probability of Profit: 4.0%"));
    }

    #[test]
    fn test_report_out_of_the_money_call() {
        let report = render_text(&result(OptionType::Call, dec!(150), 30, 0.25));
        assert!(report.contains("OUT OF THE MONEY: The stock price is below your strike price"));
        assert!(report.contains("You need the stock to rise $20.00 to break even"));
        // +10% -> 165, still below 170
        assert!(report.contains("worth: $0.00 per share"));
        assert!(report.contains("TIME IS ON YOUR SIDE"));
    }

    #[test]
    fn test_report_in_the_money_put() {
        let report = render_text(&result(OptionType::Put, dec!(150), 5, 0.45));
        assert!(report.contains("IN THE MONEY: The stock price is below your strike price"));
        assert!(report.contains("You're currently up $20.00 per share"));
        // -10% -> 135, worth 35
        assert!(report.contains("worth: $35.00 per share"));
        assert!(report.contains("Risk Level: HIGH"));
        assert!(report.contains("Consider using stop losses"));
        assert!(report.contains("IMMEDIATE ATTENTION NEEDED"));
    }

    #[test]
    fn test_report_low_risk() {
        let report = render_text(&result(OptionType::Call, dec!(180), 14, 0.10));
        assert!(report.contains("IN THE MONEY: The stock price is above your strike price"));
        assert!(report.contains("Risk Level: LOW"));
        assert!(report.contains("Stay within your investment plan"));
        assert!(report.contains("MONITOR CLOSELY"));
    }
}

//! Analyze command implementation

use crate::analyzer::{AnalysisRequest, AnalyzerConfig, PositionAnalyzer};
use crate::config::{Config, OutputFormat};
use crate::market::{YahooClient, YahooConfig};
use crate::model::OptionType;
use crate::report::{render_text, write_chart, ChartSpec};
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Ticker symbol of the underlying
    pub ticker: String,

    /// Strike price
    #[arg(long)]
    pub strike: Decimal,

    /// Calendar days until expiration
    #[arg(long)]
    pub days: u32,

    /// Option direction
    #[arg(long = "type", value_enum, default_value_t = OptionType::Call)]
    pub option_type: OptionType,

    /// Amount invested (informational)
    #[arg(long, default_value = "1000")]
    pub investment: Decimal,

    /// Output format; overrides the config file
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the chart specification here; overrides the config file
    #[arg(long)]
    pub chart_out: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// The analysis request described by these arguments
    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest::new(self.ticker.to_uppercase(), self.strike, self.days)
            .option_type(self.option_type)
            .investment(self.investment)
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = YahooClient::with_config(YahooConfig::from(&config.data))?;
        let analyzer = PositionAnalyzer::with_config(client, AnalyzerConfig::from(&config.analysis));

        let analysis = analyzer.analyze(&self.request()).await?;

        match self.format.unwrap_or(config.report.format) {
            OutputFormat::Text => println!("{}", render_text(&analysis.result)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis.result)?),
        }

        if let Some(path) = self.chart_out.as_ref().or(config.report.chart_output.as_ref()) {
            let spec = ChartSpec::build(&analysis.result, &analysis.history);
            write_chart(&spec, path)?;
        }

        Ok(())
    }
}

//! CLI interface for option-odds
//!
//! Provides subcommands for:
//! - `analyze`: Probability of profit for one option position
//! - `config`: Show the effective configuration

mod analyze;

pub use analyze::AnalyzeArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "option-odds")]
#[command(about = "Probability-of-profit analysis for a single stock option position")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an option position
    Analyze(AnalyzeArgs),
    /// Show configuration
    Config,
}

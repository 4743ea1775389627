//! option-odds: probability-of-profit analysis for a single stock option
//!
//! This library provides:
//! - Daily price history from Yahoo Finance
//! - Realized return statistics and annualized volatility
//! - A driftless log-normal probability-of-profit model
//! - Single-position analysis assembling the two
//! - Text reports, payoff curves, and chart specifications
//! - Logging and metrics

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod market;
pub mod model;
pub mod report;
pub mod telemetry;

pub use error::AnalysisError;

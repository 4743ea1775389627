//! Position analysis module
//!
//! Fetches price history for one option position, runs the return
//! statistics and probability model over it, and assembles the result

mod position;
mod types;

pub use position::{analyze_series, AnalyzerConfig, PositionAnalyzer};
pub use types::{Analysis, AnalysisRequest, AnalysisResult, OptionPosition};

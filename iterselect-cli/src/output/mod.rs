//! Output formatting module

use anyhow::Result;
use iterselect_api::{
    CandidateEvaluation, PerformanceEstimate, PlatformTag, SelectionOutcome, StrategyDescriptor,
    StrategyId,
};
use std::io::Write;

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Report a selection, optionally with the full candidate ranking
    fn selection(
        &mut self,
        outcome: &SelectionOutcome,
        candidates: Option<&[CandidateEvaluation]>,
    ) -> Result<()>;

    /// Report an estimate for one strategy
    fn estimate(&mut self, strategy: StrategyId, estimate: &PerformanceEstimate) -> Result<()>;

    /// Report generated source code
    fn code(&mut self, strategy: StrategyId, platform: PlatformTag, code: &str) -> Result<()>;

    /// Report the registered strategies
    fn strategies(&mut self, strategies: &[StrategyDescriptor]) -> Result<()>;

    /// Report the known platforms
    fn platforms(&mut self, platforms: &[PlatformTag]) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON document
    Json,
}

impl OutputFormat {
    /// Resolve the format from a flag or the configured default
    pub fn resolve(flag: Option<OutputFormat>, configured: &str) -> Result<Self> {
        if let Some(format) = flag {
            return Ok(format);
        }
        <OutputFormat as clap::ValueEnum>::from_str(configured, true).map_err(|_| {
            crate::error::CliError::ConfigError(format!("unknown output format '{configured}'"))
                .into()
        })
    }
}

/// Create a formatter writing to `writer`
pub fn formatter<'a, W: Write + 'a>(
    format: OutputFormat,
    pretty_json: bool,
    writer: W,
) -> Box<dyn OutputFormatter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_config() {
        assert_eq!(
            OutputFormat::resolve(Some(OutputFormat::Json), "text").unwrap(),
            OutputFormat::Json
        );
        assert_eq!(OutputFormat::resolve(None, "JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::resolve(None, "yaml").is_err());
    }
}

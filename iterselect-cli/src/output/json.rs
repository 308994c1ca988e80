//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use iterselect_api::{
    CandidateEvaluation, PerformanceEstimate, PlatformTag, SelectionOutcome, StrategyDescriptor,
    StrategyId,
};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// JSON formatter - writes one document per report
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)?;
        } else {
            serde_json::to_writer(&mut self.writer, value)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn selection(
        &mut self,
        outcome: &SelectionOutcome,
        candidates: Option<&[CandidateEvaluation]>,
    ) -> Result<()> {
        match candidates {
            Some(candidates) => self.write(&json!({
                "selection": outcome,
                "candidates": candidates,
            })),
            None => self.write(outcome),
        }
    }

    fn estimate(&mut self, strategy: StrategyId, estimate: &PerformanceEstimate) -> Result<()> {
        self.write(&json!({
            "strategy_id": strategy,
            "estimate": estimate,
        }))
    }

    fn code(&mut self, strategy: StrategyId, platform: PlatformTag, code: &str) -> Result<()> {
        self.write(&json!({
            "strategy_id": strategy,
            "platform": platform,
            "code": code,
        }))
    }

    fn strategies(&mut self, strategies: &[StrategyDescriptor]) -> Result<()> {
        self.write(strategies)
    }

    fn platforms(&mut self, platforms: &[PlatformTag]) -> Result<()> {
        self.write(platforms)
    }
}

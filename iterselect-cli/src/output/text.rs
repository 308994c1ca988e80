//! Text output formatter

use super::OutputFormatter;
use anyhow::Result;
use iterselect_api::{
    CandidateEvaluation, PerformanceEstimate, PlatformTag, SelectionOutcome, StrategyDescriptor,
    StrategyId,
};
use std::io::Write;

/// Text formatter - human-readable reports
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_estimate(&mut self, estimate: &PerformanceEstimate) -> Result<()> {
        writeln!(
            self.writer,
            "Score:            {:.1} (confidence {:.2})",
            estimate.performance_score, estimate.confidence
        )?;
        writeln!(self.writer, "Estimated time:   {:?}", estimate.estimated_time())?;
        writeln!(
            self.writer,
            "Estimated memory: {}",
            format_bytes(estimate.estimated_memory_bytes)
        )?;
        writeln!(self.writer, "Parallel degree:  {}", estimate.parallel_degree)?;
        if estimate.meets_requirements {
            writeln!(self.writer, "Requirements:     met")?;
        } else {
            let unmet: Vec<String> = estimate
                .unmet_requirements
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(self.writer, "Requirements:     not met ({})", unmet.join(", "))?;
        }
        Ok(())
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn selection(
        &mut self,
        outcome: &SelectionOutcome,
        candidates: Option<&[CandidateEvaluation]>,
    ) -> Result<()> {
        writeln!(self.writer, "Strategy:         {}", outcome.strategy_id)?;
        self.write_estimate(&outcome.estimate)?;
        writeln!(self.writer, "Reasoning:        {}", outcome.reasoning)?;

        if let Some(candidates) = candidates {
            writeln!(self.writer)?;
            writeln!(self.writer, "Candidates:")?;
            for (rank, candidate) in candidates.iter().enumerate() {
                match (&candidate.estimate, &candidate.rejection) {
                    (Some(estimate), _) => writeln!(
                        self.writer,
                        "  {:>2}. {:<24} score {:>5.1}  confidence {:.2}  {}",
                        rank + 1,
                        candidate.strategy_id,
                        estimate.performance_score,
                        estimate.confidence,
                        if estimate.meets_requirements {
                            "meets requirements"
                        } else {
                            "misses requirements"
                        }
                    )?,
                    (None, rejection) => writeln!(
                        self.writer,
                        "   -  {:<24} rejected: {}",
                        candidate.strategy_id,
                        rejection.as_deref().unwrap_or("filtered out")
                    )?,
                }
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    fn estimate(&mut self, strategy: StrategyId, estimate: &PerformanceEstimate) -> Result<()> {
        writeln!(self.writer, "Strategy:         {strategy}")?;
        self.write_estimate(estimate)?;
        writeln!(
            self.writer,
            "Optimal range:    {}",
            if estimate.in_optimal_range { "inside" } else { "outside" }
        )?;
        self.writer.flush()?;
        Ok(())
    }

    fn code(&mut self, _strategy: StrategyId, _platform: PlatformTag, code: &str) -> Result<()> {
        write!(self.writer, "{code}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn strategies(&mut self, strategies: &[StrategyDescriptor]) -> Result<()> {
        for strategy in strategies {
            let profile = &strategy.profile;
            let platforms: Vec<&str> = strategy.compatibility.iter().map(|p| p.as_str()).collect();
            writeln!(self.writer, "{:<24} {}", strategy.id, profile.description)?;
            writeln!(
                self.writer,
                "    cpu {}, memory {}, scalability {}; optimal {}..={}",
                profile.cpu_efficiency,
                profile.memory_efficiency,
                profile.scalability,
                profile.optimal_data_size_min,
                profile.optimal_data_size_max
            )?;
            writeln!(self.writer, "    platforms: {}", platforms.join(", "))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn platforms(&mut self, platforms: &[PlatformTag]) -> Result<()> {
        for platform in platforms {
            writeln!(self.writer, "{platform}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Render a byte count with a binary unit
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

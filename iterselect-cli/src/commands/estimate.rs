//! Estimate command implementation

use super::{engine_failure, parse_strategy, CommonArgs, WorkloadArgs};
use anyhow::Result;
use clap::Args;
use iterselect_api::StrategyId;

/// Arguments for the estimate command
#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Strategy to estimate
    #[arg(short, long, value_parser = parse_strategy)]
    pub strategy: StrategyId,

    #[command(flatten)]
    pub workload: WorkloadArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl EstimateArgs {
    /// Execute the estimate command
    pub fn execute(&self) -> Result<()> {
        let (engine, mut formatter) = self.common.prepare()?;

        let context = engine
            .context(self.workload.raw_inputs())
            .map_err(engine_failure)?;
        let estimate = engine
            .estimate_performance(self.strategy, &context)
            .map_err(engine_failure)?;

        formatter.estimate(self.strategy, &estimate)
    }
}

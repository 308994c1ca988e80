//! Select command implementation

use super::{engine_failure, CommonArgs, WorkloadArgs};
use anyhow::Result;
use clap::Args;

/// Arguments for the select command
#[derive(Debug, Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub workload: WorkloadArgs,

    /// Also list every candidate with its score or rejection reason
    #[arg(long)]
    pub explain: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl SelectArgs {
    /// Execute the select command
    pub fn execute(&self) -> Result<()> {
        let (engine, mut formatter) = self.common.prepare()?;
        log::debug!("Arguments: {:?}", self);

        let raw = self.workload.raw_inputs();
        let outcome = engine
            .select_with_inputs(raw.clone())
            .map_err(engine_failure)?;

        if self.explain {
            let candidates = engine.explain(raw).map_err(engine_failure)?;
            formatter.selection(&outcome, Some(&candidates))
        } else {
            formatter.selection(&outcome, None)
        }
    }
}

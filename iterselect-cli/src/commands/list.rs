//! List command implementation

use super::CommonArgs;
use anyhow::Result;
use clap::Args;
use iterselect_api::PlatformTag;

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list
    #[arg(value_enum)]
    pub target: ListTarget,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Listable components
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListTarget {
    /// Registered strategies with their profiles
    Strategies,

    /// Known target platforms
    Platforms,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        let (engine, mut formatter) = self.common.prepare()?;
        match self.target {
            ListTarget::Strategies => formatter.strategies(&engine.list_strategies()),
            ListTarget::Platforms => formatter.platforms(&PlatformTag::ALL),
        }
    }
}

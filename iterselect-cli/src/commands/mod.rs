//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{self, OutputFormat, OutputFormatter};
use anyhow::Result;
use clap::{Args, Subcommand};
use iterselect_api::{
    CollectionShape, EnvironmentProfile, IterationRequirements, PlatformTag, RawIterationInputs,
    StrategyEngine, StrategyId,
};
use std::path::PathBuf;
use std::time::Duration;

pub mod estimate;
pub mod generate;
pub mod generate_config;
pub mod list;
pub mod select;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Select the best iteration strategy for a workload
    Select(select::SelectArgs),

    /// Estimate how a given strategy would perform
    Estimate(estimate::EstimateArgs),

    /// Generate source code for a strategy
    Generate(generate::GenerateArgs),

    /// List available components
    List(list::ListArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Select(args) => args.execute(),
            Commands::Estimate(args) => args.execute(),
            Commands::Generate(args) => args.execute(),
            Commands::List(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Options shared by every reporting command
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "ITERSELECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (default from config, otherwise text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }

    /// Load configuration, build the engine and pick a formatter
    pub fn prepare(&self) -> Result<(StrategyEngine, Box<dyn OutputFormatter>)> {
        self.init_logging();

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        log::debug!("configuration: {config:?}");

        let engine = StrategyEngine::with_config(config.api_config()?)
            .map_err(|e| CliError::EngineError(e.to_string()))?;
        let format = OutputFormat::resolve(self.format, &config.output.default_format)?;
        let formatter = output::formatter(format, config.output.pretty_json, std::io::stdout());
        Ok((engine, formatter))
    }
}

/// Workload description shared by `select` and `estimate`
#[derive(Debug, Args)]
pub struct WorkloadArgs {
    /// Estimated number of elements
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub size: u64,

    /// Target platform
    #[arg(short, long, value_parser = parse_platform, default_value = "native")]
    pub platform: PlatformTag,

    /// Require a parallel strategy
    #[arg(long)]
    pub parallel: bool,

    /// Require a strategy suitable for real-time execution
    #[arg(long)]
    pub real_time: bool,

    /// Require element order to be preserved
    #[arg(long)]
    pub ordered: bool,

    /// The loop body has side effects
    #[arg(long)]
    pub side_effects: bool,

    /// Favor execution time
    #[arg(long, conflicts_with = "prioritize_memory")]
    pub prioritize_cpu: bool,

    /// Favor small memory footprint
    #[arg(long)]
    pub prioritize_memory: bool,

    /// Upper bound on worker count
    #[arg(long, value_name = "N")]
    pub max_parallelism: Option<usize>,

    /// Time budget for the loop in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// The loop body waits on IO
    #[arg(long)]
    pub io_bound: bool,

    /// The loop body must await asynchronous calls
    #[arg(long = "async")]
    pub requires_async: bool,

    /// The collection can only be traversed forward
    #[arg(long)]
    pub sequential_collection: bool,

    /// Core count of the target machine (probed when absent)
    #[arg(long, value_name = "N")]
    pub cores: Option<usize>,

    /// Available memory of the target machine in MiB (requires --cores)
    #[arg(long, value_name = "MIB", requires = "cores")]
    pub memory_mb: Option<u64>,
}

impl WorkloadArgs {
    /// Requirements expressed by the flags
    pub fn requirements(&self) -> IterationRequirements {
        IterationRequirements {
            prioritize_cpu: self.prioritize_cpu,
            prioritize_memory: self.prioritize_memory,
            require_parallelization: self.parallel,
            require_ordering: self.ordered,
            allow_side_effects: self.side_effects,
            requires_real_time: self.real_time,
            max_parallelism: self.max_parallelism,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }

    /// Raw engine inputs for this workload
    pub fn raw_inputs(&self) -> RawIterationInputs {
        let mut raw = RawIterationInputs::new(self.size, self.platform)
            .with_requirements(self.requirements());
        raw.is_io_bound = self.io_bound;
        raw.requires_async = self.requires_async;
        if self.sequential_collection {
            raw.collection_shape = CollectionShape::Sequential;
        }
        if let Some(cores) = self.cores {
            let mut environment = EnvironmentProfile::with_cores(cores);
            if let Some(memory_mb) = self.memory_mb {
                environment.available_memory_bytes = memory_mb.saturating_mul(1024 * 1024);
            }
            raw = raw.with_environment(environment);
        }
        raw
    }
}

/// Parse a platform name
pub fn parse_platform(value: &str) -> std::result::Result<PlatformTag, String> {
    value.parse().map_err(|e: iterselect_api::EngineError| e.to_string())
}

/// Parse a strategy name
pub fn parse_strategy(value: &str) -> std::result::Result<StrategyId, String> {
    value.parse().map_err(|e: iterselect_api::EngineError| e.to_string())
}

/// Map an engine failure to a CLI error
pub(crate) fn engine_failure(err: iterselect_api::ApiError) -> anyhow::Error {
    CliError::EngineError(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        workload: WorkloadArgs,
    }

    #[test]
    fn test_workload_flags_become_requirements() {
        let harness = Harness::parse_from([
            "test",
            "--size",
            "5000",
            "--platform",
            "server",
            "--parallel",
            "--max-parallelism",
            "4",
            "--timeout-ms",
            "250",
        ]);
        let requirements = harness.workload.requirements();
        assert!(requirements.require_parallelization);
        assert_eq!(requirements.max_parallelism, Some(4));
        assert_eq!(requirements.timeout, Some(Duration::from_millis(250)));
        assert_eq!(harness.workload.platform, PlatformTag::Server);
    }

    #[test]
    fn test_environment_from_flags() {
        let harness = Harness::parse_from(["test", "-n", "10", "--cores", "2", "--memory-mb", "64"]);
        let raw = harness.workload.raw_inputs();
        let environment = raw.environment.unwrap();
        assert_eq!(environment.core_count, 2);
        assert_eq!(environment.available_memory_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn test_platform_aliases() {
        assert_eq!(parse_platform("wasm"), Ok(PlatformTag::WebAssembly));
        assert!(parse_platform("language-x").is_err());
        assert_eq!(parse_strategy("parallel_map"), Ok(StrategyId::ParallelMap));
    }

    #[test]
    fn test_maximum_size_is_passed_through() {
        let harness = Harness::parse_from(["test", "-n", u64::MAX.to_string().as_str()]);
        assert_eq!(harness.workload.raw_inputs().data_size, i128::from(u64::MAX));
    }
}

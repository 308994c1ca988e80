//! Generate command implementation

use super::{engine_failure, parse_platform, parse_strategy, CommonArgs};
use anyhow::Result;
use clap::Args;
use iterselect_api::{CodeGenerationContext, PlatformTag, StrategyId};

/// Arguments for the generate command
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Strategy to render
    #[arg(short, long, value_parser = parse_strategy)]
    pub strategy: StrategyId,

    /// Target platform
    #[arg(short, long, value_parser = parse_platform)]
    pub platform: PlatformTag,

    /// Collection expression
    #[arg(long, value_name = "PATH")]
    pub collection: String,

    /// Loop variable name
    #[arg(long, value_name = "NAME", default_value = "item")]
    pub item: String,

    /// Statement executed per element
    #[arg(long, value_name = "CODE")]
    pub action: String,

    /// Filter condition
    #[arg(long, value_name = "CODE")]
    pub filter: Option<String>,

    /// Transform expression bound to the result name
    #[arg(long, value_name = "CODE")]
    pub transform: Option<String>,

    /// Name bound to the transformed value
    #[arg(long, value_name = "NAME", default_value = "result")]
    pub result: String,

    /// The action must be awaited
    #[arg(long = "async")]
    pub is_async: bool,

    /// Degree of parallelism for parallel templates
    #[arg(long, value_name = "N")]
    pub degree: Option<usize>,

    /// Elements per chunk for chunked templates
    #[arg(long, value_name = "N", default_value_t = 1024)]
    pub chunk_size: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl GenerateArgs {
    /// Code generation context described by the flags
    pub fn generation_context(&self) -> CodeGenerationContext {
        let mut context =
            CodeGenerationContext::new(self.platform, &self.collection, &self.item, &self.action)
                .with_result_name(&self.result)
                .with_chunk_size(self.chunk_size);
        if let Some(filter) = &self.filter {
            context = context.with_filter(filter);
        }
        if let Some(transform) = &self.transform {
            context = context.with_transform(transform);
        }
        if let Some(degree) = self.degree {
            context = context.with_degree_of_parallelism(degree);
        }
        if self.is_async {
            context = context.asynchronous();
        }
        context
    }

    /// Execute the generate command
    pub fn execute(&self) -> Result<()> {
        let (engine, mut formatter) = self.common.prepare()?;

        let code = engine
            .generate_code(self.strategy, &self.generation_context())
            .map_err(engine_failure)?;
        log::info!("generated {} for {}", self.strategy, self.platform);

        formatter.code(self.strategy, self.platform, &code)
    }
}

//! Public API for iterselect iteration strategy selection
//!
//! This crate provides a small, stable interface over the selection engine:
//! select a strategy, estimate a strategy, generate code, list strategies.

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use iterselect_core::{
    CodeEmitter, ContextNormalizer, FixedProbe, StrategyRegistry, StrategySelector,
};
use std::sync::Arc;

// Re-export key types
pub use config::{Config, ConfigBuilder};
#[cfg(feature = "serde")]
pub use dto::ToJson;
pub use dto::{SelectionOutcome, StrategyDescriptor};
pub use error::{ApiError, Result};
pub use iterselect_core::{
    CandidateEvaluation, CodeGenerationContext, CollectionShape, EngineConfig, EngineError,
    EnvironmentProfile, IterationContext, IterationRequirements, PerformanceEstimate,
    PlatformTag, RawIterationInputs, StrategyId,
};

/// Main entry point for strategy selection and code generation
///
/// The engine is immutable once built and can be shared across threads.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    registry: Arc<StrategyRegistry>,
    normalizer: ContextNormalizer,
    selector: StrategySelector,
    emitter: CodeEmitter,
    config: Config,
}

impl StrategyEngine {
    /// Create an engine with the built-in strategies and default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create an engine with the built-in strategies
    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_registry(config, StrategyRegistry::builtin()?)
    }

    /// Create an engine over a custom registry
    pub fn with_registry(config: Config, registry: StrategyRegistry) -> Result<Self> {
        let registry = Arc::new(registry);
        let normalizer = match config.environment() {
            Some(env) => ContextNormalizer::new(Arc::new(FixedProbe(env.clone()))),
            None => ContextNormalizer::with_host_probe(),
        };

        Ok(Self {
            selector: StrategySelector::new(Arc::clone(&registry), config.inner.clone()),
            emitter: CodeEmitter::new(Arc::clone(&registry)),
            registry,
            normalizer,
            config,
        })
    }

    /// Select the best strategy for a loop over `data_size` elements
    ///
    /// The host is probed when `environment` is `None` and the configuration
    /// carries no fixed environment.
    pub fn select_strategy(
        &self,
        data_size: u64,
        requirements: IterationRequirements,
        target_platform: PlatformTag,
        environment: Option<EnvironmentProfile>,
    ) -> Result<SelectionOutcome> {
        let mut raw =
            RawIterationInputs::new(data_size, target_platform).with_requirements(requirements);
        raw.environment = environment;
        self.select_with_inputs(raw)
    }

    /// Select using the full set of raw inputs
    pub fn select_with_inputs(&self, raw: RawIterationInputs) -> Result<SelectionOutcome> {
        let context = self.context(raw)?;
        Ok(self.selector.select(&context)?.into())
    }

    /// Every registered strategy with its estimate or rejection, best first
    pub fn explain(&self, raw: RawIterationInputs) -> Result<Vec<CandidateEvaluation>> {
        let context = self.context(raw)?;
        Ok(self.selector.rank(&context))
    }

    /// Validate raw inputs into a context
    pub fn context(&self, raw: RawIterationInputs) -> Result<IterationContext> {
        Ok(self.normalizer.normalize(raw)?)
    }

    /// Estimate how `strategy` would perform in `context`
    pub fn estimate_performance(
        &self,
        strategy: StrategyId,
        context: &IterationContext,
    ) -> Result<PerformanceEstimate> {
        let entry = self.registry.get(strategy)?;
        Ok(self.selector.estimator().estimate(&entry.profile, context))
    }

    /// Render source code implementing `strategy`
    pub fn generate_code(
        &self,
        strategy: StrategyId,
        context: &CodeGenerationContext,
    ) -> Result<String> {
        Ok(self.emitter.emit(strategy, context)?)
    }

    /// Registered strategies in registration order
    pub fn list_strategies(&self) -> Vec<StrategyDescriptor> {
        self.registry.all().iter().map(StrategyDescriptor::from).collect()
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// Convenience functions

/// Select a strategy with the default configuration
pub fn select_strategy(
    data_size: u64,
    requirements: IterationRequirements,
    target_platform: PlatformTag,
) -> Result<SelectionOutcome> {
    StrategyEngine::new()?.select_strategy(data_size, requirements, target_platform, None)
}

/// Generate code with the built-in templates
pub fn generate_code(strategy: StrategyId, context: &CodeGenerationContext) -> Result<String> {
    StrategyEngine::new()?.generate_code(strategy, context)
}

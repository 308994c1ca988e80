//! Iteration strategy selection engine
//!
//! Given a description of a loop (how many elements, on which platform, with
//! which trade-offs), this crate picks the iteration strategy expected to
//! perform best and renders source code implementing it for the target
//! platform.
//!
//! # Architecture
//!
//! - **Registry**: immutable table of strategies with static performance
//!   profiles, platform compatibility and per-platform templates
//! - **Context**: validation of caller input and host environment probing
//! - **Estimator**: deterministic time, memory and score estimates
//! - **Selector**: filtering, scoring and tie-breaking over the registry
//! - **Emitter**: template rendering in the platform's language
//!
//! # Example
//!
//! ```rust
//! use iterselect_core::{
//!     ContextNormalizer, EngineConfig, EnvironmentProfile, FixedProbe, IterationRequirements,
//!     PlatformTag, RawIterationInputs, StrategyId, StrategyRegistry, StrategySelector,
//! };
//! use std::sync::Arc;
//!
//! let registry = Arc::new(StrategyRegistry::builtin().unwrap());
//! let selector = StrategySelector::new(registry, EngineConfig::default());
//!
//! // Pin the environment so the result does not depend on the host
//! let normalizer = ContextNormalizer::new(Arc::new(FixedProbe(EnvironmentProfile::with_cores(8))));
//! let context = normalizer
//!     .normalize(
//!         RawIterationInputs::new(1_000_000, PlatformTag::Server)
//!             .with_requirements(IterationRequirements::parallel()),
//!     )
//!     .unwrap();
//!
//! let selection = selector.select(&context).unwrap();
//! assert_eq!(selection.strategy_id, StrategyId::ChunkedParallel);
//! assert!(selection.estimate.meets_requirements);
//! ```

pub mod config;
pub mod context;
pub mod emitter;
pub mod error;
pub mod estimator;
pub mod profile;
pub mod registry;
pub mod selector;
pub mod types;

pub use config::{EngineConfig, LevelTable, ScoreWeights};
pub use context::{
    CollectionShape, ContextNormalizer, EnvironmentProbe, EnvironmentProfile, FixedProbe,
    HostProbe, IterationContext, IterationRequirements, RawIterationInputs,
};
pub use emitter::{CodeEmitter, CodeGenerationContext, Dialect, Template, TemplateSet};
pub use error::{EngineError, Result};
pub use estimator::{PerformanceEstimate, PerformanceEstimator, UnmetRequirement};
pub use profile::PerformanceProfile;
pub use registry::{builtin_strategies, RegistryBuilder, StrategyEntry, StrategyRegistry};
pub use selector::{CandidateEvaluation, StrategySelection, StrategySelector};
pub use types::{EfficiencyLevel, PlatformCompatibility, PlatformTag, StrategyId};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_selection_feeds_emission() {
        let registry = Arc::new(StrategyRegistry::builtin().unwrap());
        let selector = StrategySelector::new(Arc::clone(&registry), EngineConfig::default());
        let emitter = CodeEmitter::new(registry);

        let context = ContextNormalizer::new(Arc::new(FixedProbe(EnvironmentProfile::with_cores(4))))
            .normalize(RawIterationInputs::new(200, PlatformTag::Mobile))
            .unwrap();
        let selection = selector.select(&context).unwrap();

        let code = emitter
            .emit(
                selection.strategy_id,
                &CodeGenerationContext::new(PlatformTag::Mobile, "items", "item", "log(item)"),
            )
            .unwrap();
        assert!(code.contains("items"));
        assert!(code.contains("log(item)"));
    }
}

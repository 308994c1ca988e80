//! Property tests for strategy selection

use iterselect_core::{
    builtin_strategies, ContextNormalizer, EngineConfig, EnvironmentProfile, FixedProbe,
    IterationContext, IterationRequirements, PerformanceProfile, PlatformCompatibility,
    PlatformTag, RawIterationInputs, StrategyEntry, StrategyId, StrategyRegistry,
    StrategySelector, TemplateSet,
};
use proptest::prelude::*;
use std::sync::Arc;

fn platform() -> impl Strategy<Value = PlatformTag> {
    prop::sample::select(PlatformTag::ALL.to_vec())
}

fn requirements() -> impl Strategy<Value = IterationRequirements> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(prioritize_cpu, prioritize_memory, require_ordering, allow_side_effects, real_time)| {
            IterationRequirements {
                prioritize_cpu,
                prioritize_memory,
                require_ordering,
                allow_side_effects,
                requires_real_time: real_time,
                ..IterationRequirements::default()
            }
        },
    )
}

fn context(raw: RawIterationInputs, cores: usize) -> IterationContext {
    ContextNormalizer::new(Arc::new(FixedProbe(EnvironmentProfile::with_cores(cores))))
        .normalize(raw)
        .unwrap()
}

fn selector() -> StrategySelector {
    StrategySelector::new(
        Arc::new(StrategyRegistry::builtin().unwrap()),
        EngineConfig::default(),
    )
}

proptest! {
    #[test]
    fn selection_is_deterministic(
        size in 0u64..100_000_000,
        platform in platform(),
        requirements in requirements(),
        cores in 1usize..64,
    ) {
        let ctx = context(RawIterationInputs::new(size, platform).with_requirements(requirements), cores);
        let selector = selector();
        let first = selector.select(&ctx);
        let second = selector.select(&ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn selection_respects_platform(
        size in 0u64..100_000_000,
        platform in platform(),
        requirements in requirements(),
        cores in 1usize..64,
    ) {
        let ctx = context(RawIterationInputs::new(size, platform).with_requirements(requirements), cores);
        let selector = selector();
        if let Ok(selection) = selector.select(&ctx) {
            let entry = selector.registry().get(selection.strategy_id).unwrap();
            prop_assert!(entry.compatibility.contains(platform));
            prop_assert!((0.0..=100.0).contains(&selection.estimate.performance_score));
            prop_assert!((0.0..=1.0).contains(&selection.estimate.confidence));
        }
    }

    #[test]
    fn parallel_requirement_yields_parallel_strategy(
        size in 0u64..100_000_000,
        cores in 2usize..64,
    ) {
        let raw = RawIterationInputs::new(size, PlatformTag::Server)
            .with_requirements(IterationRequirements::parallel());
        let ctx = context(raw, cores);
        let selector = selector();
        let selection = selector.select(&ctx).unwrap();
        let entry = selector.registry().get(selection.strategy_id).unwrap();
        prop_assert!(entry.profile.supports_parallelization);
        prop_assert!(selection.estimate.is_parallelized());
    }

    #[test]
    fn impossible_timeout_still_selects(
        size in 1_000u64..1_000_000,
        platform in platform(),
    ) {
        let requirements = IterationRequirements {
            timeout: Some(std::time::Duration::from_nanos(1)),
            ..IterationRequirements::default()
        };
        let ctx = context(RawIterationInputs::new(size, platform).with_requirements(requirements), 4);
        let selection = selector().select(&ctx).unwrap();
        prop_assert!(!selection.estimate.meets_requirements);
    }

    #[test]
    fn identical_profiles_resolve_to_first_registered(
        size in 0u64..1_000_000,
        first in 0usize..StrategyId::COUNT,
        second in 0usize..StrategyId::COUNT,
    ) {
        prop_assume!(first != second);
        let profile = PerformanceProfile::new("identical");
        let entries = [StrategyId::ALL[first], StrategyId::ALL[second]].map(|id| {
            StrategyEntry::new(
                id,
                profile.clone(),
                PlatformCompatibility::ALL,
                TemplateSet::new().rest_unsupported(),
            )
        });
        let selector = StrategySelector::new(
            Arc::new(StrategyRegistry::from_entries(entries).unwrap()),
            EngineConfig::default(),
        );
        let ctx = context(RawIterationInputs::new(size, PlatformTag::Native), 4);
        prop_assert_eq!(selector.select(&ctx).unwrap().strategy_id, StrategyId::ALL[first]);
    }
}

#[test]
fn test_more_cores_never_lower_parallel_score() {
    let selector = selector();
    let mut previous = 0.0;
    for cores in [2, 4, 8, 16, 32] {
        let raw = RawIterationInputs::new(5_000_000, PlatformTag::Native)
            .with_requirements(IterationRequirements::parallel());
        let score = selector.select(&context(raw, cores)).unwrap().estimate.performance_score;
        assert!(score >= previous, "{cores} cores scored {score} < {previous}");
        previous = score;
    }
}

#[test]
fn test_builtin_registry_is_order_stable() {
    let ids: Vec<StrategyId> = builtin_strategies().into_iter().map(|e| e.id).collect();
    assert_eq!(ids, StrategyId::ALL.to_vec());
}

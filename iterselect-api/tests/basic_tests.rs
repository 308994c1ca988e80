//! Basic tests for iterselect-api

use iterselect_api::*;

fn engine(cores: usize) -> StrategyEngine {
    let config = Config::builder().cores(cores).build().unwrap();
    StrategyEngine::with_config(config).unwrap()
}

#[test]
fn test_select_small_server_workload() {
    let outcome = engine(4)
        .select_strategy(50, IterationRequirements::default(), PlatformTag::Server, None)
        .unwrap();

    assert_eq!(outcome.strategy_id, StrategyId::IndexedLoop);
    assert!(outcome.reasoning.contains("indexed-loop"));
}

#[test]
fn test_explicit_environment_overrides_config() {
    let outcome = engine(1)
        .select_strategy(
            1_000_000,
            IterationRequirements::parallel(),
            PlatformTag::Server,
            Some(EnvironmentProfile::with_cores(8)),
        )
        .unwrap();

    assert_eq!(outcome.strategy_id, StrategyId::ChunkedParallel);
    assert_eq!(outcome.estimate.parallel_degree, 8);
}

#[test]
fn test_maximum_data_size_selects_a_strategy() {
    let outcome = engine(4)
        .select_strategy(u64::MAX, IterationRequirements::default(), PlatformTag::Server, None)
        .unwrap();
    assert!(!outcome.reasoning.is_empty());

    let above_signed_range = 1u64 << 63;
    assert!(engine(4)
        .select_strategy(
            above_signed_range,
            IterationRequirements::parallel(),
            PlatformTag::Server,
            None
        )
        .is_ok());
}

#[test]
fn test_no_compatible_strategy_is_reported() {
    let err = engine(4)
        .select_strategy(10_000, IterationRequirements::parallel(), PlatformTag::Browser, None)
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Engine(EngineError::NoCompatibleStrategy { .. })
    ));
}

#[test]
fn test_estimate_performance() {
    let engine = engine(4);
    let context = engine
        .context(RawIterationInputs::new(1_000, PlatformTag::Native))
        .unwrap();
    let estimate = engine
        .estimate_performance(StrategyId::SequentialLoop, &context)
        .unwrap();

    assert!(estimate.meets_requirements);
    assert_eq!(estimate.confidence, 0.85);
}

#[test]
fn test_generate_code() {
    let context = CodeGenerationContext::new(PlatformTag::Mobile, "users", "user", "notify(user)");
    let code = engine(4)
        .generate_code(StrategyId::SequentialLoop, &context)
        .unwrap();
    assert_eq!(code, "for (user in users) {\n    notify(user)\n}\n");
}

#[test]
fn test_list_strategies() {
    let strategies = engine(4).list_strategies();
    assert_eq!(strategies.len(), 7);
    assert_eq!(strategies[0].id, StrategyId::SequentialLoop);

    let chunked = strategies
        .iter()
        .find(|s| s.id == StrategyId::ChunkedParallel)
        .unwrap();
    assert_eq!(
        chunked.template_platforms,
        vec![PlatformTag::Native, PlatformTag::Server]
    );
}

#[test]
fn test_explain_ranks_every_strategy() {
    let ranking = engine(8)
        .explain(RawIterationInputs::new(100, PlatformTag::Browser))
        .unwrap();
    assert_eq!(ranking.len(), 7);
    assert!(ranking[0].estimate.is_some());
    assert!(ranking
        .iter()
        .any(|c| c.strategy_id == StrategyId::ParallelMap && c.is_rejected()));
}

#[test]
fn test_config_presets() {
    for config in [Config::balanced(), Config::latency_focused(), Config::memory_focused()] {
        assert!(config.engine_config().validate().is_ok());
        assert!(StrategyEngine::with_config(config).is_ok());
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_outcome_serializes_to_json() {
    let outcome = engine(4)
        .select_strategy(50, IterationRequirements::default(), PlatformTag::Server, None)
        .unwrap();
    let json = outcome.to_json(false).unwrap();
    assert!(json.contains("\"strategy_id\":\"indexed-loop\""));
    assert!(json.contains("\"reasoning\""));
}

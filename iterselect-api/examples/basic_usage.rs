//! Basic usage example for the selection API

use iterselect_api::{
    select_strategy, CodeGenerationContext, Config, IterationRequirements, PlatformTag,
    StrategyEngine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: Simplest usage with convenience function
    println!("=== Method 1: Convenience Function ===");
    let outcome = select_strategy(50, IterationRequirements::default(), PlatformTag::Server)?;
    println!("{}: {}\n", outcome.strategy_id, outcome.reasoning);

    // Method 2: Configured engine with a fixed environment
    println!("=== Method 2: Custom Configuration ===");
    let config = Config::builder().cores(8).latency_focused().build()?;
    let engine = StrategyEngine::with_config(config)?;
    let outcome = engine.select_strategy(
        2_000_000,
        IterationRequirements::parallel(),
        PlatformTag::Native,
        None,
    )?;
    println!(
        "{} with {} workers, score {:.1}\n",
        outcome.strategy_id, outcome.estimate.parallel_degree, outcome.estimate.performance_score
    );

    // Method 3: Generate code for the chosen strategy
    println!("=== Method 3: Code Generation ===");
    let context = CodeGenerationContext::new(PlatformTag::Native, "samples", "sample", "total += value")
        .with_filter("sample.valid")
        .with_transform("sample.value")
        .with_result_name("value");
    println!("{}", engine.generate_code(outcome.strategy_id, &context)?);

    // Method 4: Inspect the registry
    println!("=== Method 4: Registered Strategies ===");
    for strategy in engine.list_strategies() {
        println!("  {:<24} {}", strategy.id.as_str(), strategy.profile.description);
    }

    Ok(())
}

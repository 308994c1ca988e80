//! Deterministic performance estimation for a (strategy, context) pair

use crate::config::{EngineConfig, ScoreWeights};
use crate::context::{EnvironmentProfile, IterationContext};
use crate::profile::PerformanceProfile;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// A requirement an estimate fails to meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmetRequirement {
    /// Estimated time exceeds the timeout or default budget
    Time,
    /// Estimated memory exceeds the available memory
    Memory,
    /// Real-time execution requested but the strategy is not suitable
    RealTime,
    /// Ordering requested but the strategy visits elements out of order
    Ordering,
    /// Side effects allowed but the work would run on parallel workers
    SideEffects,
}

impl fmt::Display for UnmetRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnmetRequirement::Time => "exceeds the time budget",
            UnmetRequirement::Memory => "exceeds available memory",
            UnmetRequirement::RealTime => "is not suitable for real-time use",
            UnmetRequirement::Ordering => "does not preserve element order",
            UnmetRequirement::SideEffects => "would run side effects concurrently",
        };
        f.write_str(text)
    }
}

/// Predicted behavior of a strategy for one context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceEstimate {
    /// Estimated execution time in nanoseconds
    pub estimated_time_ns: f64,
    pub estimated_memory_bytes: u64,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Composite score in [0, 100]; higher is better
    pub performance_score: f64,
    pub meets_requirements: bool,
    pub unmet_requirements: Vec<UnmetRequirement>,
    /// Worker count assumed by the estimate (1 when sequential)
    pub parallel_degree: usize,
    pub in_optimal_range: bool,
}

impl PerformanceEstimate {
    /// Estimated execution time
    pub fn estimated_time(&self) -> Duration {
        Duration::from_nanos(self.estimated_time_ns.round().clamp(0.0, u64::MAX as f64) as u64)
    }

    /// Whether the estimate assumes parallel execution
    pub fn is_parallelized(&self) -> bool {
        self.parallel_degree > 1
    }
}

/// Computes [`PerformanceEstimate`]s from static profiles
#[derive(Debug, Clone, Default)]
pub struct PerformanceEstimator {
    config: EngineConfig,
}

impl PerformanceEstimator {
    /// Create an estimator with the given constants
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estimate `profile` running `context`; never fails
    pub fn estimate(
        &self,
        profile: &PerformanceProfile,
        context: &IterationContext,
    ) -> PerformanceEstimate {
        let cfg = &self.config;
        let requirements = context.requirements();
        let fallback;
        let environment = match context.environment() {
            Some(env) => env,
            None => {
                fallback = EnvironmentProfile::conservative();
                &fallback
            }
        };

        let n = context.data_size() as f64;
        let in_optimal_range = profile.is_in_optimal_range(context.data_size());

        let parallel_degree = self.parallel_degree(profile, context, environment);
        let speedup = if parallel_degree > 1 {
            let full = parallel_degree as f64;
            if context.data_size() < profile.optimal_data_size_min {
                (full * (1.0 - cfg.small_data_parallel_overhead)).max(1.0)
            } else {
                full
            }
        } else {
            1.0
        };

        let io_factor = if context.is_io_bound() && !profile.supports_async {
            cfg.io_bound_penalty
        } else {
            1.0
        };

        // Time relative to the same work at Low efficiency without parallelism
        let time_ratio = cfg.cpu_multipliers.get(profile.cpu_efficiency) * io_factor / speedup;
        let estimated_time_ns = n * cfg.per_element_cost_ns * time_ratio;

        let base_memory = n * cfg.bytes_per_element as f64;
        let worker_memory = if parallel_degree > 1 {
            parallel_degree as f64 * cfg.worker_memory_overhead_bytes as f64
        } else {
            0.0
        };
        let memory = base_memory * cfg.memory_multipliers.get(profile.memory_efficiency)
            + worker_memory;
        let estimated_memory_bytes = memory.round().clamp(0.0, u64::MAX as f64) as u64;
        let memory_ratio = memory / base_memory.max(1.0);

        let max_time_ns = requirements
            .timeout
            .unwrap_or_else(|| cfg.default_max_time())
            .as_nanos() as f64;

        let mut unmet_requirements = Vec::new();
        if estimated_time_ns > max_time_ns {
            unmet_requirements.push(UnmetRequirement::Time);
        }
        if estimated_memory_bytes > environment.available_memory_bytes {
            unmet_requirements.push(UnmetRequirement::Memory);
        }
        if requirements.requires_real_time && !profile.suitable_for_real_time {
            unmet_requirements.push(UnmetRequirement::RealTime);
        }
        if requirements.require_ordering && !profile.preserves_order {
            unmet_requirements.push(UnmetRequirement::Ordering);
        }
        if requirements.allow_side_effects && parallel_degree > 1 {
            unmet_requirements.push(UnmetRequirement::SideEffects);
        }

        let confidence = if in_optimal_range {
            cfg.confidence_in_range
        } else {
            cfg.confidence_out_of_range
        };

        let weights = self.effective_weights(context);
        let speed = (1.0 - time_ratio).clamp(0.0, 1.0);
        let memory_score = (1.0 - memory_ratio).clamp(0.0, 1.0);
        let scalability = cfg.scalability_values.get(profile.scalability);
        let weighted =
            weights.speed * speed + weights.memory * memory_score + weights.scalability * scalability;
        let range_factor = if in_optimal_range {
            1.0
        } else {
            cfg.out_of_range_score_factor
        };
        let performance_score = (100.0 * weighted * range_factor).clamp(0.0, 100.0);

        PerformanceEstimate {
            estimated_time_ns,
            estimated_memory_bytes,
            confidence,
            performance_score,
            meets_requirements: unmet_requirements.is_empty(),
            unmet_requirements,
            parallel_degree,
            in_optimal_range,
        }
    }

    fn parallel_degree(
        &self,
        profile: &PerformanceProfile,
        context: &IterationContext,
        environment: &EnvironmentProfile,
    ) -> usize {
        let requirements = context.requirements();
        if !(profile.supports_parallelization
            && requirements.require_parallelization
            && environment.core_count > 1)
        {
            return 1;
        }
        let limit = requirements
            .max_parallelism
            .unwrap_or(environment.core_count);
        environment.core_count.min(limit).max(1)
    }

    /// Score weights shifted toward the caller's stated priority
    fn effective_weights(&self, context: &IterationContext) -> ScoreWeights {
        let base = self.config.weights;
        let requirements = context.requirements();
        match (requirements.prioritize_cpu, requirements.prioritize_memory) {
            (true, false) => ScoreWeights {
                speed: base.speed + base.memory / 2.0,
                memory: base.memory / 2.0,
                scalability: base.scalability,
            },
            (false, true) => ScoreWeights {
                speed: base.speed / 2.0,
                memory: base.memory + base.speed / 2.0,
                scalability: base.scalability,
            },
            _ => base,
        }
    }
}

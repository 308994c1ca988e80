//! Strategy selection logic

use crate::config::EngineConfig;
use crate::context::{CollectionShape, IterationContext};
use crate::error::{EngineError, Result};
use crate::estimator::{PerformanceEstimate, PerformanceEstimator};
use crate::registry::{StrategyEntry, StrategyRegistry};
use crate::types::StrategyId;
use serde::Serialize;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::sync::Arc;

/// Result of a successful selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySelection {
    pub strategy_id: StrategyId,
    pub estimate: PerformanceEstimate,
    /// Human-readable explanation of the choice
    pub reasoning: String,
}

/// How one registered strategy fared for a context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateEvaluation {
    pub strategy_id: StrategyId,
    /// Present when the strategy passed the compatibility and hard filters
    pub estimate: Option<PerformanceEstimate>,
    /// Why the strategy was filtered out, if it was
    pub rejection: Option<String>,
}

impl CandidateEvaluation {
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

type Candidates<'a> = SmallVec<[(usize, &'a StrategyEntry, PerformanceEstimate); 8]>;

/// Chooses the best registered strategy for an [`IterationContext`]
#[derive(Debug, Clone)]
pub struct StrategySelector {
    registry: Arc<StrategyRegistry>,
    estimator: PerformanceEstimator,
}

impl StrategySelector {
    /// Create a selector over `registry` using `config` for estimation
    pub fn new(registry: Arc<StrategyRegistry>, config: EngineConfig) -> Self {
        Self {
            registry,
            estimator: PerformanceEstimator::new(config),
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn estimator(&self) -> &PerformanceEstimator {
        &self.estimator
    }

    /// Select the best strategy for `context`
    ///
    /// Strategies incompatible with the platform or collection shape, or
    /// failing a hard requirement (parallelization, real-time), are never
    /// chosen. Among the rest, those meeting every estimated requirement are
    /// preferred; when none do, the best-scoring survivor is returned anyway.
    /// Ties fall back to confidence, then memory, then registration order.
    pub fn select(&self, context: &IterationContext) -> Result<StrategySelection> {
        let (candidates, rejections) = self.evaluate(context);

        let Some((_, winner, estimate)) = candidates.first() else {
            let reason = if rejections.is_empty() {
                "no strategies are registered".to_string()
            } else {
                rejections
                    .iter()
                    .map(|(id, why)| format!("{id} {why}"))
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            log::warn!(
                "no compatible strategy for {} on {}: {reason}",
                context.data_size(),
                context.target_platform()
            );
            return Err(EngineError::NoCompatibleStrategy {
                platform: context.target_platform(),
                reason,
            });
        };

        let reasoning = self.reasoning(context, winner, estimate, &candidates, rejections.len());
        log::info!(
            "selected {} (score {:.1}, confidence {:.2})",
            winner.id,
            estimate.performance_score,
            estimate.confidence
        );

        Ok(StrategySelection {
            strategy_id: winner.id,
            estimate: estimate.clone(),
            reasoning,
        })
    }

    /// Every registered strategy, best candidate first
    ///
    /// Evaluated strategies come first in selection order; rejected ones
    /// follow in registration order with the reason they were filtered out.
    pub fn rank(&self, context: &IterationContext) -> Vec<CandidateEvaluation> {
        let (candidates, rejections) = self.evaluate(context);

        candidates
            .into_iter()
            .map(|(_, entry, estimate)| CandidateEvaluation {
                strategy_id: entry.id,
                estimate: Some(estimate),
                rejection: None,
            })
            .chain(rejections.into_iter().map(|(id, why)| CandidateEvaluation {
                strategy_id: id,
                estimate: None,
                rejection: Some(why),
            }))
            .collect()
    }

    /// Filter, estimate and order the registered strategies
    fn evaluate<'a>(
        &'a self,
        context: &IterationContext,
    ) -> (Candidates<'a>, SmallVec<[(StrategyId, String); 8]>) {
        let mut candidates = Candidates::new();
        let mut rejections = SmallVec::new();

        for (position, entry) in self.registry.all().iter().enumerate() {
            if let Some(why) = compatibility_rejection(entry, context)
                .or_else(|| requirement_rejection(entry, context))
            {
                log::trace!("{} rejected: {why}", entry.id);
                rejections.push((entry.id, why));
                continue;
            }

            let estimate = self.estimator.estimate(&entry.profile, context);
            log::debug!(
                "{} scored {:.1} (confidence {:.2}, meets requirements: {})",
                entry.id,
                estimate.performance_score,
                estimate.confidence,
                estimate.meets_requirements
            );
            candidates.push((position, entry, estimate));
        }

        candidates.sort_by(|a, b| compare_candidates((a.0, &a.2), (b.0, &b.2)));
        (candidates, rejections)
    }

    fn reasoning(
        &self,
        context: &IterationContext,
        winner: &StrategyEntry,
        estimate: &PerformanceEstimate,
        candidates: &Candidates<'_>,
        rejected: usize,
    ) -> String {
        let profile = &winner.profile;
        let mut reasoning = format!(
            "{} ({}) selected for {} elements on {}: score {:.1}, confidence {:.2}",
            winner.id,
            profile.description,
            context.data_size(),
            context.target_platform(),
            estimate.performance_score,
            estimate.confidence
        );

        if estimate.in_optimal_range {
            reasoning.push_str("; data size is within its optimal range");
        } else {
            reasoning.push_str(&format!(
                "; data size is outside its optimal range {}..={}",
                profile.optimal_data_size_min, profile.optimal_data_size_max
            ));
        }
        if estimate.is_parallelized() {
            reasoning.push_str(&format!("; runs on {} workers", estimate.parallel_degree));
        }
        if !estimate.meets_requirements {
            let unmet = estimate
                .unmet_requirements
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            reasoning.push_str(&format!(
                "; no candidate met every requirement, best effort choice that {unmet}"
            ));
        }
        if let Some((_, runner_up, runner_estimate)) = candidates.get(1) {
            reasoning.push_str(&format!(
                "; next best {} scored {:.1}",
                runner_up.id, runner_estimate.performance_score
            ));
        }
        reasoning.push_str(&format!(
            " ({} evaluated, {} filtered out)",
            candidates.len(),
            rejected
        ));
        reasoning
    }
}

/// Reason a strategy cannot run in this context at all
fn compatibility_rejection(entry: &StrategyEntry, context: &IterationContext) -> Option<String> {
    let profile = &entry.profile;
    if !entry.compatibility.contains(context.target_platform()) {
        return Some(format!("is not available on {}", context.target_platform()));
    }
    if context.requires_async() && !profile.supports_async {
        return Some("does not support asynchronous iteration".to_string());
    }
    if context.collection_shape() == CollectionShape::Sequential
        && profile.requires_indexable_collection
    {
        return Some("requires an indexable collection".to_string());
    }
    None
}

/// Reason a strategy fails a hard requirement
fn requirement_rejection(entry: &StrategyEntry, context: &IterationContext) -> Option<String> {
    let profile = &entry.profile;
    let requirements = context.requirements();
    if requirements.require_parallelization && !profile.supports_parallelization {
        return Some("does not support parallel execution".to_string());
    }
    if requirements.requires_real_time && !profile.suitable_for_real_time {
        return Some("is not suitable for real-time execution".to_string());
    }
    None
}

/// Selection order: requirements met, score, confidence, memory, position
fn compare_candidates(
    (a_position, a): (usize, &PerformanceEstimate),
    (b_position, b): (usize, &PerformanceEstimate),
) -> Ordering {
    b.meets_requirements
        .cmp(&a.meets_requirements)
        .then_with(|| b.performance_score.total_cmp(&a.performance_score))
        .then_with(|| b.confidence.total_cmp(&a.confidence))
        .then_with(|| a.estimated_memory_bytes.cmp(&b.estimated_memory_bytes))
        .then_with(|| a_position.cmp(&b_position))
}

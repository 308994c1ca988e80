//! Static performance characteristics of a strategy

use crate::error::{EngineError, Result};
use crate::types::{EfficiencyLevel, StrategyId};
use serde::Serialize;

/// Per-strategy performance metadata, immutable once registered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceProfile {
    /// Short human-readable summary
    pub description: &'static str,
    pub cpu_efficiency: EfficiencyLevel,
    pub memory_efficiency: EfficiencyLevel,
    pub scalability: EfficiencyLevel,
    /// Smallest element count the strategy is tuned for (inclusive)
    pub optimal_data_size_min: u64,
    /// Largest element count the strategy is tuned for (inclusive)
    pub optimal_data_size_max: u64,
    pub supports_parallelization: bool,
    /// Needs O(1) random access to elements
    pub requires_indexable_collection: bool,
    pub supports_async: bool,
    pub suitable_for_real_time: bool,
    /// Visits elements in collection order
    pub preserves_order: bool,
}

impl PerformanceProfile {
    /// Sequential profile with medium ratings and an unbounded optimal range
    pub fn new(description: &'static str) -> Self {
        Self {
            description,
            cpu_efficiency: EfficiencyLevel::Medium,
            memory_efficiency: EfficiencyLevel::Medium,
            scalability: EfficiencyLevel::Medium,
            optimal_data_size_min: 0,
            optimal_data_size_max: u64::MAX,
            supports_parallelization: false,
            requires_indexable_collection: false,
            supports_async: false,
            suitable_for_real_time: false,
            preserves_order: true,
        }
    }

    /// Set the three efficiency ratings
    pub fn efficiency(
        mut self,
        cpu: EfficiencyLevel,
        memory: EfficiencyLevel,
        scalability: EfficiencyLevel,
    ) -> Self {
        self.cpu_efficiency = cpu;
        self.memory_efficiency = memory;
        self.scalability = scalability;
        self
    }

    /// Set the optimal data size range (inclusive)
    pub fn optimal_range(mut self, min: u64, max: u64) -> Self {
        self.optimal_data_size_min = min;
        self.optimal_data_size_max = max;
        self
    }

    pub fn parallel(mut self) -> Self {
        self.supports_parallelization = true;
        self
    }

    pub fn indexable(mut self) -> Self {
        self.requires_indexable_collection = true;
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.supports_async = true;
        self
    }

    pub fn real_time(mut self) -> Self {
        self.suitable_for_real_time = true;
        self
    }

    pub fn unordered(mut self) -> Self {
        self.preserves_order = false;
        self
    }

    /// Check whether `data_size` falls inside the optimal range
    pub fn is_in_optimal_range(&self, data_size: u64) -> bool {
        (self.optimal_data_size_min..=self.optimal_data_size_max).contains(&data_size)
    }

    pub(crate) fn validate(&self, id: StrategyId) -> Result<()> {
        if self.optimal_data_size_min > self.optimal_data_size_max {
            return Err(EngineError::InvalidProfile {
                strategy: id,
                reason: format!(
                    "optimal range is inverted ({} > {})",
                    self.optimal_data_size_min, self.optimal_data_size_max
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_flags() {
        let profile = PerformanceProfile::new("test")
            .efficiency(
                EfficiencyLevel::High,
                EfficiencyLevel::Low,
                EfficiencyLevel::Excellent,
            )
            .optimal_range(10, 100)
            .parallel()
            .indexable()
            .unordered();

        assert_eq!(profile.cpu_efficiency, EfficiencyLevel::High);
        assert!(profile.supports_parallelization);
        assert!(profile.requires_indexable_collection);
        assert!(!profile.supports_async);
        assert!(!profile.preserves_order);
    }

    #[test]
    fn test_optimal_range_is_inclusive() {
        let profile = PerformanceProfile::new("test").optimal_range(10, 100);
        assert!(!profile.is_in_optimal_range(9));
        assert!(profile.is_in_optimal_range(10));
        assert!(profile.is_in_optimal_range(100));
        assert!(!profile.is_in_optimal_range(101));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let profile = PerformanceProfile::new("test").optimal_range(100, 10);
        assert!(matches!(
            profile.validate(StrategyId::SequentialLoop),
            Err(EngineError::InvalidProfile { .. })
        ));
    }
}

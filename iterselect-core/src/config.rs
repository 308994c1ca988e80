//! Tunable constants of the estimator and selector
//!
//! Defaults reproduce the fixed constants of the engine. Every field can be
//! overridden from TOML; missing fields keep their defaults.

use crate::error::{EngineError, Result};
use crate::types::EfficiencyLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One value per efficiency level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
    pub excellent: f64,
}

impl LevelTable {
    /// Value for a level
    pub fn get(&self, level: EfficiencyLevel) -> f64 {
        match level {
            EfficiencyLevel::Low => self.low,
            EfficiencyLevel::Medium => self.medium,
            EfficiencyLevel::High => self.high,
            EfficiencyLevel::Excellent => self.excellent,
        }
    }

    fn values(&self) -> [f64; 4] {
        [self.low, self.medium, self.high, self.excellent]
    }
}

/// Weights of the composite performance score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub speed: f64,
    pub memory: f64,
    pub scalability: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            speed: 0.4,
            memory: 0.3,
            scalability: 0.3,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cost of visiting one element at Low CPU efficiency (nanoseconds)
    pub per_element_cost_ns: f64,
    /// Time multiplier per CPU efficiency level
    pub cpu_multipliers: LevelTable,
    /// Memory multiplier per memory efficiency level
    pub memory_multipliers: LevelTable,
    /// Normalized value of each scalability level
    pub scalability_values: LevelTable,
    /// Bytes touched per element at Low memory efficiency
    pub bytes_per_element: u64,
    /// Extra memory per parallel worker
    pub worker_memory_overhead_bytes: u64,
    /// Fraction of the speedup lost when data is below a strategy's optimal range
    pub small_data_parallel_overhead: f64,
    /// Time multiplier for IO-bound work on strategies without async support
    pub io_bound_penalty: f64,
    /// Time budget used when the requirements carry no timeout (milliseconds)
    pub default_max_time_ms: u64,
    /// Confidence when the data size is inside the optimal range
    pub confidence_in_range: f64,
    /// Confidence when the data size is outside the optimal range
    pub confidence_out_of_range: f64,
    /// Score multiplier applied outside the optimal range
    pub out_of_range_score_factor: f64,
    /// Composite score weights
    pub weights: ScoreWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            per_element_cost_ns: 10.0,
            cpu_multipliers: LevelTable {
                low: 1.0,
                medium: 0.6,
                high: 0.3,
                excellent: 0.15,
            },
            memory_multipliers: LevelTable {
                low: 1.0,
                medium: 0.6,
                high: 0.3,
                excellent: 0.15,
            },
            scalability_values: LevelTable {
                low: 0.25,
                medium: 0.5,
                high: 0.75,
                excellent: 1.0,
            },
            bytes_per_element: 64,
            worker_memory_overhead_bytes: 64 * 1024,
            small_data_parallel_overhead: 0.5,
            io_bound_penalty: 2.0,
            default_max_time_ms: 30_000,
            confidence_in_range: 0.85,
            confidence_out_of_range: 0.55,
            out_of_range_score_factor: 0.8,
            weights: ScoreWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Create a balanced configuration
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Favor execution time over memory footprint
    pub fn latency_focused() -> Self {
        Self {
            weights: ScoreWeights {
                speed: 0.6,
                memory: 0.15,
                scalability: 0.25,
            },
            ..Self::default()
        }
    }

    /// Favor small memory footprint over execution time
    pub fn memory_focused() -> Self {
        Self {
            weights: ScoreWeights {
                speed: 0.25,
                memory: 0.55,
                scalability: 0.2,
            },
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Time budget used when the requirements carry no timeout
    pub fn default_max_time(&self) -> Duration {
        Duration::from_millis(self.default_max_time_ms)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let scalars = [
            ("per_element_cost_ns", self.per_element_cost_ns),
            ("small_data_parallel_overhead", self.small_data_parallel_overhead),
            ("io_bound_penalty", self.io_bound_penalty),
            ("confidence_in_range", self.confidence_in_range),
            ("confidence_out_of_range", self.confidence_out_of_range),
            ("out_of_range_score_factor", self.out_of_range_score_factor),
            ("weights.speed", w.speed),
            ("weights.memory", w.memory),
            ("weights.scalability", w.scalability),
        ];
        let tables = [
            ("cpu_multipliers", &self.cpu_multipliers),
            ("memory_multipliers", &self.memory_multipliers),
            ("scalability_values", &self.scalability_values),
        ];
        let table_values = tables
            .iter()
            .flat_map(|(name, table)| table.values().map(|value| (*name, value)));
        if let Some((name, value)) = scalars
            .into_iter()
            .chain(table_values)
            .find(|(_, value)| !value.is_finite())
        {
            return Err(EngineError::Config(format!(
                "{name} must be a finite number (got {value})"
            )));
        }

        if [w.speed, w.memory, w.scalability].iter().any(|v| *v < 0.0) {
            return Err(EngineError::Config(
                "score weights must be non-negative".to_string(),
            ));
        }
        let total = w.speed + w.memory + w.scalability;
        if (total - 1.0).abs() > 1e-6 {
            return Err(EngineError::Config(format!(
                "score weights must sum to 1.0 (got {total})"
            )));
        }

        for (name, value) in [
            ("confidence_in_range", self.confidence_in_range),
            ("confidence_out_of_range", self.confidence_out_of_range),
            ("out_of_range_score_factor", self.out_of_range_score_factor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::Config(format!(
                    "{name} must be within [0, 1] (got {value})"
                )));
            }
        }
        if self.confidence_in_range < self.confidence_out_of_range {
            return Err(EngineError::Config(
                "confidence_in_range must not be below confidence_out_of_range".to_string(),
            ));
        }

        let multipliers = self
            .cpu_multipliers
            .values()
            .into_iter()
            .chain(self.memory_multipliers.values());
        for value in multipliers {
            if value <= 0.0 {
                return Err(EngineError::Config(
                    "efficiency multipliers must be positive".to_string(),
                ));
            }
        }

        if self
            .scalability_values
            .values()
            .iter()
            .any(|value| !(0.0..=1.0).contains(value))
        {
            return Err(EngineError::Config(
                "scalability_values must be within [0, 1]".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.small_data_parallel_overhead) {
            return Err(EngineError::Config(
                "small_data_parallel_overhead must be within [0, 1)".to_string(),
            ));
        }
        if self.per_element_cost_ns <= 0.0 || self.io_bound_penalty < 1.0 {
            return Err(EngineError::Config(
                "per_element_cost_ns must be positive and io_bound_penalty at least 1.0"
                    .to_string(),
            ));
        }
        if self.default_max_time_ms == 0 {
            return Err(EngineError::Config(
                "default_max_time_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

//! High-level configuration API

use crate::error::{ApiError, Result};
use iterselect_core::{EngineConfig, EnvironmentProfile, ScoreWeights};
use std::time::Duration;

/// High-level configuration for strategy selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub(crate) inner: EngineConfig,
    pub(crate) environment: Option<EnvironmentProfile>,
}

impl Config {
    /// Create a balanced configuration
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create a configuration favoring execution time
    pub fn latency_focused() -> Self {
        Self {
            inner: EngineConfig::latency_focused(),
            environment: None,
        }
    }

    /// Create a configuration favoring small memory footprint
    pub fn memory_focused() -> Self {
        Self {
            inner: EngineConfig::memory_focused(),
            environment: None,
        }
    }

    /// Parse engine constants from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let inner = EngineConfig::from_toml_str(source)
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self {
            inner,
            environment: None,
        })
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Engine constants
    pub fn engine_config(&self) -> &EngineConfig {
        &self.inner
    }

    /// Fixed environment used instead of probing the host, if any
    pub fn environment(&self) -> Option<&EnvironmentProfile> {
        self.environment.as_ref()
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Replace all engine constants
    pub fn engine_config(mut self, config: EngineConfig) -> Self {
        self.config.inner = config;
        self
    }

    /// Set the score weights
    pub fn weights(mut self, speed: f64, memory: f64, scalability: f64) -> Self {
        self.config.inner.weights = ScoreWeights {
            speed,
            memory,
            scalability,
        };
        self
    }

    /// Set the time budget used when requirements carry no timeout
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.config.inner.default_max_time_ms = timeout.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    /// Use a fixed environment instead of probing the host
    pub fn environment(mut self, environment: EnvironmentProfile) -> Self {
        self.config.environment = Some(environment);
        self
    }

    /// Use a fixed environment with `cores` cores
    pub fn cores(self, cores: usize) -> Self {
        self.environment(EnvironmentProfile::with_cores(cores))
    }

    /// Use latency-focused weights
    pub fn latency_focused(mut self) -> Self {
        self.config.inner.weights = EngineConfig::latency_focused().weights;
        self
    }

    /// Use memory-focused weights
    pub fn memory_focused(mut self) -> Self {
        self.config.inner.weights = EngineConfig::memory_focused().weights;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config
            .inner
            .validate()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        if let Some(env) = &self.config.environment {
            if env.core_count == 0 {
                return Err(ApiError::Config(
                    "environment core count must be at least 1".to_string(),
                ));
            }
        }

        Ok(self.config)
    }
}

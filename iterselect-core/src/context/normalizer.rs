//! Conversion of caller parameters into an [`IterationContext`]

use super::{
    CollectionShape, EnvironmentProbe, EnvironmentProfile, HostProbe, IterationContext,
    IterationRequirements,
};
use crate::error::{EngineError, Result};
use crate::types::PlatformTag;
use std::sync::Arc;
use std::time::Duration;

/// Unvalidated selection parameters as supplied by a caller
#[derive(Debug, Clone)]
pub struct RawIterationInputs {
    /// Estimated element count; negative values and values above
    /// `u64::MAX` are rejected
    pub data_size: i128,
    pub requirements: IterationRequirements,
    pub target_platform: PlatformTag,
    /// Defaults to `!is_io_bound` when unset
    pub is_cpu_bound: Option<bool>,
    pub is_io_bound: bool,
    pub requires_async: bool,
    pub collection_shape: CollectionShape,
    /// Probed from the host when absent
    pub environment: Option<EnvironmentProfile>,
}

impl RawIterationInputs {
    /// Inputs with default requirements for a data size and platform
    pub fn new(data_size: impl Into<i128>, target_platform: PlatformTag) -> Self {
        Self {
            data_size: data_size.into(),
            requirements: IterationRequirements::default(),
            target_platform,
            is_cpu_bound: None,
            is_io_bound: false,
            requires_async: false,
            collection_shape: CollectionShape::default(),
            environment: None,
        }
    }

    /// Replace the requirements
    pub fn with_requirements(mut self, requirements: IterationRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// Supply an explicit environment instead of probing the host
    pub fn with_environment(mut self, environment: EnvironmentProfile) -> Self {
        self.environment = Some(environment);
        self
    }
}

/// Validates raw inputs and fills in defaults
#[derive(Clone)]
pub struct ContextNormalizer {
    probe: Arc<dyn EnvironmentProbe>,
}

impl ContextNormalizer {
    /// Create a normalizer with the given environment probe
    pub fn new(probe: Arc<dyn EnvironmentProbe>) -> Self {
        Self { probe }
    }

    /// Create a normalizer that probes the current host
    pub fn with_host_probe() -> Self {
        Self::new(Arc::new(HostProbe))
    }

    /// Validate `raw` and produce a canonical context
    pub fn normalize(&self, raw: RawIterationInputs) -> Result<IterationContext> {
        let data_size = u64::try_from(raw.data_size).map_err(|_| {
            EngineError::invalid_context(if raw.data_size < 0 {
                format!("data size must be non-negative (got {})", raw.data_size)
            } else {
                format!("data size {} exceeds u64::MAX", raw.data_size)
            })
        })?;
        if raw.requirements.timeout == Some(Duration::ZERO) {
            return Err(EngineError::invalid_context("timeout must be positive"));
        }
        if raw.requirements.max_parallelism == Some(0) {
            return Err(EngineError::invalid_context(
                "max parallelism must be at least 1",
            ));
        }

        let environment = match raw.environment {
            Some(env) => {
                if env.core_count == 0 {
                    return Err(EngineError::invalid_context(
                        "environment core count must be at least 1",
                    ));
                }
                env
            }
            None => {
                let mut env = self.probe.probe();
                env.is_web |= raw.target_platform.is_web();
                env.is_mobile |= raw.target_platform == PlatformTag::Mobile;
                log::debug!(
                    "probed environment: {} cores, {} bytes available",
                    env.core_count,
                    env.available_memory_bytes
                );
                env
            }
        };

        let is_cpu_bound = raw.is_cpu_bound.unwrap_or(!raw.is_io_bound);

        Ok(IterationContext::from_parts(
            data_size,
            raw.requirements,
            raw.target_platform,
            is_cpu_bound,
            raw.is_io_bound,
            raw.requires_async,
            raw.collection_shape,
            Some(environment),
        ))
    }
}

impl Default for ContextNormalizer {
    fn default() -> Self {
        Self::with_host_probe()
    }
}

impl std::fmt::Debug for ContextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextNormalizer")
            .field("probe", &"<dyn EnvironmentProbe>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FixedProbe;

    fn normalizer() -> ContextNormalizer {
        ContextNormalizer::new(Arc::new(FixedProbe(EnvironmentProfile::with_cores(4))))
    }

    #[test]
    fn test_defaults_are_applied() {
        let context = normalizer()
            .normalize(RawIterationInputs::new(1_000, PlatformTag::Server))
            .unwrap();

        assert_eq!(context.data_size(), 1_000);
        assert!(context.is_cpu_bound());
        assert!(!context.is_io_bound());
        assert_eq!(context.collection_shape(), CollectionShape::Indexable);
        assert_eq!(context.environment().unwrap().core_count, 4);
    }

    #[test]
    fn test_io_bound_defaults_cpu_bound_off() {
        let raw = RawIterationInputs {
            is_io_bound: true,
            ..RawIterationInputs::new(10, PlatformTag::Server)
        };
        let context = normalizer().normalize(raw).unwrap();
        assert!(!context.is_cpu_bound());
        assert!(context.is_io_bound());
    }

    #[test]
    fn test_negative_data_size_rejected() {
        let result = normalizer().normalize(RawIterationInputs::new(-1, PlatformTag::Native));
        assert!(matches!(result, Err(EngineError::InvalidContext { .. })));
    }

    #[test]
    fn test_full_u64_range_accepted() {
        let context = normalizer()
            .normalize(RawIterationInputs::new(u64::MAX, PlatformTag::Server))
            .unwrap();
        assert_eq!(context.data_size(), u64::MAX);

        let beyond = i128::from(u64::MAX) + 1;
        let result = normalizer().normalize(RawIterationInputs::new(beyond, PlatformTag::Server));
        assert!(matches!(result, Err(EngineError::InvalidContext { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let raw = RawIterationInputs::new(10, PlatformTag::Native).with_requirements(
            IterationRequirements {
                timeout: Some(Duration::ZERO),
                ..IterationRequirements::default()
            },
        );
        assert!(matches!(
            normalizer().normalize(raw),
            Err(EngineError::InvalidContext { .. })
        ));
    }

    #[test]
    fn test_zero_max_parallelism_rejected() {
        let raw = RawIterationInputs::new(10, PlatformTag::Native).with_requirements(
            IterationRequirements {
                max_parallelism: Some(0),
                ..IterationRequirements::default()
            },
        );
        assert!(normalizer().normalize(raw).is_err());
    }

    #[test]
    fn test_supplied_environment_wins_over_probe() {
        let raw = RawIterationInputs::new(10, PlatformTag::Native)
            .with_environment(EnvironmentProfile::with_cores(16));
        let context = normalizer().normalize(raw).unwrap();
        assert_eq!(context.environment().unwrap().core_count, 16);
    }

    #[test]
    fn test_zero_core_environment_rejected() {
        let raw = RawIterationInputs::new(10, PlatformTag::Native)
            .with_environment(EnvironmentProfile::with_cores(0));
        assert!(normalizer().normalize(raw).is_err());
    }

    #[test]
    fn test_probed_environment_marks_platform_flags() {
        let browser = normalizer()
            .normalize(RawIterationInputs::new(10, PlatformTag::Browser))
            .unwrap();
        assert!(browser.environment().unwrap().is_web);

        let mobile = normalizer()
            .normalize(RawIterationInputs::new(10, PlatformTag::Mobile))
            .unwrap();
        assert!(mobile.environment().unwrap().is_mobile);
        assert!(!mobile.environment().unwrap().is_web);
    }
}

//! Canonical description of a single selection request

pub mod normalizer;
pub mod probe;

pub use normalizer::{ContextNormalizer, RawIterationInputs};
pub use probe::{EnvironmentProbe, FixedProbe, HostProbe};

use crate::types::PlatformTag;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Trade-offs requested by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterationRequirements {
    pub prioritize_cpu: bool,
    pub prioritize_memory: bool,
    pub require_parallelization: bool,
    pub require_ordering: bool,
    pub allow_side_effects: bool,
    pub requires_real_time: bool,
    /// Upper bound on worker count (None = no limit)
    pub max_parallelism: Option<usize>,
    /// Time budget for the iteration itself
    pub timeout: Option<Duration>,
}

impl IterationRequirements {
    /// Requirements that demand a parallel strategy
    pub fn parallel() -> Self {
        Self {
            require_parallelization: true,
            ..Self::default()
        }
    }

    /// Requirements that demand a real-time capable strategy
    pub fn real_time() -> Self {
        Self {
            requires_real_time: true,
            ..Self::default()
        }
    }
}

/// Shape of the collection being iterated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionShape {
    /// Random access by index (arrays, vectors, lists)
    #[default]
    Indexable,
    /// Forward-only sequence (iterators, streams, linked structures)
    Sequential,
}

/// Resources of the machine the iteration will run on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub core_count: usize,
    pub available_memory_bytes: u64,
    pub is_constrained: bool,
    pub is_mobile: bool,
    pub is_web: bool,
}

impl EnvironmentProfile {
    /// Pessimistic profile used when nothing is known about the host
    pub fn conservative() -> Self {
        Self {
            core_count: 1,
            available_memory_bytes: 256 * 1024 * 1024,
            is_constrained: true,
            is_mobile: false,
            is_web: false,
        }
    }

    /// Unconstrained profile with the given core count and 1 GiB of memory
    pub fn with_cores(core_count: usize) -> Self {
        Self {
            core_count,
            available_memory_bytes: 1024 * 1024 * 1024,
            is_constrained: false,
            is_mobile: false,
            is_web: false,
        }
    }
}

/// Normalized, immutable selection input
///
/// Built by [`ContextNormalizer`]; there is no way to change a context after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationContext {
    data_size: u64,
    requirements: IterationRequirements,
    target_platform: PlatformTag,
    is_cpu_bound: bool,
    is_io_bound: bool,
    requires_async: bool,
    collection_shape: CollectionShape,
    environment: Option<EnvironmentProfile>,
}

impl IterationContext {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        data_size: u64,
        requirements: IterationRequirements,
        target_platform: PlatformTag,
        is_cpu_bound: bool,
        is_io_bound: bool,
        requires_async: bool,
        collection_shape: CollectionShape,
        environment: Option<EnvironmentProfile>,
    ) -> Self {
        Self {
            data_size,
            requirements,
            target_platform,
            is_cpu_bound,
            is_io_bound,
            requires_async,
            collection_shape,
            environment,
        }
    }

    /// Estimated number of elements
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    pub fn requirements(&self) -> &IterationRequirements {
        &self.requirements
    }

    pub fn target_platform(&self) -> PlatformTag {
        self.target_platform
    }

    pub fn is_cpu_bound(&self) -> bool {
        self.is_cpu_bound
    }

    pub fn is_io_bound(&self) -> bool {
        self.is_io_bound
    }

    pub fn requires_async(&self) -> bool {
        self.requires_async
    }

    pub fn collection_shape(&self) -> CollectionShape {
        self.collection_shape
    }

    /// Environment profile, if one was supplied or probed
    pub fn environment(&self) -> Option<&EnvironmentProfile> {
        self.environment.as_ref()
    }

    /// Copy of this context with no environment information
    ///
    /// Estimates made from the copy use the conservative fallback profile.
    pub fn without_environment(&self) -> Self {
        Self {
            environment: None,
            ..self.clone()
        }
    }
}

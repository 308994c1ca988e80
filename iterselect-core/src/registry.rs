//! Registry of known iteration strategies
//!
//! The registry is populated once through [`RegistryBuilder`] and is
//! read-only afterwards; share it behind an `Arc` for concurrent readers.

use crate::emitter::builtin::builtin_templates;
use crate::emitter::TemplateSet;
use crate::error::{EngineError, Result};
use crate::profile::PerformanceProfile;
use crate::types::{EfficiencyLevel, PlatformCompatibility, PlatformTag, StrategyId};

/// Everything the engine knows about one strategy
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyEntry {
    pub id: StrategyId,
    pub profile: PerformanceProfile,
    pub compatibility: PlatformCompatibility,
    pub templates: TemplateSet,
}

impl StrategyEntry {
    /// Bundle a strategy definition
    pub fn new(
        id: StrategyId,
        profile: PerformanceProfile,
        compatibility: PlatformCompatibility,
        templates: TemplateSet,
    ) -> Self {
        Self {
            id,
            profile,
            compatibility,
            templates,
        }
    }
}

/// Collects strategy definitions and validates them
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<StrategyEntry>,
    index: [Option<usize>; StrategyId::COUNT],
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy; registration order is the final tie-breaker
    pub fn register(
        &mut self,
        id: StrategyId,
        profile: PerformanceProfile,
        compatibility: PlatformCompatibility,
        templates: TemplateSet,
    ) -> Result<&mut Self> {
        if self.index[id.index()].is_some() {
            return Err(EngineError::DuplicateStrategy { id });
        }
        if compatibility.is_empty() {
            return Err(EngineError::EmptyCompatibility { strategy: id });
        }
        profile.validate(id)?;

        self.index[id.index()] = Some(self.entries.len());
        self.entries
            .push(StrategyEntry::new(id, profile, compatibility, templates));
        Ok(self)
    }

    /// Register a prepared entry
    pub fn register_entry(&mut self, entry: StrategyEntry) -> Result<&mut Self> {
        self.register(entry.id, entry.profile, entry.compatibility, entry.templates)
    }

    /// Validate template coverage and freeze the registry
    pub fn build(self) -> Result<StrategyRegistry> {
        for entry in &self.entries {
            entry.templates.validate(entry.id, entry.compatibility)?;
        }
        log::debug!("strategy registry built with {} strategies", self.entries.len());
        Ok(StrategyRegistry {
            entries: self.entries,
            index: self.index,
        })
    }
}

/// Immutable table of registered strategies
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRegistry {
    entries: Vec<StrategyEntry>,
    index: [Option<usize>; StrategyId::COUNT],
}

impl StrategyRegistry {
    /// Start a new registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry containing the built-in strategies in their canonical order
    pub fn builtin() -> Result<Self> {
        Self::from_entries(builtin_strategies())
    }

    /// Build a registry from entries, registering them in iteration order
    pub fn from_entries(entries: impl IntoIterator<Item = StrategyEntry>) -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        for entry in entries {
            builder.register_entry(entry)?;
        }
        builder.build()
    }

    /// All entries in registration order
    pub fn all(&self) -> &[StrategyEntry] {
        &self.entries
    }

    /// Look up a strategy
    pub fn get(&self, id: StrategyId) -> Result<&StrategyEntry> {
        self.index[id.index()]
            .map(|i| &self.entries[i])
            .ok_or(EngineError::UnregisteredStrategy { id })
    }

    /// Position of a strategy in registration order
    pub fn position(&self, id: StrategyId) -> Option<usize> {
        self.index[id.index()]
    }

    pub fn contains(&self, id: StrategyId) -> bool {
        self.index[id.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Built-in strategy definitions in canonical registration order
pub fn builtin_strategies() -> Vec<StrategyEntry> {
    use EfficiencyLevel::*;
    use PlatformTag::*;

    let definitions = [
        (
            StrategyId::SequentialLoop,
            PerformanceProfile::new("plain for-each loop with no setup cost")
                .efficiency(Medium, High, Low)
                .optimal_range(0, 10_000)
                .real_time(),
            PlatformCompatibility::ALL,
        ),
        (
            StrategyId::IndexedLoop,
            PerformanceProfile::new("index-driven loop over random-access collections")
                .efficiency(High, High, Low)
                .optimal_range(0, 50_000)
                .indexable()
                .real_time(),
            PlatformCompatibility::ALL,
        ),
        (
            StrategyId::LazyPipeline,
            PerformanceProfile::new("lazy filter/map/for-each pipeline without buffering")
                .efficiency(Medium, Excellent, Low)
                .optimal_range(100, 1_000_000),
            PlatformCompatibility::ALL,
        ),
        (
            StrategyId::ParallelMap,
            PerformanceProfile::new("data-parallel map across worker threads")
                .efficiency(Medium, Medium, High)
                .optimal_range(10_000, 10_000_000)
                .parallel(),
            PlatformCompatibility::of(&[Native, Mobile, Server]),
        ),
        (
            StrategyId::ChunkedParallel,
            PerformanceProfile::new("parallel processing of contiguous chunks")
                .efficiency(Medium, Medium, Excellent)
                .optimal_range(1_000_000, u64::MAX)
                .parallel()
                .indexable()
                .unordered(),
            PlatformCompatibility::of(&[Native, Server]),
        ),
        (
            StrategyId::AsyncStream,
            PerformanceProfile::new("asynchronous stream consumption for IO-bound work")
                .efficiency(Low, High, High)
                .optimal_range(1_000, u64::MAX)
                .asynchronous(),
            PlatformCompatibility::ALL,
        ),
        (
            StrategyId::PlatformOptimizedLoop,
            PerformanceProfile::new("unrolled loop tuned for the target runtime")
                .efficiency(Excellent, High, Medium)
                .optimal_range(4_096, 5_000_000)
                .indexable()
                .real_time(),
            PlatformCompatibility::of(&[Native, Mobile, EmbeddedRuntime]),
        ),
    ];

    definitions
        .into_iter()
        .map(|(id, profile, compatibility)| {
            StrategyEntry::new(id, profile, compatibility, builtin_templates(id, compatibility))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{Template, TemplateSlot};

    #[test]
    fn test_builtin_registry_contains_every_strategy() {
        let registry = StrategyRegistry::builtin().unwrap();
        assert_eq!(registry.len(), StrategyId::COUNT);
        for id in StrategyId::ALL {
            assert!(registry.contains(id));
            assert_eq!(registry.get(id).unwrap().id, id);
        }
        assert_eq!(registry.position(StrategyId::SequentialLoop), Some(0));
        assert_eq!(registry.position(StrategyId::PlatformOptimizedLoop), Some(6));
    }

    #[test]
    fn test_every_compatible_builtin_pair_has_a_template() {
        let registry = StrategyRegistry::builtin().unwrap();
        for entry in registry.all() {
            for platform in entry.compatibility.iter() {
                assert!(
                    matches!(entry.templates.slot(platform), TemplateSlot::Available(_)),
                    "{} has no template for {}",
                    entry.id,
                    platform
                );
            }
        }
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut builder = StrategyRegistry::builder();
        let entry = builtin_strategies().remove(0);
        builder.register_entry(entry.clone()).unwrap();
        let err = builder.register_entry(entry).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateStrategy {
                id: StrategyId::SequentialLoop
            }
        );
    }

    #[test]
    fn test_empty_compatibility_rejected() {
        let mut builder = StrategyRegistry::builder();
        let result = builder.register(
            StrategyId::SequentialLoop,
            PerformanceProfile::new("test"),
            PlatformCompatibility::empty(),
            TemplateSet::new().rest_unsupported(),
        );
        assert!(matches!(result, Err(EngineError::EmptyCompatibility { .. })));
    }

    #[test]
    fn test_missing_template_decision_fails_build() {
        let mut builder = StrategyRegistry::builder();
        builder
            .register(
                StrategyId::SequentialLoop,
                PerformanceProfile::new("test"),
                PlatformCompatibility::ALL,
                TemplateSet::new(),
            )
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(EngineError::IncompleteTemplates { .. })
        ));
    }

    #[test]
    fn test_broken_template_fails_build() {
        let mut builder = StrategyRegistry::builder();
        builder
            .register(
                StrategyId::SequentialLoop,
                PerformanceProfile::new("test"),
                PlatformCompatibility::ALL,
                TemplateSet::new()
                    .with_template(PlatformTag::Native, Template::looping("{{item}};"))
                    .rest_unsupported(),
            )
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(EngineError::InvalidTemplate {
                strategy: StrategyId::SequentialLoop,
                platform: PlatformTag::Native,
                ..
            })
        ));
    }

    #[test]
    fn test_unregistered_lookup_is_an_error() {
        let mut builder = StrategyRegistry::builder();
        builder
            .register(
                StrategyId::SequentialLoop,
                PerformanceProfile::new("test"),
                PlatformCompatibility::ALL,
                TemplateSet::new().rest_unsupported(),
            )
            .unwrap();
        let registry = builder.build().unwrap();
        assert_eq!(
            registry.get(StrategyId::ParallelMap).unwrap_err(),
            EngineError::UnregisteredStrategy {
                id: StrategyId::ParallelMap
            }
        );
    }
}

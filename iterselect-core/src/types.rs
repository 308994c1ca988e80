//! Identifiers and small value types shared by every component

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of iteration strategies known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyId {
    /// Plain `for`/`foreach` over the collection
    SequentialLoop,
    /// Index-driven loop over random-access collections
    IndexedLoop,
    /// Lazy iterator/query pipeline (filter, map, for-each)
    LazyPipeline,
    /// Data-parallel map over all elements
    ParallelMap,
    /// Parallel processing of contiguous chunks
    ChunkedParallel,
    /// Asynchronous stream consumption
    AsyncStream,
    /// Unrolled/vectorizable loop tuned for a specific runtime
    PlatformOptimizedLoop,
}

impl StrategyId {
    /// Number of strategy variants
    pub const COUNT: usize = 7;

    /// All variants in declaration order
    pub const ALL: [StrategyId; Self::COUNT] = [
        StrategyId::SequentialLoop,
        StrategyId::IndexedLoop,
        StrategyId::LazyPipeline,
        StrategyId::ParallelMap,
        StrategyId::ChunkedParallel,
        StrategyId::AsyncStream,
        StrategyId::PlatformOptimizedLoop,
    ];

    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::SequentialLoop => "sequential-loop",
            StrategyId::IndexedLoop => "indexed-loop",
            StrategyId::LazyPipeline => "lazy-pipeline",
            StrategyId::ParallelMap => "parallel-map",
            StrategyId::ChunkedParallel => "chunked-parallel",
            StrategyId::AsyncStream => "async-stream",
            StrategyId::PlatformOptimizedLoop => "platform-optimized-loop",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StrategyId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        StrategyId::ALL
            .into_iter()
            .find(|id| id.as_str() == needle)
            .ok_or_else(|| EngineError::UnknownStrategy { id: s.to_string() })
    }
}

/// Target platform a strategy can run on or emit code for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformTag {
    /// Native desktop/workstation binary
    Native,
    /// WebAssembly module without threads
    WebAssembly,
    /// Mobile application runtime
    Mobile,
    /// Server-side service
    Server,
    /// Browser script
    Browser,
    /// Embedded scripting runtime (game engines and similar hosts)
    EmbeddedRuntime,
}

impl PlatformTag {
    /// Number of platform variants
    pub const COUNT: usize = 6;

    /// All variants in declaration order
    pub const ALL: [PlatformTag; Self::COUNT] = [
        PlatformTag::Native,
        PlatformTag::WebAssembly,
        PlatformTag::Mobile,
        PlatformTag::Server,
        PlatformTag::Browser,
        PlatformTag::EmbeddedRuntime,
    ];

    /// Stable kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTag::Native => "native",
            PlatformTag::WebAssembly => "web-assembly",
            PlatformTag::Mobile => "mobile",
            PlatformTag::Server => "server",
            PlatformTag::Browser => "browser",
            PlatformTag::EmbeddedRuntime => "embedded-runtime",
        }
    }

    /// Whether code for this platform runs inside a web sandbox
    pub fn is_web(&self) -> bool {
        matches!(self, PlatformTag::WebAssembly | PlatformTag::Browser)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PlatformTag {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        let needle = match needle.as_str() {
            "wasm" | "webassembly" => "web-assembly",
            "embedded" => "embedded-runtime",
            other => other,
        };
        PlatformTag::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| EngineError::UnknownPlatform {
                name: s.to_string(),
            })
    }
}

/// Set of platforms a strategy supports
///
/// Emptiness is representable here but rejected when a strategy is
/// registered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlatformCompatibility {
    bits: u8,
}

impl PlatformCompatibility {
    /// Every known platform
    pub const ALL: Self = Self { bits: 0b11_1111 };

    /// Empty set
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Build a set from a list of platforms
    pub fn of(platforms: &[PlatformTag]) -> Self {
        platforms
            .iter()
            .fold(Self::empty(), |set, p| set.with(*p))
    }

    /// Return a copy with `platform` added
    pub fn with(self, platform: PlatformTag) -> Self {
        Self {
            bits: self.bits | platform.bit(),
        }
    }

    /// Check membership
    pub fn contains(&self, platform: PlatformTag) -> bool {
        self.bits & platform.bit() != 0
    }

    /// Check if no platform is present
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate members in declaration order
    pub fn iter(&self) -> impl Iterator<Item = PlatformTag> + '_ {
        PlatformTag::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl fmt::Debug for PlatformCompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for PlatformCompatibility {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for PlatformCompatibility {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let platforms = Vec::<PlatformTag>::deserialize(deserializer)?;
        Ok(Self::of(&platforms))
    }
}

/// Ordinal efficiency rating used by performance profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EfficiencyLevel {
    /// Baseline
    Low,
    /// Noticeably better than baseline
    Medium,
    /// Well optimized
    High,
    /// Best available
    Excellent,
}

impl EfficiencyLevel {
    /// Position in the ordinal scale (Low = 0)
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for EfficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EfficiencyLevel::Low => "low",
            EfficiencyLevel::Medium => "medium",
            EfficiencyLevel::High => "high",
            EfficiencyLevel::Excellent => "excellent",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_id_round_trips_through_name() {
        for id in StrategyId::ALL {
            assert_eq!(id.as_str().parse::<StrategyId>().unwrap(), id);
        }
        assert_eq!(
            "Parallel_Map".parse::<StrategyId>().unwrap(),
            StrategyId::ParallelMap
        );
    }

    #[test]
    fn test_unknown_names_are_errors() {
        assert!(matches!(
            "bogus-loop".parse::<StrategyId>(),
            Err(EngineError::UnknownStrategy { .. })
        ));
        assert!(matches!(
            "language-x".parse::<PlatformTag>(),
            Err(EngineError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn test_platform_aliases() {
        assert_eq!(
            "wasm".parse::<PlatformTag>().unwrap(),
            PlatformTag::WebAssembly
        );
        assert_eq!(
            "embedded".parse::<PlatformTag>().unwrap(),
            PlatformTag::EmbeddedRuntime
        );
    }

    #[test]
    fn test_compatibility_set_operations() {
        let set = PlatformCompatibility::of(&[PlatformTag::Server, PlatformTag::Native]);
        assert!(set.contains(PlatformTag::Server));
        assert!(set.contains(PlatformTag::Native));
        assert!(!set.contains(PlatformTag::Browser));
        assert!(!set.is_empty());
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![PlatformTag::Native, PlatformTag::Server]
        );
        assert!(PlatformCompatibility::empty().is_empty());
        assert_eq!(PlatformCompatibility::ALL.iter().count(), PlatformTag::COUNT);
    }

    #[test]
    fn test_efficiency_ordering() {
        assert!(EfficiencyLevel::Low < EfficiencyLevel::Medium);
        assert!(EfficiencyLevel::High < EfficiencyLevel::Excellent);
        assert_eq!(EfficiencyLevel::Excellent.ordinal(), 3);
    }
}

//! Data Transfer Objects for API

use iterselect_core::{
    PerformanceEstimate, PerformanceProfile, PlatformCompatibility, PlatformTag,
    StrategyEntry, StrategyId, StrategySelection,
};

#[cfg(feature = "serde")]
use crate::error::Result;

/// Outcome of a strategy selection
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectionOutcome {
    /// Chosen strategy
    pub strategy_id: StrategyId,
    /// Estimate for the chosen strategy
    pub estimate: PerformanceEstimate,
    /// Why the strategy was chosen
    pub reasoning: String,
}

impl From<StrategySelection> for SelectionOutcome {
    fn from(selection: StrategySelection) -> Self {
        Self {
            strategy_id: selection.strategy_id,
            estimate: selection.estimate,
            reasoning: selection.reasoning,
        }
    }
}

/// Introspection record for one registered strategy
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrategyDescriptor {
    /// Strategy identifier
    pub id: StrategyId,
    /// Static performance characteristics
    pub profile: PerformanceProfile,
    /// Platforms the strategy can run on
    pub compatibility: PlatformCompatibility,
    /// Platforms with a code template
    pub template_platforms: Vec<PlatformTag>,
}

impl From<&StrategyEntry> for StrategyDescriptor {
    fn from(entry: &StrategyEntry) -> Self {
        Self {
            id: entry.id,
            profile: entry.profile.clone(),
            compatibility: entry.compatibility,
            template_platforms: entry.templates.available_platforms(),
        }
    }
}

/// JSON rendering for the serializable DTOs
#[cfg(feature = "serde")]
pub trait ToJson: serde::Serialize {
    /// Serialize to a JSON string
    fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize + ?Sized> ToJson for T {}

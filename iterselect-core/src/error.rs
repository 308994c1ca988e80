//! Engine error types
//!
//! Every failure of the selection pipeline is an explicit value. The only
//! deliberate non-error outcome is a selection whose estimate does not meet
//! the caller's requirements (the best candidate is still returned).

use crate::types::{PlatformTag, StrategyId};
use thiserror::Error;

/// Errors raised by registration, normalization, selection and emission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Caller-supplied selection input is malformed
    #[error("invalid iteration context: {reason}")]
    InvalidContext {
        /// Why the input was rejected
        reason: String,
    },

    /// The same strategy id was registered twice
    #[error("strategy '{id}' is already registered")]
    DuplicateStrategy {
        /// The duplicated id
        id: StrategyId,
    },

    /// Compatibility and hard-requirement filtering eliminated every candidate
    #[error("no registered strategy is compatible with platform '{platform}': {reason}")]
    NoCompatibleStrategy {
        /// The requested target platform
        platform: PlatformTag,
        /// Summary of the filters that removed the candidates
        reason: String,
    },

    /// No template exists for the requested strategy/platform pair
    #[error("strategy '{strategy}' has no code template for platform '{platform}'")]
    UnsupportedPlatform {
        /// Strategy that was asked to emit code
        strategy: StrategyId,
        /// Platform without a template
        platform: PlatformTag,
    },

    /// A template exists but cannot express the requested loop shape
    #[error("strategy '{strategy}' cannot emit the requested shape for '{platform}': {reason}")]
    UnsupportedShape {
        /// Strategy that was asked to emit code
        strategy: StrategyId,
        /// Target platform
        platform: PlatformTag,
        /// Which clause could not be expressed
        reason: String,
    },

    /// Unknown strategy name
    #[error("unknown strategy '{id}'")]
    UnknownStrategy {
        /// The name that failed to parse
        id: String,
    },

    /// Unknown platform name
    #[error("unknown platform '{name}'")]
    UnknownPlatform {
        /// The name that failed to parse
        name: String,
    },

    /// A known strategy id that the registry in use does not contain
    #[error("strategy '{id}' is not registered")]
    UnregisteredStrategy {
        /// The missing id
        id: StrategyId,
    },

    /// A (strategy, platform) pair has neither a template nor an explicit
    /// unsupported marker
    #[error("strategy '{strategy}' declares no template decision for platform '{platform}'")]
    IncompleteTemplates {
        /// Strategy with the gap
        strategy: StrategyId,
        /// Platform without a decision
        platform: PlatformTag,
    },

    /// A template was supplied for a platform the strategy does not support
    #[error("strategy '{strategy}' has a template for incompatible platform '{platform}'")]
    TemplateOutsideCompatibility {
        /// Strategy with the stray template
        strategy: StrategyId,
        /// Platform outside the compatibility set
        platform: PlatformTag,
    },

    /// A strategy was registered with an empty compatibility set
    #[error("strategy '{strategy}' supports no platform")]
    EmptyCompatibility {
        /// Offending strategy
        strategy: StrategyId,
    },

    /// A template references unknown placeholders or lacks its required slot
    #[error("invalid template for strategy '{strategy}' on '{platform}': {reason}")]
    InvalidTemplate {
        /// Strategy owning the template
        strategy: StrategyId,
        /// Platform the template renders for
        platform: PlatformTag,
        /// What is wrong with the template text
        reason: String,
    },

    /// A profile violates its own invariants
    #[error("invalid profile for strategy '{strategy}': {reason}")]
    InvalidProfile {
        /// Offending strategy
        strategy: StrategyId,
        /// Violated invariant
        reason: String,
    },

    /// A code generation fragment or identifier is unusable
    #[error("invalid code fragment '{name}': {reason}")]
    InvalidFragment {
        /// Fragment or identifier name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Engine configuration error
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn invalid_context(reason: impl Into<String>) -> Self {
        EngineError::InvalidContext {
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_subject() {
        let err = EngineError::UnsupportedPlatform {
            strategy: StrategyId::ParallelMap,
            platform: PlatformTag::Browser,
        };
        assert_eq!(
            err.to_string(),
            "strategy 'parallel-map' has no code template for platform 'browser'"
        );

        let err = EngineError::DuplicateStrategy {
            id: StrategyId::SequentialLoop,
        };
        assert!(err.to_string().contains("sequential-loop"));
    }

    #[test]
    fn test_invalid_context_helper() {
        let err = EngineError::invalid_context("data size is negative");
        assert!(matches!(err, EngineError::InvalidContext { .. }));
        assert_eq!(
            err.to_string(),
            "invalid iteration context: data size is negative"
        );
    }
}

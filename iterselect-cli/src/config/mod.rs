//! Configuration module

use crate::error::CliError;
use iterselect_api::{Config, EngineConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Estimator and selector constants
    #[serde(default)]
    pub engine: EngineConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (`text` or `json`)
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(source: &str) -> Result<Self, CliError> {
        let config: CliConfig =
            toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config
            .engine
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// API configuration carrying the engine constants
    pub fn api_config(&self) -> Result<Config, CliError> {
        Config::builder()
            .engine_config(self.engine.clone())
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.output.default_format, "text");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = CliConfig::from_toml_str(
            r#"
            [engine]
            per_element_cost_ns = 4.0

            [output]
            default_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.per_element_cost_ns, 4.0);
        assert_eq!(config.output.default_format, "json");
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_invalid_engine_section_rejected() {
        let result = CliConfig::from_toml_str("[engine]\nconfidence_in_range = 2.0\n");
        assert!(matches!(result, Err(CliError::ConfigError(_))));
    }
}

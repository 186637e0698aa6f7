//! Build configuration

use crate::export::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Error loading or validating a [`BuilderConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Read-only configuration for a schema build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Appended after each component name when prefixing nested columns
    pub column_separator: String,
    pub identity_member: String,
    pub version_member: String,
    /// Format handed to the mapping engine
    pub output_format: DocumentFormat,
    /// Convention names left out of the build
    pub disabled_conventions: Vec<String>,
    pub validate_columns: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            column_separator: "_".to_string(),
            identity_member: "Id".to_string(),
            version_member: "Version".to_string(),
            output_format: DocumentFormat::Xml,
            disabled_conventions: Vec::new(),
            validate_columns: true,
        }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_separator(mut self, separator: impl Into<String>) -> Self {
        self.column_separator = separator.into();
        self
    }

    pub fn with_identity_member(mut self, name: impl Into<String>) -> Self {
        self.identity_member = name.into();
        self
    }

    pub fn with_version_member(mut self, name: impl Into<String>) -> Self {
        self.version_member = name.into();
        self
    }

    pub fn with_output_format(mut self, format: DocumentFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_disabled_convention(mut self, name: impl Into<String>) -> Self {
        self.disabled_conventions.push(name.into());
        self
    }

    pub fn with_column_validation(mut self, enabled: bool) -> Self {
        self.validate_columns = enabled;
        self
    }

    /// Parse a TOML configuration; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BuilderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.column_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "column_separator must not be empty".to_string(),
            ));
        }
        if self.identity_member.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "identity_member must not be empty".to_string(),
            ));
        }
        if self.version_member.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "version_member must not be empty".to_string(),
            ));
        }
        if self.identity_member == self.version_member {
            return Err(ConfigError::Invalid(format!(
                "identity_member and version_member are both '{}'",
                self.identity_member
            )));
        }
        Ok(())
    }
}

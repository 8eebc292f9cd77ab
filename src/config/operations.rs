//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::PROFILE_TOKEN;
use crate::error::{ConfgenError, Result};
use crate::profile::Profile;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfgenError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, falling back to defaults when the file
    /// does not exist. The manifest is optional; a present-but-invalid file
    /// is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ConfgenError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ConfgenError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Overlay file path (relative to the project root) for a profile.
    pub fn overlay_path(&self, profile: Profile) -> String {
        self.profile_overlay_pattern
            .replace(PROFILE_TOKEN, profile.as_str())
    }

    /// Validate config values and return an error on invalid values.
    ///
    /// Validation rules:
    /// - `base_properties` must be non-empty
    /// - `profile_overlay_pattern` must contain the `{profile}` token
    /// - at least one artifact must be configured
    /// - artifact templates must be non-empty
    /// - artifact outputs must be plain file names (no path separators)
    pub fn validate(&self) -> Result<()> {
        if self.base_properties.trim().is_empty() {
            return Err(ConfgenError::UserError(
                "config validation failed: base_properties must be non-empty".to_string(),
            ));
        }

        if !self.profile_overlay_pattern.contains(PROFILE_TOKEN) {
            return Err(ConfgenError::UserError(format!(
                "config validation failed: profile_overlay_pattern must contain '{}' (found '{}')",
                PROFILE_TOKEN, self.profile_overlay_pattern
            )));
        }

        if self.artifacts.is_empty() {
            return Err(ConfgenError::UserError(
                "config validation failed: at least one artifact must be configured".to_string(),
            ));
        }

        for artifact in &self.artifacts {
            if artifact.template.trim().is_empty() {
                return Err(ConfgenError::UserError(format!(
                    "config validation failed: artifact '{}' has an empty template path",
                    artifact.output
                )));
            }
            if artifact.output.trim().is_empty() {
                return Err(ConfgenError::UserError(format!(
                    "config validation failed: artifact for template '{}' has an empty output name",
                    artifact.template
                )));
            }
            if artifact.output.contains('/') || artifact.output.contains('\\') {
                return Err(ConfgenError::UserError(format!(
                    "config validation failed: artifact output '{}' must be a plain file name",
                    artifact.output
                )));
            }
        }

        Ok(())
    }
}

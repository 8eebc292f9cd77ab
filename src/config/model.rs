//! Config struct definition and default implementation.

use super::types::*;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};

/// Configuration for confgen.
///
/// This struct represents the contents of `confgen.yaml`. Unknown fields in
/// the YAML are ignored for forward compatibility; every field has a
/// default, so the file itself is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Property sources
    // =========================================================================
    /// Base property file, relative to the project root. Its absence is a
    /// fatal error.
    #[serde(default = "default_base_properties")]
    pub base_properties: String,

    /// Pattern for the optional per-profile overlay file. `{profile}` is
    /// replaced by the active profile name.
    #[serde(default = "default_profile_overlay_pattern")]
    pub profile_overlay_pattern: String,

    // =========================================================================
    // Output location
    // =========================================================================
    /// Property key holding the raw output directory value.
    #[serde(default = "default_output_path_key")]
    pub output_path_key: String,

    /// Environment variable consulted when `output_path_key` is absent from
    /// the effective properties.
    #[serde(default = "default_output_path_env")]
    pub output_path_env: String,

    // =========================================================================
    // Profile inference
    // =========================================================================
    /// Profile used when nothing else selects one.
    #[serde(default)]
    pub default_profile: Profile,

    /// Invoking task names that imply the `dev` profile.
    #[serde(default = "default_dev_invocations")]
    pub dev_invocations: Vec<String>,

    /// Invoking task names that imply the `prod` profile.
    #[serde(default = "default_prod_invocations")]
    pub prod_invocations: Vec<String>,

    // =========================================================================
    // Artifacts
    // =========================================================================
    /// Artifacts to generate, in order.
    #[serde(default = "default_artifacts")]
    pub artifacts: Vec<ArtifactSpec>,

    // =========================================================================
    // Run log
    // =========================================================================
    /// Whether successful runs are appended to `.confgen/events.ndjson`.
    #[serde(default = "default_true")]
    pub audit_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_properties: default_base_properties(),
            profile_overlay_pattern: default_profile_overlay_pattern(),
            output_path_key: default_output_path_key(),
            output_path_env: default_output_path_env(),
            default_profile: Profile::default(),
            dev_invocations: default_dev_invocations(),
            prod_invocations: default_prod_invocations(),
            artifacts: default_artifacts(),
            audit_log: default_true(),
        }
    }
}

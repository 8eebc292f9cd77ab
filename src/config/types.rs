//! Configuration types and defaults for confgen.
//!
//! This module defines the artifact manifest entry and the default value
//! functions used by the Config struct. The defaults mirror the layout the
//! consuming service has always used: a base `application.properties`, a
//! per-profile overlay next to it, and two generated artifacts (a properties
//! file for the query service and the XML descriptor that points at it).

use crate::profile::Profile;
use crate::template::PlaceholderStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One artifact to generate: a template rendered to an output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSpec {
    /// Template path, relative to the project root.
    pub template: String,

    /// Output file name, written into the resolved output directory.
    pub output: String,

    /// Placeholder dialect used by the template.
    pub placeholder_style: PlaceholderStyle,

    /// Per-profile template overrides. When the active profile has an entry
    /// here, that template is rendered instead of `template`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profile_templates: BTreeMap<Profile, String>,
}

impl Default for ArtifactSpec {
    fn default() -> Self {
        Self {
            template: String::new(),
            output: String::new(),
            placeholder_style: PlaceholderStyle::default(),
            profile_templates: BTreeMap::new(),
        }
    }
}

impl ArtifactSpec {
    /// The template to render for the given profile.
    pub fn template_for(&self, profile: Profile) -> &str {
        self.profile_templates
            .get(&profile)
            .map(String::as_str)
            .unwrap_or(&self.template)
    }
}

/// Token in the overlay pattern replaced by the active profile name.
pub const PROFILE_TOKEN: &str = "{profile}";

// Default value functions for serde
pub(crate) fn default_base_properties() -> String {
    "config/application.properties".to_string()
}
pub(crate) fn default_profile_overlay_pattern() -> String {
    "config/application-{profile}.properties".to_string()
}
pub(crate) fn default_output_path_key() -> String {
    "service.config.path".to_string()
}
pub(crate) fn default_output_path_env() -> String {
    "CONFGEN_OUTPUT_PATH".to_string()
}
pub(crate) fn default_dev_invocations() -> Vec<String> {
    vec!["dev".to_string(), "run".to_string(), "watch".to_string()]
}
pub(crate) fn default_prod_invocations() -> Vec<String> {
    vec![
        "build".to_string(),
        "package".to_string(),
        "assemble".to_string(),
    ]
}
pub(crate) fn default_true() -> bool {
    true
}

/// Default artifact set: the service properties file (legacy brace-style
/// template) and the XML descriptor that references its generated path.
pub(crate) fn default_artifacts() -> Vec<ArtifactSpec> {
    vec![
        ArtifactSpec {
            template: "templates/service.properties.tmpl".to_string(),
            output: "service.properties".to_string(),
            placeholder_style: PlaceholderStyle::Braces,
            profile_templates: BTreeMap::new(),
        },
        ArtifactSpec {
            template: "templates/service.xml.tmpl".to_string(),
            output: "service.xml".to_string(),
            placeholder_style: PlaceholderStyle::Dollar,
            profile_templates: BTreeMap::new(),
        },
    ]
}

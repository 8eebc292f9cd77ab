//! Deployment profile resolution.
//!
//! A profile names the deployment context (`dev`, `prod`, `test`) and
//! selects which property overlay is honored and which output-path rule
//! applies. Resolution is a pure function over explicit inputs: the CLI
//! parameter, an environment snapshot, and the names of the build tasks
//! that triggered generation. No ambient lookup happens here; the caller
//! captures the environment once (see `context`) and threads it through.
//!
//! Precedence, highest first:
//! 1. explicit CLI parameter
//! 2. `CONFGEN_PROFILE` environment variable
//! 3. invocation context: a dev-mode task name implies `dev`, a
//!    build/package task name implies `prod`
//! 4. configured default

use crate::error::{ConfgenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Environment variable consulted when no explicit profile is given.
pub const PROFILE_ENV_VAR: &str = "CONFGEN_PROFILE";

/// Closed set of deployment profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Interactive development; output rooted under the scratch directory.
    #[default]
    Dev,
    /// Production build; output paths normalized as absolute forward-slash paths.
    Prod,
    /// Test runs; output paths used as given.
    Test,
}

impl Profile {
    /// Parse a profile name. Accepts the lowercase names `dev`, `prod`, `test`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "dev" => Some(Self::Dev),
            "prod" => Some(Self::Prod),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    /// The canonical lowercase name of this profile.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the resolved profile came from, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    /// Explicit CLI parameter.
    Explicit,
    /// `CONFGEN_PROFILE` environment variable.
    Environment,
    /// Inferred from the invoking task names.
    Invocation,
    /// Configured default.
    Default,
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfileSource::Explicit => "explicit parameter",
            ProfileSource::Environment => "environment variable",
            ProfileSource::Invocation => "invocation context",
            ProfileSource::Default => "default",
        };
        f.write_str(s)
    }
}

/// The outcome of profile resolution: the profile plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedProfile {
    /// The active profile.
    pub profile: Profile,
    /// Where the profile came from.
    pub source: ProfileSource,
}

/// Resolve the active profile.
///
/// `invocations` are the names of the build tasks that triggered generation
/// (e.g. `dev`, `build`); `dev_words` and `prod_words` are the configured
/// task-name lists that imply `dev` and `prod` respectively. Matching is
/// case-insensitive. An explicit or environment-provided name outside the
/// closed profile set is an error rather than a silent fallback.
pub fn resolve(
    explicit: Option<&str>,
    env: &HashMap<String, String>,
    invocations: &[String],
    dev_words: &[String],
    prod_words: &[String],
    default_profile: Profile,
) -> Result<ResolvedProfile> {
    if let Some(name) = explicit {
        let profile = parse_required(name)?;
        return Ok(ResolvedProfile {
            profile,
            source: ProfileSource::Explicit,
        });
    }

    if let Some(name) = env.get(PROFILE_ENV_VAR) {
        let profile = parse_required(name)?;
        return Ok(ResolvedProfile {
            profile,
            source: ProfileSource::Environment,
        });
    }

    // Dev-mode invocations take precedence over build invocations when a
    // wrapper passes both (e.g. a dev loop that also packages).
    if matches_any(invocations, dev_words) {
        return Ok(ResolvedProfile {
            profile: Profile::Dev,
            source: ProfileSource::Invocation,
        });
    }
    if matches_any(invocations, prod_words) {
        return Ok(ResolvedProfile {
            profile: Profile::Prod,
            source: ProfileSource::Invocation,
        });
    }

    Ok(ResolvedProfile {
        profile: default_profile,
        source: ProfileSource::Default,
    })
}

fn parse_required(name: &str) -> Result<Profile> {
    Profile::from_str(name).ok_or_else(|| {
        ConfgenError::UserError(format!(
            "unknown profile '{}' (expected one of: dev, prod, test)",
            name.trim()
        ))
    })
}

fn matches_any(invocations: &[String], words: &[String]) -> bool {
    invocations
        .iter()
        .any(|inv| words.iter().any(|w| inv.eq_ignore_ascii_case(w)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn dev_words() -> Vec<String> {
        words(&["dev", "run", "watch"])
    }

    fn prod_words() -> Vec<String> {
        words(&["build", "package", "assemble"])
    }

    #[test]
    fn explicit_parameter_wins() {
        let mut env = HashMap::new();
        env.insert(PROFILE_ENV_VAR.to_string(), "dev".to_string());
        let resolved = resolve(
            Some("prod"),
            &env,
            &words(&["dev"]),
            &dev_words(),
            &prod_words(),
            Profile::Test,
        )
        .unwrap();
        assert_eq!(resolved.profile, Profile::Prod);
        assert_eq!(resolved.source, ProfileSource::Explicit);
    }

    #[test]
    fn environment_variable_beats_invocation() {
        let mut env = HashMap::new();
        env.insert(PROFILE_ENV_VAR.to_string(), "test".to_string());
        let resolved = resolve(
            None,
            &env,
            &words(&["build"]),
            &dev_words(),
            &prod_words(),
            Profile::Dev,
        )
        .unwrap();
        assert_eq!(resolved.profile, Profile::Test);
        assert_eq!(resolved.source, ProfileSource::Environment);
    }

    #[test]
    fn dev_invocation_implies_dev() {
        let env = HashMap::new();
        let resolved = resolve(
            None,
            &env,
            &words(&["watch"]),
            &dev_words(),
            &prod_words(),
            Profile::Prod,
        )
        .unwrap();
        assert_eq!(resolved.profile, Profile::Dev);
        assert_eq!(resolved.source, ProfileSource::Invocation);
    }

    #[test]
    fn build_invocation_implies_prod() {
        let env = HashMap::new();
        let resolved = resolve(
            None,
            &env,
            &words(&["assemble"]),
            &dev_words(),
            &prod_words(),
            Profile::Dev,
        )
        .unwrap();
        assert_eq!(resolved.profile, Profile::Prod);
        assert_eq!(resolved.source, ProfileSource::Invocation);
    }

    #[test]
    fn invocation_matching_is_case_insensitive() {
        let env = HashMap::new();
        let resolved = resolve(
            None,
            &env,
            &words(&["BUILD"]),
            &dev_words(),
            &prod_words(),
            Profile::Dev,
        )
        .unwrap();
        assert_eq!(resolved.profile, Profile::Prod);
    }

    #[test]
    fn dev_invocation_beats_prod_invocation() {
        let env = HashMap::new();
        let resolved = resolve(
            None,
            &env,
            &words(&["build", "run"]),
            &dev_words(),
            &prod_words(),
            Profile::Test,
        )
        .unwrap();
        assert_eq!(resolved.profile, Profile::Dev);
    }

    #[test]
    fn falls_back_to_default() {
        let env = HashMap::new();
        let resolved = resolve(
            None,
            &env,
            &[],
            &dev_words(),
            &prod_words(),
            Profile::Test,
        )
        .unwrap();
        assert_eq!(resolved.profile, Profile::Test);
        assert_eq!(resolved.source, ProfileSource::Default);
    }

    #[test]
    fn unknown_explicit_profile_is_an_error() {
        let env = HashMap::new();
        let result = resolve(
            Some("staging"),
            &env,
            &[],
            &dev_words(),
            &prod_words(),
            Profile::Dev,
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("staging"));
    }

    #[test]
    fn unknown_env_profile_is_an_error() {
        let mut env = HashMap::new();
        env.insert(PROFILE_ENV_VAR.to_string(), "qa".to_string());
        let result = resolve(None, &env, &[], &dev_words(), &prod_words(), Profile::Dev);
        assert!(result.is_err());
    }

    #[test]
    fn resolution_is_deterministic() {
        let env = HashMap::new();
        let a = resolve(None, &env, &[], &dev_words(), &prod_words(), Profile::Dev).unwrap();
        let b = resolve(None, &env, &[], &dev_words(), &prod_words(), Profile::Dev).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn profile_from_str_trims_whitespace() {
        assert_eq!(Profile::from_str(" prod "), Some(Profile::Prod));
        assert_eq!(Profile::from_str("PROD"), None);
        assert_eq!(Profile::from_str(""), None);
    }

    #[test]
    fn profile_display_round_trips() {
        for p in [Profile::Dev, Profile::Prod, Profile::Test] {
            assert_eq!(Profile::from_str(p.as_str()), Some(p));
        }
    }
}

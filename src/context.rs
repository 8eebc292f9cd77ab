//! Generation context resolution for confgen.
//!
//! All ambient process state a run depends on (working directory,
//! environment variables, scratch directory) is captured here once, up
//! front, and threaded explicitly through the rest of the pipeline. Nothing
//! downstream reads `std::env` directly, which keeps resolution
//! deterministic and makes every stage testable with a synthetic context.

use crate::error::{ConfgenError, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the scratch directory.
pub const SCRATCH_ENV_VAR: &str = "CONFGEN_SCRATCH_DIR";

/// Default name of the tool's manifest at the project root.
pub const DEFAULT_CONFIG_FILE: &str = "confgen.yaml";

/// Directory under the project root holding the run log.
pub const STATE_DIR: &str = ".confgen";

/// Captured inputs for one generation run.
///
/// All paths are absolute.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Project root that property sources, templates, and the manifest are
    /// resolved against.
    pub project_root: PathBuf,

    /// Snapshot of the process environment at startup.
    pub env: HashMap<String, String>,

    /// Transient scratch directory used for dev output and as the last-resort
    /// output location.
    pub scratch_dir: PathBuf,
}

impl GenerationContext {
    /// Resolve the context from the current process.
    ///
    /// `project_root` defaults to the current working directory; the scratch
    /// directory comes from `--scratch-dir`, then `CONFGEN_SCRATCH_DIR`,
    /// then the system temp directory.
    pub fn resolve(
        project_root: Option<&Path>,
        scratch_override: Option<&Path>,
    ) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            ConfgenError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        let project_root = match project_root {
            Some(root) if root.is_absolute() => root.to_path_buf(),
            Some(root) => cwd.join(root),
            None => cwd,
        };

        let env_snapshot: HashMap<String, String> = env::vars().collect();

        let scratch_dir = match scratch_override {
            Some(dir) => dir.to_path_buf(),
            None => env_snapshot
                .get(SCRATCH_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        };

        Ok(Self {
            project_root,
            env: env_snapshot,
            scratch_dir,
        })
    }

    /// Build a context from explicit parts. Used by tests to run the whole
    /// pipeline against a synthetic environment.
    pub fn from_parts(
        project_root: impl Into<PathBuf>,
        env: HashMap<String, String>,
        scratch_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            env,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Path of the tool manifest at the project root.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(DEFAULT_CONFIG_FILE)
    }

    /// Path of the append-only run log.
    pub fn events_path(&self) -> PathBuf {
        self.project_root.join(STATE_DIR).join("events.ndjson")
    }
}

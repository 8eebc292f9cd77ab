//! Shared test scaffolding: temporary project trees for pipeline tests.

use crate::context::GenerationContext;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project tree with `config/` and `templates/` directories.
pub(crate) struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        Self { dir }
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under the project root, creating parents as needed.
    pub(crate) fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// A scratch directory inside the project tree.
    pub(crate) fn scratch(&self) -> PathBuf {
        let path = self.dir.path().join("scratch");
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    /// A generation context with a synthetic (empty) environment, so tests
    /// never depend on the real process environment.
    pub(crate) fn ctx(&self) -> GenerationContext {
        GenerationContext::from_parts(self.root(), HashMap::new(), self.scratch())
    }

    /// A generation context with the given environment variables.
    pub(crate) fn ctx_with_env(&self, env: &[(&str, &str)]) -> GenerationContext {
        let env = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GenerationContext::from_parts(self.root(), env, self.scratch())
    }
}

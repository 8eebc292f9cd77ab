//! Configuration model for confgen.
//!
//! This module defines the Config struct that represents `confgen.yaml`, the
//! tool's own manifest: where property sources live, which artifacts to
//! generate from which templates, and how the active profile is inferred.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::ArtifactSpec;

//! Error types for the confgen CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error
//! messages. Every variant names the offending path or key so a failing
//! build step points straight at the broken input.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for confgen operations.
///
/// Each variant maps to a distinct exit code. All failures are fatal and
/// surfaced synchronously; inputs are static configuration, so nothing is
/// retried.
#[derive(Error, Debug)]
pub enum ConfgenError {
    /// User provided invalid arguments, or an input could not be read/parsed.
    #[error("{0}")]
    UserError(String),

    /// The base property file is absent. Overlay files may be missing, the
    /// base file may not.
    #[error("required property source not found: {0}")]
    MissingRequiredSource(PathBuf),

    /// A template file named by the artifact manifest is absent.
    #[error("template not found: {0}")]
    MissingTemplate(PathBuf),

    /// A template placeholder resolved to nothing, in properties and in the
    /// environment fallback.
    #[error("unresolved placeholder '{name}' in template '{template}'")]
    MissingVariable {
        /// The placeholder identifier that could not be resolved.
        name: String,
        /// The template file the placeholder was found in.
        template: String,
    },

    /// No output location: the output-path property is not set and the
    /// environment fallback variable is unset.
    #[error(
        "no output location: property '{key}' is not set and environment variable '{env_var}' is unset"
    )]
    MissingOutputLocation {
        /// The property key that was expected to hold the output path.
        key: String,
        /// The environment variable consulted as fallback.
        env_var: String,
    },
}

impl ConfgenError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfgenError::UserError(_) => exit_codes::USER_ERROR,
            ConfgenError::MissingRequiredSource(_) => exit_codes::MISSING_SOURCE,
            ConfgenError::MissingTemplate(_) => exit_codes::MISSING_TEMPLATE,
            ConfgenError::MissingVariable { .. } => exit_codes::MISSING_VARIABLE,
            ConfgenError::MissingOutputLocation { .. } => exit_codes::MISSING_OUTPUT_LOCATION,
        }
    }
}

/// Result type alias for confgen operations.
pub type Result<T> = std::result::Result<T, ConfgenError>;

//! Command implementations for confgen.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod generate;
mod profile_cmd;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Generate(args) => generate::cmd_generate(args),
        Command::Profile(args) => profile_cmd::cmd_profile(args),
    }
}

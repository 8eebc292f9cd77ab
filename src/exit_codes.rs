//! Exit code constants for the confgen CLI.
//!
//! Each fatal failure class gets a distinct exit code so that build wrappers
//! can tell configuration mistakes apart from missing inputs:
//! - 0: Success
//! - 1: User error (bad args, invalid config, unreadable input)
//! - 2: Required property source missing
//! - 3: Template file missing
//! - 4: Unresolvable template placeholder
//! - 5: No output location configured

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config file, or malformed input.
pub const USER_ERROR: i32 = 1;

/// The base property file is absent.
pub const MISSING_SOURCE: i32 = 2;

/// A template file is absent.
pub const MISSING_TEMPLATE: i32 = 3;

/// A template placeholder has no resolvable value.
pub const MISSING_VARIABLE: i32 = 4;

/// Neither the output-path property nor its environment fallback is set.
pub const MISSING_OUTPUT_LOCATION: i32 = 5;

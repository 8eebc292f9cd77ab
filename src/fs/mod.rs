//! Filesystem utilities for confgen.
//!
//! Artifact writes go through `atomic_write` so that a crash mid-run never
//! leaves a truncated artifact behind for the consuming service to read.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_text};

//! Run log for confgen.
//!
//! Each successful generation appends one event to
//! `.confgen/events.ndjson` under the project root (one JSON object per
//! line), giving build pipelines an audit trail of when artifacts were
//! materialized, under which profile, and where they went. The log is
//! best-effort: artifacts are already on disk when it is written, so an
//! append failure downgrades to a warning in the caller, never a run
//! failure.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: the operation performed (currently only `generate`)
//! - `profile`: the active profile for the run
//! - `details`: freeform object (output directory, artifact paths)

use crate::context::GenerationContext;
use crate::error::{ConfgenError, Result};
use crate::profile::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Artifacts generated and written.
    Generate,
}

/// A single run-log event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Timestamp when the event was created.
    pub ts: DateTime<Utc>,

    /// The action performed.
    pub action: EventAction,

    /// The active profile for the run.
    pub profile: Profile,

    /// Action-specific details.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl Event {
    /// Create a new event with the current timestamp.
    pub fn new(action: EventAction, profile: Profile) -> Self {
        Self {
            ts: Utc::now(),
            action,
            profile,
            details: Value::Null,
        }
    }

    /// Attach action-specific details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }
}

/// Append an event to the run log, creating the log directory on first use.
pub fn append_event(ctx: &GenerationContext, event: &Event) -> Result<()> {
    let path = ctx.events_path();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ConfgenError::UserError(format!(
                "failed to create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let line = serde_json::to_string(event)
        .map_err(|e| ConfgenError::UserError(format!("failed to serialize event: {}", e)))?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            ConfgenError::UserError(format!(
                "failed to open run log '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", line)
        .map_err(|e| ConfgenError::UserError(format!("failed to append to run log: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn test_ctx(dir: &TempDir) -> GenerationContext {
        GenerationContext::from_parts(dir.path(), HashMap::new(), dir.path().join("scratch"))
    }

    #[test]
    fn append_creates_log_and_writes_one_line() {
        let dir = TempDir::new().unwrap();
        let ctx = test_ctx(&dir);

        let event = Event::new(EventAction::Generate, Profile::Prod)
            .with_details(json!({"output_dir": "/etc/app"}));
        append_event(&ctx, &event).unwrap();

        let content = fs::read_to_string(ctx.events_path()).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn appended_events_accumulate() {
        let dir = TempDir::new().unwrap();
        let ctx = test_ctx(&dir);

        for _ in 0..3 {
            append_event(&ctx, &Event::new(EventAction::Generate, Profile::Dev)).unwrap();
        }

        let content = fs::read_to_string(ctx.events_path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn event_lines_round_trip_as_json() {
        let dir = TempDir::new().unwrap();
        let ctx = test_ctx(&dir);

        let event = Event::new(EventAction::Generate, Profile::Test)
            .with_details(json!({"artifacts": ["service.properties", "service.xml"]}));
        append_event(&ctx, &event).unwrap();

        let content = fs::read_to_string(ctx.events_path()).unwrap();
        let parsed: Event = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed.action, EventAction::Generate);
        assert_eq!(parsed.profile, Profile::Test);
        assert_eq!(parsed.details["artifacts"][0], "service.properties");
    }
}

//! Property file loading and the tagged property store.

use crate::error::{ConfgenError, Result};
use crate::profile::Profile;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// An ordered mapping from unscoped key to value.
///
/// Keys are unique; inserting an existing key replaces its value but keeps
/// its original position, so iteration order is first-insertion order and
/// deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct PropertyLayer {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl PropertyLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair. An existing key keeps its position and gets
    /// the new value (later sources override earlier ones key-for-key).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, value.into());
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether the layer holds the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .map(|k| (k.as_str(), self.values[k].as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the layer is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Loaded property sources, split by profile tag at parse time.
///
/// A key `%<profile>.<name>` lands in the overlay for that profile under its
/// unscoped `<name>`; unscoped keys land in the base layer. Keys carrying an
/// unrecognized profile prefix are dropped (the profile set is closed), so no
/// `%`-prefixed key survives loading.
#[derive(Debug, Clone, Default)]
pub struct RawProperties {
    /// Unscoped keys.
    pub base: PropertyLayer,
    /// Profile-scoped overlays, keyed by the tagging profile.
    pub overlays: BTreeMap<Profile, PropertyLayer>,
}

impl RawProperties {
    /// Load and merge an ordered sequence of property files.
    ///
    /// The first path is the required base file; its absence is a fatal
    /// configuration error. Every later path is an optional overlay file and
    /// is silently skipped when absent. Later files override earlier ones
    /// key-for-key within the same layer.
    pub fn load(paths: &[impl AsRef<Path>]) -> Result<Self> {
        let mut props = Self::default();

        for (index, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            if !path.exists() {
                if index == 0 {
                    return Err(ConfgenError::MissingRequiredSource(path.to_path_buf()));
                }
                continue;
            }

            let text = std::fs::read_to_string(path).map_err(|e| {
                ConfgenError::UserError(format!(
                    "failed to read property file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            for (key, value) in parse_properties(&text) {
                props.insert_tagged(&key, value);
            }
        }

        Ok(props)
    }

    /// Route a raw key into the base layer or a profile overlay.
    fn insert_tagged(&mut self, key: &str, value: String) {
        match split_profile_prefix(key) {
            Some((Some(profile), name)) => {
                self.overlays.entry(profile).or_default().insert(name, value);
            }
            Some((None, name)) => self.base.insert(name, value),
            // Unknown profile prefix: the key can never become active.
            None => {}
        }
    }
}

/// Split a raw key into its profile tag and unscoped name.
///
/// Returns `Some((None, name))` for unscoped keys, `Some((Some(p), name))`
/// for keys scoped to a known profile, and `None` for keys with an
/// unrecognized `%` prefix.
fn split_profile_prefix(key: &str) -> Option<(Option<Profile>, &str)> {
    let Some(scoped) = key.strip_prefix('%') else {
        return Some((None, key));
    };
    let (prefix, name) = scoped.split_once('.')?;
    let profile = Profile::from_str(prefix)?;
    if name.is_empty() {
        return None;
    }
    Some((Some(profile), name))
}

/// Parse `.properties`-style text into key/value pairs in file order.
///
/// Supported syntax: `key=value` and `key: value`, `#`/`!` comment lines,
/// blank lines, and trailing-backslash line continuation. Whitespace around
/// key and value is trimmed. A line without a separator yields the whole
/// line as a key with an empty value.
pub(crate) fn parse_properties(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let mut logical = line.trim().to_string();
        if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
            continue;
        }

        // Trailing backslash joins the next line.
        while logical.ends_with('\\') {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = match logical.find(['=', ':']) {
            Some(pos) => (
                logical[..pos].trim().to_string(),
                logical[pos + 1..].trim().to_string(),
            ),
            None => (logical.trim().to_string(), String::new()),
        };

        if !key.is_empty() {
            pairs.push((key, value));
        }
    }

    pairs
}

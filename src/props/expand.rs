//! Profile expansion: flatten the tagged store for one active profile.

use super::store::{PropertyLayer, RawProperties};
use crate::profile::Profile;

/// Produce the effective property map for `profile`.
///
/// Pure function: base values first, then the active profile's overlay,
/// which wins on any shared unscoped name regardless of load order. Overlays
/// for other profiles contribute nothing. Every key in the result is
/// unscoped; iteration order is base insertion order followed by
/// overlay-only keys in overlay insertion order.
pub fn expand(raw: &RawProperties, profile: Profile) -> PropertyLayer {
    let mut effective = PropertyLayer::new();

    for (key, value) in raw.base.iter() {
        effective.insert(key, value);
    }

    if let Some(overlay) = raw.overlays.get(&profile) {
        for (key, value) in overlay.iter() {
            effective.insert(key, value);
        }
    }

    effective
}

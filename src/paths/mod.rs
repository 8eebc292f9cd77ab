//! Profile-dependent output path resolution.
//!
//! The output directory for generated artifacts comes from a property (or an
//! environment fallback) whose value is interpreted per profile:
//!
//! | profile | rule |
//! |---------|------|
//! | dev     | rooted under the scratch directory, then normalized |
//! | prod    | normalized as an absolute forward-slash path |
//! | test    | used as given |
//!
//! An empty or blank value always falls back to the scratch directory,
//! whatever the profile. Normalization is purely lexical: separators become
//! `/`, `.` segments are dropped, `..` segments are resolved without
//! escaping the root, and repeated separators collapse.

use crate::profile::Profile;
use std::path::{Path, PathBuf};

/// Compute the output directory for generated artifacts.
pub fn resolve_output_dir(profile: Profile, raw: &str, scratch: &Path) -> PathBuf {
    if raw.trim().is_empty() {
        return scratch.to_path_buf();
    }

    match profile {
        Profile::Dev => {
            let joined = format!("{}/{}", scratch.display(), raw);
            PathBuf::from(normalize(&joined))
        }
        Profile::Prod => {
            let normalized = normalize(raw);
            if normalized.starts_with('/') {
                PathBuf::from(normalized)
            } else {
                PathBuf::from(format!("/{}", normalized))
            }
        }
        Profile::Test => PathBuf::from(raw),
    }
}

/// Lexically normalize a path string to forward-slash form.
///
/// Does not touch the filesystem: `..` above the root of an absolute path is
/// dropped, while a relative path keeps leading `..` segments.
pub fn normalize(path: &str) -> String {
    let forward = path.replace('\\', "/");
    let absolute = forward.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in forward.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&s) if s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    match (absolute, body.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_roots_under_scratch() {
        let result = resolve_output_dir(Profile::Dev, "app/cfg", Path::new("/tmp"));
        assert_eq!(result, PathBuf::from("/tmp/app/cfg"));
    }

    #[test]
    fn dev_normalizes_dot_segments() {
        let result = resolve_output_dir(Profile::Dev, "./app/../svc/cfg", Path::new("/tmp"));
        assert_eq!(result, PathBuf::from("/tmp/svc/cfg"));
    }

    #[test]
    fn prod_keeps_already_normalized_absolute_path() {
        let result = resolve_output_dir(Profile::Prod, "/etc/app/cfg", Path::new("/tmp"));
        assert_eq!(result, PathBuf::from("/etc/app/cfg"));
    }

    #[test]
    fn prod_converts_backslashes() {
        let result = resolve_output_dir(Profile::Prod, r"\etc\app\cfg", Path::new("/tmp"));
        assert_eq!(result, PathBuf::from("/etc/app/cfg"));
    }

    #[test]
    fn prod_makes_relative_paths_absolute() {
        let result = resolve_output_dir(Profile::Prod, "etc/app", Path::new("/tmp"));
        assert_eq!(result, PathBuf::from("/etc/app"));
    }

    #[test]
    fn empty_raw_falls_back_to_scratch_for_all_profiles() {
        for profile in [Profile::Dev, Profile::Prod, Profile::Test] {
            let result = resolve_output_dir(profile, "", Path::new("/tmp/scratch"));
            assert_eq!(result, PathBuf::from("/tmp/scratch"), "profile {}", profile);
        }
    }

    #[test]
    fn blank_raw_falls_back_to_scratch() {
        let result = resolve_output_dir(Profile::Prod, "   ", Path::new("/tmp/scratch"));
        assert_eq!(result, PathBuf::from("/tmp/scratch"));
    }

    #[test]
    fn test_profile_uses_raw_value_unmodified() {
        let result = resolve_output_dir(Profile::Test, "relative/./odd", Path::new("/tmp"));
        assert_eq!(result, PathBuf::from("relative/./odd"));
    }

    #[test]
    fn normalize_collapses_repeated_separators() {
        assert_eq!(normalize("/a//b///c"), "/a/b/c");
    }

    #[test]
    fn normalize_drops_dot_segments() {
        assert_eq!(normalize("/a/./b/."), "/a/b");
        assert_eq!(normalize("./a"), "a");
    }

    #[test]
    fn normalize_resolves_parent_segments() {
        assert_eq!(normalize("/a/b/../c"), "/a/c");
        assert_eq!(normalize("a/b/../../c"), "c");
    }

    #[test]
    fn normalize_does_not_escape_absolute_root() {
        assert_eq!(normalize("/../../a"), "/a");
    }

    #[test]
    fn normalize_keeps_leading_parent_on_relative_paths() {
        assert_eq!(normalize("../a"), "../a");
        assert_eq!(normalize("../../a/b"), "../../a/b");
    }

    #[test]
    fn normalize_degenerate_inputs() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("."), ".");
        assert_eq!(normalize(""), ".");
    }
}

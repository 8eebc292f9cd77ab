//! Atomic artifact writes.
//!
//! Generated artifacts are consumed by an external service at startup, so a
//! half-written file is worse than no file. Every write follows the same
//! pattern:
//!
//! 1. Write the content to a temporary file in the destination directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! On POSIX the rename is atomic when source and destination share a
//! filesystem, which holds here because the temp file lives next to the
//! target. On a crash a stray `.{filename}.tmp` may remain; it is
//! overwritten by the next run.

use crate::error::{ConfgenError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// The target file is fully overwritten; it is never observable in a
/// partial state.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ConfgenError::UserError(format!(
                "failed to create output directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;
    replace(&temp_path, path)?;

    Ok(())
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around `atomic_write` for rendered artifact text.
pub fn atomic_write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary file path next to the target, so the final rename stays on one
/// filesystem.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ConfgenError::UserError(format!("invalid output path '{}'", target.display()))
        })?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        ConfgenError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let written = file
        .write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            ConfgenError::UserError(format!(
                "failed to write temporary file '{}': {}",
                path.display(),
                e
            ))
        });

    if written.is_err() {
        let _ = fs::remove_file(path);
    }
    written
}

#[cfg(unix)]
fn replace(source: &Path, target: &Path) -> Result<()> {
    // rename() replaces an existing destination atomically on POSIX.
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        ConfgenError::UserError(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    // Sync the directory entry as well for durability across power loss.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(windows)]
fn replace(source: &Path, target: &Path) -> Result<()> {
    // Windows rename() fails when the destination exists; remove it first.
    // Not atomic, but the window is a single syscall wide and the consumer
    // only reads these files at service startup.
    if target.exists() {
        fs::remove_file(target).map_err(|e| {
            let _ = fs::remove_file(source);
            ConfgenError::UserError(format!(
                "failed to remove previous artifact '{}': {}",
                target.display(),
                e
            ))
        })?;
    }
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        ConfgenError::UserError(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service.properties");

        atomic_write_text(&path, "db_url=jdbc:x\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "db_url=jdbc:x\n");
    }

    #[test]
    fn overwrites_existing_file_completely() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("service.properties");

        atomic_write_text(&path, "first run with a long body\n").unwrap();
        atomic_write_text(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/service.xml");

        atomic_write_text(&path, "<web-app/>\n").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        atomic_write_text(&path, "content").unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "stray temp files: {:?}", leftovers);
    }

    #[test]
    fn write_is_byte_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bytes.bin");
        let content = b"\x00\x01binary\xff";

        atomic_write(&path, content).unwrap();

        assert_eq!(fs::read(&path).unwrap(), content);
    }
}

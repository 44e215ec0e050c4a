//! Atomic file writes.
//!
//! Content goes to a temporary file in the target's directory, is synced,
//! and is then renamed over the target. Readers see either the old file or
//! the complete new one. Source and target share a directory, so the
//! rename never crosses filesystems.

use crate::error::{Result, SpiError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write bytes to a file, creating parent directories as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| {
            SpiError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| {
        SpiError::UserError(format!(
            "failed to create temporary file in '{}': {}",
            parent.display(),
            e
        ))
    })?;

    temp.write_all(content)
        .map_err(|e| SpiError::UserError(format!("failed to write to temporary file: {}", e)))?;
    temp.as_file().sync_all().map_err(|e| {
        SpiError::UserError(format!("failed to sync temporary file to disk: {}", e))
    })?;

    // On failure the returned error still owns the temp file and removes it on drop.
    temp.persist(path).map_err(|e| {
        SpiError::UserError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e.error
        ))
    })?;

    #[cfg(unix)]
    if let Ok(dir) = fs::File::open(parent) {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

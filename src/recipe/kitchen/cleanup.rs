// src/recipe/kitchen/cleanup.rs

//! Post-install cleanup of the package tree

use crate::error::{Error, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Libtool archives: non-portable and obsolete
pub const LIBTOOL_ARCHIVE_MASK: &str = "*.la";

/// Remove every file below `dir` whose name matches `mask`
///
/// A missing directory is not an error. Returns the removed paths.
pub fn remove_files_by_mask(dir: &Path, mask: &str) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(mask)
        .map_err(|e| Error::ParseError(format!("Invalid file mask '{}': {}", mask, e)))?;

    if !dir.is_dir() {
        debug!("Skipping cleanup of missing directory {}", dir.display());
        return Ok(Vec::new());
    }

    let mut removed = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_dir() {
            continue;
        }
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            fs::remove_file(entry.path())?;
            debug!("Removed {}", entry.path().display());
            removed.push(entry.into_path());
        }
    }

    Ok(removed)
}

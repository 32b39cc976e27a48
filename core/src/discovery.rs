//! # Target Discovery
//!
//! Walks a project tree to build the batch list when no explicit list is given.

use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories that only ever hold generated or tool output.
const SKIPPED_DIRS: &[&str] = &["build"];

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.iter().any(|d| name == *d)
}

/// Lists files under `root` with the given extension, sorted by path.
///
/// Hidden directories (`.dart_tool`, `.git`) and `build/` are not entered.
pub fn discover_targets(root: &Path, extension: &str) -> AppResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(AppError::General(format!(
            "Scan directory not found: {:?}",
            root
        )));
    }

    let targets = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == extension))
        .collect();

    Ok(targets)
}

//! # File Pipeline
//!
//! Runs the rewrite over an ordered list of paths.
//!
//! Every path ends in exactly one [`Outcome`]. Failures are contained to the
//! file that produced them; the batch always visits every path.

use crate::error::AppResult;
use crate::transform::{Rewrite, Wrapper};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Interface to the files being rewritten.
///
/// Abstracted so the pipeline can be exercised against in-memory files.
pub trait FileStore {
    /// Whether `path` names an existing regular file.
    fn exists(&self, path: &Path) -> bool;
    /// Reads the whole file as UTF-8.
    fn read(&self, path: &Path) -> AppResult<String>;
    /// Replaces the file contents.
    fn write(&self, path: &Path, text: &str) -> AppResult<()>;
}

/// Standard store backed by `std::fs`.
pub struct LocalFiles;

impl FileStore for LocalFiles {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> AppResult<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, text: &str) -> AppResult<()> {
        Ok(fs::write(path, text)?)
    }
}

/// Terminal state of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The wrapper was applied (and written, unless dry-running).
    Fixed,
    /// Already wrapped, or nothing to wrap.
    Unchanged,
    /// The path does not exist.
    NotFound,
    /// Reading, rewriting or writing failed. Nothing was written.
    Error {
        /// Human readable cause.
        message: String,
    },
}

/// Outcome of one path in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The path as given.
    pub path: PathBuf,
    /// What happened to it.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.outcome {
            Outcome::Fixed => write!(f, "✓ Fixed: {}", path),
            Outcome::Unchanged => write!(f, "- Already fixed or no changes: {}", path),
            Outcome::NotFound => write!(f, "File not found: {}", path),
            Outcome::Error { message } => write!(f, "✗ Error fixing {}: {}", path, message),
        }
    }
}

/// Switches for a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute outcomes without writing anything.
    pub dry_run: bool,
}

/// All reports of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// One report per input path.
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// Number of files the wrapper was applied to.
    pub fn fixed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Fixed))
    }

    /// Number of files left as they were.
    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Unchanged))
    }

    /// Number of missing paths.
    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, Outcome::NotFound))
    }

    /// Number of files that failed.
    pub fn errors(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Error { .. }))
    }

    /// True when any file ended in [`Outcome::Error`].
    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }

    /// Machine readable form of the batch.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "files": self.reports,
            "fixed": self.fixed(),
            "unchanged": self.unchanged(),
            "not_found": self.not_found(),
            "errors": self.errors(),
        })
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done! {} fixed, {} unchanged, {} not found, {} failed",
            self.fixed(),
            self.unchanged(),
            self.not_found(),
            self.errors()
        )
    }
}

/// Rewrites a single file, writing only when the text changed.
///
/// Missing files are an [`Outcome`], not an error; IO and structural failures
/// are returned as `Err` and nothing is written.
pub fn process_file(
    path: &Path,
    store: &impl FileStore,
    wrapper: &Wrapper,
    options: RunOptions,
) -> AppResult<Outcome> {
    if !store.exists(path) {
        return Ok(Outcome::NotFound);
    }

    let content = store.read(path)?;
    let new_content = match wrapper.rewrite(&content)? {
        Rewrite::Rewritten(text) => text,
        Rewrite::Unchanged(reason) => {
            debug!("{:?}: {}", path, reason);
            return Ok(Outcome::Unchanged);
        }
    };

    if new_content == content {
        return Ok(Outcome::Unchanged);
    }

    if options.dry_run {
        info!("{:?}: would rewrite (dry run)", path);
    } else {
        store.write(path, &new_content)?;
        info!("{:?}: rewritten", path);
    }
    Ok(Outcome::Fixed)
}

/// Processes `paths` in order, calling `on_report` as each file finishes.
pub fn run_batch<P: AsRef<Path>>(
    paths: &[P],
    store: &impl FileStore,
    wrapper: &Wrapper,
    options: RunOptions,
    mut on_report: impl FnMut(&FileReport),
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for path in paths {
        let path = path.as_ref();
        let outcome = process_file(path, store, wrapper, options).unwrap_or_else(|e| {
            warn!("{:?}: {}", path, e);
            Outcome::Error {
                message: e.to_string(),
            }
        });

        let report = FileReport {
            path: path.to_path_buf(),
            outcome,
        };
        on_report(&report);
        summary.reports.push(report);
    }

    summary
}

#![deny(missing_docs)]

//! # blocwrap Core
//!
//! Idempotently wraps a Flutter widget's `build` return expression in a
//! `BlocBuilder`, adding the imports it needs.

/// Shared error types.
pub mod error;

/// Wrap literals and batch manifests.
pub mod config;

/// String and comment masking.
pub mod scanner;

/// Import directive injection.
pub mod imports;

/// Signature and `return` location, plus the idempotence gate.
pub mod locator;

/// Opening and closing splices.
pub mod splicer;

/// Per-file rewrite.
pub mod transform;

/// Batch processing over a file store.
pub mod pipeline;

/// Directory scanning for targets.
pub mod discovery;

pub use config::{Manifest, WrapConfig};
pub use discovery::discover_targets;
pub use error::{AppError, AppResult};
pub use imports::{add_import, add_imports};
pub use locator::{is_already_wrapped, locate, InjectionPoint, NoMatch};
pub use pipeline::{
    process_file, run_batch, BatchSummary, FileReport, FileStore, LocalFiles, Outcome, RunOptions,
};
pub use transform::{wrap_build_method, Rewrite, Skip, Wrapper};

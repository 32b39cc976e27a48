#![deny(missing_docs)]

//! # Run Command
//!
//! Resolves the batch list, runs the pipeline, and prints one line per file.
//!
//! Targets come from, in order:
//! 1. The `targets` of a `--manifest` file (relative to the manifest).
//! 2. Positional paths (relative to `--root`).
//! 3. `.dart` files found under `--scan`.
//!
//! With none of these, the built-in screen list is used relative to `--root`.

use crate::error::{CliError, CliResult};
use blocwrap_core::config::resolve_targets;
use blocwrap_core::{
    discover_targets, run_batch, BatchSummary, LocalFiles, Manifest, RunOptions, WrapConfig,
    Wrapper,
};
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Report format.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One line per file, then a summary.
    #[default]
    Text,
    /// A single JSON document on stdout.
    Json,
}

/// Arguments shared by `run` and `check`.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Files to process, in order.
    pub paths: Vec<PathBuf>,

    /// YAML manifest listing targets and optional wrap overrides.
    #[clap(long, env = "BLOCWRAP_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Directory to scan for `.dart` files.
    #[clap(long)]
    pub scan: Option<PathBuf>,

    /// Base directory for relative positional paths and the built-in list.
    #[clap(long, default_value = ".")]
    pub root: PathBuf,

    /// Compute outcomes without writing any file.
    #[clap(long)]
    pub dry_run: bool,

    /// Report format.
    #[clap(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Builds the ordered, de-duplicated target list and the wrap configuration.
pub fn resolve(args: &RunArgs) -> CliResult<(Vec<PathBuf>, WrapConfig)> {
    let mut targets = Vec::new();
    let mut config = WrapConfig::default();

    if let Some(manifest_path) = &args.manifest {
        let manifest = Manifest::load(manifest_path)?;
        targets.extend(manifest.targets);
        config = manifest.wrap;
    }

    targets.extend(resolve_targets(&args.root, &args.paths));

    if let Some(scan) = &args.scan {
        targets.extend(discover_targets(scan, "dart")?);
    }

    if targets.is_empty() && args.manifest.is_none() {
        info!("no targets given, using the built-in screen list");
        targets = resolve_targets(&args.root, &Manifest::default_targets());
    }

    let mut seen = HashSet::new();
    targets.retain(|p| seen.insert(p.clone()));
    Ok((targets, config))
}

/// Executes the batch, printing reports to stdout.
///
/// With `check` set, nothing is written and pending rewrites are an error.
pub fn execute(args: &RunArgs, check: bool) -> CliResult<BatchSummary> {
    let stdout = io::stdout();
    execute_to(args, check, &mut stdout.lock())
}

/// Executes the batch, writing the report lines and summary to `out`.
pub fn execute_to(args: &RunArgs, check: bool, out: &mut impl Write) -> CliResult<BatchSummary> {
    let (targets, config) = resolve(args)?;
    let wrapper = Wrapper::new(config)?;
    info!(
        "wrapping with marker {:?}, window {}",
        wrapper.config().marker,
        wrapper.config().window
    );
    let options = RunOptions {
        dry_run: args.dry_run || check,
    };

    if args.format == Format::Text && options.dry_run {
        writeln!(out, "Dry run: no files will be written.")?;
    }

    // The callback cannot return early; keep the first write failure.
    let mut write_error = None;
    let summary = run_batch(&targets, &LocalFiles, &wrapper, options, |report| {
        if args.format == Format::Text && write_error.is_none() {
            if let Err(e) = writeln!(out, "{}", report) {
                write_error = Some(e);
            }
        }
    });
    if let Some(e) = write_error {
        return Err(CliError::Io(e));
    }

    match args.format {
        Format::Text => writeln!(out, "\n{}", summary)?,
        Format::Json => {
            let doc = serde_json::to_string_pretty(&summary.to_json())
                .map_err(|e| CliError::General(e.to_string()))?;
            writeln!(out, "{}", doc)?;
        }
    }

    if summary.has_errors() {
        return Err(CliError::FilesFailed(summary.errors()));
    }
    if check && summary.fixed() > 0 {
        return Err(CliError::PendingChanges(summary.fixed()));
    }
    Ok(summary)
}

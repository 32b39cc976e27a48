//! # Per-File Transformation
//!
//! Chains import injection, location, the idempotence gate, and both splices
//! into one candidate output. Nothing here touches the filesystem, and a
//! failure in any step discards the whole candidate.

use crate::config::WrapConfig;
use crate::error::AppResult;
use crate::imports::add_imports;
use crate::locator::{is_already_wrapped, locate, NoMatch};
use crate::scanner::mask_literals;
use crate::splicer::{splice_close, splice_open};
use regex::Regex;
use std::fmt;
use tracing::debug;

/// Why a file was left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Signature or `return` keyword absent.
    NoMatch(NoMatch),
    /// The wrapper marker already follows the located `return`.
    AlreadyWrapped,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::NoMatch(m) => write!(f, "{}", m),
            Skip::AlreadyWrapped => write!(f, "already wrapped"),
        }
    }
}

/// Result of rewriting one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    /// The input must be kept byte-for-byte.
    Unchanged(Skip),
    /// Fully wrapped output, imports included.
    Rewritten(String),
}

/// A compiled wrap configuration, reusable across a batch.
#[derive(Debug, Clone)]
pub struct Wrapper {
    config: WrapConfig,
    signature: Regex,
}

impl Wrapper {
    /// Validates `config` and compiles its signature pattern.
    pub fn new(config: WrapConfig) -> AppResult<Self> {
        let signature = config.validate()?;
        Ok(Self { config, signature })
    }

    /// The configuration this wrapper was built from.
    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    /// Produces the wrapped candidate for `source`.
    ///
    /// Imports are only added together with the wrapper: a file that does not
    /// match, or is already wrapped, comes back [`Rewrite::Unchanged`].
    pub fn rewrite(&self, source: &str) -> AppResult<Rewrite> {
        let cfg = &self.config;
        let candidate = add_imports(source, &cfg.imports);
        let code = mask_literals(&candidate);

        let point = match locate(&code, &self.signature, cfg.window) {
            Ok(point) => point,
            Err(reason) => {
                debug!("skipping: {}", reason);
                return Ok(Rewrite::Unchanged(Skip::NoMatch(reason)));
            }
        };

        // Anchored on the keyword: a wrapped `return` is immediately followed by the marker.
        if is_already_wrapped(&code, point.keyword_start, &cfg.marker, cfg.window) {
            debug!("skipping: marker {:?} follows the return keyword", cfg.marker);
            return Ok(Rewrite::Unchanged(Skip::AlreadyWrapped));
        }

        let (opened, indent) = splice_open(&candidate, &point, cfg);
        let wrapped = splice_close(&opened, point.keyword_start, cfg, &indent)?;
        Ok(Rewrite::Rewritten(wrapped))
    }
}

/// One-shot helper: rewrites `source` with `config`, returning it unchanged when skipped.
pub fn wrap_build_method(source: &str, config: &WrapConfig) -> AppResult<String> {
    match Wrapper::new(config.clone())?.rewrite(source)? {
        Rewrite::Rewritten(text) => Ok(text),
        Rewrite::Unchanged(_) => Ok(source.to_string()),
    }
}

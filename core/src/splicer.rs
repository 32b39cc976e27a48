//! # Brace-Balanced Splicing
//!
//! Two steps, always run in sequence on the same candidate text:
//!
//! 1. [`splice_open`] replaces the located `return` keyword with the wrapper
//!    opening, leaving the original return expression in place.
//! 2. [`splice_close`] counts braces on the *post-injection* text, starting
//!    after the builder callback's `{`, and inserts the closing block before the
//!    line holding the brace that takes the depth back to zero.

use crate::config::WrapConfig;
use crate::error::{AppError, AppResult};
use crate::locator::InjectionPoint;
use crate::scanner::{line_ending, mask_literals};
use tracing::debug;

/// Leading spaces and tabs of the line containing `offset`.
fn indent_at(text: &str, offset: usize) -> &str {
    let line_start = text[..offset].rfind('\n').map_or(0, |p| p + 1);
    let line = &text[line_start..];
    let width = line.len() - line.trim_start_matches(|c: char| c == ' ' || c == '\t').len();
    &line[..width]
}

/// Builds the text that replaces the `return` keyword.
fn opening(cfg: &WrapConfig, indent: &str, nl: &str) -> String {
    format!(
        "return {wrapper}{nl}{indent}  {builder}{nl}{indent}    return",
        wrapper = cfg.wrapper.trim(),
        builder = cfg.builder.trim(),
    )
}

/// The closing block: ends the builder callback, then the wrapper call.
fn closing(indent: &str, nl: &str) -> String {
    format!("{indent}  }},{nl}{indent});")
}

/// Inserts the wrapper opening at `point`.
///
/// Returns the new text and the indentation of the original `return` line,
/// which [`splice_close`] reuses so both halves line up.
pub fn splice_open(source: &str, point: &InjectionPoint, cfg: &WrapConfig) -> (String, String) {
    let indent = indent_at(source, point.keyword_start).to_string();
    let mut out = String::with_capacity(source.len() + 128);
    out.push_str(&source[..point.keyword_start]);
    out.push_str(&opening(cfg, &indent, line_ending(source)));
    out.push_str(&source[point.offset..]);
    (out, indent)
}

/// Inserts the closing block after the builder opened at or after `from`.
///
/// Fails with [`AppError::Unbalanced`] when the builder line is missing or its
/// braces never close, so the caller can discard the whole candidate.
pub fn splice_close(text: &str, from: usize, cfg: &WrapConfig, indent: &str) -> AppResult<String> {
    let code = mask_literals(text);
    let builder = cfg.builder.trim();

    let marker = code[from..]
        .find(builder)
        .map(|p| from + p)
        .ok_or_else(|| AppError::Unbalanced(format!("builder line {:?} not found", builder)))?;

    let mut depth = 1usize;
    let mut terminal = None;
    for (i, b) in code.bytes().enumerate().skip(marker + builder.len()) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    terminal = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }

    let brace = terminal.ok_or_else(|| {
        let line = code[..marker].matches('\n').count() + 1;
        AppError::Unbalanced(format!("no closing brace for builder opened on line {}", line))
    })?;

    let line_start = text[..brace].rfind('\n').map_or(0, |p| p + 1);
    let lead = &text[line_start..brace];
    debug!(
        "terminal brace on line {}",
        text[..brace].matches('\n').count() + 1
    );

    let nl = line_ending(text);
    let block = closing(indent, nl);
    let mut out = String::with_capacity(text.len() + block.len() + 2);
    if lead.trim().is_empty() {
        out.push_str(&text[..line_start]);
        out.push_str(&block);
        out.push_str(nl);
        out.push_str(&text[line_start..]);
    } else {
        // Code shares the line with the terminal brace: split the line.
        out.push_str(&text[..line_start + lead.trim_end().len()]);
        out.push_str(nl);
        out.push_str(&block);
        out.push_str(nl);
        out.push_str(indent);
        out.push_str(&text[brace..]);
    }
    Ok(out)
}

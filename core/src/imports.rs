//! # Import Injection
//!
//! Ensures literal `import` directives exist in a Dart library.

use crate::scanner::{line_ending, mask_literals};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn import_line_re() -> &'static Regex {
    static IMPORT_RE: OnceLock<Regex> = OnceLock::new();
    IMPORT_RE.get_or_init(|| Regex::new(r"(?m)^import\s").expect("Invalid regex"))
}

/// Adds `import_line` directly after the last existing import.
///
/// Returns the source unchanged when the line is already present verbatim or
/// when the file has no import directive to anchor on.
pub fn add_import(source: &str, import_line: &str) -> String {
    let clean = import_line.trim();
    if source.contains(clean) {
        return source.to_string();
    }

    // Match on the masked view so `import` inside a multi-line string is ignored.
    let masked = mask_literals(source);
    let Some(last) = import_line_re().find_iter(&masked).last() else {
        debug!("no import directive to anchor {:?}", clean);
        return source.to_string();
    };

    let nl = line_ending(source);
    let mut new_source = String::with_capacity(source.len() + clean.len() + nl.len());
    match source[last.start()..].find('\n') {
        Some(rel) => {
            let insert_pos = last.start() + rel + 1;
            new_source.push_str(&source[..insert_pos]);
            new_source.push_str(clean);
            new_source.push_str(nl);
            new_source.push_str(&source[insert_pos..]);
        }
        None => {
            // The last import is also the last line of the file.
            new_source.push_str(source);
            new_source.push_str(nl);
            new_source.push_str(clean);
        }
    }
    debug!("inserted {:?}", clean);
    new_source
}

/// Applies [`add_import`] for each line in order.
pub fn add_imports<S: AsRef<str>>(source: &str, import_lines: &[S]) -> String {
    import_lines
        .iter()
        .fold(source.to_string(), |acc, line| add_import(&acc, line.as_ref()))
}

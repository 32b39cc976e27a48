//! # Literal Scanner
//!
//! A minimal Dart tokenizer that blanks out string literals and comments.
//!
//! The masked copy has exactly the same byte length and line structure as the
//! input, so offsets found in it (regex matches, brace positions) are valid
//! offsets into the original text. Every masked character becomes one space per
//! UTF-8 byte; newlines are always preserved.
//!
//! Handled forms:
//! - `// line` and nested `/* block */` comments.
//! - `'…'`, `"…"`, `'''…'''`, `"""…"""` with backslash escapes.
//! - Raw strings (`r'…'`), which have neither escapes nor interpolation.
//! - `${…}` interpolation, including strings nested inside it.

/// Returns a copy of `source` with every string literal and comment replaced by spaces.
pub fn mask_literals(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut masked = vec![false; bytes.len()];
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        i = match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => line_end(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => skip_block_comment(bytes, i),
            b'r' if is_raw_prefix(bytes, i) => skip_string(bytes, i + 1, true),
            b'\'' | b'"' => skip_string(bytes, i, false),
            _ => {
                i += 1;
                continue;
            }
        };
        masked[start..i].iter_mut().for_each(|m| *m = true);
    }

    let mut out = String::with_capacity(source.len());
    for (idx, ch) in source.char_indices() {
        if masked[idx] && ch != '\n' {
            out.extend(std::iter::repeat(' ').take(ch.len_utf8()));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Largest char boundary of `text` that is `<= idx`.
pub(crate) fn floor_boundary(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// End (exclusive) of a `len`-byte window of `text` starting at `start`.
pub(crate) fn window_end(text: &str, start: usize, len: usize) -> usize {
    floor_boundary(text, start.saturating_add(len))
}

/// Line terminator used by `text`: `"\r\n"` if any CRLF is present, else `"\n"`.
pub(crate) fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_raw_prefix(bytes: &[u8], i: usize) -> bool {
    let quote_follows = matches!(bytes.get(i + 1), Some(b'\'') | Some(b'"'));
    let starts_token = i == 0 || !is_ident_byte(bytes[i - 1]);
    quote_follows && starts_token
}

fn line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skips a string literal whose opening quote is at `start`.
///
/// Single-line strings stop at an unescaped newline so an unterminated literal
/// cannot swallow the rest of the file.
fn skip_string(bytes: &[u8], start: usize, raw: bool) -> usize {
    let quote = bytes[start];
    let triple = bytes[start..].starts_with(&[quote, quote, quote]);
    let mut i = start + if triple { 3 } else { 1 };

    while i < bytes.len() {
        let b = bytes[i];
        if !raw && b == b'\\' {
            i += 2;
            continue;
        }
        if triple {
            if bytes[i..].starts_with(&[quote, quote, quote]) {
                return i + 3;
            }
        } else if b == quote {
            return i + 1;
        } else if b == b'\n' {
            return i;
        }
        if !raw && b == b'$' && bytes.get(i + 1) == Some(&b'{') {
            i = skip_interpolation(bytes, i + 2);
            continue;
        }
        i += 1;
    }
    bytes.len()
}

/// Skips the body of `${…}`; `start` points just past the opening brace.
fn skip_interpolation(bytes: &[u8], start: usize) -> usize {
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            b'r' if is_raw_prefix(bytes, i) => {
                i = skip_string(bytes, i + 1, true);
                continue;
            }
            b'\'' | b'"' => {
                i = skip_string(bytes, i, false);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

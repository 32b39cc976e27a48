//! # Injection Point Location
//!
//! Finds where the builder wrapper opens, and decides whether it is already there.
//!
//! All functions take the *masked* view produced by
//! [`mask_literals`](crate::scanner::mask_literals), so a `return` inside a
//! comment or a marker inside a string never counts.

use crate::scanner::window_end;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn return_re() -> &'static Regex {
    static RETURN_RE: OnceLock<Regex> = OnceLock::new();
    RETURN_RE.get_or_init(|| Regex::new(r"\breturn\b").expect("Invalid regex"))
}

/// Where the wrapper opening goes. Offsets are byte offsets into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionPoint {
    /// Start of the matched method signature.
    pub signature_start: usize,
    /// Start of the `return` keyword.
    pub keyword_start: usize,
    /// Offset immediately after the `return` keyword.
    pub offset: usize,
}

/// Why no injection point exists. Neither case is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatch {
    /// The method signature does not occur in the file.
    Signature,
    /// The signature exists but no `return` follows within the window.
    Return,
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoMatch::Signature => write!(f, "method signature not found"),
            NoMatch::Return => write!(f, "no return statement after signature"),
        }
    }
}

/// Locates the first `return` within `window` bytes after the first signature match.
pub fn locate(code: &str, signature: &Regex, window: usize) -> Result<InjectionPoint, NoMatch> {
    let sig = signature.find(code).ok_or(NoMatch::Signature)?;
    let body_start = sig.end();
    let body_end = window_end(code, body_start, window);

    let kw = return_re()
        .find(&code[body_start..body_end])
        .ok_or(NoMatch::Return)?;

    Ok(InjectionPoint {
        signature_start: sig.start(),
        keyword_start: body_start + kw.start(),
        offset: body_start + kw.end(),
    })
}

/// True when `marker` occurs within `window` bytes starting at `offset`.
pub fn is_already_wrapped(code: &str, offset: usize, marker: &str, window: usize) -> bool {
    if offset >= code.len() {
        return false;
    }
    code[offset..window_end(code, offset, window)].contains(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WrapConfig;
    use crate::scanner::mask_literals;

    fn signature() -> Regex {
        WrapConfig::default().validate().unwrap()
    }

    const SCREEN: &str = r#"class _S extends State<S> {
  @override
  Widget build(BuildContext context) {
    final theme = Theme.of(context);
    return Scaffold(body: Text('hi'));
  }
}
"#;

    #[test]
    fn test_locate_finds_return() {
        let code = mask_literals(SCREEN);
        let point = locate(&code, &signature(), 500).unwrap();
        assert_eq!(&SCREEN[point.keyword_start..point.offset], "return");
        assert!(SCREEN[point.offset..].starts_with(" Scaffold("));
        assert!(SCREEN[point.signature_start..].starts_with("@override"));
    }

    #[test]
    fn test_locate_without_override_annotation() {
        let src = "Widget build(BuildContext context) {\n  return Container();\n}\n";
        let point = locate(&mask_literals(src), &signature(), 500).unwrap();
        assert_eq!(point.signature_start, 0);
    }

    #[test]
    fn test_locate_missing_signature() {
        let src = "Widget render(BuildContext context) { return Container(); }";
        assert_eq!(
            locate(&mask_literals(src), &signature(), 500),
            Err(NoMatch::Signature)
        );
    }

    #[test]
    fn test_locate_return_outside_window() {
        let filler = "    doSomething();\n".repeat(40);
        let src = format!("Widget build(BuildContext context) {{\n{filler}    return X();\n}}\n");
        assert_eq!(
            locate(&mask_literals(&src), &signature(), 500),
            Err(NoMatch::Return)
        );
        assert!(locate(&mask_literals(&src), &signature(), 2000).is_ok());
    }

    #[test]
    fn test_return_in_comment_is_skipped() {
        let src = "Widget build(BuildContext context) {\n  // return early\n  returnValue = 1;\n  return X();\n}\n";
        let point = locate(&mask_literals(src), &signature(), 500).unwrap();
        assert!(src[point.offset..].starts_with(" X();"));
    }

    #[test]
    fn test_is_already_wrapped_window() {
        let code = "Widget build(BuildContext context) {\n  return BlocBuilder<SettingsBloc, SettingsState>(";
        assert!(is_already_wrapped(code, 0, "BlocBuilder<SettingsBloc", 500));
        assert!(!is_already_wrapped(code, 0, "BlocBuilder<SettingsBloc", 20));
        assert!(!is_already_wrapped(code, code.len(), "BlocBuilder<SettingsBloc", 500));
    }

    #[test]
    fn test_marker_in_string_does_not_count() {
        let src = "Widget build(BuildContext context) {\n  log('BlocBuilder<SettingsBloc');\n  return X();\n}";
        assert!(!is_already_wrapped(&mask_literals(src), 0, "BlocBuilder<SettingsBloc", 500));
    }
}

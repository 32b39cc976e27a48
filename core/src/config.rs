//! # Configuration
//!
//! Literal text the engine matches and emits, plus the manifest format that
//! lists which files a batch run visits.

use crate::error::{AppError, AppResult};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Screens of the Otzaria app that render locale-dependent text.
const DEFAULT_TARGETS: &[&str] = &[
    "lib/tabs/reading_screen.dart",
    "lib/navigation/about_screen.dart",
    "lib/text_book/view/page_shape/page_shape_screen.dart",
    "lib/text_book/view/combined_view/combined_book_screen.dart",
    "lib/text_book/view/splited_view/splited_view_screen.dart",
    "lib/text_book/view/commentators_list_screen.dart",
    "lib/text_book/view/selected_line_links_view.dart",
    "lib/personal_notes/view/personal_notes_screen.dart",
    "lib/pdf_book/pdf_book_screen.dart",
    "lib/settings/settings_screen.dart",
    "lib/printing/printing_screen.dart",
];

/// Describes the single wrap-with-builder rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WrapConfig {
    /// Import lines that must be present once the wrapper is applied.
    pub imports: Vec<String>,
    /// Regex matching the method signature up to and including its `{`.
    pub signature: String,
    /// Substring whose presence near the signature means "already wrapped".
    pub marker: String,
    /// Constructor call opening the wrapper, e.g. `BlocBuilder<A, B>(`.
    pub wrapper: String,
    /// Callback line opening the builder body. Must end with `{`.
    pub builder: String,
    /// Size in bytes of the lookahead windows used by the locator and gate.
    pub window: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            imports: vec![
                "import 'package:flutter_bloc/flutter_bloc.dart';".to_string(),
                "import 'package:otzaria/settings/settings_bloc.dart';".to_string(),
            ],
            signature: r"(@override\s+)?Widget\s+build\(BuildContext\s+context\)\s*\{".to_string(),
            marker: "BlocBuilder<SettingsBloc".to_string(),
            wrapper: "BlocBuilder<SettingsBloc, SettingsState>(".to_string(),
            builder: "builder: (context, state) {".to_string(),
            window: 500,
        }
    }
}

impl WrapConfig {
    /// Compiles the signature pattern and checks the emitted fragments.
    pub fn validate(&self) -> AppResult<Regex> {
        if self.marker.is_empty() {
            return Err(AppError::Config("marker must not be empty".into()));
        }
        if !self.builder.trim_end().ends_with('{') {
            return Err(AppError::Config(format!(
                "builder line must open a block with '{{': {:?}",
                self.builder
            )));
        }
        if self.window == 0 {
            return Err(AppError::Config("window must be greater than zero".into()));
        }
        Ok(Regex::new(&self.signature)?)
    }
}

/// A batch description loaded from YAML.
///
/// ```yaml
/// targets:
///   - lib/settings/settings_screen.dart
/// wrap:
///   window: 800
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Ordered list of files to process.
    #[serde(default)]
    pub targets: Vec<PathBuf>,
    /// Overrides for the rewrite literals.
    #[serde(default)]
    pub wrap: WrapConfig,
}

impl Manifest {
    /// Parses a manifest from YAML text.
    pub fn from_yaml(text: &str) -> AppResult<Self> {
        let manifest: Manifest = serde_yaml::from_str(text)?;
        manifest.wrap.validate()?;
        Ok(manifest)
    }

    /// Loads a manifest file, resolving relative targets against its directory.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read manifest {:?}: {}", path, e))
        })?;
        let mut manifest = Self::from_yaml(&text)?;
        if let Some(base) = path.parent() {
            manifest.targets = resolve_targets(base, &manifest.targets);
        }
        Ok(manifest)
    }

    /// The built-in target list, relative to a Flutter project root.
    pub fn default_targets() -> Vec<PathBuf> {
        DEFAULT_TARGETS.iter().map(PathBuf::from).collect()
    }
}

/// Joins relative paths onto `base`, leaving absolute ones untouched.
pub fn resolve_targets(base: &Path, targets: &[PathBuf]) -> Vec<PathBuf> {
    targets
        .iter()
        .map(|t| if t.is_absolute() { t.clone() } else { base.join(t) })
        .collect()
}

use blocwrap_core::{
    run_batch, wrap_build_method, LocalFiles, Outcome, RunOptions, WrapConfig, Wrapper,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const SETTINGS_SCREEN: &str = r#"import 'package:flutter/material.dart';
import 'package:otzaria/settings/settings_event.dart';
import 'package:provider/provider.dart';

class SettingsScreen extends StatefulWidget {
  const SettingsScreen({super.key});

  @override
  State<SettingsScreen> createState() => _SettingsScreenState();
}

class _SettingsScreenState extends State<SettingsScreen> {
  bool _expanded = false;

  @override
  Widget build(BuildContext context) {
    // Titles use "{name}" placeholders; braces in strings must not count.
    final title = '${widget.runtimeType} {settings}';
    return Scaffold(
      appBar: AppBar(title: Text(title)),
      body: ListView(
        children: [
          SwitchListTile(
            value: _expanded,
            onChanged: (v) {
              setState(() {
                _expanded = v;
              });
            },
          ),
        ],
      ),
    );
  }

  void _reset() {
    setState(() => _expanded = false);
  }
}
"#;

fn brace_counts(text: &str) -> (usize, usize) {
    let code = blocwrap_core::scanner::mask_literals(text);
    (code.matches('{').count(), code.matches('}').count())
}

fn import_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|l| l.starts_with("import ")).collect()
}

#[test]
fn test_full_screen_rewrite() {
    let out = wrap_build_method(SETTINGS_SCREEN, &WrapConfig::default()).unwrap();

    assert_eq!(
        import_lines(&out),
        vec![
            "import 'package:flutter/material.dart';",
            "import 'package:otzaria/settings/settings_event.dart';",
            "import 'package:provider/provider.dart';",
            "import 'package:flutter_bloc/flutter_bloc.dart';",
            "import 'package:otzaria/settings/settings_bloc.dart';",
        ]
    );

    let expected_tail = r#"    return BlocBuilder<SettingsBloc, SettingsState>(
      builder: (context, state) {
        return Scaffold(
      appBar: AppBar(title: Text(title)),
      body: ListView(
        children: [
          SwitchListTile(
            value: _expanded,
            onChanged: (v) {
              setState(() {
                _expanded = v;
              });
            },
          ),
        ],
      ),
    );
      },
    );
  }

  void _reset() {
    setState(() => _expanded = false);
  }
}
"#;
    assert!(out.ends_with(expected_tail), "unexpected output:\n{}", out);

    let (open, close) = brace_counts(SETTINGS_SCREEN);
    assert_eq!(open, close);
    let (open, close) = brace_counts(&out);
    assert_eq!(open, close);
}

#[test]
fn test_batch_over_real_files_is_idempotent() {
    let dir = tempdir().unwrap();
    let screen = dir.path().join("settings_screen.dart");
    let model = dir.path().join("settings_model.dart");
    let missing = dir.path().join("about_screen.dart");
    fs::write(&screen, SETTINGS_SCREEN).unwrap();
    fs::write(&model, "import 'dart:core';\n\nclass Model {}\n").unwrap();

    let targets: Vec<PathBuf> = vec![screen.clone(), missing.clone(), model.clone()];
    let wrapper = Wrapper::new(WrapConfig::default()).unwrap();

    let first = run_batch(&targets, &LocalFiles, &wrapper, RunOptions::default(), |_| {});
    let outcomes: Vec<_> = first.reports.iter().map(|r| r.outcome.clone()).collect();
    assert_eq!(
        outcomes,
        vec![Outcome::Fixed, Outcome::NotFound, Outcome::Unchanged]
    );
    let after_first = fs::read_to_string(&screen).unwrap();

    let second = run_batch(&targets, &LocalFiles, &wrapper, RunOptions::default(), |_| {});
    assert_eq!(second.fixed(), 0);
    assert_eq!(second.unchanged(), 2);
    assert_eq!(fs::read_to_string(&screen).unwrap(), after_first);
    assert_eq!(
        fs::read_to_string(&model).unwrap(),
        "import 'dart:core';\n\nclass Model {}\n"
    );
}

#[test]
fn test_only_first_build_method_is_wrapped() {
    let src = r#"import 'package:flutter/material.dart';

class A extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    return const Text('a');
  }
}

class B extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    return const Text('b');
  }
}
"#;
    let out = wrap_build_method(src, &WrapConfig::default()).unwrap();
    assert_eq!(out.matches("BlocBuilder<SettingsBloc, SettingsState>(").count(), 1);
    assert!(out.contains("        return const Text('a');\n      },\n    );\n  }\n}\n\nclass B"));
    assert_eq!(wrap_build_method(&out, &WrapConfig::default()).unwrap(), out);
}

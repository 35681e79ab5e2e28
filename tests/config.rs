//! Configuration system tests
//!
//! Tests for config paths, YAML persistence, and config-driven editors.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scribe::clock::ManualClock;
use scribe::config::EditorConfig;
use scribe::config_paths;
use scribe::error::ConfigError;
use scribe::richtext::{FieldProps, RichTextEditor};
use scribe::{update, Msg};
use tempfile::TempDir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(file) = config_paths::config_file() {
        assert_eq!(file.file_name().unwrap(), "config.yaml");
        assert!(file.parent().unwrap().ends_with("scribe"));
    }
}

#[test]
fn test_logs_dir_is_inside_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(config));
    }
}

// ========================================================================
// Persistence Tests
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = EditorConfig {
        debounce_ms: 250,
        history_limit: 20,
        max_length: Some(500),
    };

    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert_eq!(EditorConfig::load_from(&path).unwrap(), config);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = EditorConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_load_invalid_yaml_is_yaml_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "debounce_ms: [not a number]\n").unwrap();
    let err = EditorConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "debounce_ms: 40\n").unwrap();
    let config = EditorConfig::load_from(&path).unwrap();
    assert_eq!(config.debounce(), Duration::from_millis(40));
    assert_eq!(config.history_limit, EditorConfig::default().history_limit);
    assert_eq!(config.max_length, None);
}

// ========================================================================
// Config-driven editors
// ========================================================================

#[test]
fn test_config_debounce_window_is_used() {
    let config = EditorConfig {
        debounce_ms: 40,
        ..EditorConfig::default()
    };
    let clock = ManualClock::new();
    let emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = emitted.clone();
    let mut editor = RichTextEditor::with_config(FieldProps::new(), &config, move |s: &str| {
        sink.borrow_mut().push(s.to_string())
    })
    .with_clock(clock.clone());

    update(
        &mut editor,
        Msg::Edit(scribe::editable::TextEdit::InsertText("a".into())),
    );
    clock.advance(Duration::from_millis(40));
    update(&mut editor, Msg::Tick);
    assert_eq!(*emitted.borrow(), vec!["<p>a</p>".to_string()]);
}

#[test]
fn test_config_max_length_is_a_fallback() {
    let config = EditorConfig {
        max_length: Some(50),
        ..EditorConfig::default()
    };
    let editor = RichTextEditor::with_config(FieldProps::new(), &config, |_| {});
    assert_eq!(editor.length().max_length, Some(50));

    let editor =
        RichTextEditor::with_config(FieldProps::new().with_max_length(5), &config, |_| {});
    assert_eq!(editor.length().max_length, Some(5));
}

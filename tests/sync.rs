//! Synchronization tests - debounce, echo suppression, inbound writes, clear

mod common;

use common::test_field;
use scribe::richtext::FieldProps;
use scribe::{EditingSurface, EditorHandle, Msg};

// ========================================================================
// Outbound path
// ========================================================================

#[test]
fn test_rapid_typing_emits_once_with_latest_content() {
    let mut field = test_field(FieldProps::new());
    for ch in ["a", "b", "c", "d"] {
        field.type_text(ch);
        field.wait(30);
    }
    assert!(field.emitted().is_empty());

    field.wait(100);
    assert_eq!(field.emitted(), vec!["<p>abcd</p>".to_string()]);
}

#[test]
fn test_length_updates_before_emission() {
    let mut field = test_field(FieldProps::new().with_max_length(10));
    field.type_text("Hello there, world");
    assert_eq!(field.editor.length().length, 18);
    assert_eq!(field.editor.length().over_count(), 8);
    assert!(field.emitted().is_empty());
}

#[test]
fn test_tick_before_deadline_does_nothing() {
    let mut field = test_field(FieldProps::new());
    field.type_text("x");
    field.wait(99);
    assert!(field.emitted().is_empty());
    field.wait(1);
    assert_eq!(field.emitted().len(), 1);
}

#[test]
fn test_unmount_cancels_pending_emission() {
    let mut field = test_field(FieldProps::new());
    field.type_text("draft");
    field.send(Msg::Unmount);
    field.wait(500);
    assert!(field.emitted().is_empty());
}

#[test]
fn test_caret_moves_do_not_emit() {
    let mut field = test_field(FieldProps::new().with_initial_value("<p>abc</p>"));
    field.select(0, 0, 2);
    field.wait(200);
    assert!(field.emitted().is_empty());
}

// ========================================================================
// Inbound path
// ========================================================================

#[test]
fn test_echo_does_not_rewrite_or_emit() {
    let mut field = test_field(FieldProps::new().with_value("<p>A</p>"));
    field.send(Msg::Focus);
    field.send(Msg::Edit(scribe::editable::TextEdit::Move {
        target: scribe::editable::MoveTarget::LineEnd,
        extend: false,
    }));
    field.type_text("B");
    field.wait(100);
    let emitted = field.emitted();
    assert_eq!(emitted, vec!["<p>AB</p>".to_string()]);

    let revision = field.editor.surface().revision();
    let caret = field.selection();
    field.send(Msg::ExternalValue(Some(emitted[0].clone())));

    assert_eq!(field.editor.surface().revision(), revision);
    assert_eq!(field.selection(), caret);
    field.wait(200);
    assert_eq!(field.emitted().len(), 1);
}

#[test]
fn test_external_value_replaces_content_without_emitting() {
    let mut field = test_field(FieldProps::new().with_value("<p>A</p>"));
    assert_eq!(field.editor.content(), "<p>A</p>");

    field.send(Msg::ExternalValue(Some("<p>B</p>".into())));
    assert_eq!(field.editor.content(), "<p>B</p>");
    field.wait(200);
    assert!(field.emitted().is_empty());
}

#[test]
fn test_external_value_cancels_pending_emission() {
    let mut field = test_field(FieldProps::new().with_value("<p>A</p>"));
    field.type_text("x");
    // Nothing was emitted yet, so a value matching the surface is not an echo
    field.send(Msg::ExternalValue(Some("<p>xA</p>".into())));
    field.send(Msg::ExternalValue(Some("<p>Reset</p>".into())));

    field.wait(200);
    assert_eq!(field.editor.content(), "<p>Reset</p>");
    assert!(field.emitted().is_empty());
}

#[test]
fn test_foreign_value_while_emission_pending_wins() {
    let mut field = test_field(FieldProps::new().with_value("<p>A</p>"));
    field.type_text("x");
    field.send(Msg::ExternalValue(Some("<p>Server</p>".into())));

    field.wait(150);
    assert_eq!(field.editor.content(), "<p>Server</p>");
    assert!(field.emitted().is_empty());
}

#[test]
fn test_emission_matching_owner_value_leaves_no_stale_echo() {
    let mut field = test_field(FieldProps::new().with_value("<p>A</p>"));
    field.send(Msg::Focus);
    field.send(Msg::Edit(scribe::editable::TextEdit::Move {
        target: scribe::editable::MoveTarget::DocumentEnd,
        extend: false,
    }));
    field.type_text("B");
    field.send(Msg::Edit(scribe::editable::TextEdit::DeleteBackward));
    field.wait(150);
    assert_eq!(field.emitted(), vec!["<p>A</p>".to_string()]);

    // The owner keeps its value, then resets it
    field.send(Msg::ExternalValue(Some("<p>A</p>".into())));
    field.send(Msg::ExternalValue(Some("<p>Reset</p>".into())));
    assert_eq!(field.editor.content(), "<p>Reset</p>");
}

#[test]
fn test_echo_after_emission_then_foreign_value() {
    let mut field = test_field(FieldProps::new().with_value("<p>A</p>"));
    field.type_text("x");
    field.wait(100);
    assert_eq!(field.emitted(), vec!["<p>xA</p>".to_string()]);

    field.send(Msg::ExternalValue(Some("<p>Other</p>".into())));
    assert_eq!(field.editor.content(), "<p>Other</p>");
    // A late copy of our emission is now foreign and applied
    field.send(Msg::ExternalValue(Some("<p>xA</p>".into())));
    assert_eq!(field.editor.content(), "<p>xA</p>");
    assert_eq!(field.emitted().len(), 1);
}

#[test]
fn test_external_value_keeps_caret_when_focused() {
    let mut field = test_field(FieldProps::new().with_value("<p>Hello</p>"));
    field.send(Msg::Focus);
    field.select(0, 2, 2);

    field.send(Msg::ExternalValue(Some("<p>Hello world</p>".into())));
    let caret = field.selection().unwrap();
    assert_eq!(caret.head.offset, 2);
}

#[test]
fn test_unchanged_external_value_is_ignored() {
    let mut field = test_field(FieldProps::new().with_value("<p>A</p>"));
    let revision = field.editor.surface().revision();
    field.send(Msg::ExternalValue(Some("<p>A</p>".into())));
    assert_eq!(field.editor.surface().revision(), revision);
}

// ========================================================================
// Clear and the documented scenarios
// ========================================================================

#[test]
fn test_clear_is_immediate() {
    let mut field = test_field(FieldProps::new().with_initial_value("<p>Hello</p>"));
    field.type_text("pending");
    field.editor.clear_content();

    assert_eq!(field.editor.content(), "");
    assert_eq!(field.emitted(), vec![String::new()]);
    assert_eq!(field.editor.length().length, 0);

    // The pending keystroke emission died with the clear
    field.wait(200);
    assert_eq!(field.emitted().len(), 1);
}

#[test]
fn test_uncontrolled_scenario() {
    let mut field = test_field(FieldProps::new().with_initial_value("<p>Hello</p>"));
    assert_eq!(field.editor.content(), "<p>Hello</p>");

    field.send(Msg::Focus);
    field.send(Msg::Edit(scribe::editable::TextEdit::Move {
        target: scribe::editable::MoveTarget::DocumentEnd,
        extend: false,
    }));
    field.type_text(" world");
    field.wait(120);
    assert_eq!(field.emitted(), vec!["<p>Hello world</p>".to_string()]);

    field.send(Msg::Clear);
    assert_eq!(field.editor.content(), "");
    assert_eq!(
        field.emitted(),
        vec!["<p>Hello world</p>".to_string(), String::new()]
    );
}

#[test]
fn test_controlled_scenario() {
    let mut field = test_field(FieldProps::new().with_value("<p>A</p>"));
    field.send(Msg::ExternalValue(Some("<p>B</p>".into())));
    assert_eq!(field.editor.content(), "<p>B</p>");
    assert!(field.emitted().is_empty());
}

#[test]
fn test_overflow_is_advisory() {
    let mut field = test_field(FieldProps::new().with_max_length(10));
    field.type_text("Thirteen char");
    assert_eq!(field.editor.length().length, 13);
    assert_eq!(field.editor.length().over_count(), 3);
    assert_eq!(field.editor.content(), "<p>Thirteen char</p>");

    let counter = field.editor.view().counter.unwrap();
    assert_eq!(counter.to_string(), "13/10 (3 over)");
}

#[test]
fn test_handle_trait_object() {
    let mut field = test_field(FieldProps::new().with_initial_value("<p>x</p>"));
    let handle: &mut dyn EditorHandle = &mut field.editor;
    assert_eq!(handle.html(), "<p>x</p>");
    handle.clear_content();
    assert_eq!(handle.content(), "");
}

//! Update function for the Elm-style architecture
//!
//! Drives a [`RichTextEditor`] from [`Msg`]s and tells the host which side
//! effects to perform next.

use crate::commands::{Cmd, DamageArea};
use crate::editable::{EditingSurface, TextEdit};
use crate::messages::Msg;
use crate::richtext::{FormatCommand, RichTextEditor};

/// Main update function - dispatches to sub-handlers
pub fn update<S: EditingSurface>(editor: &mut RichTextEditor<S>, msg: Msg) -> Option<Cmd> {
    tracing::trace!(?msg, "update");
    let result = match msg {
        Msg::Edit(edit) => update_edit(editor, edit),
        Msg::Format(command) => update_format(editor, command),
        Msg::ExternalValue(value) => update_external_value(editor, value),
        Msg::Focus => {
            editor.focus();
            Some(Cmd::Redraw(vec![DamageArea::Surface, DamageArea::Toolbar]))
        }
        Msg::Blur => {
            editor.blur();
            Some(Cmd::Redraw(vec![DamageArea::Surface]))
        }
        Msg::Clear => {
            editor.clear_content();
            Some(Cmd::redraw_all())
        }
        Msg::Paint => editor
            .paint()
            .then(|| Cmd::Redraw(vec![DamageArea::Surface, DamageArea::Toolbar])),
        Msg::Tick => {
            editor.poll();
            None
        }
        Msg::SetPreview(show_preview) => {
            editor.set_preview(show_preview);
            Some(Cmd::redraw_all())
        }
        Msg::Unmount => {
            editor.unmount();
            return None;
        }
    };

    with_follow_ups(editor, result)
}

fn update_edit<S: EditingSurface>(editor: &mut RichTextEditor<S>, edit: TextEdit) -> Option<Cmd> {
    let revision = editor.surface().revision();
    editor.input(edit);
    if editor.surface().revision() != revision {
        Some(Cmd::redraw_all())
    } else {
        // Selection moved: caret and toolbar only
        Some(Cmd::Redraw(vec![DamageArea::Surface, DamageArea::Toolbar]))
    }
}

fn update_format<S: EditingSurface>(
    editor: &mut RichTextEditor<S>,
    command: FormatCommand,
) -> Option<Cmd> {
    let dispatch = editor.apply(command);
    if dispatch.applied {
        Some(Cmd::redraw_all())
    } else {
        Some(Cmd::redraw_toolbar())
    }
}

fn update_external_value<S: EditingSurface>(
    editor: &mut RichTextEditor<S>,
    value: Option<String>,
) -> Option<Cmd> {
    let revision = editor.surface().revision();
    editor.set_value(value);
    (editor.surface().revision() != revision).then(Cmd::redraw_all)
}

/// Append the timer and paint requests the editor is waiting on
fn with_follow_ups<S: EditingSurface>(
    editor: &RichTextEditor<S>,
    result: Option<Cmd>,
) -> Option<Cmd> {
    let mut cmds: Vec<Cmd> = result.into_iter().collect();
    if editor.has_pending_restore() {
        cmds.push(Cmd::RequestPaint);
    }
    if let Some(deadline) = editor.next_deadline() {
        cmds.push(Cmd::WakeAt(deadline));
    }
    match Cmd::batch(cmds) {
        Cmd::None => None,
        cmd => Some(cmd),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::editable::MoveTarget;
    use crate::richtext::FieldProps;

    fn editor_with_log(
        props: FieldProps,
    ) -> (RichTextEditor, ManualClock, Rc<RefCell<Vec<String>>>) {
        let clock = ManualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let editor = RichTextEditor::new(props, move |s: &str| sink.borrow_mut().push(s.to_string()))
            .with_clock(clock.clone());
        (editor, clock, log)
    }

    #[test]
    fn test_typing_requests_wake_up() {
        let (mut editor, clock, log) = editor_with_log(FieldProps::new());
        let cmd = update(&mut editor, Msg::Edit(TextEdit::InsertText("a".into()))).unwrap();
        assert!(cmd.needs_redraw());
        let wake = cmd.wake_at().unwrap();
        assert_eq!(wake, clock.now() + Duration::from_millis(100));

        clock.advance_to(wake);
        assert_eq!(update(&mut editor, Msg::Tick), None);
        assert_eq!(*log.borrow(), vec!["<p>a</p>".to_string()]);
    }

    #[test]
    fn test_caret_move_redraws_without_scheduling() {
        let (mut editor, _clock, _log) =
            editor_with_log(FieldProps::new().with_initial_value("<p>ab</p>"));
        let cmd = update(
            &mut editor,
            Msg::Edit(TextEdit::Move {
                target: MoveTarget::LineEnd,
                extend: false,
            }),
        )
        .unwrap();
        assert_eq!(cmd.wake_at(), None);
        assert_eq!(cmd.damage(), vec![DamageArea::Surface, DamageArea::Toolbar]);
    }

    #[test]
    fn test_format_requests_paint_for_restore() {
        let (mut editor, _clock, _log) =
            editor_with_log(FieldProps::new().with_initial_value("<p>ab</p>"));
        update(&mut editor, Msg::Focus);
        update(&mut editor, Msg::Edit(TextEdit::SelectAll));

        let cmd = update(&mut editor, Msg::Format(FormatCommand::Bold)).unwrap();
        assert!(cmd.requests_paint());
        assert!(cmd.wake_at().is_some());

        let cmd = update(&mut editor, Msg::Paint);
        assert!(cmd.is_some_and(|c| !c.requests_paint()));
        assert!(editor.active_formats().bold);
    }

    #[test]
    fn test_unmount_returns_nothing() {
        let (mut editor, _clock, log) = editor_with_log(FieldProps::new());
        update(&mut editor, Msg::Edit(TextEdit::InsertText("a".into())));
        assert_eq!(update(&mut editor, Msg::Unmount), None);
        assert_eq!(update(&mut editor, Msg::Tick), None);
        assert!(log.borrow().is_empty());
    }
}

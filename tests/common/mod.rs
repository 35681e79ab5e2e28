//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scribe::clock::ManualClock;
use scribe::editable::{EditingSurface, Position, Selection, TextEdit};
use scribe::richtext::{FieldProps, RichTextEditor, UrlPrompt};
use scribe::{update, Cmd, Msg};

pub const DEBOUNCE: Duration = Duration::from_millis(100);

/// A mounted field on virtual time, recording every `onChange` call
pub struct TestField<S: EditingSurface = scribe::DocumentSurface> {
    pub editor: RichTextEditor<S>,
    pub clock: ManualClock,
    pub emitted: Rc<RefCell<Vec<String>>>,
}

/// Mount a field over a fresh document surface
pub fn test_field(props: FieldProps) -> TestField {
    let clock = ManualClock::new();
    let emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = emitted.clone();
    let editor = RichTextEditor::new(props, move |s: &str| sink.borrow_mut().push(s.to_string()))
        .with_clock(clock.clone());
    TestField {
        editor,
        clock,
        emitted,
    }
}

/// Mount a field over a custom surface
pub fn test_field_on<S: EditingSurface>(surface: S, props: FieldProps) -> TestField<S> {
    let clock = ManualClock::new();
    let emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = emitted.clone();
    let editor = RichTextEditor::mount(surface, props, DEBOUNCE, move |s: &str| {
        sink.borrow_mut().push(s.to_string())
    })
    .with_clock(clock.clone());
    TestField {
        editor,
        clock,
        emitted,
    }
}

impl<S: EditingSurface> TestField<S> {
    /// Answer link/image prompts with `prompt`
    pub fn with_prompt(self, prompt: impl UrlPrompt + 'static) -> Self {
        let TestField {
            editor,
            clock,
            emitted,
        } = self;
        TestField {
            editor: editor.with_prompt(prompt),
            clock,
            emitted,
        }
    }

    pub fn send(&mut self, msg: Msg) -> Option<Cmd> {
        update(&mut self.editor, msg)
    }

    pub fn type_text(&mut self, text: &str) {
        self.send(Msg::Edit(TextEdit::InsertText(text.to_string())));
    }

    pub fn select(&mut self, block: usize, from: usize, to: usize) {
        self.send(Msg::Edit(TextEdit::Select(Selection::new(
            Position::new(block, from),
            Position::new(block, to),
        ))));
    }

    /// Advance virtual time and deliver the timer tick
    pub fn wait(&mut self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
        self.send(Msg::Tick);
    }

    pub fn emitted(&self) -> Vec<String> {
        self.emitted.borrow().clone()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.editor.surface().selection().ok()
    }
}

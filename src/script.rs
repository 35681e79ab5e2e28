//! Edit scripts: drive a field step by step on virtual time.
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! type Hello          # insert text at the caret
//! enter | backspace | delete
//! move word-left [extend]
//! select 0:0..0:5 | select-all
//! format bold | format heading 1 | format align center | format link https://…
//! value <p>from the form</p> | value none
//! focus | blur | clear | paint | unmount
//! preview on | preview off
//! wait 150ms
//! show | formats
//! ```

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::clock::{Clock, ManualClock};
use crate::config::EditorConfig;
use crate::editable::{MoveTarget, Position, Selection, TextEdit};
use crate::error::ScriptError;
use crate::messages::Msg;
use crate::richtext::{FieldProps, FormatCommand, RichTextEditor, UrlKind};
use crate::update::update;

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Edit(TextEdit),
    /// A toolbar command; `url` answers the link/image prompt
    Format {
        command: FormatCommand,
        url: Option<String>,
    },
    Value(Option<String>),
    Focus,
    Blur,
    Clear,
    Paint,
    Preview(bool),
    Wait(Duration),
    Show,
    Formats,
    Unmount,
}

/// Parse `block:offset`
pub fn parse_position(s: &str) -> Result<Position, String> {
    let (block, offset) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected BLOCK:OFFSET, got `{}`", s))?;
    let block = block
        .parse()
        .map_err(|_| format!("invalid block `{}`", block))?;
    let offset = offset
        .parse()
        .map_err(|_| format!("invalid offset `{}`", offset))?;
    Ok(Position::new(block, offset))
}

/// Parse `block:offset` or `block:offset..block:offset`
pub fn parse_selection(s: &str) -> Result<Selection, String> {
    match s.split_once("..") {
        Some((anchor, head)) => Ok(Selection::new(parse_position(anchor)?, parse_position(head)?)),
        None => Ok(Selection::collapsed(parse_position(s)?)),
    }
}

fn parse_move_target(name: &str) -> Option<MoveTarget> {
    let target = match name {
        "left" => MoveTarget::Left,
        "right" => MoveTarget::Right,
        "up" => MoveTarget::Up,
        "down" => MoveTarget::Down,
        "home" => MoveTarget::LineStart,
        "end" => MoveTarget::LineEnd,
        "word-left" => MoveTarget::WordLeft,
        "word-right" => MoveTarget::WordRight,
        "doc-start" => MoveTarget::DocumentStart,
        "doc-end" => MoveTarget::DocumentEnd,
        _ => return None,
    };
    Some(target)
}

fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let ms = s.strip_suffix("ms").unwrap_or(s).trim();
    ms.parse().ok().map(Duration::from_millis)
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<Step>, ScriptError> {
    let line = line.trim_end();
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let invalid = |message: String| ScriptError::Invalid {
        line: line_no,
        message,
    };

    let step = match word {
        "type" => {
            if rest.is_empty() {
                return Err(invalid("type needs text".to_string()));
            }
            Step::Edit(TextEdit::InsertText(rest.to_string()))
        }
        "enter" => Step::Edit(TextEdit::InsertParagraph),
        "backspace" => Step::Edit(TextEdit::DeleteBackward),
        "delete" => Step::Edit(TextEdit::DeleteForward),
        "select-all" => Step::Edit(TextEdit::SelectAll),
        "move" => {
            let mut parts = rest.split_whitespace();
            let name = parts.next().unwrap_or_default();
            let target = parse_move_target(name)
                .ok_or_else(|| invalid(format!("unknown move target `{}`", name)))?;
            let extend = match parts.next() {
                None => false,
                Some("extend") => true,
                Some(other) => return Err(invalid(format!("unexpected `{}`", other))),
            };
            Step::Edit(TextEdit::Move { target, extend })
        }
        "select" => Step::Edit(TextEdit::Select(parse_selection(rest).map_err(invalid)?)),
        "format" => {
            let rest = rest.trim();
            let (name, arg) = match rest.split_once(' ') {
                Some((name, arg)) => (name, Some(arg.trim())),
                None => (rest, None),
            };
            let command = FormatCommand::parse(name, arg).map_err(|source| ScriptError::Command {
                line: line_no,
                source,
            })?;
            let url = command.url_kind().and(arg).map(str::to_string);
            Step::Format { command, url }
        }
        "value" => match rest.trim() {
            "none" => Step::Value(None),
            markup => Step::Value(Some(markup.to_string())),
        },
        "wait" => Step::Wait(
            parse_duration(rest).ok_or_else(|| invalid(format!("invalid duration `{}`", rest)))?,
        ),
        "preview" => match rest.trim() {
            "on" => Step::Preview(true),
            "off" => Step::Preview(false),
            other => return Err(invalid(format!("expected on/off, got `{}`", other))),
        },
        "focus" => Step::Focus,
        "blur" => Step::Blur,
        "clear" => Step::Clear,
        "paint" => Step::Paint,
        "show" => Step::Show,
        "formats" => Step::Formats,
        "unmount" => Step::Unmount,
        other => {
            return Err(ScriptError::UnknownStep {
                line: line_no,
                step: other.to_string(),
            })
        }
    };
    Ok(Some(step))
}

/// Parse a whole script. Line numbers in errors are 1-based.
pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(step) = parse_line(i + 1, line)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Runs steps against a field on a [`ManualClock`], printing every change
/// emission with its virtual timestamp.
pub struct ScriptRunner {
    editor: RichTextEditor,
    clock: ManualClock,
    start: Instant,
    url: Rc<RefCell<Option<String>>>,
    emitted: Rc<RefCell<Vec<String>>>,
    wake: Option<Instant>,
}

impl ScriptRunner {
    pub fn new(props: FieldProps, config: &EditorConfig) -> Self {
        let clock = ManualClock::new();
        let emitted = Rc::new(RefCell::new(Vec::new()));
        let url = Rc::new(RefCell::new(None));

        let sink = emitted.clone();
        let answer = url.clone();
        let editor = RichTextEditor::with_config(props, config, move |content: &str| {
            sink.borrow_mut().push(content.to_string())
        })
        .with_clock(clock.clone())
        .with_prompt(move |_kind: UrlKind| answer.borrow_mut().take());

        Self {
            editor,
            start: clock.now(),
            clock,
            url,
            emitted,
            wake: None,
        }
    }

    pub fn editor(&self) -> &RichTextEditor {
        &self.editor
    }

    /// Virtual time since the runner started
    pub fn elapsed(&self) -> Duration {
        self.clock.now() - self.start
    }

    /// Run every step, then let pending timers fire
    pub fn run<W: Write>(&mut self, steps: &[Step], out: &mut W) -> io::Result<()> {
        for step in steps {
            self.step(step, out)?;
        }
        self.finish(out)
    }

    pub fn step<W: Write>(&mut self, step: &Step, out: &mut W) -> io::Result<()> {
        match step {
            Step::Wait(duration) => return self.advance(*duration, out),
            Step::Show => {
                writeln!(out, "{}", self.editor.view().render().trim_end())?;
            }
            Step::Formats => {
                let active: Vec<&str> = self
                    .editor
                    .active_formats()
                    .active()
                    .map(|f| f.name())
                    .collect();
                writeln!(out, "formats: {}", active.join(" "))?;
            }
            Step::Format { command, url } => {
                *self.url.borrow_mut() = url.clone();
                self.dispatch(Msg::Format(*command));
                self.url.borrow_mut().take();
            }
            Step::Edit(edit) => self.dispatch(Msg::Edit(edit.clone())),
            Step::Value(value) => self.dispatch(Msg::ExternalValue(value.clone())),
            Step::Focus => self.dispatch(Msg::Focus),
            Step::Blur => self.dispatch(Msg::Blur),
            Step::Clear => self.dispatch(Msg::Clear),
            Step::Paint => self.dispatch(Msg::Paint),
            Step::Preview(on) => self.dispatch(Msg::SetPreview(*on)),
            Step::Unmount => self.dispatch(Msg::Unmount),
        }
        self.flush_emitted(out)
    }

    /// Fire every pending timer
    pub fn finish<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        while let Some(at) = self.wake.take() {
            self.clock.advance_to(at);
            self.dispatch(Msg::Tick);
            self.flush_emitted(out)?;
        }
        Ok(())
    }

    fn advance<W: Write>(&mut self, duration: Duration, out: &mut W) -> io::Result<()> {
        let target = self.clock.now() + duration;
        while let Some(at) = self.wake.filter(|at| *at <= target) {
            self.wake = None;
            self.clock.advance_to(at);
            self.dispatch(Msg::Tick);
            self.flush_emitted(out)?;
        }
        self.clock.advance_to(target);
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) {
        let Some(cmd) = update(&mut self.editor, msg) else {
            return;
        };
        if let Some(at) = cmd.wake_at() {
            self.wake = Some(at);
        }
        // Paint right away: the script has no frames
        if cmd.requests_paint() {
            self.dispatch(Msg::Paint);
        }
    }

    fn flush_emitted<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let emitted: Vec<String> = self.emitted.borrow_mut().drain(..).collect();
        for content in emitted {
            writeln!(
                out,
                "{:>6}ms  onChange {:?}",
                self.elapsed().as_millis(),
                content
            )?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ScriptRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRunner")
            .field("elapsed", &self.elapsed())
            .field("wake", &self.wake)
            .finish_non_exhaustive()
    }
}

//! Field chrome: label, toolbar, counter and body as a render model.

use std::fmt;

use serde::Serialize;

use crate::editable::{Alignment, EditingSurface, Format, HeadingLevel};
use crate::richtext::{FormatCommand, LengthState, RichTextEditor};

// ============================================================================
// Toolbar Registry
// ============================================================================

/// A toolbar button definition
#[derive(Debug, Clone, Copy)]
pub struct ToolbarButton {
    pub command: FormatCommand,
    pub label: &'static str,
    pub title: &'static str,
    /// Format whose active flag highlights this button
    pub format: Option<Format>,
}

/// Static registry of toolbar buttons, in display order
pub static TOOLBAR: &[ToolbarButton] = &[
    ToolbarButton {
        command: FormatCommand::Bold,
        label: "B",
        title: "Bold",
        format: Some(Format::Bold),
    },
    ToolbarButton {
        command: FormatCommand::Italic,
        label: "I",
        title: "Italic",
        format: Some(Format::Italic),
    },
    ToolbarButton {
        command: FormatCommand::Underline,
        label: "U",
        title: "Underline",
        format: Some(Format::Underline),
    },
    ToolbarButton {
        command: FormatCommand::Heading(HeadingLevel::One),
        label: "H1",
        title: "Heading 1",
        format: Some(Format::Heading1),
    },
    ToolbarButton {
        command: FormatCommand::Heading(HeadingLevel::Two),
        label: "H2",
        title: "Heading 2",
        format: Some(Format::Heading2),
    },
    ToolbarButton {
        command: FormatCommand::BulletList,
        label: "•",
        title: "Bullet List",
        format: Some(Format::BulletList),
    },
    ToolbarButton {
        command: FormatCommand::NumberedList,
        label: "1.",
        title: "Numbered List",
        format: Some(Format::NumberedList),
    },
    ToolbarButton {
        command: FormatCommand::Quote,
        label: "❝",
        title: "Quote",
        format: Some(Format::Quote),
    },
    ToolbarButton {
        command: FormatCommand::Align(Alignment::Left),
        label: "⇤",
        title: "Align Left",
        format: Some(Format::AlignLeft),
    },
    ToolbarButton {
        command: FormatCommand::Align(Alignment::Center),
        label: "↔",
        title: "Align Center",
        format: Some(Format::AlignCenter),
    },
    ToolbarButton {
        command: FormatCommand::Align(Alignment::Right),
        label: "⇥",
        title: "Align Right",
        format: Some(Format::AlignRight),
    },
    ToolbarButton {
        command: FormatCommand::Align(Alignment::Justify),
        label: "☰",
        title: "Justify",
        format: Some(Format::AlignJustify),
    },
    ToolbarButton {
        command: FormatCommand::Link,
        label: "🔗",
        title: "Insert Link",
        format: None,
    },
    ToolbarButton {
        command: FormatCommand::Image,
        label: "🖼",
        title: "Insert Image",
        format: None,
    },
    ToolbarButton {
        command: FormatCommand::Undo,
        label: "↶",
        title: "Undo",
        format: None,
    },
    ToolbarButton {
        command: FormatCommand::Redo,
        label: "↷",
        title: "Redo",
        format: None,
    },
];

// ============================================================================
// Render Model
// ============================================================================

/// Rendered state of one toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolbarItem {
    pub label: &'static str,
    pub title: &'static str,
    pub active: bool,
    pub enabled: bool,
}

/// Length readout, shown when the field has a limit.
///
/// Displays as `12/500`, or `13/10 (3 over)` past the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterCounter {
    pub length: usize,
    pub max_length: usize,
    pub over_count: usize,
}

impl CharacterCounter {
    pub fn from_length(length: LengthState) -> Option<Self> {
        let max_length = length.max_length?;
        Some(Self {
            length: length.length,
            max_length,
            over_count: length.over_count(),
        })
    }

    pub fn is_over(&self) -> bool {
        self.over_count > 0
    }
}

impl fmt::Display for CharacterCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.length, self.max_length)?;
        if self.is_over() {
            write!(f, " ({} over)", self.over_count)?;
        }
        Ok(())
    }
}

/// What the field body shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "content", rename_all = "snake_case")]
pub enum FieldBody {
    /// Live editing surface holding this markup
    Editor(String),
    /// Read-only raw content
    Preview(String),
}

/// Everything a host needs to draw the field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub label: Option<String>,
    pub required: bool,
    pub error: Option<String>,
    /// Set only while the field has no text
    pub placeholder: Option<String>,
    pub counter: Option<CharacterCounter>,
    pub toolbar: Vec<ToolbarItem>,
    pub body: FieldBody,
}

impl FieldView {
    pub fn build<S: EditingSurface>(editor: &RichTextEditor<S>) -> Self {
        let props = editor.props();
        let formats = editor.active_formats();
        let length = editor.length();
        let editable = editor.is_mounted() && !editor.is_preview();
        let content = editor.content();

        let toolbar = TOOLBAR
            .iter()
            .map(|button| ToolbarItem {
                label: button.label,
                title: button.title,
                active: editable && button.format.is_some_and(|f| formats.get(f)),
                enabled: editable,
            })
            .collect();

        let placeholder = props
            .placeholder
            .clone()
            .filter(|_| editable && length.length == 0);

        let body = if editor.is_preview() {
            FieldBody::Preview(content)
        } else {
            FieldBody::Editor(content)
        };

        Self {
            label: props.label.clone(),
            required: props.required,
            error: props.error.clone(),
            placeholder,
            counter: CharacterCounter::from_length(length),
            toolbar,
            body,
        }
    }

    /// Plain-text rendering for terminals
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(label) = &self.label {
            out.push_str(label);
            if self.required {
                out.push_str(" *");
            }
            out.push('\n');
        }

        let toolbar: Vec<String> = self
            .toolbar
            .iter()
            .filter(|item| item.enabled)
            .map(|item| {
                if item.active {
                    format!("[{}]", item.label)
                } else {
                    item.label.to_string()
                }
            })
            .collect();
        if !toolbar.is_empty() {
            out.push_str(&toolbar.join(" "));
            out.push('\n');
        }

        match (&self.body, &self.placeholder) {
            (_, Some(placeholder)) => out.push_str(&format!("({})", placeholder)),
            (FieldBody::Editor(content), None) => out.push_str(content),
            (FieldBody::Preview(content), None) => {
                out.push_str("preview: ");
                out.push_str(content);
            }
        }
        out.push('\n');

        if let Some(counter) = &self.counter {
            out.push_str(&counter.to_string());
            out.push('\n');
        }
        if let Some(error) = &self.error {
            out.push_str("error: ");
            out.push_str(error);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::FieldProps;

    #[test]
    fn test_counter_display() {
        let within = CharacterCounter::from_length(LengthState {
            length: 12,
            max_length: Some(500),
        })
        .unwrap();
        assert_eq!(within.to_string(), "12/500");

        let over = CharacterCounter::from_length(LengthState {
            length: 13,
            max_length: Some(10),
        })
        .unwrap();
        assert_eq!(over.to_string(), "13/10 (3 over)");

        assert!(CharacterCounter::from_length(LengthState::new(None)).is_none());
    }

    #[test]
    fn test_toolbar_commands_are_unique() {
        for (i, a) in TOOLBAR.iter().enumerate() {
            for b in &TOOLBAR[i + 1..] {
                assert_ne!(a.command, b.command);
            }
        }
    }

    #[test]
    fn test_placeholder_only_when_empty() {
        let editor = RichTextEditor::new(
            FieldProps::new().with_placeholder("Describe the role"),
            |_| {},
        );
        assert_eq!(editor.view().placeholder.as_deref(), Some("Describe the role"));

        let editor = RichTextEditor::new(
            FieldProps::new()
                .with_placeholder("Describe the role")
                .with_initial_value("<p>Hi</p>"),
            |_| {},
        );
        assert!(editor.view().placeholder.is_none());
    }

    #[test]
    fn test_preview_disables_toolbar() {
        let editor = RichTextEditor::new(
            FieldProps::new()
                .with_initial_value("<p><strong>x</strong></p>")
                .with_preview(true),
            |_| {},
        );
        let view = editor.view();
        assert!(view.toolbar.iter().all(|item| !item.enabled && !item.active));
        assert_eq!(
            view.body,
            FieldBody::Preview("<p><strong>x</strong></p>".to_string())
        );
    }

    #[test]
    fn test_render_marks_active_buttons() {
        let editor = RichTextEditor::new(
            FieldProps::new()
                .with_label("Description")
                .required()
                .with_initial_value("<h1>Title</h1>")
                .with_max_length(10),
            |_| {},
        );
        let rendered = editor.view().render();
        assert!(rendered.starts_with("Description *\n"));
        assert!(rendered.contains("[H1]"));
        assert!(rendered.contains("[⇤]"));
        assert!(rendered.contains("5/10"));
    }
}

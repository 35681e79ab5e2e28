//! Input and command types accepted by an editing surface.

use super::block::{Alignment, BlockKind};
use super::marks::InlineMark;
use super::selection::Selection;

/// Target for caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    DocumentStart,
    DocumentEnd,
}

/// User input on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Type or paste text at the caret, replacing the selection
    InsertText(String),
    /// Enter: split the current block
    InsertParagraph,
    /// Backspace
    DeleteBackward,
    /// Delete
    DeleteForward,
    /// Move the caret, optionally extending the selection
    Move { target: MoveTarget, extend: bool },
    /// Place the selection explicitly (pointer input)
    Select(Selection),
    SelectAll,
}

impl TextEdit {
    /// Check if this edit can change content (as opposed to only the selection)
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            TextEdit::InsertText(_)
                | TextEdit::InsertParagraph
                | TextEdit::DeleteBackward
                | TextEdit::DeleteForward
        )
    }
}

/// A resolved formatting request, ready for the surface to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    ToggleMark(InlineMark),
    ToggleBlock(BlockKind),
    SetAlignment(Alignment),
    CreateLink(String),
    InsertImage(String),
    Undo,
    Redo,
}

impl SurfaceCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceCommand::ToggleMark(InlineMark::Bold) => "bold",
            SurfaceCommand::ToggleMark(InlineMark::Italic) => "italic",
            SurfaceCommand::ToggleMark(InlineMark::Underline) => "underline",
            SurfaceCommand::ToggleBlock(BlockKind::Heading(_)) => "heading",
            SurfaceCommand::ToggleBlock(BlockKind::ListItem(_)) => "list",
            SurfaceCommand::ToggleBlock(BlockKind::Quote) => "quote",
            SurfaceCommand::ToggleBlock(BlockKind::Paragraph) => "paragraph",
            SurfaceCommand::SetAlignment(_) => "align",
            SurfaceCommand::CreateLink(_) => "link",
            SurfaceCommand::InsertImage(_) => "image",
            SurfaceCommand::Undo => "undo",
            SurfaceCommand::Redo => "redo",
        }
    }
}

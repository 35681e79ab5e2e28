//! DocumentSurface - headless editing surface over a [`RichDocument`].

use std::ops::Range;

use super::block::{Alignment, BlockKind, HeadingLevel, ListKind};
use super::document::RichDocument;
use super::history::{EditHistory, EditOperation, Snapshot};
use super::marks::{CharStyle, InlineMark, Mark, OBJECT_CHAR};
use super::markup;
use super::messages::{MoveTarget, SurfaceCommand, TextEdit};
use super::selection::{Position, Selection};
use super::surface::{EditingSurface, Format};
use crate::error::SurfaceError;
use crate::util::{char_type, CharType};

/// In-process editing surface: document, selection, focus and undo history.
#[derive(Debug, Clone)]
pub struct DocumentSurface {
    document: RichDocument,
    selection: Selection,
    focused: bool,
    /// Style toggled at a collapsed caret, applied to the next typed text
    pending_style: Option<CharStyle>,
    /// Offset kept across vertical moves through shorter blocks
    goal_offset: Option<usize>,
    history: EditHistory,
    revision: u64,
}

impl Default for DocumentSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSurface {
    pub fn new() -> Self {
        Self::with_history(EditHistory::new())
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Self::with_history(EditHistory::with_max_size(limit))
    }

    fn with_history(history: EditHistory) -> Self {
        Self {
            document: RichDocument::new(),
            selection: Selection::collapsed(Position::zero()),
            focused: false,
            pending_style: None,
            goal_offset: None,
            history,
            revision: 0,
        }
    }

    pub fn from_markup(markup: &str) -> Self {
        let mut surface = Self::new();
        surface.load(markup);
        surface
    }

    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn pending_style(&self) -> Option<&CharStyle> {
        self.pending_style.as_ref()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            selection: self.selection,
        }
    }

    /// Record the step from `before` to the current state and bump the revision
    fn commit(&mut self, before: Snapshot) {
        let after = self.snapshot();
        self.history.push(EditOperation::new(before, after));
        self.revision += 1;
        self.pending_style = None;
        self.goal_offset = None;
    }

    fn restore_snapshot(&mut self, snapshot: Snapshot) {
        self.document = snapshot.document;
        self.selection = snapshot.selection;
        self.pending_style = None;
        self.goal_offset = None;
        self.revision += 1;
    }

    fn selected_range(&self) -> Range<usize> {
        self.document.position_to_offset(self.selection.start())
            ..self.document.position_to_offset(self.selection.end())
    }

    fn collapse_at(&mut self, offset: usize) {
        self.selection = Selection::collapsed(self.document.offset_to_position(offset));
    }

    /// Style given to text typed at the selection start.
    ///
    /// A pending toggle wins. Otherwise the char before the caret decides, or
    /// the char after it at the start of a block. Links never carry over.
    fn insertion_style(&self) -> CharStyle {
        if let Some(style) = &self.pending_style {
            return style.clone();
        }
        let start = self.selection.start();
        let offset = self.document.position_to_offset(start);
        if start.offset > 0 {
            self.document.style_at(offset - 1).inline_only()
        } else if self.document.block_len(start.block) > 0 {
            self.document.style_at(offset).inline_only()
        } else {
            CharStyle::default()
        }
    }

    fn start_block(&self) -> usize {
        self.selection.start().block
    }
}

// =============================================================================
// Movement Operations
// =============================================================================

impl DocumentSurface {
    fn place(&mut self, pos: Position, extend: bool) {
        if extend {
            self.selection.extend_to(pos);
        } else {
            self.selection = Selection::collapsed(pos);
        }
        self.goal_offset = None;
        self.pending_style = None;
    }

    fn move_caret(&mut self, target: MoveTarget, extend: bool) {
        // Horizontal moves collapse an existing selection onto its edge
        if !extend && !self.selection.is_empty() {
            match target {
                MoveTarget::Left | MoveTarget::WordLeft => {
                    return self.place(self.selection.start(), false);
                }
                MoveTarget::Right | MoveTarget::WordRight => {
                    return self.place(self.selection.end(), false);
                }
                _ => {}
            }
        }

        let head = self.selection.head;
        match target {
            MoveTarget::Up | MoveTarget::Down => self.move_vertical(target, extend),
            MoveTarget::Left => self.place(self.left_of(head), extend),
            MoveTarget::Right => self.place(self.right_of(head), extend),
            MoveTarget::LineStart => self.place(Position::new(head.block, 0), extend),
            MoveTarget::LineEnd => {
                let len = self.document.block_len(head.block);
                self.place(Position::new(head.block, len), extend)
            }
            MoveTarget::WordLeft => self.place(self.word_left_of(head), extend),
            MoveTarget::WordRight => self.place(self.word_right_of(head), extend),
            MoveTarget::DocumentStart => self.place(Position::zero(), extend),
            MoveTarget::DocumentEnd => self.place(self.document.end_position(), extend),
        }
    }

    fn move_vertical(&mut self, target: MoveTarget, extend: bool) {
        let head = self.selection.head;
        let block = match target {
            MoveTarget::Up if head.block > 0 => head.block - 1,
            MoveTarget::Down if head.block + 1 < self.document.block_count() => head.block + 1,
            _ => return,
        };
        let goal = self.goal_offset.unwrap_or(head.offset);
        let offset = goal.min(self.document.block_len(block));
        self.place(Position::new(block, offset), extend);
        self.goal_offset = Some(goal);
    }

    fn left_of(&self, pos: Position) -> Position {
        if pos.offset > 0 {
            Position::new(pos.block, pos.offset - 1)
        } else if pos.block > 0 {
            Position::new(pos.block - 1, self.document.block_len(pos.block - 1))
        } else {
            pos
        }
    }

    fn right_of(&self, pos: Position) -> Position {
        if pos.offset < self.document.block_len(pos.block) {
            Position::new(pos.block, pos.offset + 1)
        } else if pos.block + 1 < self.document.block_count() {
            Position::new(pos.block + 1, 0)
        } else {
            pos
        }
    }

    fn char_type_at(&self, block: usize, offset: usize) -> Option<CharType> {
        self.document.text().char_in_block(block, offset).map(char_type)
    }

    fn word_left_of(&self, pos: Position) -> Position {
        // At start of block? Move to end of previous block
        if pos.offset == 0 {
            return self.left_of(pos);
        }

        let mut offset = pos.offset.min(self.document.block_len(pos.block));

        // Skip any whitespace/punctuation first (moving backwards)
        while offset > 0 && self.char_type_at(pos.block, offset - 1) != Some(CharType::WordChar) {
            offset -= 1;
        }

        // Then skip word characters
        while offset > 0 && self.char_type_at(pos.block, offset - 1) == Some(CharType::WordChar) {
            offset -= 1;
        }

        Position::new(pos.block, offset)
    }

    fn word_right_of(&self, pos: Position) -> Position {
        let len = self.document.block_len(pos.block);
        if pos.offset >= len {
            return self.right_of(pos);
        }

        let mut offset = pos.offset;

        // Skip current word type
        if let Some(start_type) = self.char_type_at(pos.block, offset) {
            while offset < len && self.char_type_at(pos.block, offset) == Some(start_type) {
                offset += 1;
            }
        }

        // Skip any following whitespace
        while offset < len && self.char_type_at(pos.block, offset) == Some(CharType::Whitespace) {
            offset += 1;
        }

        Position::new(pos.block, offset)
    }

    fn select_all(&mut self) {
        self.selection = Selection::new(Position::zero(), self.document.end_position());
        self.goal_offset = None;
        self.pending_style = None;
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl DocumentSurface {
    /// Insert text at the caret, replacing the selection. The object
    /// placeholder is reserved for images and never enters as text.
    fn insert_text(&mut self, text: &str) -> bool {
        let text: String = text.chars().filter(|&c| c != OBJECT_CHAR).collect();
        if text.is_empty() {
            return false;
        }
        let before = self.snapshot();
        let style = self.insertion_style();
        let range = self.selected_range();

        self.document.remove(range.clone());
        let inserted = self.document.insert(range.start, &text, &style);
        self.collapse_at(range.start + inserted);
        self.commit(before);
        true
    }

    /// Split the current block. Enter on an empty list item leaves the list.
    fn insert_paragraph(&mut self) -> bool {
        let before = self.snapshot();
        let head = self.selection.head;
        let format = self.document.block_format(head.block);

        if self.selection.is_empty()
            && self.document.block_len(head.block) == 0
            && format.kind.list().is_some()
        {
            self.document
                .set_block_format(head.block, format.with_kind(BlockKind::Paragraph));
            self.commit(before);
            return true;
        }

        let range = self.selected_range();
        self.document.remove(range.clone());
        self.document.insert(range.start, "\n", &CharStyle::default());
        self.collapse_at(range.start + 1);
        self.commit(before);
        true
    }

    /// Delete character before cursor (Backspace)
    fn delete_backward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }

        let head = self.selection.head;
        if head.offset == 0 {
            // At a block start, first drop the block's own formatting
            let format = self.document.block_format(head.block);
            if format.kind != BlockKind::Paragraph {
                let before = self.snapshot();
                self.document
                    .set_block_format(head.block, format.with_kind(BlockKind::Paragraph));
                self.commit(before);
                return true;
            }
            if head.block == 0 {
                return false;
            }
        }

        let before = self.snapshot();
        let offset = self.document.position_to_offset(head);
        self.document.remove(offset - 1..offset);
        self.collapse_at(offset - 1);
        self.commit(before);
        true
    }

    /// Delete character after cursor (Delete key)
    fn delete_forward(&mut self) -> bool {
        if !self.selection.is_empty() {
            return self.delete_selection();
        }

        let offset = self.document.position_to_offset(self.selection.head);
        if offset >= self.document.len_chars() {
            return false;
        }

        let before = self.snapshot();
        self.document.remove(offset..offset + 1);
        self.collapse_at(offset);
        self.commit(before);
        true
    }

    fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let before = self.snapshot();
        let range = self.selected_range();
        self.document.remove(range.clone());
        self.collapse_at(range.start);
        self.commit(before);
        true
    }

    fn undo(&mut self) -> bool {
        match self.history.pop_undo() {
            Some(op) => {
                self.restore_snapshot(op.before);
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.history.pop_redo() {
            Some(op) => {
                self.restore_snapshot(op.before);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Formatting Operations
// =============================================================================

impl DocumentSurface {
    fn toggle_mark(&mut self, mark: InlineMark) {
        if self.selection.is_empty() {
            let mut style = self.insertion_style();
            let on = !style.has(mark);
            style.set(mark, on);
            self.pending_style = Some(style);
            return;
        }

        let before = self.snapshot();
        let range = self.selected_range();
        if self.document.range_has_mark(range.clone(), mark) {
            self.document.remove_mark(range, mark.into());
        } else {
            self.document.add_mark(range, mark.mark());
        }
        self.commit(before);
    }

    /// Set the kind of every selected block, or revert them to paragraphs
    /// when they all have it already
    fn toggle_block(&mut self, kind: BlockKind) {
        let blocks = self.selection.blocks();
        let all = blocks
            .clone()
            .all(|b| self.document.block_format(b).kind == kind);
        let target = if all { BlockKind::Paragraph } else { kind };

        let before = self.snapshot();
        for block in blocks {
            let format = self.document.block_format(block);
            self.document.set_block_format(block, format.with_kind(target));
        }
        self.commit(before);
    }

    fn set_alignment(&mut self, align: Alignment) {
        let blocks = self.selection.blocks();
        let all = blocks
            .clone()
            .all(|b| self.document.block_format(b).align == align);
        let target = if all && align != Alignment::Left {
            Alignment::Left
        } else {
            align
        };
        if blocks
            .clone()
            .all(|b| self.document.block_format(b).align == target)
        {
            return;
        }

        let before = self.snapshot();
        for block in blocks {
            let mut format = self.document.block_format(block);
            format.align = target;
            self.document.set_block_format(block, format);
        }
        self.commit(before);
    }

    fn create_link(&mut self, url: &str) -> Result<(), SurfaceError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SurfaceError::Rejected {
                command: "link",
                reason: "empty URL".to_string(),
            });
        }

        let before = self.snapshot();
        let range = self.selected_range();
        if range.is_empty() {
            // Nothing selected: the URL becomes the link text
            let mut style = self.insertion_style();
            style.link = Some(url.to_string());
            let inserted = self.document.insert(range.start, url, &style);
            self.collapse_at(range.start + inserted);
        } else {
            self.document.add_mark(range, Mark::Link(url.to_string()));
        }
        self.commit(before);
        Ok(())
    }

    fn insert_image(&mut self, src: &str) -> Result<(), SurfaceError> {
        let src = src.trim();
        if src.is_empty() {
            return Err(SurfaceError::Rejected {
                command: "image",
                reason: "empty image URL".to_string(),
            });
        }

        let before = self.snapshot();
        let style = self.insertion_style();
        let range = self.selected_range();
        self.document.remove(range.clone());
        self.document.insert_image(range.start, src, &style);
        self.collapse_at(range.start + 1);
        self.commit(before);
        Ok(())
    }

    fn mark_active(&self, mark: InlineMark) -> bool {
        if self.selection.is_empty() {
            self.insertion_style().has(mark)
        } else {
            self.document.range_has_mark(self.selected_range(), mark)
        }
    }
}

impl EditingSurface for DocumentSurface {
    fn revision(&self) -> u64 {
        self.revision
    }

    fn serialize(&self) -> String {
        markup::serialize(&self.document)
    }

    fn load(&mut self, markup: &str) {
        self.document = markup::parse(markup);
        self.selection = Selection::collapsed(Position::zero());
        self.pending_style = None;
        self.goal_offset = None;
        self.history.clear();
        self.revision += 1;
    }

    fn plain_text_len(&self) -> usize {
        self.document.plain_text_len()
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn selection(&self) -> Result<Selection, SurfaceError> {
        if !self.focused {
            return Err(SurfaceError::NotFocused);
        }
        Ok(self.selection)
    }

    fn set_selection(&mut self, selection: Selection) -> Result<(), SurfaceError> {
        if !self.focused {
            return Err(SurfaceError::NotFocused);
        }
        for pos in [selection.anchor, selection.head] {
            if !self.document.is_valid(pos) {
                return Err(SurfaceError::SelectionOutOfBounds {
                    block: pos.block,
                    offset: pos.offset,
                });
            }
        }
        if selection != self.selection {
            self.selection = selection;
            self.pending_style = None;
            self.goal_offset = None;
        }
        Ok(())
    }

    fn apply_edit(&mut self, edit: &TextEdit) -> Result<(), SurfaceError> {
        self.focused = true;
        match edit {
            TextEdit::InsertText(text) => {
                self.insert_text(text);
            }
            TextEdit::InsertParagraph => {
                self.insert_paragraph();
            }
            TextEdit::DeleteBackward => {
                self.delete_backward();
            }
            TextEdit::DeleteForward => {
                self.delete_forward();
            }
            TextEdit::Move { target, extend } => self.move_caret(*target, *extend),
            TextEdit::Select(selection) => self.set_selection(*selection)?,
            TextEdit::SelectAll => self.select_all(),
        }
        Ok(())
    }

    fn exec(&mut self, command: &SurfaceCommand) -> Result<(), SurfaceError> {
        match command {
            SurfaceCommand::ToggleMark(mark) => self.toggle_mark(*mark),
            SurfaceCommand::ToggleBlock(kind) => self.toggle_block(*kind),
            SurfaceCommand::SetAlignment(align) => self.set_alignment(*align),
            SurfaceCommand::CreateLink(url) => self.create_link(url)?,
            SurfaceCommand::InsertImage(src) => self.insert_image(src)?,
            SurfaceCommand::Undo => {
                self.undo();
            }
            SurfaceCommand::Redo => {
                self.redo();
            }
        }
        Ok(())
    }

    fn query(&self, format: Format) -> Result<bool, SurfaceError> {
        let block = self.document.block_format(self.start_block());
        let active = match format {
            Format::Bold => self.mark_active(InlineMark::Bold),
            Format::Italic => self.mark_active(InlineMark::Italic),
            Format::Underline => self.mark_active(InlineMark::Underline),
            Format::Heading1 => block.kind == BlockKind::Heading(HeadingLevel::One),
            Format::Heading2 => block.kind == BlockKind::Heading(HeadingLevel::Two),
            Format::BulletList => block.kind == BlockKind::ListItem(ListKind::Bullet),
            Format::NumberedList => block.kind == BlockKind::ListItem(ListKind::Numbered),
            Format::Quote => block.kind == BlockKind::Quote,
            Format::AlignLeft => block.align == Alignment::Left,
            Format::AlignCenter => block.align == Alignment::Center,
            Format::AlignRight => block.align == Alignment::Right,
            Format::AlignJustify => block.align == Alignment::Justify,
        };
        Ok(active)
    }
}

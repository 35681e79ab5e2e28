//! Rope-backed block text.
//!
//! Blocks are stored as rope lines joined by `'\n'`, so block `i` is rope line
//! `i` and the block count always equals `len_lines()` (never zero).

use ropey::Rope;
use std::ops::Range;

use super::selection::Position;

#[derive(Debug, Clone, Default)]
pub struct BlockText {
    rope: Rope,
}

impl BlockText {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn block_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Length of a block in chars, excluding its separator
    pub fn block_len(&self, block: usize) -> usize {
        if block >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(block);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    pub fn block_start(&self, block: usize) -> usize {
        if block >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(block)
    }

    /// Char range of a block's content (separator excluded)
    pub fn block_range(&self, block: usize) -> Range<usize> {
        let start = self.block_start(block);
        start..start + self.block_len(block)
    }

    pub fn block_text(&self, block: usize) -> String {
        self.slice(self.block_range(block))
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.rope.len_chars() {
            Some(self.rope.char(offset))
        } else {
            None
        }
    }

    /// Char inside a block, None past its end
    pub fn char_in_block(&self, block: usize, offset: usize) -> Option<char> {
        if offset >= self.block_len(block) {
            return None;
        }
        self.char_at(self.block_start(block) + offset)
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        pos.block < self.block_count() && pos.offset <= self.block_len(pos.block)
    }

    /// Convert a position to a char offset, clamping out-of-range input
    pub fn position_to_offset(&self, pos: Position) -> usize {
        if pos.block >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.block_start(pos.block) + pos.offset.min(self.block_len(pos.block))
    }

    pub fn offset_to_position(&self, offset: usize) -> Position {
        let clamped = offset.min(self.rope.len_chars());
        let block = self.rope.char_to_line(clamped);
        Position::new(block, clamped - self.rope.line_to_char(block))
    }

    pub fn end_position(&self) -> Position {
        let last = self.block_count() - 1;
        Position::new(last, self.block_len(last))
    }

    pub fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    pub fn insert(&mut self, offset: usize, text: &str) {
        let clamped = offset.min(self.len_chars());
        self.rope.insert(clamped, text);
    }

    pub fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }
}

//! RichDocument - block text, per-block formats and inline mark spans.

use std::ops::Range;

use super::block::BlockFormat;
use super::buffer::BlockText;
use super::marks::{CharStyle, InlineMark, Mark, MarkKind, MarkSpans, OBJECT_CHAR};
use super::selection::Position;

/// A run of text sharing one style, used to build documents block by block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: CharStyle,
}

impl Run {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: CharStyle::default(),
        }
    }

    pub fn styled(text: &str, style: CharStyle) -> Self {
        Self {
            text: text.to_string(),
            style,
        }
    }

    pub fn image(src: &str) -> Self {
        Self {
            text: OBJECT_CHAR.to_string(),
            style: CharStyle {
                image: Some(src.to_string()),
                ..CharStyle::default()
            },
        }
    }
}

/// One block of content before it is assembled into a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContent {
    pub format: BlockFormat,
    pub runs: Vec<Run>,
}

impl BlockContent {
    pub fn new(format: BlockFormat, runs: Vec<Run>) -> Self {
        Self { format, runs }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

/// The rich-text document behind the surface.
///
/// Invariant: `blocks.len() == text.block_count()`.
#[derive(Debug, Clone)]
pub struct RichDocument {
    text: BlockText,
    blocks: Vec<BlockFormat>,
    marks: MarkSpans,
}

impl Default for RichDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RichDocument {
    pub fn new() -> Self {
        Self {
            text: BlockText::new(),
            blocks: vec![BlockFormat::default()],
            marks: MarkSpans::new(),
        }
    }

    pub fn from_blocks(contents: Vec<BlockContent>) -> Self {
        if contents.is_empty() {
            return Self::new();
        }

        let mut raw = String::new();
        let mut blocks = Vec::with_capacity(contents.len());
        let mut marks = MarkSpans::new();
        let mut offset = 0;

        for (i, content) in contents.into_iter().enumerate() {
            if i > 0 {
                raw.push('\n');
                offset += 1;
            }
            blocks.push(content.format);
            for run in content.runs {
                let text: String = run.text.chars().filter(|&c| c != '\n').collect();
                let len = text.chars().count();
                if len == 0 {
                    continue;
                }
                for mark in run.style.marks() {
                    marks.add(offset..offset + len, mark);
                }
                raw.push_str(&text);
                offset += len;
            }
        }

        Self {
            text: BlockText::from_text(&raw),
            blocks,
            marks,
        }
    }

    pub fn text(&self) -> &BlockText {
        &self.text
    }

    pub fn marks(&self) -> &MarkSpans {
        &self.marks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_format(&self, block: usize) -> BlockFormat {
        self.blocks.get(block).copied().unwrap_or_default()
    }

    pub fn block_formats(&self) -> &[BlockFormat] {
        &self.blocks
    }

    pub fn block_len(&self, block: usize) -> usize {
        self.text.block_len(block)
    }

    /// True for the canonical empty document: one empty default paragraph
    pub fn is_blank(&self) -> bool {
        self.text.len_chars() == 0 && self.blocks[0] == BlockFormat::default()
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Visible character count: separators and embedded objects excluded
    pub fn plain_text_len(&self) -> usize {
        self.text
            .rope()
            .chars()
            .filter(|&c| c != '\n' && c != OBJECT_CHAR)
            .count()
    }

    pub fn plain_text(&self) -> String {
        self.text
            .rope()
            .chars()
            .filter(|&c| c != OBJECT_CHAR)
            .collect()
    }

    pub fn style_at(&self, offset: usize) -> CharStyle {
        self.marks.style_at(offset)
    }

    /// Runs of one block with their resolved styles. Each image is its own run.
    pub fn block_runs(&self, block: usize) -> Vec<Run> {
        let range = self.text.block_range(block);
        let mut runs: Vec<Run> = Vec::new();
        for (i, ch) in self.text.slice(range.clone()).chars().enumerate() {
            let style = self.marks.style_at(range.start + i);
            match runs.last_mut() {
                Some(run) if run.style == style && style.image.is_none() => run.text.push(ch),
                _ => runs.push(Run {
                    text: ch.to_string(),
                    style,
                }),
            }
        }
        runs
    }

    pub fn block_content(&self, block: usize) -> BlockContent {
        BlockContent::new(self.block_format(block), self.block_runs(block))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert text with `style` at a char offset. `'\n'` splits blocks.
    ///
    /// Returns the number of chars inserted.
    pub fn insert(&mut self, offset: usize, text: &str, style: &CharStyle) -> usize {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let len = text.chars().count();
        if len == 0 {
            return 0;
        }
        let offset = offset.min(self.text.len_chars());
        let at = self.text.offset_to_position(offset);

        let splits = text.chars().filter(|&c| c == '\n').count();
        if splits > 0 {
            let next = self.blocks[at.block].continuation();
            for i in 0..splits {
                self.blocks.insert(at.block + 1 + i, next);
            }
        }

        self.text.insert(offset, &text);
        self.marks.shift_for_insert(offset, len);
        self.marks.restyle(offset..offset + len, style);
        if let Some(href) = &style.link {
            self.marks.add(offset..offset + len, Mark::Link(href.clone()));
        }
        len
    }

    pub fn insert_image(&mut self, offset: usize, src: &str, style: &CharStyle) {
        let offset = offset.min(self.text.len_chars());
        self.text.insert(offset, &OBJECT_CHAR.to_string());
        self.marks.shift_for_insert(offset, 1);
        self.marks.restyle(offset..offset + 1, style);
        self.marks.add(offset..offset + 1, Mark::Image(src.to_string()));
    }

    /// Remove a char range. Removed separators merge blocks into the earlier one.
    pub fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.text.len_chars());
        let end = range.end.min(self.text.len_chars());
        if start >= end {
            return;
        }
        let first = self.text.offset_to_position(start).block;
        let merged = self
            .text
            .slice(start..end)
            .chars()
            .filter(|&c| c == '\n')
            .count();
        self.blocks.drain(first + 1..first + 1 + merged);

        self.text.remove(start..end);
        self.marks.shift_for_remove(start..end);
    }

    pub fn set_block_format(&mut self, block: usize, format: BlockFormat) {
        if let Some(slot) = self.blocks.get_mut(block) {
            *slot = format;
        }
    }

    pub fn add_mark(&mut self, range: Range<usize>, mark: Mark) {
        self.marks.add(range, mark);
    }

    pub fn remove_mark(&mut self, range: Range<usize>, kind: MarkKind) {
        self.marks.remove(range, kind);
    }

    /// True when every content char in `range` carries the mark.
    /// Separators are ignored; a range with no content chars is never marked.
    pub fn range_has_mark(&self, range: Range<usize>, mark: InlineMark) -> bool {
        let kind = MarkKind::from(mark);
        let mut seen = false;
        for (i, ch) in self.text.slice(range.clone()).chars().enumerate() {
            if ch == '\n' {
                continue;
            }
            seen = true;
            if !self.marks.has_at(range.start + i, kind) {
                return false;
            }
        }
        seen
    }

    pub fn position_to_offset(&self, pos: Position) -> usize {
        self.text.position_to_offset(pos)
    }

    pub fn offset_to_position(&self, offset: usize) -> Position {
        self.text.offset_to_position(offset)
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        self.text.is_valid(pos)
    }

    pub fn end_position(&self) -> Position {
        self.text.end_position()
    }
}

#[cfg(test)]
mod tests {
    use super::super::block::{BlockKind, HeadingLevel, ListKind};
    use super::*;

    fn doc(blocks: &[(&str, BlockKind)]) -> RichDocument {
        RichDocument::from_blocks(
            blocks
                .iter()
                .map(|(text, kind)| {
                    BlockContent::new(BlockFormat::paragraph().with_kind(*kind), vec![Run::plain(text)])
                })
                .collect(),
        )
    }

    #[test]
    fn test_from_blocks_keeps_formats_in_step() {
        let d = doc(&[
            ("Title", BlockKind::Heading(HeadingLevel::One)),
            ("body", BlockKind::Paragraph),
        ]);
        assert_eq!(d.block_count(), 2);
        assert_eq!(d.text().block_count(), 2);
        assert_eq!(d.block_format(0).kind, BlockKind::Heading(HeadingLevel::One));
        assert_eq!(d.plain_text_len(), 9);
    }

    #[test]
    fn test_insert_newline_splits_block() {
        let mut d = doc(&[("Titlebody", BlockKind::Heading(HeadingLevel::Two))]);
        d.insert(5, "\n", &CharStyle::default());
        assert_eq!(d.block_count(), 2);
        assert_eq!(d.text().block_text(0), "Title");
        assert_eq!(d.text().block_text(1), "body");
        assert_eq!(d.block_format(1).kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_remove_separator_merges_blocks() {
        let mut d = doc(&[
            ("one", BlockKind::ListItem(ListKind::Bullet)),
            ("two", BlockKind::Paragraph),
            ("three", BlockKind::Quote),
        ]);
        d.remove(2..6);
        assert_eq!(d.block_count(), 2);
        assert_eq!(d.text().block_text(0), "ono");
        assert_eq!(d.block_format(0).kind, BlockKind::ListItem(ListKind::Bullet));
        assert_eq!(d.block_format(1).kind, BlockKind::Quote);
    }

    #[test]
    fn test_insert_applies_style() {
        let mut d = doc(&[("ac", BlockKind::Paragraph)]);
        d.add_mark(0..2, Mark::Bold);
        d.insert(1, "b", &CharStyle::italic());
        assert!(!d.style_at(1).bold);
        assert!(d.style_at(1).italic);
        assert!(d.style_at(0).bold);
        assert!(d.style_at(2).bold);
        assert_eq!(d.block_runs(0).len(), 3);
    }

    #[test]
    fn test_image_is_not_counted_as_text() {
        let mut d = doc(&[("ab", BlockKind::Paragraph)]);
        d.insert_image(1, "https://img.example/x.png", &CharStyle::default());
        assert_eq!(d.len_chars(), 3);
        assert_eq!(d.plain_text_len(), 2);
        assert_eq!(
            d.style_at(1).image.as_deref(),
            Some("https://img.example/x.png")
        );
    }

    #[test]
    fn test_range_has_mark_skips_separators() {
        let mut d = doc(&[("ab", BlockKind::Paragraph), ("cd", BlockKind::Paragraph)]);
        d.add_mark(0..2, Mark::Bold);
        d.add_mark(3..5, Mark::Bold);
        assert!(d.range_has_mark(0..5, InlineMark::Bold));
        assert!(!d.range_has_mark(0..5, InlineMark::Italic));
        assert!(!d.range_has_mark(2..3, InlineMark::Bold));
    }

    #[test]
    fn test_blank_document() {
        assert!(RichDocument::new().is_blank());
        assert!(!doc(&[("", BlockKind::Quote)]).is_blank());
    }
}

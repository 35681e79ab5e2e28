//! Inline marks stored as char ranges over the document text.
//!
//! Spans are kept sorted by start and normalized: spans of the same mark never
//! overlap or touch, so every char resolves to a unique [`CharStyle`].

use std::ops::Range;

/// Object replacement char standing in for an embedded image.
pub const OBJECT_CHAR: char = '\u{FFFC}';

/// The togglable inline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineMark {
    Bold,
    Italic,
    Underline,
}

impl InlineMark {
    pub fn mark(self) -> Mark {
        match self {
            InlineMark::Bold => Mark::Bold,
            InlineMark::Italic => Mark::Italic,
            InlineMark::Underline => Mark::Underline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mark {
    Link(String),
    Bold,
    Italic,
    Underline,
    Image(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Link,
    Bold,
    Italic,
    Underline,
    Image,
}

impl Mark {
    pub fn kind(&self) -> MarkKind {
        match self {
            Mark::Link(_) => MarkKind::Link,
            Mark::Bold => MarkKind::Bold,
            Mark::Italic => MarkKind::Italic,
            Mark::Underline => MarkKind::Underline,
            Mark::Image(_) => MarkKind::Image,
        }
    }
}

impl From<InlineMark> for MarkKind {
    fn from(mark: InlineMark) -> Self {
        mark.mark().kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSpan {
    pub start: usize,
    pub end: usize,
    pub mark: Mark,
}

impl MarkSpan {
    pub fn new(range: Range<usize>, mark: Mark) -> Self {
        Self {
            start: range.start,
            end: range.end,
            mark,
        }
    }

    fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Resolved style of a single char.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl CharStyle {
    pub fn has(&self, mark: InlineMark) -> bool {
        match mark {
            InlineMark::Bold => self.bold,
            InlineMark::Italic => self.italic,
            InlineMark::Underline => self.underline,
        }
    }

    pub fn set(&mut self, mark: InlineMark, on: bool) {
        match mark {
            InlineMark::Bold => self.bold = on,
            InlineMark::Italic => self.italic = on,
            InlineMark::Underline => self.underline = on,
        }
    }

    /// Only the styles that carry over to typed text
    pub fn inline_only(&self) -> CharStyle {
        CharStyle {
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            link: None,
            image: None,
        }
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn link(href: &str) -> Self {
        Self {
            link: Some(href.to_string()),
            ..Self::default()
        }
    }

    /// Marks implied by this style, in nesting order (outermost first)
    pub fn marks(&self) -> Vec<Mark> {
        let mut marks = Vec::new();
        if let Some(href) = &self.link {
            marks.push(Mark::Link(href.clone()));
        }
        if self.bold {
            marks.push(Mark::Bold);
        }
        if self.italic {
            marks.push(Mark::Italic);
        }
        if self.underline {
            marks.push(Mark::Underline);
        }
        if let Some(src) = &self.image {
            marks.push(Mark::Image(src.clone()));
        }
        marks
    }
}

/// All mark spans of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkSpans {
    spans: Vec<MarkSpan>,
}

impl MarkSpans {
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkSpan> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn style_at(&self, offset: usize) -> CharStyle {
        let mut style = CharStyle::default();
        for span in self.spans.iter().filter(|s| s.contains(offset)) {
            match &span.mark {
                Mark::Link(href) => style.link = Some(href.clone()),
                Mark::Bold => style.bold = true,
                Mark::Italic => style.italic = true,
                Mark::Underline => style.underline = true,
                Mark::Image(src) => style.image = Some(src.clone()),
            }
        }
        style
    }

    pub fn has_at(&self, offset: usize, kind: MarkKind) -> bool {
        self.spans
            .iter()
            .any(|s| s.mark.kind() == kind && s.contains(offset))
    }

    pub fn add(&mut self, range: Range<usize>, mark: Mark) {
        if range.start >= range.end {
            return;
        }
        // A char carries at most one link target
        if mark.kind() == MarkKind::Link {
            self.remove(range.clone(), MarkKind::Link);
        }
        self.spans.push(MarkSpan::new(range, mark));
        self.normalize();
    }

    /// Remove every mark of `kind` from `range`, splitting spans that straddle it
    pub fn remove(&mut self, range: Range<usize>, kind: MarkKind) {
        if range.start >= range.end {
            return;
        }
        let mut kept = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            if span.mark.kind() != kind || span.end <= range.start || span.start >= range.end {
                kept.push(span);
                continue;
            }
            if span.start < range.start {
                kept.push(MarkSpan::new(span.start..range.start, span.mark.clone()));
            }
            if span.end > range.end {
                kept.push(MarkSpan::new(range.end..span.end, span.mark));
            }
        }
        self.spans = kept;
        self.normalize();
    }

    /// Make room for `len` chars inserted at `offset`.
    ///
    /// Spans starting at or after the offset move right; spans strictly
    /// containing it grow. Spans ending exactly at the offset are untouched.
    pub fn shift_for_insert(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        for span in &mut self.spans {
            if span.start >= offset {
                span.start += len;
                span.end += len;
            } else if span.end > offset {
                span.end += len;
            }
        }
    }

    /// Collapse the removed `range` out of every span, dropping emptied spans
    pub fn shift_for_remove(&mut self, range: Range<usize>) {
        let len = range.end.saturating_sub(range.start);
        if len == 0 {
            return;
        }
        let map = |p: usize| {
            if p <= range.start {
                p
            } else if p >= range.end {
                p - len
            } else {
                range.start
            }
        };
        for span in &mut self.spans {
            span.start = map(span.start);
            span.end = map(span.end);
        }
        self.spans.retain(|s| s.start < s.end);
        self.normalize();
    }

    /// Set the inline marks of `range` to exactly those of `style`
    pub fn restyle(&mut self, range: Range<usize>, style: &CharStyle) {
        for mark in [InlineMark::Bold, InlineMark::Italic, InlineMark::Underline] {
            if style.has(mark) {
                self.add(range.clone(), mark.mark());
            } else {
                self.remove(range.clone(), mark.into());
            }
        }
    }

    fn normalize(&mut self) {
        self.spans
            .sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
        let mut merged: Vec<MarkSpan> = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            // Image spans stay one object each
            let mergeable = merged
                .iter_mut()
                .rev()
                .find(|m| m.mark == span.mark && m.end >= span.start);
            match mergeable {
                Some(existing) if span.mark.kind() != MarkKind::Image => {
                    existing.end = existing.end.max(span.end);
                }
                _ => merged.push(span),
            }
        }
        self.spans = merged;
    }
}

//! Block-level formatting: paragraph kinds and alignment.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    One,
    Two,
}

impl HeadingLevel {
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(HeadingLevel::One),
            2 => Some(HeadingLevel::Two),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::One => "h1",
            HeadingLevel::Two => "h2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    pub fn container_tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

/// What kind of block a line of the document is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading(HeadingLevel),
    ListItem(ListKind),
    Quote,
}

impl BlockKind {
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "p",
            BlockKind::Heading(level) => level.tag(),
            BlockKind::ListItem(_) => "li",
            BlockKind::Quote => "blockquote",
        }
    }

    pub fn list(self) -> Option<ListKind> {
        match self {
            BlockKind::ListItem(kind) => Some(kind),
            _ => None,
        }
    }

    /// Kind of the block created when Enter splits a block of this kind
    pub fn continuation(self) -> BlockKind {
        match self {
            BlockKind::Heading(_) => BlockKind::Paragraph,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// Format of one block: its kind and alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockFormat {
    pub kind: BlockKind,
    pub align: Alignment,
}

impl BlockFormat {
    pub const fn new(kind: BlockKind, align: Alignment) -> Self {
        Self { kind, align }
    }

    pub fn paragraph() -> Self {
        Self::default()
    }

    pub fn with_kind(self, kind: BlockKind) -> Self {
        Self { kind, ..self }
    }

    pub fn continuation(self) -> Self {
        self.with_kind(self.kind.continuation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_splits_into_paragraph() {
        let heading = BlockFormat::new(BlockKind::Heading(HeadingLevel::One), Alignment::Center);
        let next = heading.continuation();
        assert_eq!(next.kind, BlockKind::Paragraph);
        assert_eq!(next.align, Alignment::Center);

        let item = BlockFormat::paragraph().with_kind(BlockKind::ListItem(ListKind::Numbered));
        assert_eq!(item.continuation(), item);
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!(Alignment::parse(" Center "), Some(Alignment::Center));
        assert_eq!(Alignment::parse("start"), Some(Alignment::Left));
        assert_eq!(Alignment::parse("middle"), None);
    }
}

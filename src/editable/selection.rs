//! Position and selection types for the document surface.

/// A position in the document: block index and char offset inside that block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    pub const fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    pub const fn zero() -> Self {
        Self {
            block: 0,
            offset: 0,
        }
    }
}

/// A text selection with anchor (start point) and head (caret position).
/// The anchor stays fixed while the head moves during selection extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the caret is (moving point)
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret with no selected range)
    pub fn collapsed(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The earlier of anchor and head
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// The later of anchor and head
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }

    pub fn extend_to(&mut self, pos: Position) {
        self.head = pos;
    }

    pub fn collapse_to_start(&mut self) {
        let start = self.start();
        self.anchor = start;
        self.head = start;
    }

    pub fn collapse_to_end(&mut self) {
        let end = self.end();
        self.anchor = end;
        self.head = end;
    }

    /// Blocks touched by this selection, inclusive on both ends
    pub fn blocks(&self) -> std::ops::RangeInclusive<usize> {
        self.start().block..=self.end().block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let a = Position::new(0, 5);
        let b = Position::new(1, 0);
        let c = Position::new(1, 3);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_selection_start_end() {
        let forward = Selection::new(Position::new(0, 0), Position::new(0, 5));
        assert_eq!(forward.start(), Position::new(0, 0));
        assert_eq!(forward.end(), Position::new(0, 5));
        assert!(!forward.is_reversed());

        let backward = Selection::new(Position::new(2, 1), Position::new(0, 4));
        assert_eq!(backward.start(), Position::new(0, 4));
        assert_eq!(backward.end(), Position::new(2, 1));
        assert!(backward.is_reversed());
        assert_eq!(backward.blocks(), 0..=2);
    }

    #[test]
    fn test_selection_collapse() {
        let mut sel = Selection::new(Position::new(0, 0), Position::new(0, 10));
        sel.collapse_to_end();
        assert!(sel.is_empty());
        assert_eq!(sel.head, Position::new(0, 10));

        let mut sel2 = Selection::new(Position::new(0, 0), Position::new(0, 10));
        sel2.collapse_to_start();
        assert!(sel2.is_empty());
        assert_eq!(sel2.head, Position::zero());
    }
}

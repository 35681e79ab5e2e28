//! Character classification for word-wise caret movement.

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || matches!(
            ch,
            '\u{2013}' | '\u{2014}' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2026}'
        )
}

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    WordChar,
    Punctuation,
    /// Embedded objects such as images
    Object,
}

pub fn char_type(ch: char) -> CharType {
    if ch == crate::editable::OBJECT_CHAR {
        CharType::Object
    } else if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_types() {
        assert_eq!(char_type('a'), CharType::WordChar);
        assert_eq!(char_type('é'), CharType::WordChar);
        assert_eq!(char_type('\u{a0}'), CharType::Whitespace);
        assert_eq!(char_type(','), CharType::Punctuation);
        assert_eq!(char_type('\u{2014}'), CharType::Punctuation);
        assert_eq!(char_type('\u{FFFC}'), CharType::Object);
    }
}

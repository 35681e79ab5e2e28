//! HTML markup codec for the document surface.
//!
//! Serialization is canonical: the same document always produces the same
//! string, and parsing that string yields the same document. Parsing is
//! tolerant of foreign markup and never fails; anything outside the supported
//! subset degrades to its text content.

use std::fmt::Write;

use super::block::{Alignment, BlockFormat, BlockKind, HeadingLevel, ListKind};
use super::document::{BlockContent, RichDocument, Run};
use super::marks::{CharStyle, Mark, OBJECT_CHAR};

// =============================================================================
// Serialization
// =============================================================================

pub fn serialize(doc: &RichDocument) -> String {
    if doc.is_blank() {
        return String::new();
    }

    let mut out = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in 0..doc.block_count() {
        let format = doc.block_format(block);
        let list = format.kind.list();
        if open_list != list {
            if let Some(kind) = open_list {
                let _ = write!(out, "</{}>", kind.container_tag());
            }
            if let Some(kind) = list {
                let _ = write!(out, "<{}>", kind.container_tag());
            }
            open_list = list;
        }

        let tag = format.kind.tag();
        out.push('<');
        out.push_str(tag);
        if format.align != Alignment::Left {
            let _ = write!(out, " style=\"text-align: {}\"", format.align.as_str());
        }
        out.push('>');
        write_runs(&mut out, &doc.block_runs(block));
        let _ = write!(out, "</{}>", tag);
    }

    if let Some(kind) = open_list {
        let _ = write!(out, "</{}>", kind.container_tag());
    }
    out
}

fn write_runs(out: &mut String, runs: &[Run]) {
    if runs.is_empty() {
        out.push_str("<br>");
        return;
    }

    let mut open: Vec<Mark> = Vec::new();
    for run in runs {
        let wanted: Vec<Mark> = run
            .style
            .marks()
            .into_iter()
            .filter(|m| !matches!(m, Mark::Image(_)))
            .collect();
        let common = open
            .iter()
            .zip(&wanted)
            .take_while(|(a, b)| a == b)
            .count();
        while open.len() > common {
            if let Some(mark) = open.pop() {
                close_mark(out, &mark);
            }
        }
        for mark in &wanted[common..] {
            open_mark(out, mark);
            open.push(mark.clone());
        }

        match &run.style.image {
            Some(src) => {
                out.push_str("<img src=\"");
                escape_into(out, src, true);
                out.push_str("\">");
            }
            None => escape_into(out, &run.text, false),
        }
    }
    while let Some(mark) = open.pop() {
        close_mark(out, &mark);
    }
}

fn open_mark(out: &mut String, mark: &Mark) {
    match mark {
        Mark::Link(href) => {
            out.push_str("<a href=\"");
            escape_into(out, href, true);
            out.push_str("\">");
        }
        Mark::Bold => out.push_str("<strong>"),
        Mark::Italic => out.push_str("<em>"),
        Mark::Underline => out.push_str("<u>"),
        Mark::Image(_) => {}
    }
}

fn close_mark(out: &mut String, mark: &Mark) {
    match mark {
        Mark::Link(_) => out.push_str("</a>"),
        Mark::Bold => out.push_str("</strong>"),
        Mark::Italic => out.push_str("</em>"),
        Mark::Underline => out.push_str("</u>"),
        Mark::Image(_) => {}
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            OBJECT_CHAR => {}
            _ => out.push(ch),
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

pub fn parse(markup: &str) -> RichDocument {
    let mut builder = Builder::default();
    for token in Tokenizer::new(markup) {
        builder.token(token);
    }
    RichDocument::from_blocks(builder.finish())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    End {
        name: String,
    },
    Text(String),
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn skip_past(&mut self, terminator: &str) {
        let rest = &self.input[self.pos..];
        self.pos += rest
            .find(terminator)
            .map(|i| i + terminator.len())
            .unwrap_or(rest.len());
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.pos >= self.input.len() {
                return None;
            }
            let rest = &self.input[self.pos..];

            if rest.starts_with("<!--") {
                self.skip_past("-->");
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past(">");
                continue;
            }
            if rest.starts_with('<') {
                if let Some((token, consumed)) = parse_tag(rest) {
                    self.pos += consumed;
                    return Some(token);
                }
                self.pos += 1;
                return Some(Token::Text("<".to_string()));
            }

            let end = rest.find('<').unwrap_or(rest.len());
            self.pos += end;
            return Some(Token::Text(decode_entities(&rest[..end])));
        }
    }
}

/// Parse one tag at the start of `s`. Returns None when `s` does not hold a
/// well-formed tag, in which case the `<` is literal text.
fn parse_tag(s: &str) -> Option<(Token, usize)> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let closing = bytes.get(1) == Some(&b'/');
    let mut i = if closing { 2 } else { 1 };

    let name_start = i;
    if !bytes.get(i)?.is_ascii_alphabetic() {
        return None;
    }
    while i < len && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    let name = s[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return None;
        }
        match bytes[i] {
            b'>' => {
                i += 1;
                break;
            }
            b'/' => {
                self_closing = true;
                i += 1;
            }
            _ => {
                let attr_start = i;
                while i < len
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'=' | b'>' | b'/')
                {
                    i += 1;
                }
                let attr_name = s[attr_start..i].to_ascii_lowercase();
                while i < len && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }

                let mut value = String::new();
                if i < len && bytes[i] == b'=' {
                    i += 1;
                    while i < len && bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                        let quote = bytes[i];
                        i += 1;
                        let value_start = i;
                        while i < len && bytes[i] != quote {
                            i += 1;
                        }
                        if i >= len {
                            return None;
                        }
                        value = decode_entities(&s[value_start..i]);
                        i += 1;
                    } else {
                        let value_start = i;
                        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                            i += 1;
                        }
                        value = decode_entities(&s[value_start..i]);
                    }
                }
                if !attr_name.is_empty() {
                    attrs.push((attr_name, value));
                }
            }
        }
    }

    let token = if closing {
        Token::End { name }
    } else {
        Token::Start {
            name,
            attrs,
            self_closing,
        }
    };
    Some((token, i))
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn alignment_of(attrs: &[(String, String)]) -> Option<Alignment> {
    if let Some(style) = attr(attrs, "style") {
        for decl in style.split(';') {
            if let Some((key, value)) = decl.split_once(':') {
                if key.trim().eq_ignore_ascii_case("text-align") {
                    return Alignment::parse(value);
                }
            }
        }
    }
    attr(attrs, "align").and_then(Alignment::parse)
}

struct OpenBlock {
    content: BlockContent,
    pending_break: bool,
}

/// Flattens the token stream into blocks.
#[derive(Default)]
struct Builder {
    blocks: Vec<BlockContent>,
    current: Option<OpenBlock>,
    lists: Vec<ListKind>,
    in_item: bool,
    quote_depth: usize,
    inline: Vec<(String, Option<Mark>)>,
    skip_depth: usize,
}

impl Builder {
    fn token(&mut self, token: Token) {
        match token {
            Token::Start {
                name,
                attrs,
                self_closing,
            } => self.start_tag(&name, &attrs, self_closing),
            Token::End { name } => self.end_tag(&name),
            Token::Text(text) => self.text(&text),
        }
    }

    fn finish(mut self) -> Vec<BlockContent> {
        self.close_block();
        self.blocks
    }

    fn context_kind(&self) -> BlockKind {
        if self.in_item {
            BlockKind::ListItem(self.lists.last().copied().unwrap_or(ListKind::Bullet))
        } else if self.quote_depth > 0 {
            BlockKind::Quote
        } else {
            BlockKind::Paragraph
        }
    }

    fn style(&self) -> CharStyle {
        let mut style = CharStyle::default();
        for mark in self.inline.iter().filter_map(|(_, m)| m.as_ref()) {
            match mark {
                Mark::Link(href) => style.link = Some(href.clone()),
                Mark::Bold => style.bold = true,
                Mark::Italic => style.italic = true,
                Mark::Underline => style.underline = true,
                Mark::Image(_) => {}
            }
        }
        style
    }

    fn start_tag(&mut self, name: &str, attrs: &[(String, String)], self_closing: bool) {
        match name {
            "p" | "div" => self.open_block(None, alignment_of(attrs)),
            "h1" => self.open_block(
                Some(BlockKind::Heading(HeadingLevel::One)),
                alignment_of(attrs),
            ),
            "h2" | "h3" | "h4" | "h5" | "h6" => self.open_block(
                Some(BlockKind::Heading(HeadingLevel::Two)),
                alignment_of(attrs),
            ),
            "li" => {
                self.close_block();
                self.in_item = true;
                let kind = self.context_kind();
                self.open_block(Some(kind), alignment_of(attrs));
            }
            "blockquote" => {
                self.close_block();
                self.quote_depth += 1;
                self.open_block(Some(BlockKind::Quote), alignment_of(attrs));
            }
            "ul" | "ol" => {
                self.close_block();
                self.lists.push(if name == "ol" {
                    ListKind::Numbered
                } else {
                    ListKind::Bullet
                });
            }
            "br" => self.line_break(),
            "img" => {
                if let Some(src) = attr(attrs, "src").filter(|s| !s.trim().is_empty()) {
                    let mut style = self.style();
                    style.image = Some(src.to_string());
                    self.push_run(Run {
                        text: OBJECT_CHAR.to_string(),
                        style,
                    });
                }
            }
            "strong" | "b" if !self_closing => self.inline.push((name.to_string(), Some(Mark::Bold))),
            "em" | "i" if !self_closing => self.inline.push((name.to_string(), Some(Mark::Italic))),
            "u" if !self_closing => self.inline.push((name.to_string(), Some(Mark::Underline))),
            "a" if !self_closing => {
                let link = attr(attrs, "href")
                    .map(str::trim)
                    .filter(|href| !href.is_empty())
                    .map(|href| Mark::Link(href.to_string()));
                self.inline.push((name.to_string(), link));
            }
            "script" | "style" if !self_closing => self.skip_depth += 1,
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        match name {
            "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.close_block(),
            "li" => {
                self.close_block();
                self.in_item = false;
            }
            "blockquote" => {
                self.close_block();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            "ul" | "ol" => {
                self.close_block();
                self.lists.pop();
                self.in_item = false;
            }
            "strong" | "b" | "em" | "i" | "u" | "a" => {
                if let Some(idx) = self.inline.iter().rposition(|(tag, _)| tag == name) {
                    self.inline.remove(idx);
                }
            }
            "script" | "style" => self.skip_depth = self.skip_depth.saturating_sub(1),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.skip_depth > 0 {
            return;
        }
        let text: String = text
            .chars()
            .filter(|&c| c != OBJECT_CHAR)
            .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
            .collect();
        if text.is_empty() || (self.current.is_none() && text.trim().is_empty()) {
            return;
        }
        let style = self.style();
        self.push_run(Run { text, style });
    }

    /// Open a block. `kind` None keeps the kind of a still-empty enclosing
    /// block (`<li><p>`), otherwise takes the context kind.
    fn open_block(&mut self, kind: Option<BlockKind>, align: Option<Alignment>) {
        if let Some(open) = self.current.as_mut() {
            if open.content.is_empty() {
                if let Some(kind) = kind {
                    open.content.format.kind = kind;
                }
                if let Some(align) = align {
                    open.content.format.align = align;
                }
                open.pending_break = false;
                return;
            }
            self.close_block();
        }
        let kind = kind.unwrap_or_else(|| self.context_kind());
        self.current = Some(OpenBlock {
            content: BlockContent::new(BlockFormat::new(kind, align.unwrap_or_default()), Vec::new()),
            pending_break: false,
        });
    }

    fn close_block(&mut self) {
        if let Some(open) = self.current.take() {
            self.blocks.push(open.content);
        }
    }

    fn line_break(&mut self) {
        match self.current.as_mut() {
            None => self.blocks.push(BlockContent::new(
                BlockFormat::paragraph().with_kind(self.context_kind()),
                Vec::new(),
            )),
            Some(open) if open.pending_break => {
                let format = open.content.format;
                self.close_block();
                self.current = Some(OpenBlock {
                    content: BlockContent::new(format, Vec::new()),
                    pending_break: true,
                });
            }
            Some(open) => open.pending_break = true,
        }
    }

    fn push_run(&mut self, run: Run) {
        if self.current.is_none() {
            self.open_block(None, None);
        }
        let split = match self.current.as_mut() {
            Some(open) if open.pending_break => Some(open.content.format),
            _ => None,
        };
        if let Some(format) = split {
            self.close_block();
            self.current = Some(OpenBlock {
                content: BlockContent::new(format, Vec::new()),
                pending_break: false,
            });
        }
        if let Some(open) = self.current.as_mut() {
            match open.content.runs.last_mut() {
                Some(last) if last.style == run.style && run.style.image.is_none() => {
                    last.text.push_str(&run.text)
                }
                _ => open.content.runs.push(run),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(markup: &str) -> String {
        serialize(&parse(markup))
    }

    #[test]
    fn test_empty_document_serializes_to_empty_string() {
        assert_eq!(serialize(&RichDocument::new()), "");
        assert_eq!(roundtrip(""), "");
        assert!(parse("").is_blank());
    }

    #[test]
    fn test_canonical_markup_is_stable() {
        for markup in [
            "<p>Hello</p>",
            "<h1>Title</h1><p>Body with <strong>bold</strong> and <em>italic</em></p>",
            "<ul><li>one</li><li>two</li></ul><ol><li>first</li></ol>",
            "<blockquote>quoted</blockquote>",
            "<p style=\"text-align: center\">centered</p>",
            "<p><a href=\"https://example.com\">link <strong>bold</strong></a> tail</p>",
            "<p>a<img src=\"https://img.example/a.png\">b</p>",
            "<p><br></p><p>x</p>",
            "<p>1 &lt; 2 &amp;&amp; 3 &gt; 2&nbsp;!</p>",
        ] {
            assert_eq!(roundtrip(markup), markup);
        }
    }

    #[test]
    fn test_plain_text_becomes_paragraph() {
        assert_eq!(roundtrip("Hello"), "<p>Hello</p>");
    }

    #[test]
    fn test_aliases_and_unknown_tags() {
        assert_eq!(
            roundtrip("<div><b>x</b><i>y</i><span>z</span></div><h3>sub</h3>"),
            "<p><strong>x</strong><em>y</em>z</p><h2>sub</h2>"
        );
    }

    #[test]
    fn test_br_splits_block_and_trailing_br_is_dropped() {
        assert_eq!(roundtrip("<p>a<br>b<br></p>"), "<p>a</p><p>b</p>");
        assert_eq!(roundtrip("<p>a<br><br>b</p>"), "<p>a</p><p><br></p><p>b</p>");
    }

    #[test]
    fn test_nested_paragraphs_keep_container_kind() {
        assert_eq!(
            roundtrip("<blockquote><p>a</p><p>b</p></blockquote>"),
            "<blockquote>a</blockquote><blockquote>b</blockquote>"
        );
        assert_eq!(
            roundtrip("<ul>\n  <li><p>item</p></li>\n</ul>"),
            "<ul><li>item</li></ul>"
        );
    }

    #[test]
    fn test_script_content_is_skipped() {
        assert_eq!(roundtrip("<p>a<script>alert(1)</script>b</p>"), "<p>ab</p>");
    }

    #[test]
    fn test_entities() {
        assert_eq!(decode_entities("&#65;&#x42;&amp;&bogus;"), "AB&&bogus;");
        assert_eq!(decode_entities("a & b"), "a & b");
    }

    #[test]
    fn test_object_placeholder_in_text_is_dropped() {
        assert_eq!(roundtrip("<p>a&#65532;b</p>"), "<p>ab</p>");
        assert_eq!(roundtrip("<p>\u{fffc}</p>"), "");
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        let doc = parse("<p>a < b</p>");
        assert_eq!(doc.plain_text(), "a < b");
        assert_eq!(serialize(&doc), "<p>a &lt; b</p>");
    }

    #[test]
    fn test_minimal_tag_nesting_between_runs() {
        let doc = RichDocument::from_blocks(vec![BlockContent::new(
            BlockFormat::paragraph(),
            vec![
                Run::styled("a", CharStyle::bold()),
                Run::styled(
                    "b",
                    CharStyle {
                        bold: true,
                        italic: true,
                        ..CharStyle::default()
                    },
                ),
                Run::plain("c"),
            ],
        )]);
        assert_eq!(serialize(&doc), "<p><strong>a<em>b</em></strong>c</p>");
    }

    #[test]
    fn test_length_counts_decoded_text() {
        let doc = parse("<p>Tom &amp; Jerry</p><p>ok</p>");
        assert_eq!(doc.plain_text_len(), 13);
    }
}

//! Toolbar state: which formats are on at the current selection.

use serde::Serialize;

use super::adapter::SurfaceAdapter;
pub use crate::editable::Format;
use crate::editable::EditingSurface;

/// One flag per togglable format.
///
/// Always rebuilt as a whole by [`ActiveFormatSet::query`] and swapped in, never
/// patched field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActiveFormatSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub heading1: bool,
    pub heading2: bool,
    pub bullet_list: bool,
    pub numbered_list: bool,
    pub quote: bool,
    pub align_left: bool,
    pub align_center: bool,
    pub align_right: bool,
    pub align_justify: bool,
}

impl ActiveFormatSet {
    /// Query every format from the surface. A failed query reads as off.
    pub fn query<S: EditingSurface>(adapter: &SurfaceAdapter<S>) -> Self {
        let mut set = Self::default();
        for format in Format::ALL {
            *set.slot(format) = match adapter.query(format) {
                Ok(active) => active,
                Err(e) => {
                    tracing::debug!(target: "formats", format = format.name(), error = %e, "query failed");
                    false
                }
            };
        }
        set
    }

    pub fn get(&self, format: Format) -> bool {
        match format {
            Format::Bold => self.bold,
            Format::Italic => self.italic,
            Format::Underline => self.underline,
            Format::Heading1 => self.heading1,
            Format::Heading2 => self.heading2,
            Format::BulletList => self.bullet_list,
            Format::NumberedList => self.numbered_list,
            Format::Quote => self.quote,
            Format::AlignLeft => self.align_left,
            Format::AlignCenter => self.align_center,
            Format::AlignRight => self.align_right,
            Format::AlignJustify => self.align_justify,
        }
    }

    fn slot(&mut self, format: Format) -> &mut bool {
        match format {
            Format::Bold => &mut self.bold,
            Format::Italic => &mut self.italic,
            Format::Underline => &mut self.underline,
            Format::Heading1 => &mut self.heading1,
            Format::Heading2 => &mut self.heading2,
            Format::BulletList => &mut self.bullet_list,
            Format::NumberedList => &mut self.numbered_list,
            Format::Quote => &mut self.quote,
            Format::AlignLeft => &mut self.align_left,
            Format::AlignCenter => &mut self.align_center,
            Format::AlignRight => &mut self.align_right,
            Format::AlignJustify => &mut self.align_justify,
        }
    }

    pub fn active(&self) -> impl Iterator<Item = Format> + '_ {
        Format::ALL.into_iter().filter(|f| self.get(*f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::{DocumentSurface, Position, Selection, TextEdit};

    #[test]
    fn test_query_reads_block_and_inline_state() {
        let mut adapter = SurfaceAdapter::new(DocumentSurface::from_markup(
            r#"<h2 style="text-align: right"><em>Title</em></h2>"#,
        ));
        adapter.focus();
        adapter
            .apply_edit(&TextEdit::Select(Selection::new(
                Position::new(0, 0),
                Position::new(0, 5),
            )))
            .unwrap();

        let set = ActiveFormatSet::query(&adapter);
        assert!(set.italic);
        assert!(set.heading2);
        assert!(set.align_right);
        assert_eq!(
            set.active().collect::<Vec<_>>(),
            vec![Format::Italic, Format::Heading2, Format::AlignRight]
        );
    }

    #[test]
    fn test_blank_surface_is_left_aligned_paragraph() {
        let adapter = SurfaceAdapter::new(DocumentSurface::new());
        let set = ActiveFormatSet::query(&adapter);
        assert_eq!(set.active().collect::<Vec<_>>(), vec![Format::AlignLeft]);
    }
}

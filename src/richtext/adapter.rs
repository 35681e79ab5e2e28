//! Editing Surface Adapter: the only path to the live content.

use std::cell::RefCell;

use super::selection::SelectionHost;
use crate::editable::{EditingSurface, Format, Selection, SurfaceCommand, TextEdit};
use crate::error::SurfaceError;

/// Owns the editing surface and mediates every read and write of its content.
///
/// `read` serializes lazily and caches the result per surface revision.
/// `write` skips the surface entirely when the content would not change.
pub struct SurfaceAdapter<S> {
    surface: S,
    serialized: RefCell<Option<(u64, String)>>,
    /// Raw markup of the last `write` and the revision it produced
    written: Option<(u64, String)>,
}

impl<S: EditingSurface> SurfaceAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            serialized: RefCell::new(None),
            written: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn revision(&self) -> u64 {
        self.surface.revision()
    }

    /// Current content as canonical markup
    pub fn read(&self) -> String {
        let revision = self.surface.revision();
        if let Some((cached, content)) = self.serialized.borrow().as_ref() {
            if *cached == revision {
                return content.clone();
            }
        }
        let content = self.surface.serialize();
        *self.serialized.borrow_mut() = Some((revision, content.clone()));
        content
    }

    /// Replace the content. Returns false, without touching the surface, when
    /// `content` matches what is already there.
    pub fn write(&mut self, content: &str) -> bool {
        let revision = self.surface.revision();
        let same_as_written = self
            .written
            .as_ref()
            .is_some_and(|(rev, raw)| *rev == revision && raw == content);
        if same_as_written || self.read() == content {
            tracing::trace!(target: "sync", "write skipped: content unchanged");
            return false;
        }

        self.surface.load(content);
        self.written = Some((self.surface.revision(), content.to_string()));
        tracing::debug!(target: "sync", bytes = content.len(), "surface content replaced");
        true
    }

    pub fn is_focused(&self) -> bool {
        self.surface.has_focus()
    }

    pub fn focus(&mut self) {
        self.surface.focus();
    }

    pub fn blur(&mut self) {
        self.surface.blur();
    }

    pub fn plain_text_len(&self) -> usize {
        self.surface.plain_text_len()
    }

    pub fn apply_edit(&mut self, edit: &TextEdit) -> Result<(), SurfaceError> {
        self.surface.apply_edit(edit)
    }

    pub fn exec(&mut self, command: &SurfaceCommand) -> Result<(), SurfaceError> {
        self.surface.exec(command)
    }

    pub fn query(&self, format: Format) -> Result<bool, SurfaceError> {
        self.surface.query(format)
    }
}

impl<S: EditingSurface> SelectionHost for SurfaceAdapter<S> {
    fn has_focus(&self) -> bool {
        self.surface.has_focus()
    }

    fn current_selection(&self) -> Result<Selection, SurfaceError> {
        self.surface.selection()
    }

    fn apply_selection(&mut self, selection: Selection) -> Result<(), SurfaceError> {
        self.surface.set_selection(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::DocumentSurface;

    #[test]
    fn test_write_is_idempotent() {
        let mut adapter = SurfaceAdapter::new(DocumentSurface::new());
        assert!(adapter.write("<p>Hello</p>"));
        let revision = adapter.revision();

        assert!(!adapter.write("<p>Hello</p>"));
        assert_eq!(adapter.revision(), revision);
    }

    #[test]
    fn test_write_of_non_canonical_markup_is_idempotent() {
        let mut adapter = SurfaceAdapter::new(DocumentSurface::new());
        assert!(adapter.write("<b>Hi</b>"));
        assert_eq!(adapter.read(), "<p><strong>Hi</strong></p>");
        let revision = adapter.revision();

        assert!(!adapter.write("<b>Hi</b>"));
        assert_eq!(adapter.revision(), revision);
    }

    #[test]
    fn test_read_tracks_edits() {
        let mut adapter = SurfaceAdapter::new(DocumentSurface::new());
        assert_eq!(adapter.read(), "");
        adapter
            .apply_edit(&TextEdit::InsertText("x".into()))
            .unwrap();
        assert_eq!(adapter.read(), "<p>x</p>");
    }

    #[test]
    fn test_write_of_empty_content_on_blank_surface_is_a_no_op() {
        let mut adapter = SurfaceAdapter::new(DocumentSurface::new());
        assert!(!adapter.write(""));
        assert_eq!(adapter.revision(), 0);
    }
}

//! The editing surface seam.
//!
//! Everything above this trait (selection management, command dispatch,
//! synchronization) talks to the document only through [`EditingSurface`].
//! [`DocumentSurface`](super::DocumentSurface) is the in-process
//! implementation; hosts embedding another editing engine implement the trait
//! for it instead.

use serde::Serialize;

use super::messages::{SurfaceCommand, TextEdit};
use super::selection::Selection;
use crate::error::SurfaceError;

/// A formatting state that can be queried at the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Heading1,
    Heading2,
    BulletList,
    NumberedList,
    Quote,
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
}

impl Format {
    pub const ALL: [Format; 12] = [
        Format::Bold,
        Format::Italic,
        Format::Underline,
        Format::Heading1,
        Format::Heading2,
        Format::BulletList,
        Format::NumberedList,
        Format::Quote,
        Format::AlignLeft,
        Format::AlignCenter,
        Format::AlignRight,
        Format::AlignJustify,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Format::Bold => "bold",
            Format::Italic => "italic",
            Format::Underline => "underline",
            Format::Heading1 => "heading1",
            Format::Heading2 => "heading2",
            Format::BulletList => "bullet_list",
            Format::NumberedList => "numbered_list",
            Format::Quote => "quote",
            Format::AlignLeft => "align_left",
            Format::AlignCenter => "align_center",
            Format::AlignRight => "align_right",
            Format::AlignJustify => "align_justify",
        }
    }
}

/// A live rich-text editing region.
pub trait EditingSurface {
    /// Changes whenever the content changes. Selection moves do not count.
    fn revision(&self) -> u64;

    /// Current content as canonical markup. A blank surface serializes to `""`.
    fn serialize(&self) -> String;

    /// Replace the whole content. Resets the selection and edit history.
    fn load(&mut self, markup: &str);

    /// Visible characters in the content, markup excluded
    fn plain_text_len(&self) -> usize;

    fn has_focus(&self) -> bool;
    fn focus(&mut self);
    fn blur(&mut self);

    fn selection(&self) -> Result<Selection, SurfaceError>;
    fn set_selection(&mut self, selection: Selection) -> Result<(), SurfaceError>;

    /// Apply user input. Input implies focus.
    fn apply_edit(&mut self, edit: &TextEdit) -> Result<(), SurfaceError>;

    /// Run a formatting command against the current selection.
    fn exec(&mut self, command: &SurfaceCommand) -> Result<(), SurfaceError>;

    /// Whether `format` is active at the current selection.
    fn query(&self, format: Format) -> Result<bool, SurfaceError>;
}

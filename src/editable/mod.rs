//! Headless rich-text editing.
//!
//! This module is the document side of the editor: a block/inline document
//! model, its markup codec, and an editing surface that applies user input and
//! formatting commands to it.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`BlockText`]: Rope-backed text, one rope line per block
//! - [`RichDocument`]: Block text plus per-block [`BlockFormat`]s and inline [`MarkSpans`]
//! - [`markup`]: Canonical serializer and tolerant parser for the stored HTML subset
//! - [`EditingSurface`]: The seam every higher layer talks through
//! - [`DocumentSurface`]: In-process surface with selection, focus and undo history
//! - [`TextEdit`] / [`SurfaceCommand`]: Input and formatting requests for a surface
//!
//! # Example
//!
//! ```ignore
//! use scribe::editable::{DocumentSurface, EditingSurface, TextEdit};
//!
//! let mut surface = DocumentSurface::from_markup("<p>Hello</p>");
//! surface.apply_edit(&TextEdit::SelectAll)?;
//! surface.apply_edit(&TextEdit::InsertText("Hi".into()))?;
//!
//! assert_eq!(surface.serialize(), "<p>Hi</p>");
//! ```

mod block;
mod buffer;
mod document;
mod history;
mod marks;
pub mod markup;
mod messages;
mod selection;
mod state;
mod surface;

// Re-export main types
pub use block::{Alignment, BlockFormat, BlockKind, HeadingLevel, ListKind};
pub use buffer::BlockText;
pub use document::{BlockContent, RichDocument, Run};
pub use history::{EditHistory, EditOperation, Snapshot};
pub use marks::{CharStyle, InlineMark, Mark, MarkKind, MarkSpan, MarkSpans, OBJECT_CHAR};
pub use messages::{MoveTarget, SurfaceCommand, TextEdit};
pub use selection::{Position, Selection};
pub use state::DocumentSurface;
pub use surface::{EditingSurface, Format};

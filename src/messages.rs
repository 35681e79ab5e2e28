//! Message types for the Elm-style architecture
//!
//! All state changes of a rich-text field flow through these messages.

use crate::editable::TextEdit;
use crate::richtext::FormatCommand;

/// Messages for one rich-text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User input on the editing surface
    Edit(TextEdit),
    /// Toolbar button pressed
    Format(FormatCommand),
    /// The owning form changed the controlled value
    ExternalValue(Option<String>),
    Focus,
    Blur,
    /// Imperative clear from a collaborator
    Clear,
    /// Next paint opportunity (answers `Cmd::RequestPaint`)
    Paint,
    /// Timer wake-up (answers `Cmd::WakeAt`)
    Tick,
    /// Toggle read-only preview
    SetPreview(bool),
    /// Field is being removed
    Unmount,
}

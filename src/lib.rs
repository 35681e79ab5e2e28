//! Scribe - controlled rich-text field
//!
//! This crate provides a headless rich-text editing core that stays in sync
//! with a string value owned by an embedding form, driven through the Elm
//! Architecture pattern.

pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod error;
pub mod messages;
pub mod richtext;
pub mod script;
pub mod tracing;
pub mod update;
pub mod util;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use editable::{DocumentSurface, EditingSurface};
pub use messages::Msg;
pub use richtext::{EditorHandle, FieldProps, RichTextEditor};
pub use update::update;
pub use view::FieldView;

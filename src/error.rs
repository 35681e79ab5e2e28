//! Error types.
//!
//! None of these reach the editor's callers: the editing core catches
//! surface and command failures at its boundary and logs them.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by an editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface does not have focus")]
    NotFocused,

    #[error("selection {block}:{offset} is outside the document")]
    SelectionOutOfBounds { block: usize, offset: usize },

    #[error("surface does not support {0}")]
    Unsupported(&'static str),

    #[error("surface rejected {command}: {reason}")]
    Rejected {
        command: &'static str,
        reason: String,
    },
}

/// Failures resolving a toolbar command by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("command {command} needs an argument ({expected})")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("invalid argument for {command}: {value}")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

/// Failures loading or saving the editor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,

    #[error("I/O error on {path}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failures parsing an edit script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown step `{step}`")]
    UnknownStep { line: usize, step: String },

    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },

    #[error("line {line}: {source}")]
    Command {
        line: usize,
        #[source]
        source: CommandError,
    },
}

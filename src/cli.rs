//! Command-line argument parsing for the `scribe` binary
//!
//! Supports:
//! - Running edit scripts against a mounted field
//! - Printing the field chrome and the active formats
//! - Normalizing markup
//! - Writing the default config file

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::editable::Selection;
use crate::error::ConfigError;
use crate::richtext::FieldProps;
use crate::script::parse_selection;

/// A headless controlled rich-text field
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "A headless controlled rich-text field")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,

    #[command(flatten)]
    pub field: FieldArgs,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Run an edit script (reads stdin when no file is given)
    Run {
        #[arg(value_name = "SCRIPT")]
        script: Option<PathBuf>,
    },
    /// Print the rendered field
    Show {
        /// Print the render model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the formats active at a selection
    Formats {
        /// BLOCK:OFFSET or BLOCK:OFFSET..BLOCK:OFFSET (default: start)
        #[arg(long, value_name = "SELECTION", value_parser = parse_selection)]
        at: Option<Selection>,

        #[arg(long)]
        json: bool,
    },
    /// Print the canonical form of some markup and its length
    Normalize {
        /// Markup to normalize (reads stdin when omitted)
        markup: Option<String>,
    },
    /// Write the default config file if there is none, and print its path
    InitConfig,
}

/// How the field is mounted
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldArgs {
    /// Controlled value owned by the form
    #[arg(long, global = true, value_name = "MARKUP")]
    pub value: Option<String>,

    /// Initial content when uncontrolled
    #[arg(long, global = true, value_name = "MARKUP")]
    pub initial: Option<String>,

    /// Soft length limit (overrides the config)
    #[arg(long, global = true, value_name = "N")]
    pub max_length: Option<usize>,

    /// Mount in read-only preview mode
    #[arg(long, global = true)]
    pub preview: bool,

    #[arg(long, global = true)]
    pub label: Option<String>,

    #[arg(long, global = true)]
    pub placeholder: Option<String>,
}

impl CliArgs {
    /// Load the config from `--config`, or the default location
    pub fn load_config(&self) -> Result<EditorConfig, ConfigError> {
        match &self.config {
            Some(path) => EditorConfig::load_from(path),
            None => Ok(EditorConfig::load()),
        }
    }
}

impl FieldArgs {
    /// Convert mount flags into field props
    pub fn to_props(&self) -> FieldProps {
        let mut props = FieldProps::new().with_preview(self.preview);
        if let Some(value) = &self.value {
            props = props.with_value(value.clone());
        }
        if let Some(initial) = &self.initial {
            props = props.with_initial_value(initial.clone());
        }
        if let Some(max) = self.max_length {
            props = props.with_max_length(max);
        }
        if let Some(label) = &self.label {
            props = props.with_label(label.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            props = props.with_placeholder(placeholder.clone());
        }
        props
    }
}

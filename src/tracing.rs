//! Tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! synchronization, selection, and toolbar state issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=sync=trace,selection=debug` - scoped filtering
//! - `RUST_LOG=commands=debug,formats=trace` - toolbar activity
//!
//! # Log Files
//!
//! Logs are written to `~/.config/scribe/logs/scribe.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::Format;
use crate::richtext::ActiveFormatSet;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to `~/.config/scribe/logs/scribe.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG. Stdout carries script output.
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Change between two toolbar snapshots, for trace output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDiff {
    pub turned_on: Vec<Format>,
    pub turned_off: Vec<Format>,
}

impl FormatDiff {
    pub fn between(before: &ActiveFormatSet, after: &ActiveFormatSet) -> Option<Self> {
        let mut diff = FormatDiff {
            turned_on: Vec::new(),
            turned_off: Vec::new(),
        };
        for format in Format::ALL {
            match (before.get(format), after.get(format)) {
                (false, true) => diff.turned_on.push(format),
                (true, false) => diff.turned_off.push(format),
                _ => {}
            }
        }

        if diff.turned_on.is_empty() && diff.turned_off.is_empty() {
            None
        } else {
            Some(diff)
        }
    }

    /// Generate a diff description, e.g. `+bold -align_left +align_center`
    pub fn describe(&self) -> String {
        self.turned_on
            .iter()
            .map(|f| format!("+{}", f.name()))
            .chain(self.turned_off.iter().map(|f| format!("-{}", f.name())))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

//! Command Dispatcher: toolbar intents to surface mutations.

use super::adapter::SurfaceAdapter;
use super::selection::{SelectionHandle, SelectionManager};
use crate::editable::{
    Alignment, BlockKind, EditingSurface, HeadingLevel, InlineMark, ListKind, SurfaceCommand,
};
use crate::error::CommandError;

/// A toolbar command, resolved from its name and argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Heading(HeadingLevel),
    BulletList,
    NumberedList,
    Quote,
    Align(Alignment),
    Link,
    Image,
    Undo,
    Redo,
}

impl FormatCommand {
    /// Resolve a command name and optional argument (`heading 1`, `align center`)
    pub fn parse(name: &str, arg: Option<&str>) -> Result<Self, CommandError> {
        let command = match name {
            "bold" => FormatCommand::Bold,
            "italic" => FormatCommand::Italic,
            "underline" => FormatCommand::Underline,
            "bulletList" => FormatCommand::BulletList,
            "numberedList" => FormatCommand::NumberedList,
            "quote" => FormatCommand::Quote,
            "link" => FormatCommand::Link,
            "image" => FormatCommand::Image,
            "undo" => FormatCommand::Undo,
            "redo" => FormatCommand::Redo,
            "heading" => {
                let value = arg.ok_or(CommandError::MissingArgument {
                    command: "heading",
                    expected: "1 or 2",
                })?;
                let level = value
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .and_then(HeadingLevel::from_number)
                    .ok_or_else(|| CommandError::InvalidArgument {
                        command: "heading",
                        value: value.to_string(),
                    })?;
                return Ok(FormatCommand::Heading(level));
            }
            "align" => {
                let value = arg.ok_or(CommandError::MissingArgument {
                    command: "align",
                    expected: "left, center, right or justify",
                })?;
                let align = Alignment::parse(value).ok_or_else(|| CommandError::InvalidArgument {
                    command: "align",
                    value: value.to_string(),
                })?;
                return Ok(FormatCommand::Align(align));
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Heading(_) => "heading",
            FormatCommand::BulletList => "bulletList",
            FormatCommand::NumberedList => "numberedList",
            FormatCommand::Quote => "quote",
            FormatCommand::Align(_) => "align",
            FormatCommand::Link => "link",
            FormatCommand::Image => "image",
            FormatCommand::Undo => "undo",
            FormatCommand::Redo => "redo",
        }
    }

    /// Which URL the command asks the user for, if any
    pub fn url_kind(self) -> Option<UrlKind> {
        match self {
            FormatCommand::Link => Some(UrlKind::Link),
            FormatCommand::Image => Some(UrlKind::Image),
            _ => None,
        }
    }

    /// Undo and redo bring their own selection from history
    fn keeps_selection(self) -> bool {
        !matches!(self, FormatCommand::Undo | FormatCommand::Redo)
    }
}

/// What a URL prompt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Link,
    Image,
}

/// Asks the user for a URL. `None` or a blank answer cancels the command.
pub trait UrlPrompt {
    fn prompt(&mut self, kind: UrlKind) -> Option<String>;
}

impl<F> UrlPrompt for F
where
    F: FnMut(UrlKind) -> Option<String>,
{
    fn prompt(&mut self, kind: UrlKind) -> Option<String> {
        self(kind)
    }
}

/// Prompt that always cancels
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl UrlPrompt for NoPrompt {
    fn prompt(&mut self, _kind: UrlKind) -> Option<String> {
        None
    }
}

/// Outcome of [`CommandDispatcher::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub command: FormatCommand,
    /// The surface accepted the mutation
    pub applied: bool,
    /// Selection waiting to be re-applied at the next paint
    pub restore: Option<SelectionHandle>,
}

/// Stateless: which formats are on is recomputed by the caller afterwards.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Run the first four steps of a command: save the selection, mutate the
    /// surface, refocus it, and schedule the saved selection for restoration.
    ///
    /// Failures in the mutation are logged; the remaining steps still run.
    pub fn apply<S: EditingSurface>(
        &self,
        adapter: &mut SurfaceAdapter<S>,
        selections: &mut SelectionManager,
        prompt: &mut dyn UrlPrompt,
        command: FormatCommand,
    ) -> Dispatch {
        // 1. save selection
        let saved = selections.save(&*adapter);

        // 2. mutate
        let applied = match Self::resolve(command, prompt) {
            Some(surface_command) => match adapter.exec(&surface_command) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(target: "commands", command = command.name(), error = %e, "command failed");
                    false
                }
            },
            None => {
                tracing::debug!(target: "commands", command = command.name(), "cancelled: no URL");
                false
            }
        };

        // 3. refocus
        adapter.focus();

        // 4. re-apply the selection once the surface has settled
        let restore = saved.filter(|_| command.keeps_selection());
        if let Some(handle) = restore {
            selections.defer(handle);
        }

        tracing::debug!(target: "commands", command = command.name(), applied, "dispatched");
        Dispatch {
            command,
            applied,
            restore,
        }
    }

    fn resolve(command: FormatCommand, prompt: &mut dyn UrlPrompt) -> Option<SurfaceCommand> {
        let resolved = match command {
            FormatCommand::Bold => SurfaceCommand::ToggleMark(InlineMark::Bold),
            FormatCommand::Italic => SurfaceCommand::ToggleMark(InlineMark::Italic),
            FormatCommand::Underline => SurfaceCommand::ToggleMark(InlineMark::Underline),
            FormatCommand::Heading(level) => SurfaceCommand::ToggleBlock(BlockKind::Heading(level)),
            FormatCommand::BulletList => {
                SurfaceCommand::ToggleBlock(BlockKind::ListItem(ListKind::Bullet))
            }
            FormatCommand::NumberedList => {
                SurfaceCommand::ToggleBlock(BlockKind::ListItem(ListKind::Numbered))
            }
            FormatCommand::Quote => SurfaceCommand::ToggleBlock(BlockKind::Quote),
            FormatCommand::Align(align) => SurfaceCommand::SetAlignment(align),
            FormatCommand::Link | FormatCommand::Image => {
                let kind = command.url_kind()?;
                let url = prompt.prompt(kind)?;
                let url = url.trim();
                if url.is_empty() {
                    return None;
                }
                match kind {
                    UrlKind::Link => SurfaceCommand::CreateLink(url.to_string()),
                    UrlKind::Image => SurfaceCommand::InsertImage(url.to_string()),
                }
            }
            FormatCommand::Undo => SurfaceCommand::Undo,
            FormatCommand::Redo => SurfaceCommand::Redo,
        };
        Some(resolved)
    }
}

//! Rich Text Editing Core.
//!
//! [`RichTextEditor`] is a controlled rich-text field. It hosts an
//! [`EditingSurface`] and keeps it consistent with a string value owned by
//! the embedding form:
//!
//! - [`SurfaceAdapter`]: sole reader/writer of the live content
//! - [`SelectionManager`]: keeps the cursor in place across rewrites
//! - [`CommandDispatcher`]: toolbar commands in a fixed step order
//! - [`SyncController`]: debounced outbound emission, echo-safe inbound writes
//!
//! Nothing here fails outward. Surface and selection errors are logged and the
//! interaction carries on.

pub mod adapter;
pub mod commands;
pub mod formats;
pub mod props;
pub mod selection;
pub mod sync;

use std::time::{Duration, Instant};

pub use adapter::SurfaceAdapter;
pub use commands::{CommandDispatcher, Dispatch, FormatCommand, NoPrompt, UrlKind, UrlPrompt};
pub use formats::{ActiveFormatSet, Format};
pub use props::FieldProps;
pub use selection::{SelectionHandle, SelectionHost, SelectionManager};
pub use sync::{ChangeCallback, Debouncer, LengthState, SyncController};

use crate::clock::{Clock, SystemClock};
use crate::config::EditorConfig;
use crate::editable::{DocumentSurface, EditingSurface, TextEdit};
use crate::tracing::FormatDiff;
use crate::view::FieldView;

/// The imperative handle collaborators hold on an editor.
pub trait EditorHandle {
    fn content(&self) -> String;

    fn html(&self) -> String {
        self.content()
    }

    fn focus(&mut self);

    fn clear_content(&mut self);
}

/// A controlled rich-text field.
pub struct RichTextEditor<S: EditingSurface = DocumentSurface> {
    props: FieldProps,
    adapter: SurfaceAdapter<S>,
    selections: SelectionManager,
    dispatcher: CommandDispatcher,
    sync: SyncController,
    formats: ActiveFormatSet,
    prompt: Box<dyn UrlPrompt>,
    clock: Box<dyn Clock>,
    mounted: bool,
}

impl RichTextEditor<DocumentSurface> {
    /// Mount a field over a fresh document surface with default settings
    pub fn new(props: FieldProps, on_change: impl FnMut(&str) + 'static) -> Self {
        Self::with_config(props, &EditorConfig::default(), on_change)
    }

    pub fn with_config(
        mut props: FieldProps,
        config: &EditorConfig,
        on_change: impl FnMut(&str) + 'static,
    ) -> Self {
        if props.max_length.is_none() {
            props.max_length = config.max_length;
        }
        let surface = DocumentSurface::with_history_limit(config.history_limit);
        Self::mount(surface, props, config.debounce(), on_change)
    }
}

impl<S: EditingSurface> RichTextEditor<S> {
    /// Mount a field over `surface`, loading `props.value` or else
    /// `props.initial_value`
    pub fn mount(
        surface: S,
        props: FieldProps,
        debounce: Duration,
        on_change: impl FnMut(&str) + 'static,
    ) -> Self {
        let sync = SyncController::new(debounce, props.max_length, Box::new(on_change));
        let mut editor = Self {
            props,
            adapter: SurfaceAdapter::new(surface),
            selections: SelectionManager::new(),
            dispatcher: CommandDispatcher::new(),
            sync,
            formats: ActiveFormatSet::default(),
            prompt: Box::new(NoPrompt),
            clock: Box::new(SystemClock),
            mounted: true,
        };
        editor.sync.mount(
            &mut editor.adapter,
            &editor.selections,
            editor.props.value.as_deref(),
            editor.props.initial_value.as_deref(),
        );
        editor.refresh_formats();
        editor
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_prompt(mut self, prompt: impl UrlPrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn props(&self) -> &FieldProps {
        &self.props
    }

    pub fn surface(&self) -> &S {
        self.adapter.surface()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_preview(&self) -> bool {
        self.props.show_preview
    }

    pub fn is_focused(&self) -> bool {
        self.adapter.is_focused()
    }

    fn accepts_input(&self, what: &str) -> bool {
        if !self.mounted {
            tracing::debug!(target: "commands", what, "ignored: editor unmounted");
            return false;
        }
        if self.props.show_preview {
            tracing::debug!(target: "commands", what, "ignored: preview mode");
            return false;
        }
        true
    }

    /// User input on the surface
    pub fn input(&mut self, edit: TextEdit) {
        if !self.accepts_input("input") {
            return;
        }
        // The user moved on; a pending restore would undo their caret
        self.selections.abandon();

        let revision = self.adapter.revision();
        if let Err(e) = self.adapter.apply_edit(&edit) {
            tracing::debug!(target: "selection", error = %e, ?edit, "edit rejected");
        }
        if self.adapter.revision() != revision {
            self.sync.on_local_change(&self.adapter, self.clock.now());
        }
        self.refresh_formats();
    }

    /// Run a toolbar command
    pub fn apply(&mut self, command: FormatCommand) -> Dispatch {
        let revision = self.adapter.revision();
        if !self.accepts_input(command.name()) {
            return Dispatch {
                command,
                applied: false,
                restore: None,
            };
        }

        // Steps 1-4
        let dispatch = self.dispatcher.apply(
            &mut self.adapter,
            &mut self.selections,
            self.prompt.as_mut(),
            command,
        );
        // 5. notify sync of the content change
        if self.adapter.revision() != revision {
            self.sync.on_local_change(&self.adapter, self.clock.now());
        }
        // 6. recompute toolbar state
        self.refresh_formats();
        dispatch
    }

    /// Run a toolbar command by name. Unknown names are logged and ignored.
    pub fn apply_named(&mut self, name: &str, arg: Option<&str>) -> bool {
        match FormatCommand::parse(name, arg) {
            Ok(command) => {
                self.apply(command);
                true
            }
            Err(e) => {
                tracing::warn!(target: "commands", error = %e, "command ignored");
                false
            }
        }
    }

    /// The external owner changed the controlled value
    pub fn set_value(&mut self, value: Option<String>) {
        self.props.value = value;
        let written = self.sync.on_external_value(
            &mut self.adapter,
            &self.selections,
            self.props.value.as_deref(),
        );
        if written {
            self.refresh_formats();
        }
    }

    /// Switch read-only preview on or off
    pub fn set_preview(&mut self, show_preview: bool) {
        if self.props.show_preview == show_preview {
            return;
        }
        self.props.show_preview = show_preview;
        if show_preview {
            self.selections.abandon();
            self.adapter.blur();
        }
    }

    pub fn blur(&mut self) {
        self.selections.abandon();
        self.adapter.blur();
    }

    /// Fire the pending change emission if its window has passed
    pub fn poll(&mut self) -> bool {
        self.sync.poll(&self.adapter, self.clock.now())
    }

    /// Next-paint hook: run any deferred selection restoration
    pub fn paint(&mut self) -> bool {
        let restored = self.selections.flush_deferred(&mut self.adapter);
        if restored {
            self.refresh_formats();
        }
        restored
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.sync.next_deadline()
    }

    pub fn has_pending_restore(&self) -> bool {
        self.selections.has_deferred()
    }

    pub fn length(&self) -> LengthState {
        self.sync.length()
    }

    pub fn active_formats(&self) -> ActiveFormatSet {
        self.formats
    }

    pub fn content(&self) -> String {
        self.adapter.read()
    }

    pub fn html(&self) -> String {
        self.content()
    }

    pub fn focus(&mut self) {
        if !self.mounted {
            return;
        }
        self.adapter.focus();
        self.refresh_formats();
    }

    /// Empty the field and report `""` immediately
    pub fn clear_content(&mut self) {
        if !self.mounted {
            return;
        }
        self.selections.abandon();
        self.sync.clear(&mut self.adapter);
        self.refresh_formats();
    }

    pub fn view(&self) -> FieldView {
        FieldView::build(self)
    }

    /// End the session: cancels the pending emission and any deferred restore
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.sync.teardown();
        self.selections.abandon();
        self.mounted = false;
        tracing::debug!(target: "sync", "unmounted");
    }

    /// Replace the toolbar snapshot as a whole
    fn refresh_formats(&mut self) {
        let next = ActiveFormatSet::query(&self.adapter);
        if let Some(diff) = FormatDiff::between(&self.formats, &next) {
            tracing::trace!(target: "formats", "{}", diff.describe());
        }
        self.formats = next;
    }
}

impl<S: EditingSurface> EditorHandle for RichTextEditor<S> {
    fn content(&self) -> String {
        RichTextEditor::content(self)
    }

    fn focus(&mut self) {
        RichTextEditor::focus(self)
    }

    fn clear_content(&mut self) {
        RichTextEditor::clear_content(self)
    }
}

impl<S: EditingSurface> Drop for RichTextEditor<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

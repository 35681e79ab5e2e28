//! Synchronization Controller: reconciles the surface with the externally
//! owned value.
//!
//! Outbound, every local change recomputes the length at once and (re)arms a
//! single debounce timer; only the content current when it fires is emitted.
//! Inbound, a changed external value is written to the surface unless it is
//! the echo of our own emission. The echo is recognised by content: only a
//! value equal to the last emitted string counts, and only once.

use std::time::{Duration, Instant};

use super::adapter::SurfaceAdapter;
use super::selection::SelectionManager;
use crate::editable::EditingSurface;

/// Plain-text length against an optional limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthState {
    pub length: usize,
    pub max_length: Option<usize>,
}

impl LengthState {
    pub fn new(max_length: Option<usize>) -> Self {
        Self {
            length: 0,
            max_length,
        }
    }

    /// Characters beyond the limit, zero when within it or unlimited
    pub fn over_count(&self) -> usize {
        self.max_length
            .map_or(0, |max| self.length.saturating_sub(max))
    }

    pub fn is_over(&self) -> bool {
        self.over_count() > 0
    }
}

/// A single resettable deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arm the timer for `now + window`, replacing any pending deadline
    pub fn schedule(&mut self, now: Instant) -> Instant {
        let deadline = now + self.window;
        self.deadline = Some(deadline);
        deadline
    }

    /// Returns whether a deadline was pending
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarm and return true once the deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// The external change callback
pub type ChangeCallback = Box<dyn FnMut(&str)>;

pub struct SyncController {
    debounce: Debouncer,
    /// Content of the last emission the owner has yet to hand back
    echo: Option<String>,
    last_external: Option<String>,
    length: LengthState,
    on_change: ChangeCallback,
    torn_down: bool,
}

impl SyncController {
    pub fn new(window: Duration, max_length: Option<usize>, on_change: ChangeCallback) -> Self {
        Self {
            debounce: Debouncer::new(window),
            echo: None,
            last_external: None,
            length: LengthState::new(max_length),
            on_change,
            torn_down: false,
        }
    }

    pub fn length(&self) -> LengthState {
        self.length
    }

    pub fn awaiting_echo(&self) -> bool {
        self.echo.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    fn recompute_length<S: EditingSurface>(&mut self, adapter: &SurfaceAdapter<S>) {
        self.length.length = adapter.plain_text_len();
    }

    /// Load the initial content. A controlled value goes through the inbound
    /// path; otherwise the static initial value is written once.
    pub fn mount<S: EditingSurface>(
        &mut self,
        adapter: &mut SurfaceAdapter<S>,
        selections: &SelectionManager,
        value: Option<&str>,
        initial_value: Option<&str>,
    ) {
        match value {
            Some(_) => {
                self.on_external_value(adapter, selections, value);
            }
            None => {
                adapter.write(initial_value.unwrap_or_default());
            }
        }
        self.recompute_length(adapter);
        tracing::debug!(
            target: "sync",
            controlled = value.is_some(),
            length = self.length.length,
            "mounted"
        );
    }

    /// Outbound path: a user edit changed the surface
    pub fn on_local_change<S: EditingSurface>(
        &mut self,
        adapter: &SurfaceAdapter<S>,
        now: Instant,
    ) -> Option<Instant> {
        if self.torn_down {
            return None;
        }
        self.recompute_length(adapter);
        let rescheduled = self.debounce.is_pending();
        let deadline = self.debounce.schedule(now);
        tracing::trace!(
            target: "sync",
            length = self.length.length,
            over = self.length.over_count(),
            rescheduled,
            "emission scheduled"
        );
        Some(deadline)
    }

    /// Fire the pending emission if its window has elapsed
    pub fn poll<S: EditingSurface>(&mut self, adapter: &SurfaceAdapter<S>, now: Instant) -> bool {
        if self.torn_down || !self.debounce.fire_if_due(now) {
            return false;
        }
        let content = adapter.read();
        self.emit(&content);
        true
    }

    /// Inbound path. Returns whether the surface was written.
    pub fn on_external_value<S: EditingSurface>(
        &mut self,
        adapter: &mut SurfaceAdapter<S>,
        selections: &SelectionManager,
        value: Option<&str>,
    ) -> bool {
        if self.torn_down || self.last_external.as_deref() == value {
            return false;
        }
        self.last_external = value.map(str::to_string);

        if self.echo.is_some() && self.echo.as_deref() == value {
            self.echo = None;
            tracing::trace!(target: "sync", "external value is our echo, ignored");
            return false;
        }
        self.echo = None;

        let Some(value) = value else {
            return false;
        };

        // The owner's value supersedes whatever was typed since the last emission
        if self.debounce.cancel() {
            tracing::debug!(target: "sync", "pending emission dropped for external value");
        }

        let had_focus = adapter.is_focused();
        let saved = selections.save(&*adapter);
        if !adapter.write(value) {
            self.recompute_length(adapter);
            return false;
        }
        self.recompute_length(adapter);
        if had_focus {
            if let Some(handle) = saved {
                selections.restore(adapter, handle);
            }
        }
        tracing::debug!(target: "sync", length = self.length.length, "applied external value");
        true
    }

    /// Empty the surface and report it at once, bypassing the debounce
    pub fn clear<S: EditingSurface>(&mut self, adapter: &mut SurfaceAdapter<S>) {
        if self.torn_down {
            return;
        }
        self.debounce.cancel();
        adapter.write("");
        self.recompute_length(adapter);
        let content = adapter.read();
        self.emit(&content);
    }

    /// End of session: no emission may fire after this
    pub fn teardown(&mut self) {
        if self.debounce.cancel() {
            tracing::debug!(target: "sync", "pending emission cancelled by teardown");
        }
        self.torn_down = true;
    }

    fn emit(&mut self, content: &str) {
        tracing::debug!(target: "sync", bytes = content.len(), "emitting change");
        (self.on_change)(content);
        // An emission matching the owner's value produces no change to echo back
        self.echo = if self.last_external.as_deref() == Some(content) {
            None
        } else {
            Some(content.to_string())
        };
    }
}

impl std::fmt::Debug for SyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncController")
            .field("debounce", &self.debounce)
            .field("echo", &self.echo)
            .field("last_external", &self.last_external)
            .field("length", &self.length)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

//! Selection/cursor continuity across content-replacing operations.
//!
//! Restoration is best-effort: a stale handle, a rejected range or lost focus
//! is logged and dropped. The caller never sees a failure.

use crate::editable::Selection;
use crate::error::SurfaceError;

/// Anything whose selection can be captured and re-applied.
pub trait SelectionHost {
    fn has_focus(&self) -> bool;
    fn current_selection(&self) -> Result<Selection, SurfaceError>;
    fn apply_selection(&mut self, selection: Selection) -> Result<(), SurfaceError>;
}

/// Opaque snapshot of a selection, valid for a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionHandle {
    selection: Selection,
}

/// Saves and restores selections, optionally deferring restoration until the
/// next paint.
#[derive(Debug, Default)]
pub struct SelectionManager {
    deferred: Option<SelectionHandle>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current selection. Only meaningful while the host has focus.
    pub fn save<H: SelectionHost + ?Sized>(&self, host: &H) -> Option<SelectionHandle> {
        if !host.has_focus() {
            tracing::trace!(target: "selection", "save skipped: surface not focused");
            return None;
        }
        match host.current_selection() {
            Ok(selection) => {
                tracing::trace!(target: "selection", ?selection, "saved");
                Some(SelectionHandle { selection })
            }
            Err(e) => {
                tracing::debug!(target: "selection", error = %e, "save failed");
                None
            }
        }
    }

    /// Re-apply a saved selection. Returns whether it took.
    pub fn restore<H: SelectionHost + ?Sized>(&self, host: &mut H, handle: SelectionHandle) -> bool {
        if !host.has_focus() {
            tracing::debug!(target: "selection", "restore dropped: surface not focused");
            return false;
        }
        match host.apply_selection(handle.selection) {
            Ok(()) => {
                tracing::trace!(target: "selection", selection = ?handle.selection, "restored");
                true
            }
            Err(e) => {
                tracing::debug!(target: "selection", error = %e, "restore failed");
                false
            }
        }
    }

    /// Hold `handle` for restoration at the next paint. Replaces any earlier one.
    pub fn defer(&mut self, handle: SelectionHandle) {
        if self.deferred.replace(handle).is_some() {
            tracing::trace!(target: "selection", "replaced pending restore");
        }
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Run the deferred restoration, if any
    pub fn flush_deferred<H: SelectionHost + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.deferred.take() {
            Some(handle) => self.restore(host, handle),
            None => false,
        }
    }

    pub fn abandon(&mut self) {
        if self.deferred.take().is_some() {
            tracing::trace!(target: "selection", "pending restore abandoned");
        }
    }
}

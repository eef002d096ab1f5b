#![forbid(unsafe_code)]

//! The edit-session store: the single owner of dashboard editing state.
//!
//! [`EditSession`] holds the current [`SessionSnapshot`], the session flags,
//! and the undo/redo [`SnapshotHistory`]. Every mutation path funnels
//! through its methods — there are no ambient globals and no other copies
//! of the state (the grid view renders from this store's snapshot).
//!
//! # Invariants
//!
//! 1. Every structural operation (add / delete / duplicate / title edit)
//!    that changes state pushes the *pre-mutation* snapshot and clears the
//!    redo stack, via one internal helper that cannot be bypassed. An
//!    operation that changes nothing never touches history.
//! 2. Operations on an unknown widget id are safe no-ops and do not touch
//!    history (a double-click racing a delete must not pollute undo).
//! 3. Title validation happens before any history push; a rejected edit
//!    leaves state and history untouched.
//! 4. After any structural operation, every widget has exactly one layout
//!    entry per breakpoint (`debug_assert`ed, property-tested).
//!
//! # Failure Modes
//!
//! Only [`SessionError`] from title validation. Stale-id operations return
//! `false`/`None` instead of failing; persistence failures never reach this
//! type (the host owns the save surface, see the `persist` module).

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace, warn};

use gridboard_layout::{Layout, geometry};
use gridboard_model::{
    StandardCatalog, Widget, WidgetCatalog, WidgetId, WidgetIdGen, WidgetKind,
};

use crate::history::{HistoryConfig, SnapshotHistory};
use crate::snapshot::SessionSnapshot;

/// Maximum widget title length, in characters, after trimming.
pub const MAX_TITLE_LEN: usize = 120;

/// Validation failures for user-supplied content.
///
/// Unknown-id references are deliberately *not* errors (they are safe
/// no-ops); only invalid input is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Title was empty (or whitespace-only) after trimming.
    #[error("widget title is empty after trimming")]
    EmptyTitle,
    /// Title exceeded [`MAX_TITLE_LEN`] characters.
    #[error("widget title is {len} characters, maximum is {max}")]
    TitleTooLong { len: usize, max: usize },
}

/// The dashboard edit-session store.
///
/// Exactly one instance exists per open editing surface; all mutations are
/// synchronous method calls on the UI thread.
pub struct EditSession {
    snapshot: SessionSnapshot,
    history: SnapshotHistory,
    catalog: Box<dyn WidgetCatalog>,
    ids: WidgetIdGen,
    edit_mode: bool,
    has_changes: bool,
    initialized: bool,
    modified: bool,
    drag_open: bool,
    drag_pushed: bool,
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("widgets", &self.snapshot.widgets.len())
            .field("edit_mode", &self.edit_mode)
            .field("has_changes", &self.has_changes)
            .field("initialized", &self.initialized)
            .field("modified", &self.modified)
            .field("history", &self.history)
            .finish()
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Create an empty session with the standard catalog and default
    /// history limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    /// Create an empty session with a custom history configuration.
    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            snapshot: SessionSnapshot::empty(),
            history: SnapshotHistory::new(config),
            catalog: Box::new(StandardCatalog),
            ids: WidgetIdGen::new(),
            edit_mode: false,
            has_changes: false,
            initialized: false,
            modified: false,
            drag_open: false,
            drag_pushed: false,
        }
    }

    /// Swap in a different widget catalog (localization, feature flags).
    #[must_use]
    pub fn with_catalog(mut self, catalog: Box<dyn WidgetCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    // ====================================================================
    // Structural operations
    // ====================================================================

    /// Add a widget of the given kind with catalog defaults, placed on the
    /// first free row of every breakpoint. Returns the new widget's id.
    pub fn add_widget(&mut self, kind: WidgetKind) -> WidgetId {
        let id = self.ids.next_id();
        let defaults = self.catalog.defaults(kind);

        self.push_history();
        let geo = geometry::place_below(
            &self.snapshot.layout,
            &geometry::default_geometry_for(&id, kind),
        );
        self.snapshot
            .widgets
            .push(Widget::from_defaults(id.clone(), kind, defaults));
        self.snapshot.layout = geometry::merge(&self.snapshot.layout, &geo);
        self.mark_dirty();

        debug!(widget = %id, %kind, "widget added");
        debug_assert!(self.snapshot.is_consistent());
        id
    }

    /// Delete a widget and its geometry at every breakpoint.
    ///
    /// Unknown ids are a strict no-op and push nothing onto history.
    /// Returns whether a widget was removed.
    pub fn delete_widget(&mut self, id: &WidgetId) -> bool {
        let Some(index) = self.snapshot.widget_index(id) else {
            warn!(widget = %id, "delete ignored: widget not found");
            return false;
        };

        self.push_history();
        self.snapshot.widgets.remove(index);
        self.snapshot.layout = geometry::remove_widget(&self.snapshot.layout, id);
        self.mark_dirty();

        debug!(widget = %id, "widget deleted");
        debug_assert!(self.snapshot.is_consistent());
        true
    }

    /// Clone a widget under a new id with a `" (copy)"` title suffix,
    /// placed on the first free row.
    ///
    /// Unknown ids are a strict no-op (no history push). Returns the new
    /// widget's id when a clone was made.
    pub fn duplicate_widget(&mut self, id: &WidgetId) -> Option<WidgetId> {
        let Some(source) = self.snapshot.widget(id).cloned() else {
            warn!(widget = %id, "duplicate ignored: widget not found");
            return None;
        };

        let new_id = self.ids.next_id();
        let title = copy_title(source.title());

        self.push_history();
        let geo = geometry::place_below(
            &self.snapshot.layout,
            &geometry::default_geometry_for(&new_id, source.kind()),
        );
        self.snapshot
            .widgets
            .push(source.cloned_as(new_id.clone(), title));
        self.snapshot.layout = geometry::merge(&self.snapshot.layout, &geo);
        self.mark_dirty();

        debug!(source = %id, widget = %new_id, "widget duplicated");
        debug_assert!(self.snapshot.is_consistent());
        Some(new_id)
    }

    /// Rename a widget. The title is trimmed, rejected when empty, and
    /// capped at [`MAX_TITLE_LEN`] characters — all *before* any history
    /// push, so a rejected edit changes nothing.
    ///
    /// Returns `Ok(false)` (no-op, no history) when the id is unknown.
    /// Renaming a widget to its current title is accepted but pushes no
    /// history, since undoing it would restore an identical state.
    pub fn edit_widget_title(
        &mut self,
        id: &WidgetId,
        title: &str,
    ) -> Result<bool, SessionError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyTitle);
        }
        let len = trimmed.chars().count();
        if len > MAX_TITLE_LEN {
            return Err(SessionError::TitleTooLong {
                len,
                max: MAX_TITLE_LEN,
            });
        }

        let Some(index) = self.snapshot.widget_index(id) else {
            warn!(widget = %id, "title edit ignored: widget not found");
            return Ok(false);
        };
        if self.snapshot.widgets[index].title() == trimmed {
            trace!(widget = %id, "title unchanged");
            return Ok(true);
        }

        self.push_history();
        self.snapshot.widgets[index].set_title(trimmed);
        self.mark_dirty();

        debug!(widget = %id, "widget title edited");
        Ok(true)
    }

    // ====================================================================
    // Undo / redo
    // ====================================================================

    /// Restore the most recent pre-mutation snapshot, parking the current
    /// one for redo. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Arc<SessionSnapshot>> {
        let restored = self.history.undo(self.snapshot.clone())?;
        self.snapshot = (*restored).clone();
        self.has_changes = true;
        debug!(
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "undo"
        );
        Some(restored)
    }

    /// Restore the most recently undone snapshot. `None` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<Arc<SessionSnapshot>> {
        let restored = self.history.redo(self.snapshot.clone())?;
        self.snapshot = (*restored).clone();
        self.has_changes = true;
        debug!(
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "redo"
        );
        Some(restored)
    }

    // ====================================================================
    // Low-level setters and mode
    // ====================================================================

    /// Toggle edit mode. Not an undoable content edit: no history push.
    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
    }

    /// Replace the whole widget collection. Low-level primitive: marks the
    /// session dirty but pushes no history — structural operations wrap it
    /// with their own push.
    pub fn replace_widgets(&mut self, widgets: Vec<Widget>) {
        self.snapshot.widgets = widgets;
        self.mark_dirty();
    }

    /// Replace the whole per-breakpoint layout. Low-level primitive used by
    /// the grid bridge: marks dirty, pushes no history on its own
    /// (continuous drag deltas would flood undo). Inside an open drag
    /// gesture, the first replacement records the pre-drag snapshot so the
    /// whole gesture is one undo step.
    pub fn replace_layout(&mut self, layout: Layout) {
        if self.drag_open && !self.drag_pushed {
            self.push_history();
            self.drag_pushed = true;
        }
        self.snapshot.layout = layout;
        self.mark_dirty();
        trace!("layout replaced");
    }

    // ====================================================================
    // Drag gestures
    // ====================================================================

    /// Open a drag gesture. The first [`replace_layout`](Self::replace_layout)
    /// inside the gesture pushes one history entry, so the whole drag
    /// coalesces into a single undo step — and a gesture that moves nothing
    /// leaves history untouched. Re-opening an open gesture is a no-op.
    pub fn begin_drag(&mut self) {
        if self.drag_open {
            return;
        }
        self.drag_open = true;
        self.drag_pushed = false;
        trace!("drag gesture opened");
    }

    /// Close the current drag gesture, if any.
    pub fn end_drag(&mut self) {
        self.drag_open = false;
        self.drag_pushed = false;
        trace!("drag gesture closed");
    }

    /// Whether a drag gesture is currently open.
    #[must_use]
    pub fn drag_active(&self) -> bool {
        self.drag_open
    }

    // ====================================================================
    // Lifecycle
    // ====================================================================

    /// Clear everything back to the pristine empty state: snapshot, both
    /// history stacks, and all flags.
    pub fn reset(&mut self) {
        self.snapshot = SessionSnapshot::empty();
        self.history.clear();
        self.ids = WidgetIdGen::new();
        self.edit_mode = false;
        self.has_changes = false;
        self.initialized = false;
        self.modified = false;
        self.drag_open = false;
        self.drag_pushed = false;
        debug!("session reset");
    }

    /// Record a caller-confirmed successful save: clears the dirty flag
    /// only. The core never clears it on a save *attempt*.
    pub fn mark_saved(&mut self) {
        self.has_changes = false;
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    /// The current snapshot (widgets plus layout).
    #[must_use]
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// The current widget collection, in insertion order.
    #[must_use]
    pub fn widgets(&self) -> &[Widget] {
        &self.snapshot.widgets
    }

    /// The current per-breakpoint layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.snapshot.layout
    }

    /// Whether the session is in edit mode.
    #[must_use]
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Whether there are unsaved changes.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    /// Whether demo data has been seeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the session has ever been mutated by a user action.
    /// Once set, only [`reset`](Self::reset) clears it.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo stack depth.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Redo stack depth.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // ====================================================================
    // Internal
    // ====================================================================

    /// The one funnel for history pushes: records the pre-mutation snapshot
    /// and clears redo.
    fn push_history(&mut self) {
        self.history.push(self.snapshot.clone());
    }

    fn mark_dirty(&mut self) {
        self.has_changes = true;
        self.modified = true;
    }

    /// Seed the snapshot without marking the session dirty or modified.
    /// Only the seed initializer calls this.
    pub(crate) fn install_seed(&mut self, snapshot: SessionSnapshot) {
        self.snapshot = snapshot;
        self.initialized = true;
        self.has_changes = false;
        debug_assert!(self.snapshot.is_consistent());
    }
}

/// `" (copy)"`-suffixed title for a duplicate, truncated so the result
/// stays within [`MAX_TITLE_LEN`].
fn copy_title(base: &str) -> String {
    const SUFFIX: &str = " (copy)";
    let budget = MAX_TITLE_LEN - SUFFIX.chars().count();
    let mut title: String = base.chars().take(budget).collect();
    title.push_str(SUFFIX);
    title
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

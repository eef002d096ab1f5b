#![forbid(unsafe_code)]

//! Bridge between the edit session and an external grid engine.
//!
//! The grid engine owns drag interaction and collision-free repositioning;
//! this module only translates between it and the store. [`GridSurface`]
//! resolves the render list for one breakpoint ([`PlacedWidget`] pairs) and
//! forwards drag-release layouts back as direct setters — never as
//! history-pushing structural edits (see the store's drag gesture API for
//! coalescing a whole gesture into one undo entry).
//!
//! # Invariants
//!
//! 1. The surface holds no copy of the state: every call reads through to
//!    the store's current snapshot.
//! 2. `layout_changed` receives the *complete* layout for all breakpoints,
//!    as grid engines report it, and installs it verbatim.

use gridboard_layout::{Breakpoint, Layout, LayoutEntry};
use gridboard_model::Widget;

use crate::store::EditSession;

/// One widget paired with its geometry on a specific breakpoint, in layout
/// order — the unit the rendering layer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWidget<'a> {
    /// The widget to render.
    pub widget: &'a Widget,
    /// Its placement on the requested breakpoint.
    pub entry: &'a LayoutEntry,
}

/// Exclusive view over an [`EditSession`] for a grid rendering pass.
#[derive(Debug)]
pub struct GridSurface<'a> {
    session: &'a mut EditSession,
}

impl<'a> GridSurface<'a> {
    /// Wrap a session for one render/interaction pass.
    #[must_use]
    pub fn new(session: &'a mut EditSession) -> Self {
        Self { session }
    }

    /// Whether widgets should render their edit affordances.
    #[must_use]
    pub fn edit_mode(&self) -> bool {
        self.session.edit_mode()
    }

    /// The render list for one breakpoint: each layout entry paired with
    /// its widget, in the layout's order.
    ///
    /// Entries whose widget is missing are skipped (transiently possible
    /// between a delete and the engine's next layout report).
    #[must_use]
    pub fn entries(&self, bp: Breakpoint) -> Vec<PlacedWidget<'_>> {
        let snapshot = self.session.snapshot();
        snapshot
            .layout
            .entries(bp)
            .iter()
            .filter_map(|entry| {
                snapshot
                    .widget(&entry.widget)
                    .map(|widget| PlacedWidget { widget, entry })
            })
            .collect()
    }

    /// Drag-release callback from the grid engine: install the complete
    /// per-breakpoint layout the engine computed.
    ///
    /// `bp` names the tier the user interacted with; the engine still
    /// reports geometry for all tiers, and all of it is installed.
    pub fn layout_changed(&mut self, bp: Breakpoint, layout: Layout) {
        tracing::trace!(%bp, "grid engine reported layout");
        self.session.replace_layout(layout);
    }

    /// Open a drag gesture on the underlying session (at most one undo
    /// entry for the whole gesture, recorded when the layout first moves).
    pub fn drag_started(&mut self) {
        self.session.begin_drag();
    }

    /// Close the current drag gesture.
    pub fn drag_ended(&mut self) {
        self.session.end_drag();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gridboard_layout::geometry;
    use gridboard_model::WidgetKind;

    #[test]
    fn entries_pair_widgets_with_geometry() {
        let mut session = EditSession::new();
        let a = session.add_widget(WidgetKind::Kpi);
        let b = session.add_widget(WidgetKind::Line);

        let surface = GridSurface::new(&mut session);
        let placed = surface.entries(Breakpoint::Lg);

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].widget.id(), &a);
        assert_eq!(placed[1].widget.id(), &b);
        assert_eq!(placed[1].entry.y, 2); // Below the KPI (h=2).
    }

    #[test]
    fn entries_skip_orphaned_geometry() {
        let mut session = EditSession::new();
        let id = session.add_widget(WidgetKind::Kpi);
        // Simulate a stale layout report still naming a deleted widget.
        let stale = session.snapshot().layout.clone();
        session.delete_widget(&id);
        session.replace_layout(stale);

        let surface = GridSurface::new(&mut session);
        assert!(surface.entries(Breakpoint::Lg).is_empty());
    }

    #[test]
    fn layout_changed_is_a_direct_setter() {
        let mut session = EditSession::new();
        let id = session.add_widget(WidgetKind::Kpi);
        let depth = session.undo_depth();

        let moved = geometry::reposition_widget(
            session.layout(),
            &id,
            gridboard_layout::LayoutPatch::move_to(5, 3),
        );
        let mut surface = GridSurface::new(&mut session);
        surface.layout_changed(Breakpoint::Lg, moved);

        assert_eq!(session.undo_depth(), depth);
        assert_eq!(
            session.layout().entry_for(Breakpoint::Lg, &id).unwrap().x,
            5
        );
        assert!(session.has_changes());
    }

    #[test]
    fn drag_gesture_through_surface_is_one_undo_entry() {
        let mut session = EditSession::new();
        let id = session.add_widget(WidgetKind::Kpi);
        let before = session.snapshot().clone();
        let depth = session.undo_depth();

        let mut surface = GridSurface::new(&mut session);
        surface.drag_started();
        for x in 1..=3u32 {
            let layout = geometry::reposition_widget(
                surface.session.layout(),
                &id,
                gridboard_layout::LayoutPatch::move_to(x, 0),
            );
            surface.layout_changed(Breakpoint::Lg, layout);
        }
        surface.drag_ended();

        assert_eq!(session.undo_depth(), depth + 1);
        assert_eq!(*session.undo().unwrap(), before);
    }

    #[test]
    fn edit_mode_reads_through() {
        let mut session = EditSession::new();
        session.set_edit_mode(true);
        assert!(GridSurface::new(&mut session).edit_mode());
    }
}

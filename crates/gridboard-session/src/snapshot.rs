#![forbid(unsafe_code)]

//! The session snapshot: widgets plus layout as one indivisible value.
//!
//! A [`SessionSnapshot`] is the unit pushed onto the history stacks and the
//! unit handed to the persistence collaborator. Snapshots in history are
//! stored behind `Arc`, so a pushed snapshot can never be corrupted by a
//! later mutation of live state — the store always clones before mutating.
//!
//! # Invariants
//!
//! 1. `PartialEq` compares widgets and layout field by field, so history
//!    symmetry is testable bit-for-bit.
//! 2. The serde shape of this type is the persistence contract (see the
//!    `persist` module).

use serde::{Deserialize, Serialize};

use gridboard_layout::{Layout, geometry};
use gridboard_model::{Widget, WidgetId};

/// The `{widgets, layout}` pair treated as one unit for history and
/// persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The widget collection, in insertion order.
    pub widgets: Vec<Widget>,
    /// Per-breakpoint geometry for every widget.
    pub layout: Layout,
}

impl SessionSnapshot {
    /// An empty snapshot: no widgets, no geometry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a widget by id.
    #[must_use]
    pub fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    /// Position of a widget in the collection, if present.
    #[must_use]
    pub fn widget_index(&self, id: &WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == id)
    }

    /// Whether every widget has exactly one layout entry per breakpoint and
    /// no entry is orphaned. Test/debug helper.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        geometry::is_consistent(&self.layout, self.widgets.iter().map(|w| w.id()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

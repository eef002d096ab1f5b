#![forbid(unsafe_code)]

//! Pure geometry operations over [`Layout`] values.
//!
//! Every function here takes layouts by reference and returns a fresh value:
//! no mutation, no side effects. That keeps session-history snapshots
//! trivially comparable and lets the geometry logic be tested without any
//! store or UI machinery.
//!
//! # Invariants
//!
//! 1. [`merge`] is associative and never drops entries.
//! 2. [`remove_widget`] returns a value equal to its input when the widget
//!    is absent.
//! 3. [`default_geometry_for`] always emits exactly one entry per
//!    breakpoint, at origin, with width clamped to the tier's column count.
//!
//! # Failure Modes
//!
//! None — all inputs are total. Overlap is not an error here; collision
//! handling belongs to the caller's placement heuristics ([`place_below`])
//! or to the external grid engine.

use rustc_hash::FxHashMap;

use gridboard_model::{WidgetId, WidgetKind};

use crate::{Breakpoint, Layout, LayoutEntry};

/// Default `(w, h)` footprint for a widget kind on a full 12-column tier.
///
/// Charts take half a row, KPIs a quarter, text a third.
fn default_size(kind: WidgetKind) -> (u32, u32) {
    match kind {
        WidgetKind::Line | WidgetKind::Bar => (6, 4),
        WidgetKind::Pie => (4, 4),
        WidgetKind::Kpi => (3, 2),
        WidgetKind::Text => (4, 3),
    }
}

/// A partial geometry update: only `Some` fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutPatch {
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub w: Option<u32>,
    pub h: Option<u32>,
}

impl LayoutPatch {
    /// A patch that only moves (keeps size).
    #[must_use]
    pub fn move_to(x: u32, y: u32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch that only resizes (keeps position).
    #[must_use]
    pub fn resize(w: u32, h: u32) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    fn apply(self, entry: &LayoutEntry) -> LayoutEntry {
        LayoutEntry {
            widget: entry.widget.clone(),
            x: self.x.unwrap_or(entry.x),
            y: self.y.unwrap_or(entry.y),
            w: self.w.unwrap_or(entry.w),
            h: self.h.unwrap_or(entry.h),
        }
    }
}

/// Full per-breakpoint placement for a new widget, at origin.
///
/// The footprint comes from a fixed per-kind size table and is clamped to
/// each tier's column count. Callers reposition via [`place_below`] or
/// [`merge`] plus a patch.
#[must_use]
pub fn default_geometry_for(widget: &WidgetId, kind: WidgetKind) -> Layout {
    let (w, h) = default_size(kind);
    let mut layout = Layout::new();
    for bp in Breakpoint::ALL {
        let cols = bp.columns();
        layout.set_entries(
            bp,
            vec![LayoutEntry::new(widget.clone(), 0, 0, w.min(cols), h)],
        );
    }
    layout
}

/// Breakpoint-wise concatenation of two layouts.
///
/// No collision resolution: entries from `addition` are appended after
/// `existing`'s, tier by tier. Associative; inputs are untouched.
#[must_use]
pub fn merge(existing: &Layout, addition: &Layout) -> Layout {
    let mut out = Layout::new();
    for bp in Breakpoint::ALL {
        let mut entries = existing.entries(bp).to_vec();
        entries.extend(addition.entries(bp).iter().cloned());
        out.set_entries(bp, entries);
    }
    out
}

/// Breakpoint-wise filter removing all entries for one widget.
///
/// Equal to the input when the widget is absent.
#[must_use]
pub fn remove_widget(layout: &Layout, widget: &WidgetId) -> Layout {
    let mut out = Layout::new();
    for bp in Breakpoint::ALL {
        out.set_entries(
            bp,
            layout
                .entries(bp)
                .iter()
                .filter(|e| &e.widget != widget)
                .cloned()
                .collect(),
        );
    }
    out
}

/// Breakpoint-wise map replacing only the matching entries' patched fields.
///
/// Non-matching entries and absent widgets pass through unchanged.
#[must_use]
pub fn reposition_widget(layout: &Layout, widget: &WidgetId, patch: LayoutPatch) -> Layout {
    let mut out = Layout::new();
    for bp in Breakpoint::ALL {
        out.set_entries(
            bp,
            layout
                .entries(bp)
                .iter()
                .map(|e| {
                    if &e.widget == widget {
                        patch.apply(e)
                    } else {
                        e.clone()
                    }
                })
                .collect(),
        );
    }
    out
}

/// Shift a geometry's rows so it starts on the first free row of `existing`,
/// per breakpoint.
///
/// The free row is `max(y + h)` over existing entries (0 for an empty tier).
/// This is the "origin of the next free row" placement policy: simple and
/// overlap-free for freshly added or duplicated widgets.
#[must_use]
pub fn place_below(existing: &Layout, geometry: &Layout) -> Layout {
    let mut out = Layout::new();
    for bp in Breakpoint::ALL {
        let free_row = existing
            .entries(bp)
            .iter()
            .map(|e| e.y + e.h)
            .max()
            .unwrap_or(0);
        out.set_entries(
            bp,
            geometry
                .entries(bp)
                .iter()
                .map(|e| LayoutEntry {
                    widget: e.widget.clone(),
                    x: e.x,
                    y: e.y + free_row,
                    w: e.w,
                    h: e.h,
                })
                .collect(),
        );
    }
    out
}

/// Whether a layout and a widget-id set are mutually consistent:
/// exactly one entry per widget per breakpoint, and no orphan entries.
///
/// Test/debug helper — the session store maintains this invariant through
/// its structural operations rather than checking it at runtime.
#[must_use]
pub fn is_consistent<'a>(
    layout: &Layout,
    widgets: impl IntoIterator<Item = &'a WidgetId>,
) -> bool {
    let ids: Vec<&WidgetId> = widgets.into_iter().collect();
    for bp in Breakpoint::ALL {
        let mut seen: FxHashMap<&WidgetId, usize> = FxHashMap::default();
        for entry in layout.entries(bp) {
            *seen.entry(&entry.widget).or_default() += 1;
        }
        if ids.iter().any(|id| seen.get(id) != Some(&1)) {
            return false;
        }
        // Orphan entries: geometry without a backing widget.
        if seen.keys().any(|id| !ids.contains(id)) {
            return false;
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

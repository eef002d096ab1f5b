#![forbid(unsafe_code)]

//! Breakpoints and per-breakpoint grid layouts.
//!
//! A dashboard grid is responsive: each [`Breakpoint`] tier has its own
//! column count and its own ordered sequence of [`LayoutEntry`] placements.
//! [`Layout`] is the full mapping from breakpoint to entry sequence — the
//! geometry half of a session snapshot.
//!
//! # Invariants
//!
//! 1. The breakpoint set is fixed and ordered largest-first:
//!    `lg > md > sm > xs > xxs`.
//! 2. A consistent layout has exactly one entry per widget per breakpoint
//!    (checked by [`geometry::is_consistent`], not enforced at runtime —
//!    the session store owns that discipline).
//! 3. `Layout` values compare with `PartialEq`, so history snapshots are
//!    trivially comparable.

use std::fmt;

use serde::{Deserialize, Serialize};

use gridboard_model::WidgetId;

pub mod geometry;

pub use geometry::{
    LayoutPatch, default_geometry_for, is_consistent, merge, place_below, remove_widget,
    reposition_widget,
};

/// A responsive viewport tier.
///
/// Ordered largest-first; each tier has a fixed column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Large desktop: 12 columns.
    Lg,
    /// Desktop: 10 columns.
    Md,
    /// Tablet: 6 columns.
    Sm,
    /// Phone landscape: 4 columns.
    Xs,
    /// Phone portrait: 2 columns.
    Xxs,
}

impl Breakpoint {
    /// All breakpoints, largest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// Grid column count for this tier.
    #[must_use]
    pub fn columns(self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md => 10,
            Breakpoint::Sm => 6,
            Breakpoint::Xs => 4,
            Breakpoint::Xxs => 2,
        }
    }

    /// Lowercase wire name, matching the serde representation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
            Breakpoint::Xxs => "xxs",
        }
    }

    /// Ordinal index into [`Layout`]'s slots (0 = Lg .. 4 = Xxs).
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One widget's placement on one breakpoint's grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    /// The widget this geometry belongs to.
    pub widget: WidgetId,
    /// Column offset.
    pub x: u32,
    /// Row offset.
    pub y: u32,
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl LayoutEntry {
    /// Create an entry at the given position and size.
    #[must_use]
    pub fn new(widget: WidgetId, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { widget, x, y, w, h }
    }
}

/// Per-breakpoint layout: an ordered entry sequence for each tier.
///
/// Stored as a fixed 5-slot array indexed by `Breakpoint` ordinal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Entry sequences indexed by `Breakpoint` ordinal (0=Lg .. 4=Xxs).
    entries: [Vec<LayoutEntry>; 5],
}

impl Layout {
    /// An empty layout (no entries at any breakpoint).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry sequence for one breakpoint.
    #[must_use]
    pub fn entries(&self, bp: Breakpoint) -> &[LayoutEntry] {
        &self.entries[bp.index()]
    }

    /// Replace the entry sequence for one breakpoint.
    pub fn set_entries(&mut self, bp: Breakpoint, entries: Vec<LayoutEntry>) {
        self.entries[bp.index()] = entries;
    }

    /// Append one entry at one breakpoint (builder pattern).
    #[must_use]
    pub fn with_entry(mut self, bp: Breakpoint, entry: LayoutEntry) -> Self {
        self.entries[bp.index()].push(entry);
        self
    }

    /// The entry for a given widget at a given breakpoint, if any.
    #[must_use]
    pub fn entry_for(&self, bp: Breakpoint, widget: &WidgetId) -> Option<&LayoutEntry> {
        self.entries(bp).iter().find(|e| &e.widget == widget)
    }

    /// Whether any breakpoint carries an entry for the widget.
    #[must_use]
    pub fn contains(&self, widget: &WidgetId) -> bool {
        Breakpoint::ALL
            .iter()
            .any(|bp| self.entry_for(*bp, widget).is_some())
    }

    /// Whether every breakpoint's sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Vec::is_empty)
    }

    /// Iterate `(breakpoint, entries)` pairs, largest tier first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &[LayoutEntry])> {
        Breakpoint::ALL.iter().map(|&bp| (bp, self.entries(bp)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> WidgetId {
        WidgetId::from(s)
    }

    #[test]
    fn breakpoints_ordered_largest_first() {
        let cols: Vec<u32> = Breakpoint::ALL.iter().map(|bp| bp.columns()).collect();
        let mut sorted = cols.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(cols, sorted);
    }

    #[test]
    fn breakpoint_names_match_serde() {
        for bp in Breakpoint::ALL {
            let json = serde_json::to_string(&bp).unwrap();
            assert_eq!(json, format!("\"{}\"", bp.name()));
        }
    }

    #[test]
    fn empty_layout() {
        let layout = Layout::new();
        assert!(layout.is_empty());
        for bp in Breakpoint::ALL {
            assert!(layout.entries(bp).is_empty());
        }
    }

    #[test]
    fn entry_lookup() {
        let layout = Layout::new()
            .with_entry(Breakpoint::Lg, LayoutEntry::new(id("w1"), 0, 0, 6, 4))
            .with_entry(Breakpoint::Lg, LayoutEntry::new(id("w2"), 6, 0, 6, 4));

        let e = layout.entry_for(Breakpoint::Lg, &id("w2")).unwrap();
        assert_eq!(e.x, 6);
        assert!(layout.entry_for(Breakpoint::Md, &id("w2")).is_none());
        assert!(layout.contains(&id("w1")));
        assert!(!layout.contains(&id("w3")));
    }

    #[test]
    fn set_entries_replaces_one_tier_only() {
        let mut layout = Layout::new()
            .with_entry(Breakpoint::Lg, LayoutEntry::new(id("w1"), 0, 0, 6, 4))
            .with_entry(Breakpoint::Md, LayoutEntry::new(id("w1"), 0, 0, 5, 4));

        layout.set_entries(Breakpoint::Lg, vec![LayoutEntry::new(id("w1"), 3, 2, 6, 4)]);

        assert_eq!(layout.entry_for(Breakpoint::Lg, &id("w1")).unwrap().x, 3);
        assert_eq!(layout.entry_for(Breakpoint::Md, &id("w1")).unwrap().x, 0);
    }

    #[test]
    fn layout_roundtrip() {
        let layout = Layout::new()
            .with_entry(Breakpoint::Lg, LayoutEntry::new(id("w1"), 0, 0, 6, 4))
            .with_entry(Breakpoint::Xxs, LayoutEntry::new(id("w1"), 0, 0, 2, 4));

        let json = serde_json::to_string(&layout).unwrap();
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
    }

    #[test]
    fn iter_visits_all_tiers() {
        let layout = Layout::new();
        assert_eq!(layout.iter().count(), 5);
        let first = layout.iter().next().unwrap().0;
        assert_eq!(first, Breakpoint::Lg);
    }
}

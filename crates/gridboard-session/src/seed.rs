#![forbid(unsafe_code)]

//! Demo-data seeding with a remount-safe guard.
//!
//! A freshly opened dashboard shows a small starter arrangement so the
//! editing surface is never blank. Seeding must happen at most once per
//! session and must never clobber user edits: a late-arriving second
//! initialization call (a remount, a delayed effect) has to be a guaranteed
//! no-op.
//!
//! The guard is two flags, three reachable states:
//!
//! ```text
//! Fresh      (initialized=false, modified=false)  → seeding allowed
//! Seeded     (initialized=true,  modified=false)  → no-op
//! UserOwned  (*,                 modified=true)   → no-op
//! ```
//!
//! Any structural mutation sets `modified` permanently (until
//! [`EditSession::reset`]), closing the door on re-seeding.
//!
//! # Invariants
//!
//! 1. `initialize_demo_data` is idempotent: the second of two back-to-back
//!    calls changes nothing.
//! 2. Seeding leaves `has_changes == false` — starter content is not an
//!    unsaved edit.
//! 3. The seed snapshot itself is layout/widget consistent.

use tracing::{debug, warn};

use gridboard_layout::{Breakpoint, Layout, LayoutEntry};
use gridboard_model::{Widget, WidgetId, WidgetKind};

use crate::snapshot::SessionSnapshot;
use crate::store::EditSession;

/// A fixed starter arrangement: widgets plus their full layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    snapshot: SessionSnapshot,
}

impl SeedData {
    /// Build seed data from an explicit snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self { snapshot }
    }

    /// The built-in starter dashboard: two KPIs on top, a line chart and a
    /// bar chart below, hand-placed per breakpoint (side by side on wide
    /// tiers, stacked on narrow ones).
    #[must_use]
    pub fn standard() -> Self {
        let revenue = WidgetId::from("seed-kpi-revenue");
        let users = WidgetId::from("seed-kpi-users");
        let traffic = WidgetId::from("seed-line-traffic");
        let sales = WidgetId::from("seed-bar-sales");

        let widgets = vec![
            Widget::new(revenue.clone(), WidgetKind::Kpi, "Revenue")
                .with_data_source("demo/revenue"),
            Widget::new(users.clone(), WidgetKind::Kpi, "Active users")
                .with_data_source("demo/users"),
            Widget::new(traffic.clone(), WidgetKind::Line, "Traffic")
                .with_data_source("demo/traffic"),
            Widget::new(sales.clone(), WidgetKind::Bar, "Sales by region")
                .with_data_source("demo/sales"),
        ];

        let mut layout = Layout::new();
        let tiers: [(Breakpoint, [LayoutEntry; 4]); 5] = [
            (
                Breakpoint::Lg,
                [
                    LayoutEntry::new(revenue.clone(), 0, 0, 3, 2),
                    LayoutEntry::new(users.clone(), 3, 0, 3, 2),
                    LayoutEntry::new(traffic.clone(), 0, 2, 6, 4),
                    LayoutEntry::new(sales.clone(), 6, 2, 6, 4),
                ],
            ),
            (
                Breakpoint::Md,
                [
                    LayoutEntry::new(revenue.clone(), 0, 0, 3, 2),
                    LayoutEntry::new(users.clone(), 3, 0, 3, 2),
                    LayoutEntry::new(traffic.clone(), 0, 2, 5, 4),
                    LayoutEntry::new(sales.clone(), 5, 2, 5, 4),
                ],
            ),
            (
                Breakpoint::Sm,
                [
                    LayoutEntry::new(revenue.clone(), 0, 0, 3, 2),
                    LayoutEntry::new(users.clone(), 3, 0, 3, 2),
                    LayoutEntry::new(traffic.clone(), 0, 2, 6, 4),
                    LayoutEntry::new(sales.clone(), 0, 6, 6, 4),
                ],
            ),
            (
                Breakpoint::Xs,
                [
                    LayoutEntry::new(revenue.clone(), 0, 0, 2, 2),
                    LayoutEntry::new(users.clone(), 2, 0, 2, 2),
                    LayoutEntry::new(traffic.clone(), 0, 2, 4, 4),
                    LayoutEntry::new(sales.clone(), 0, 6, 4, 4),
                ],
            ),
            (
                Breakpoint::Xxs,
                [
                    LayoutEntry::new(revenue.clone(), 0, 0, 2, 2),
                    LayoutEntry::new(users.clone(), 0, 2, 2, 2),
                    LayoutEntry::new(traffic.clone(), 0, 4, 2, 4),
                    LayoutEntry::new(sales.clone(), 0, 8, 2, 4),
                ],
            ),
        ];
        for (bp, entries) in tiers {
            layout.set_entries(bp, entries.to_vec());
        }

        let snapshot = SessionSnapshot { widgets, layout };
        debug_assert!(snapshot.is_consistent());
        Self { snapshot }
    }

    /// The seed snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self::standard()
    }
}

impl EditSession {
    /// Seed the session with demo data, guarded by the session flags.
    ///
    /// Runs only when the session is Fresh (never initialized, never
    /// user-modified); otherwise a guaranteed no-op. Returns whether
    /// seeding happened.
    pub fn initialize_demo_data(&mut self, seed: &SeedData) -> bool {
        if self.is_initialized() || self.is_modified() {
            warn!(
                initialized = self.is_initialized(),
                modified = self.is_modified(),
                "demo seed suppressed"
            );
            return false;
        }
        self.install_seed(seed.snapshot().clone());
        debug!(widgets = seed.snapshot().widgets.len(), "demo data seeded");
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

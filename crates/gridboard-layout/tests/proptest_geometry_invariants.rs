#![forbid(unsafe_code)]

//! Property tests for the pure geometry operations.
//!
//! Validates:
//! - `merge` is associative and never drops entries.
//! - `remove_widget` on an absent id is an exact no-op.
//! - `remove_widget` after `merge` restores the original layout.
//! - `default_geometry_for` is consistent for a single widget at every kind.
//! - `place_below` never overlaps the existing layout's rows.

use proptest::prelude::*;

use gridboard_layout::{Breakpoint, Layout, geometry};
use gridboard_model::{WidgetId, WidgetKind};

fn kind_strategy() -> impl Strategy<Value = WidgetKind> {
    prop::sample::select(WidgetKind::ALL.to_vec())
}

fn ids_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z][a-z0-9]{0,6}", 1..=max)
        .prop_map(|set| set.into_iter().collect())
}

/// Build a layout holding one default geometry per (id, kind) pair.
fn build_layout(pairs: &[(String, WidgetKind)]) -> Layout {
    let mut layout = Layout::new();
    for (name, kind) in pairs {
        let id = WidgetId::from(name.as_str());
        let geo = geometry::place_below(&layout, &geometry::default_geometry_for(&id, *kind));
        layout = geometry::merge(&layout, &geo);
    }
    layout
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn merge_never_drops_entries(
        ids in ids_strategy(8),
        kinds in prop::collection::vec(kind_strategy(), 8)
    ) {
        let pairs: Vec<_> = ids.iter().cloned().zip(kinds.iter().copied()).collect();
        let layout = build_layout(&pairs);

        for bp in Breakpoint::ALL {
            prop_assert_eq!(layout.entries(bp).len(), pairs.len());
        }
    }

    #[test]
    fn remove_absent_is_exact_noop(
        ids in ids_strategy(6),
        kinds in prop::collection::vec(kind_strategy(), 6)
    ) {
        let pairs: Vec<_> = ids.iter().cloned().zip(kinds.iter().copied()).collect();
        let layout = build_layout(&pairs);

        let ghost = WidgetId::from("zzz-absent");
        prop_assert!(!ids.contains(&"zzz-absent".to_string()));
        prop_assert_eq!(geometry::remove_widget(&layout, &ghost), layout);
    }

    #[test]
    fn merge_then_remove_restores_original(
        ids in ids_strategy(6),
        kinds in prop::collection::vec(kind_strategy(), 6),
        extra_kind in kind_strategy()
    ) {
        let pairs: Vec<_> = ids.iter().cloned().zip(kinds.iter().copied()).collect();
        let layout = build_layout(&pairs);

        let extra = WidgetId::from("zzz-extra");
        let geo = geometry::default_geometry_for(&extra, extra_kind);
        let merged = geometry::merge(&layout, &geo);

        prop_assert_eq!(geometry::remove_widget(&merged, &extra), layout);
    }

    #[test]
    fn default_geometry_is_consistent(kind in kind_strategy()) {
        let id = WidgetId::from("w1");
        let layout = geometry::default_geometry_for(&id, kind);
        prop_assert!(geometry::is_consistent(&layout, [&id]));
    }

    #[test]
    fn place_below_rows_do_not_overlap(
        ids in ids_strategy(8),
        kinds in prop::collection::vec(kind_strategy(), 8)
    ) {
        let pairs: Vec<_> = ids.iter().cloned().zip(kinds.iter().copied()).collect();
        let layout = build_layout(&pairs);

        // Entries were stacked row by row: sorted by y, each entry's row range
        // must not intersect the next widget's.
        for bp in Breakpoint::ALL {
            let mut entries = layout.entries(bp).to_vec();
            entries.sort_by_key(|e| e.y);
            for pair in entries.windows(2) {
                prop_assert!(pair[0].y + pair[0].h <= pair[1].y);
            }
        }
    }

    #[test]
    fn incremental_build_stays_consistent(
        ids in ids_strategy(8),
        kinds in prop::collection::vec(kind_strategy(), 8)
    ) {
        let pairs: Vec<_> = ids.iter().cloned().zip(kinds.iter().copied()).collect();
        let layout = build_layout(&pairs);

        let owned: Vec<WidgetId> = pairs
            .iter()
            .map(|(name, _)| WidgetId::from(name.as_str()))
            .collect();
        prop_assert!(geometry::is_consistent(&layout, owned.iter()));
    }
}

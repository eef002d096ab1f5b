#![forbid(unsafe_code)]

//! Widget catalog: per-kind default title and configuration.
//!
//! The catalog is a pure lookup seam between the session store and the
//! presentation layer. [`StandardCatalog`] ships the built-in defaults;
//! hosts can inject their own [`WidgetCatalog`] impl for localization or
//! feature-flagged kinds.
//!
//! # Invariants
//!
//! 1. Lookup is total: every [`WidgetKind`] has defaults (enforced by the
//!    exhaustive match — an unknown kind cannot be expressed).
//! 2. Lookup is pure: no state, no side effects.

use serde_json::json;

use crate::{WidgetConfig, WidgetKind};

/// Default title and configuration for a newly added widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDefaults {
    /// Initial display title.
    pub title: String,
    /// Initial kind-specific configuration.
    pub config: WidgetConfig,
}

/// Pure lookup from widget kind to creation defaults.
pub trait WidgetCatalog {
    /// Defaults for a widget of the given kind.
    fn defaults(&self, kind: WidgetKind) -> WidgetDefaults;
}

/// The built-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCatalog;

impl WidgetCatalog for StandardCatalog {
    fn defaults(&self, kind: WidgetKind) -> WidgetDefaults {
        let (title, config) = match kind {
            WidgetKind::Line => (
                "Line chart",
                WidgetConfig::from([
                    ("smooth".to_string(), json!(false)),
                    ("show_legend".to_string(), json!(true)),
                ]),
            ),
            WidgetKind::Bar => (
                "Bar chart",
                WidgetConfig::from([
                    ("stacked".to_string(), json!(false)),
                    ("show_legend".to_string(), json!(true)),
                ]),
            ),
            WidgetKind::Pie => (
                "Pie chart",
                WidgetConfig::from([("donut".to_string(), json!(false))]),
            ),
            WidgetKind::Kpi => (
                "KPI",
                WidgetConfig::from([
                    ("format".to_string(), json!("number")),
                    ("trend".to_string(), json!(true)),
                ]),
            ),
            WidgetKind::Text => (
                "Text",
                WidgetConfig::from([("markdown".to_string(), json!(true))]),
            ),
        };
        WidgetDefaults {
            title: title.to_owned(),
            config,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

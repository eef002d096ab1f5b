#![forbid(unsafe_code)]

//! Widget data model for gridboard dashboards.
//!
//! A dashboard is a collection of [`Widget`]s: each has a caller-generated
//! unique [`WidgetId`], an immutable [`WidgetKind`], a user-editable title,
//! and a kind-specific configuration bag. Geometry lives elsewhere (the
//! layout crate); this crate is pure data plus the [`catalog`] of per-kind
//! defaults.
//!
//! # Invariants
//!
//! 1. `id` and `kind` are fixed at construction — there are no mutators.
//! 2. Ids produced by one [`WidgetIdGen`] are unique, even for calls within
//!    the same millisecond.
//! 3. All types serialize with serde; the serialized shape is part of the
//!    session-snapshot persistence contract.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub mod catalog;

pub use catalog::{StandardCatalog, WidgetCatalog, WidgetDefaults};

/// Kind-specific configuration: an ordered key/value bag.
///
/// `BTreeMap` keeps serialization deterministic, which keeps snapshot
/// comparisons stable.
pub type WidgetConfig = BTreeMap<String, serde_json::Value>;

/// The fixed set of widget kinds a dashboard can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Line chart over a time series.
    Line,
    /// Bar chart over categorical series.
    Bar,
    /// Pie / donut proportion chart.
    Pie,
    /// Single-number key-performance indicator.
    Kpi,
    /// Free-form text block.
    Text,
}

impl WidgetKind {
    /// All kinds, in declaration order.
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::Line,
        WidgetKind::Bar,
        WidgetKind::Pie,
        WidgetKind::Kpi,
        WidgetKind::Text,
    ];

    /// Lowercase wire name, matching the serde representation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Line => "line",
            WidgetKind::Bar => "bar",
            WidgetKind::Pie => "pie",
            WidgetKind::Kpi => "kpi",
            WidgetKind::Text => "text",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique identifier for a widget within one dashboard session.
///
/// Caller-generated (see [`WidgetIdGen`]); opaque to every other component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Wrap an externally produced id (e.g., one restored from persistence).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Generator for timestamp-based widget ids.
///
/// Ids look like `w-<unix-millis>-<seq>`. The sequence counter makes ids
/// unique even when several widgets are created within one millisecond.
#[derive(Debug, Default)]
pub struct WidgetIdGen {
    seq: u64,
}

impl WidgetIdGen {
    /// Create a generator starting at sequence zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next unique id.
    pub fn next_id(&mut self) -> WidgetId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.seq;
        self.seq += 1;
        WidgetId(format!("w-{millis}-{seq}"))
    }
}

/// A dashboard widget: identity, kind, title, and configuration.
///
/// `id` and `kind` are immutable after construction; `title`, `config`, and
/// `data_source` are the editable surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    id: WidgetId,
    kind: WidgetKind,
    title: String,
    #[serde(default)]
    config: WidgetConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_source: Option<String>,
}

impl Widget {
    /// Create a widget with an explicit title and empty config.
    #[must_use]
    pub fn new(id: WidgetId, kind: WidgetKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            config: WidgetConfig::new(),
            data_source: None,
        }
    }

    /// Create a widget from catalog defaults.
    #[must_use]
    pub fn from_defaults(id: WidgetId, kind: WidgetKind, defaults: WidgetDefaults) -> Self {
        Self {
            id,
            kind,
            title: defaults.title,
            config: defaults.config,
            data_source: None,
        }
    }

    /// Set the config bag (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the data source reference (builder pattern).
    #[must_use]
    pub fn with_data_source(mut self, source: impl Into<String>) -> Self {
        self.data_source = Some(source.into());
        self
    }

    /// The widget's unique id.
    #[must_use]
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    /// The widget's kind (fixed at creation).
    #[must_use]
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// The display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the display title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The kind-specific configuration bag.
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Mutable access to the configuration bag.
    pub fn config_mut(&mut self) -> &mut WidgetConfig {
        &mut self.config
    }

    /// The optional data source reference.
    #[must_use]
    pub fn data_source(&self) -> Option<&str> {
        self.data_source.as_deref()
    }

    /// Clone this widget under a new id, suffixing the title.
    ///
    /// Used by duplicate: config and data source are carried over verbatim.
    #[must_use]
    pub fn cloned_as(&self, id: WidgetId, title: impl Into<String>) -> Self {
        Self {
            id,
            kind: self.kind,
            title: title.into(),
            config: self.config.clone(),
            data_source: self.data_source.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_gen_unique_within_same_millisecond() {
        let mut ids = WidgetIdGen::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn id_gen_format() {
        let mut ids = WidgetIdGen::new();
        let id = ids.next_id();
        assert!(id.as_str().starts_with("w-"));
        assert!(id.as_str().ends_with("-0"));
    }

    #[test]
    fn kind_names_match_serde() {
        for kind in WidgetKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn widget_roundtrip() {
        let mut w = Widget::new(WidgetId::from("w1"), WidgetKind::Kpi, "Revenue");
        w.config_mut()
            .insert("unit".into(), serde_json::json!("USD"));

        let json = serde_json::to_string(&w).unwrap();
        let back: Widget = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }

    #[test]
    fn data_source_omitted_when_none() {
        let w = Widget::new(WidgetId::from("w1"), WidgetKind::Text, "Notes");
        let json = serde_json::to_string(&w).unwrap();
        assert!(!json.contains("data_source"));
    }

    #[test]
    fn cloned_as_carries_config() {
        let w = Widget::new(WidgetId::from("w1"), WidgetKind::Bar, "Sales")
            .with_config(WidgetConfig::from([(
                "stacked".to_string(),
                serde_json::json!(true),
            )]))
            .with_data_source("sales_daily");

        let copy = w.cloned_as(WidgetId::from("w2"), "Sales (copy)");
        assert_eq!(copy.id().as_str(), "w2");
        assert_eq!(copy.kind(), WidgetKind::Bar);
        assert_eq!(copy.title(), "Sales (copy)");
        assert_eq!(copy.config(), w.config());
        assert_eq!(copy.data_source(), Some("sales_daily"));
    }

    #[test]
    fn title_is_mutable_id_is_not() {
        let mut w = Widget::new(WidgetId::from("w1"), WidgetKind::Line, "Old");
        w.set_title("New");
        assert_eq!(w.title(), "New");
        assert_eq!(w.id().as_str(), "w1");
    }
}

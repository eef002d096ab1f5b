#![forbid(unsafe_code)]

//! Persistence collaborator boundary.
//!
//! The core does not persist anything itself: it exposes `has_changes` so a
//! host can decide when saving is warranted, hands out the current
//! [`SessionSnapshot`] (whose serde shape is the serialization contract),
//! and clears the dirty flag only when the host confirms success via
//! [`EditSession::mark_saved`](crate::EditSession::mark_saved). Editing is
//! optimistic and local-first — the store never awaits a save.

use thiserror::Error;

use crate::snapshot::SessionSnapshot;

/// Typed failure surface of a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    /// The dashboard id is not known to the backend.
    #[error("unknown dashboard: {0}")]
    UnknownDashboard(String),
    /// The snapshot could not be encoded.
    #[error("snapshot serialization failed: {0}")]
    Serialize(String),
    /// The backend rejected or failed the write.
    #[error("backend error: {0}")]
    Backend(String),
}

/// A place session snapshots can be saved to.
///
/// Implementations live outside the core (HTTP API, local file, test
/// double); the snapshot's serde representation is the wire contract.
pub trait SnapshotSink {
    /// Persist a snapshot under a dashboard identifier.
    fn save(&mut self, dashboard_id: &str, snapshot: &SessionSnapshot)
    -> Result<(), PersistError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EditSession;
    use gridboard_model::WidgetKind;
    use std::collections::HashMap;

    /// Reference in-memory sink: stores the serialized form, as a real
    /// backend would.
    #[derive(Default)]
    struct MemorySink {
        saved: HashMap<String, String>,
    }

    impl SnapshotSink for MemorySink {
        fn save(
            &mut self,
            dashboard_id: &str,
            snapshot: &SessionSnapshot,
        ) -> Result<(), PersistError> {
            let json = serde_json::to_string(snapshot)
                .map_err(|e| PersistError::Serialize(e.to_string()))?;
            self.saved.insert(dashboard_id.to_owned(), json);
            Ok(())
        }
    }

    #[test]
    fn host_save_flow() {
        let mut session = EditSession::new();
        session.add_widget(WidgetKind::Kpi);
        let mut sink = MemorySink::default();

        // Host checks the dirty flag, saves, then confirms.
        assert!(session.has_changes());
        sink.save("dash-1", session.snapshot()).unwrap();
        session.mark_saved();
        assert!(!session.has_changes());

        // The persisted form round-trips to an equal snapshot.
        let restored: SessionSnapshot =
            serde_json::from_str(&sink.saved["dash-1"]).unwrap();
        assert_eq!(&restored, session.snapshot());
    }

    #[test]
    fn failed_save_leaves_dirty_flag_alone() {
        struct FailingSink;
        impl SnapshotSink for FailingSink {
            fn save(
                &mut self,
                dashboard_id: &str,
                _snapshot: &SessionSnapshot,
            ) -> Result<(), PersistError> {
                Err(PersistError::UnknownDashboard(dashboard_id.to_owned()))
            }
        }

        let mut session = EditSession::new();
        session.add_widget(WidgetKind::Text);

        let err = FailingSink.save("nope", session.snapshot()).unwrap_err();
        assert_eq!(err, PersistError::UnknownDashboard("nope".into()));
        // Host must not call mark_saved on failure; flag stays set.
        assert!(session.has_changes());
    }

    #[test]
    fn editing_continues_while_save_is_outstanding() {
        // Fire-and-forget: a local edit between save and confirmation is
        // legal, and confirmation then clears the flag for content newer
        // than what was saved — the host owns that policy.
        let mut session = EditSession::new();
        session.add_widget(WidgetKind::Kpi);
        let mut sink = MemorySink::default();
        sink.save("dash-1", session.snapshot()).unwrap();

        session.add_widget(WidgetKind::Line);
        assert!(session.has_changes());
    }
}

#![forbid(unsafe_code)]

//! Widget action capability.
//!
//! Rendering code needs to trigger edits on individual widgets (rename,
//! delete, duplicate) without holding the whole store API. [`WidgetActions`]
//! is that capability: one injected object instead of per-widget optional
//! callbacks, so a widget card either has the full action set or none.
//!
//! [`EditSession`] implements it directly; hosts can also wrap it to add
//! confirmation dialogs or telemetry.

use gridboard_model::WidgetId;

use crate::store::{EditSession, SessionError};

/// The per-widget edit capability handed to rendering code.
pub trait WidgetActions {
    /// Rename a widget. Same validation and no-op semantics as
    /// [`EditSession::edit_widget_title`].
    fn edit_title(&mut self, id: &WidgetId, title: &str) -> Result<bool, SessionError>;

    /// Delete a widget. Returns whether anything was removed.
    fn delete(&mut self, id: &WidgetId) -> bool;

    /// Duplicate a widget. Returns the new id when a clone was made.
    fn duplicate(&mut self, id: &WidgetId) -> Option<WidgetId>;
}

impl WidgetActions for EditSession {
    fn edit_title(&mut self, id: &WidgetId, title: &str) -> Result<bool, SessionError> {
        self.edit_widget_title(id, title)
    }

    fn delete(&mut self, id: &WidgetId) -> bool {
        self.delete_widget(id)
    }

    fn duplicate(&mut self, id: &WidgetId) -> Option<WidgetId> {
        self.duplicate_widget(id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gridboard_model::WidgetKind;

    /// Drive the store purely through the capability trait, the way a
    /// widget card would.
    fn rename_and_clone(actions: &mut dyn WidgetActions, id: &WidgetId) -> Option<WidgetId> {
        actions.edit_title(id, "Renamed").ok()?;
        actions.duplicate(id)
    }

    #[test]
    fn session_implements_the_capability() {
        let mut session = EditSession::new();
        let id = session.add_widget(WidgetKind::Kpi);

        let copy = rename_and_clone(&mut session, &id).unwrap();
        assert_eq!(session.snapshot().widget(&id).unwrap().title(), "Renamed");
        assert_eq!(
            session.snapshot().widget(&copy).unwrap().title(),
            "Renamed (copy)"
        );

        assert!(WidgetActions::delete(&mut session, &id));
        assert_eq!(session.widgets().len(), 1);
    }

    #[test]
    fn capability_preserves_noop_semantics() {
        let mut session = EditSession::new();
        let ghost = WidgetId::from("ghost");
        let actions: &mut dyn WidgetActions = &mut session;

        assert!(!actions.delete(&ghost));
        assert!(actions.duplicate(&ghost).is_none());
        assert_eq!(actions.edit_title(&ghost, "Title"), Ok(false));
    }
}

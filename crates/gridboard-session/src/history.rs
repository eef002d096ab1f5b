#![forbid(unsafe_code)]

//! Dual-stack snapshot history for the edit session.
//!
//! [`SnapshotHistory`] holds `Arc`-shared [`SessionSnapshot`]s on two
//! stacks. The undo stack holds *pre-mutation* states (most recent at the
//! back); the redo stack holds undone *future* states. Structural sharing
//! through `Arc` means a snapshot on a stack can never alias live state.
//!
//! ```text
//! add, add, delete                       undo()
//! ┌──────────────────────────────┐      ┌──────────────────────────────┐
//! │ Undo: [s0, s1, s2]           │ ───► │ Undo: [s0, s1]               │
//! │ Redo: []                     │      │ Redo: [current-before-undo]  │
//! └──────────────────────────────┘      └──────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Every push clears the redo stack (linear history, not a tree).
//! 2. `undo_depth() <= config.max_depth` after any push.
//! 3. `undo`/`redo` move exactly one snapshot between stacks and hand the
//!    caller's current state to the opposite stack, so N undos followed by
//!    N redos restore both stack depths exactly.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::snapshot::SessionSnapshot;

/// Configuration for the snapshot history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of pre-mutation snapshots retained for undo.
    /// Oldest snapshots are evicted when the limit is exceeded.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl HistoryConfig {
    /// Create a configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create an unlimited configuration (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// Undo/redo stacks over `Arc`-shared session snapshots.
pub struct SnapshotHistory {
    /// Pre-mutation snapshots available for undo (most recent at back).
    undo_stack: VecDeque<Arc<SessionSnapshot>>,
    /// Undone snapshots available for redo (most recent at back).
    redo_stack: VecDeque<Arc<SessionSnapshot>>,
    config: HistoryConfig,
}

impl fmt::Debug for SnapshotHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotHistory")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl SnapshotHistory {
    /// Create a history with the given configuration.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            config,
        }
    }

    // ====================================================================
    // Core operations
    // ====================================================================

    /// Record a pre-mutation snapshot and clear the redo stack (new branch).
    pub fn push(&mut self, snapshot: SessionSnapshot) {
        self.redo_stack.clear();
        self.undo_stack.push_back(Arc::new(snapshot));
        self.enforce_depth();
    }

    /// Pop the most recent pre-mutation snapshot, parking `current` on the
    /// redo stack.
    ///
    /// Returns `None` (and leaves `current` unparked) when there is nothing
    /// to undo.
    pub fn undo(&mut self, current: SessionSnapshot) -> Option<Arc<SessionSnapshot>> {
        let restored = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(Arc::new(current));
        Some(restored)
    }

    /// Pop the most recently undone snapshot, parking `current` on the undo
    /// stack.
    ///
    /// Symmetric to [`undo`](Self::undo): `None` when there is nothing to
    /// redo.
    pub fn redo(&mut self, current: SessionSnapshot) -> Option<Arc<SessionSnapshot>> {
        let restored = self.redo_stack.pop_back()?;
        self.undo_stack.push_back(Arc::new(current));
        Some(restored)
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of snapshots on the undo stack.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of snapshots on the redo stack.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Drop all snapshots from both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_depth(&mut self) {
        while self.undo_stack.len() > self.config.max_depth {
            self.undo_stack.pop_front();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

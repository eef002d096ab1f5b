#![forbid(unsafe_code)]

//! Dashboard edit-session engine.
//!
//! One [`EditSession`] per open editing surface owns the widget collection,
//! the per-breakpoint layout, the edit-mode and dirty flags, and two
//! undo/redo stacks of immutable session snapshots. Everything is
//! single-threaded and synchronous: UI callbacks mutate the store, the
//! store hands immutable snapshots out, and the only asynchronous boundary
//! (persistence) is a fire-and-forget collaborator behind the
//! [`persist::SnapshotSink`] trait.
//!
//! # Module Structure
//!
//! - [`snapshot`]: the `{widgets, layout}` pair history and persistence
//!   operate on
//! - [`history`]: dual-stack snapshot history with `Arc` sharing
//! - [`store`]: the [`EditSession`] state machine — every mutation path
//! - [`seed`]: demo-data seeding behind a remount-safe guard
//! - [`actions`]: the per-widget edit capability for rendering code
//! - [`grid`]: the bridge to an external grid drag/collision engine
//! - [`persist`]: the save boundary (trait + typed errors only)

pub mod actions;
pub mod grid;
pub mod history;
pub mod persist;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use actions::WidgetActions;
pub use grid::{GridSurface, PlacedWidget};
pub use history::{HistoryConfig, SnapshotHistory};
pub use persist::{PersistError, SnapshotSink};
pub use seed::SeedData;
pub use snapshot::SessionSnapshot;
pub use store::{EditSession, MAX_TITLE_LEN, SessionError};

//! Core logic for the notes app: note model, local persistence and the
//! controller that drives a presentation layer.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, ConfigError, Layout, NewNoteTemplate};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::id::{IdGenerator, UuidIdGenerator};
pub use model::note::{Note, NoteId, NoteIdError, NoteInput};
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use repo::note_store::{KvNoteStore, NoteStore};
pub use repo::{RepoError, RepoResult};
pub use service::notes_app::{AppError, AppResult, NotesApp};
pub use service::view::{list_item_preview, NotesView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

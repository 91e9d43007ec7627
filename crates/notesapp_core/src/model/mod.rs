//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record persisted by the note store.
//! - Define identity normalization and id generation contracts.
//!
//! # Invariants
//! - Every note is identified by a canonical string `NoteId`.
//! - Deletion is permanent; there are no tombstones.

pub mod id;
pub mod note;

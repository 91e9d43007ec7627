//! Note id generation.

use crate::model::note::NoteId;
use uuid::Uuid;

/// Source of candidate ids for newly created notes.
///
/// Candidates are not required to be unique; the note store rejects
/// candidates that collide with stored ids and asks for another one.
pub trait IdGenerator {
    fn next_id(&self) -> NoteId;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> NoteId {
        NoteId::from_uuid(Uuid::new_v4())
    }
}

//! Note store contract and key-value backed implementation.
//!
//! # Responsibility
//! - Own the canonical note collection stored under one key.
//! - Implement list/upsert/delete with whole-collection rewrites.
//!
//! # Invariants
//! - `list_all` is sorted by `updated DESC`; ties keep stored order.
//! - Stored ids are unique; new ids are checked against every stored id.
//! - `updated` changes only when a saved value differs from the stored one,
//!   and then strictly increases.
//! - A missing or empty key reads as an empty collection.

use crate::clock::{Clock, SystemClock};
use crate::model::id::{IdGenerator, UuidIdGenerator};
use crate::model::note::{Note, NoteId, NoteInput};
use crate::repo::kv_store::KeyValueStore;
use crate::repo::{RepoError, RepoResult};
use log::{error, info};
use std::collections::HashSet;

const MAX_ID_ATTEMPTS: u32 = 16;

/// Durable note collection capability injected into the app controller.
pub trait NoteStore {
    /// Returns every note, most recently updated first.
    fn list_all(&self) -> RepoResult<Vec<Note>>;
    /// Updates the note matching `input.id`, or creates a new one.
    fn save(&mut self, input: NoteInput) -> RepoResult<Note>;
    /// Removes the note with `id`. Unknown ids are ignored.
    fn delete(&mut self, id: &NoteId) -> RepoResult<()>;
}

/// Note store persisting the collection as one JSON array under `key`.
pub struct KvNoteStore<K: KeyValueStore> {
    kv: K,
    key: String,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl<K: KeyValueStore> KvNoteStore<K> {
    /// Creates a store using the system clock and UUID ids.
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            clock: Box::new(SystemClock),
            ids: Box::new(UuidIdGenerator),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Read-only access to the backing key-value store.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Loads the collection in stored order.
    fn load_notes(&self) -> RepoResult<Vec<Note>> {
        let raw = match self.kv.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Vec::new()),
        };

        let notes = decode_notes(&raw).map_err(|source| {
            error!(
                "event=notes_load module=store status=error error_code=malformed_data key={} error={}",
                self.key, source
            );
            RepoError::MalformedData {
                key: self.key.clone(),
                source,
            }
        })?;
        ensure_unique_ids(&notes)?;
        Ok(notes)
    }

    fn write_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        let encoded = encode_notes(notes).map_err(RepoError::Encode)?;
        self.kv.set(&self.key, &encoded)
    }

    fn unused_id(&self, notes: &[Note]) -> RepoResult<NoteId> {
        let taken = notes.iter().map(|note| &note.id).collect::<HashSet<_>>();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            info!("event=note_id_collision module=store status=retry");
        }
        Err(RepoError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

impl<K: KeyValueStore> NoteStore for KvNoteStore<K> {
    fn list_all(&self) -> RepoResult<Vec<Note>> {
        let mut notes = self.load_notes()?;
        sort_by_updated_desc(&mut notes);
        Ok(notes)
    }

    fn save(&mut self, input: NoteInput) -> RepoResult<Note> {
        let mut notes = self.load_notes()?;
        let NoteInput { id, title, content } = input;
        let existing = id
            .as_ref()
            .and_then(|id| notes.iter().position(|note| &note.id == id));

        let (saved, created, changed) = match existing {
            Some(index) => {
                let now = self.clock.now_ms();
                let note = &mut notes[index];
                let mut changed = false;
                if note.content != content {
                    note.content = content;
                    changed = true;
                }
                if let Some(title) = title {
                    if note.title != title {
                        note.title = title;
                        changed = true;
                    }
                }
                if changed {
                    note.updated = next_updated(now, note.updated);
                }
                (note.clone(), false, changed)
            }
            None => {
                let new_id = self.unused_id(&notes)?;
                let now = self.clock.now_ms();
                let note = Note {
                    id: new_id,
                    title: title.unwrap_or_default(),
                    content,
                    created: now,
                    updated: now,
                };
                notes.push(note.clone());
                (note, true, true)
            }
        };

        self.write_notes(&notes)?;
        info!(
            "event=note_save module=store status=ok created={} changed={} total={}",
            created,
            changed,
            notes.len()
        );
        Ok(saved)
    }

    fn delete(&mut self, id: &NoteId) -> RepoResult<()> {
        let mut notes = self.load_notes()?;
        let before = notes.len();
        notes.retain(|note| &note.id != id);
        if notes.len() == before {
            info!("event=note_delete module=store status=ok removed=false");
            return Ok(());
        }

        self.write_notes(&notes)?;
        info!(
            "event=note_delete module=store status=ok removed=true total={}",
            notes.len()
        );
        Ok(())
    }
}

/// Encodes a collection to its persisted JSON form.
pub fn encode_notes(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Decodes a persisted JSON collection.
pub fn decode_notes(raw: &str) -> Result<Vec<Note>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Sorts most recently updated first. The sort is stable.
pub fn sort_by_updated_desc(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.updated.cmp(&a.updated));
}

fn next_updated(now_ms: i64, previous_ms: i64) -> i64 {
    now_ms.max(previous_ms.saturating_add(1))
}

fn ensure_unique_ids(notes: &[Note]) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(notes.len());
    for note in notes {
        if !seen.insert(&note.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate note id `{}`",
                note.id
            )));
        }
    }
    Ok(())
}

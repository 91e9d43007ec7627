//! Note record, identifier and save input.
//!
//! # Responsibility
//! - Define the single persisted entity and its JSON shape.
//! - Normalize ids coming from storage or UI into one canonical form.
//!
//! # Invariants
//! - `NoteId` is never blank and carries no surrounding whitespace.
//! - Numeric ids from legacy records compare equal to their string form.
//! - `created <= updated` for every note written by the store. Records read
//!   without `created` take `updated` for it.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Canonical note identifier.
///
/// Stored and compared as a string. Legacy collections stored integer ids and
/// UI layers hand ids back as strings, so both shapes deserialize into the
/// same value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

/// Rejected note id input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteIdError {
    Blank,
}

impl Display for NoteIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "note id cannot be blank"),
        }
    }
}

impl Error for NoteIdError {}

impl NoteId {
    /// Parses an id received from a UI or storage boundary.
    ///
    /// Surrounding whitespace is trimmed; blank input is rejected.
    pub fn parse(value: &str) -> Result<Self, NoteIdError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(NoteIdError::Blank);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for NoteId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl std::str::FromStr for NoteId {
    type Err = NoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNoteId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match RawNoteId::deserialize(deserializer)? {
            RawNoteId::Text(value) => value,
            RawNoteId::Unsigned(value) => value.to_string(),
            RawNoteId::Signed(value) => value.to_string(),
        };
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Persisted note record.
///
/// Always written with every field. On read only `id`, `content` and
/// `updated` are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredNote")]
pub struct Note {
    /// Assigned by the store at creation, never changed afterwards.
    pub id: NoteId,
    /// Empty for board-layout notes.
    pub title: String,
    /// Free-form text.
    pub content: String,
    /// Unix epoch milliseconds.
    pub created: i64,
    /// Unix epoch milliseconds of the last value change.
    pub updated: i64,
}

/// On-disk record shape, tolerant of older collections.
#[derive(Deserialize)]
struct StoredNote {
    id: NoteId,
    #[serde(default)]
    title: String,
    /// Older editor collections named this field `body`.
    #[serde(alias = "body")]
    content: String,
    /// Sticky-note collections never stored it.
    created: Option<i64>,
    updated: i64,
}

impl From<StoredNote> for Note {
    fn from(stored: StoredNote) -> Self {
        Self {
            id: stored.id,
            title: stored.title,
            content: stored.content,
            created: stored.created.unwrap_or(stored.updated),
            updated: stored.updated,
        }
    }
}

/// Save request accepted by the note store.
///
/// `id == None`, or an id that matches no stored record, creates a new note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteInput {
    pub id: Option<NoteId>,
    /// `None` leaves an existing title untouched.
    pub title: Option<String>,
    pub content: String,
}

impl NoteInput {
    /// Input that always creates a note.
    pub fn create(title: Option<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title,
            content: content.into(),
        }
    }

    /// Input targeting an existing note.
    pub fn edit(id: NoteId, title: Option<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteId, NoteIdError};

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert_eq!(NoteId::parse("  42 ").unwrap().as_str(), "42");
        assert_eq!(NoteId::parse("   ").unwrap_err(), NoteIdError::Blank);
    }

    #[test]
    fn numeric_and_string_ids_deserialize_to_same_value() {
        let numeric: NoteId = serde_json::from_str("123456").unwrap();
        let text: NoteId = serde_json::from_str("\"123456\"").unwrap();
        assert_eq!(numeric, text);
        assert_eq!(numeric, NoteId::from(123456u64));
    }

    #[test]
    fn legacy_body_field_and_missing_title_are_accepted() {
        let raw = r#"{"id":7,"body":"legacy","created":1,"updated":2}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.id.as_str(), "7");
        assert_eq!(note.title, "");
        assert_eq!(note.content, "legacy");
    }

    #[test]
    fn missing_created_defaults_to_updated() {
        let raw = r#"{"id":"s1","content":"sticky","updated":40}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.created, 40);
        assert_eq!(note.updated, 40);

        let written = serde_json::to_value(&note).unwrap();
        assert_eq!(written["created"], 40);
        assert_eq!(written["title"], "");
    }

    #[test]
    fn blank_stored_id_is_rejected() {
        let raw = r#"{"id":"","content":"x","created":1,"updated":1}"#;
        assert!(serde_json::from_str::<Note>(raw).is_err());
    }
}

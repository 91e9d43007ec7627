//! Repository layer: key-value persistence and the note store on top of it.
//!
//! # Responsibility
//! - Define the key-value capability the note store persists through.
//! - Own the whole-collection read/modify/write cycle for notes.
//!
//! # Invariants
//! - Only the note store reads or writes the notes key.
//! - Read paths reject malformed persisted state instead of masking it.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv_store;
pub mod note_store;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for key-value and note store operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored collection could not be decoded.
    MalformedData {
        key: String,
        source: serde_json::Error,
    },
    /// Collection could not be encoded for writing.
    Encode(serde_json::Error),
    /// Stored collection decoded but violates a collection invariant.
    InvalidData(String),
    /// Id generator kept returning ids that are already stored.
    IdExhausted { attempts: u32 },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MalformedData { key, source } => {
                write!(f, "malformed note data under key `{key}`: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::IdExhausted { attempts } => {
                write!(f, "no unused note id after {attempts} attempts")
            }
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MalformedData { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

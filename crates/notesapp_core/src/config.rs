//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Pick the layout, storage key, database path and logging settings.
//! - Provide the new-note template used by the add action.
//!
//! # Invariants
//! - Blank variables behave as unset.
//! - The storage key defaults per layout so editor and board collections
//!   never share a key by accident.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_LAYOUT: &str = "NOTESAPP_LAYOUT";
pub const ENV_STORAGE_KEY: &str = "NOTESAPP_STORAGE_KEY";
pub const ENV_DB_PATH: &str = "NOTESAPP_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "NOTESAPP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTESAPP_LOG_DIR";

const DB_FILE_NAME: &str = "notesapp.sqlite3";
const LOG_DIR_NAME: &str = "notesapp-logs";
const EDITOR_STORAGE_KEY: &str = "notesapp-notes";
const BOARD_STORAGE_KEY: &str = "stickynotes-notes";
const EDITOR_NEW_NOTE_TITLE: &str = "New note";

/// Presentation shape driven by the app controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Sidebar list plus one active note with title and body.
    #[default]
    Editor,
    /// Sticky-note grid; body only, no selection.
    Board,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Board => "board",
        }
    }

    pub fn default_storage_key(self) -> &'static str {
        match self {
            Self::Editor => EDITOR_STORAGE_KEY,
            Self::Board => BOARD_STORAGE_KEY,
        }
    }

    /// Whether the layout tracks an active note.
    pub fn has_selection(self) -> bool {
        matches!(self, Self::Editor)
    }
}

impl FromStr for Layout {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "editor" => Ok(Self::Editor),
            "board" | "sticky" => Ok(Self::Board),
            other => Err(ConfigError::UnknownLayout(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownLayout(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLayout(value) => {
                write!(f, "unknown layout `{value}`; expected editor|board")
            }
        }
    }
}

impl Error for ConfigError {}

/// Initial values for notes created by the add action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewNoteTemplate {
    pub title: Option<String>,
    pub content: String,
}

impl NewNoteTemplate {
    pub fn for_layout(layout: Layout) -> Self {
        match layout {
            Layout::Editor => Self {
                title: Some(EDITOR_NEW_NOTE_TITLE.to_string()),
                content: String::new(),
            },
            Layout::Board => Self::default(),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub layout: Layout,
    pub storage_key: String,
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub new_note: NewNoteTemplate,
}

impl AppConfig {
    /// Defaults for `layout` with files under the system temp directory.
    pub fn for_layout(layout: Layout) -> Self {
        let temp_dir = std::env::temp_dir();
        Self {
            layout,
            storage_key: layout.default_storage_key().to_string(),
            db_path: temp_dir.join(DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: temp_dir.join(LOG_DIR_NAME),
            new_note: NewNoteTemplate::for_layout(layout),
        }
    }

    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, one variable name at a time.
    ///
    /// # Errors
    /// - Returns `UnknownLayout` for an unsupported `NOTESAPP_LAYOUT` value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let layout = match non_blank(ENV_LAYOUT) {
            Some(value) => value.parse::<Layout>()?,
            None => Layout::default(),
        };

        let mut config = Self::for_layout(layout);
        if let Some(key) = non_blank(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(path) = non_blank(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(dir) = non_blank(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_layout(Layout::default())
    }
}

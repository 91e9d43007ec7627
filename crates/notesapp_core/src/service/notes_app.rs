//! Application controller.
//!
//! # Responsibility
//! - Mediate between user intents and the note store.
//! - Republish the full list (and the active note) after every mutation.
//!
//! # Invariants
//! - Every mutation is followed by a full store re-read; `notes` is a
//!   disposable copy valid until the next mutation.
//! - The store is never asked to delete without a granted confirmation.
//! - In the editor layout a non-empty list always has an active note.

use crate::config::{AppConfig, Layout, NewNoteTemplate};
use crate::model::note::{Note, NoteId, NoteIdError, NoteInput};
use crate::repo::note_store::NoteStore;
use crate::repo::RepoError;
use crate::service::view::NotesView;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AppResult<T> = Result<T, AppError>;

/// Controller error surfaced to the presentation layer.
#[derive(Debug)]
pub enum AppError {
    /// Store read/write failure; not retried.
    Store(RepoError),
    /// Id handed back by the presentation layer is unusable.
    InvalidId(NoteIdError),
    /// Selected id is not in the displayed list.
    NoteNotFound(NoteId),
    /// Active-note edit without an active note.
    NoActiveNote,
    /// Selection requested in a layout without one.
    SelectionUnsupported(Layout),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidId(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::NoActiveNote => write!(f, "no active note to edit"),
            Self::SelectionUnsupported(layout) => {
                write!(f, "{} layout has no note selection", layout.as_str())
            }
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidId(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<NoteIdError> for AppError {
    fn from(value: NoteIdError) -> Self {
        Self::InvalidId(value)
    }
}

/// Note list controller over an injected store and view.
pub struct NotesApp<S: NoteStore, V: NotesView> {
    store: S,
    view: V,
    layout: Layout,
    new_note: NewNoteTemplate,
    notes: Vec<Note>,
    active_id: Option<NoteId>,
}

impl<S: NoteStore, V: NotesView> NotesApp<S, V> {
    /// Creates a controller without touching the store.
    pub fn new(store: S, view: V, config: &AppConfig) -> Self {
        Self {
            store,
            view,
            layout: config.layout,
            new_note: config.new_note.clone(),
            notes: Vec::new(),
            active_id: None,
        }
    }

    /// Creates a controller and renders the stored list once.
    pub fn start(store: S, view: V, config: &AppConfig) -> AppResult<Self> {
        let mut app = Self::new(store, view, config);
        app.refresh()?;
        Ok(app)
    }

    /// Re-reads the store and republishes the list.
    ///
    /// Editor layout keeps the active note when it still exists, otherwise
    /// falls back to the most recently updated one. Editing or deleting some
    /// other note therefore leaves the selection where it was instead of
    /// jumping to the top of the list.
    pub fn refresh(&mut self) -> AppResult<()> {
        self.notes = self.store.list_all()?;
        self.view.update_note_list(&self.notes);

        if self.layout.has_selection() {
            let still_listed = self
                .active_id
                .take()
                .filter(|id| self.notes.iter().any(|note| &note.id == id));
            self.active_id = still_listed.or_else(|| self.notes.first().map(|n| n.id.clone()));

            self.view.update_preview_visibility(!self.notes.is_empty());
            let active = find_note(&self.notes, self.active_id.as_ref());
            self.view.update_active_note(active);
        }
        Ok(())
    }

    /// Creates a note from the layout template; the editor selects it.
    pub fn handle_add(&mut self) -> AppResult<Note> {
        let input = NoteInput::create(self.new_note.title.clone(), self.new_note.content.clone());
        let note = self.store.save(input)?;
        if self.layout.has_selection() {
            self.active_id = Some(note.id.clone());
        }
        info!(
            "event=note_add module=app status=ok layout={}",
            self.layout.as_str()
        );
        self.refresh()?;
        Ok(note)
    }

    /// Saves edited fields for `id`. `new_title == None` keeps the title.
    pub fn handle_edit(
        &mut self,
        id: &str,
        new_title: Option<String>,
        new_content: impl Into<String>,
    ) -> AppResult<Note> {
        let id = NoteId::parse(id)?;
        self.save_and_refresh(id, new_title, new_content.into())
    }

    /// Saves edited fields for the active note.
    pub fn handle_edit_active(
        &mut self,
        new_title: Option<String>,
        new_content: impl Into<String>,
    ) -> AppResult<Note> {
        let id = self.active_id.clone().ok_or(AppError::NoActiveNote)?;
        self.save_and_refresh(id, new_title, new_content.into())
    }

    /// Marks a listed note active. Does not touch the store.
    ///
    /// Fails with [`AppError::SelectionUnsupported`] in the board layout.
    pub fn handle_select(&mut self, id: &str) -> AppResult<()> {
        if !self.layout.has_selection() {
            info!(
                "event=note_select module=app status=rejected layout={}",
                self.layout.as_str()
            );
            return Err(AppError::SelectionUnsupported(self.layout));
        }
        let id = NoteId::parse(id)?;
        let note = find_note(&self.notes, Some(&id))
            .ok_or_else(|| AppError::NoteNotFound(id.clone()))?;
        self.view.update_active_note(Some(note));
        self.active_id = Some(id);
        Ok(())
    }

    /// Deletes `id` after the view confirms.
    ///
    /// Returns `false` when the user declined; the store is untouched then.
    pub fn handle_delete(&mut self, id: &str) -> AppResult<bool> {
        let id = NoteId::parse(id)?;
        if !self.view.confirm_delete(&id) {
            info!("event=note_delete module=app status=cancelled");
            return Ok(false);
        }

        self.store.delete(&id)?;
        if self.active_id.as_ref() == Some(&id) {
            self.active_id = None;
        }
        self.refresh()?;
        Ok(true)
    }

    /// Notes as last rendered, most recent first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active_note(&self) -> Option<&Note> {
        find_note(&self.notes, self.active_id.as_ref())
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn save_and_refresh(
        &mut self,
        id: NoteId,
        title: Option<String>,
        content: String,
    ) -> AppResult<Note> {
        let saved = self.store.save(NoteInput::edit(id, title, content))?;
        self.refresh()?;
        Ok(saved)
    }
}

fn find_note<'a>(notes: &'a [Note], id: Option<&NoteId>) -> Option<&'a Note> {
    let id = id?;
    notes.iter().find(|note| &note.id == id)
}

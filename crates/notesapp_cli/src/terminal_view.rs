//! Line-oriented terminal rendering of the notes list.

use log::warn;
use notesapp_core::{list_item_preview, Layout, Note, NoteId, NotesView};
use std::io::{BufRead, Write};

/// Renders notes as text and asks for delete confirmation on `input`.
pub struct TerminalView<W: Write, R: BufRead> {
    out: W,
    input: R,
    layout: Layout,
    assume_yes: bool,
    muted: bool,
    preview_visible: bool,
}

impl<W: Write, R: BufRead> TerminalView<W, R> {
    pub fn new(out: W, input: R, layout: Layout) -> Self {
        Self {
            out,
            input,
            layout,
            assume_yes: false,
            muted: false,
            preview_visible: true,
        }
    }

    /// Skips the delete prompt and answers yes.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Suppresses rendering; prompts still run.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn message(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            warn!("event=render module=cli status=error error={err}");
        }
    }

    fn render(&mut self, text: &str) {
        if !self.muted {
            self.message(text);
        }
    }
}

impl<W: Write, R: BufRead> NotesView for TerminalView<W, R> {
    fn update_note_list(&mut self, notes: &[Note]) {
        if notes.is_empty() {
            self.render("(no notes)");
            return;
        }

        for note in notes {
            let preview = list_item_preview(&note.content);
            let item = match self.layout {
                Layout::Editor => format!(
                    "{}  {}\n    {}\n    updated_ms={}",
                    note.id, note.title, preview, note.updated
                ),
                Layout::Board => format!(
                    "[{}] {}\n    created_ms={} updated_ms={}",
                    note.id, preview, note.created, note.updated
                ),
            };
            self.render(&item);
        }
    }

    fn update_active_note(&mut self, note: Option<&Note>) {
        if !self.preview_visible {
            return;
        }
        if let Some(note) = note {
            let text = format!("--- active {} ---\n{}\n\n{}", note.id, note.title, note.content);
            self.render(&text);
        }
    }

    fn update_preview_visibility(&mut self, visible: bool) {
        self.preview_visible = visible;
    }

    fn confirm_delete(&mut self, id: &NoteId) -> bool {
        if self.assume_yes {
            return true;
        }

        if write!(self.out, "Delete note {id}? [y/N] ")
            .and_then(|()| self.out.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(err) => {
                warn!("event=confirm_delete module=cli status=error error={err}");
                false
            }
        }
    }
}

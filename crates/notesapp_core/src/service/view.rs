//! Presentation-layer contract driven by the app controller.

use crate::model::note::{Note, NoteId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Max characters of body text shown in a list item.
pub const LIST_ITEM_PREVIEW_CHARS: usize = 65;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Rendering surface for the note list and the active note.
///
/// Implementations own widgets, formatting and user prompts; the controller
/// calls these after every store round-trip with fresh data.
pub trait NotesView {
    /// Redraws the full list, already sorted most recent first.
    fn update_note_list(&mut self, notes: &[Note]);
    /// Shows the selected note in the editor, or clears it.
    fn update_active_note(&mut self, note: Option<&Note>);
    /// Shows or hides the editor pane.
    fn update_preview_visibility(&mut self, visible: bool);
    /// Asks the user to confirm deleting `id`. `false` cancels the delete.
    fn confirm_delete(&mut self, id: &NoteId) -> bool;
}

/// Single-line body summary for list items.
///
/// Whitespace runs collapse to one space; bodies longer than
/// [`LIST_ITEM_PREVIEW_CHARS`] are cut and suffixed with `...`.
pub fn list_item_preview(body: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(body.trim(), " ");
    let mut preview = collapsed
        .chars()
        .take(LIST_ITEM_PREVIEW_CHARS)
        .collect::<String>();
    if collapsed.chars().count() > LIST_ITEM_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::{list_item_preview, LIST_ITEM_PREVIEW_CHARS};

    #[test]
    fn short_bodies_are_kept_and_whitespace_collapsed() {
        assert_eq!(list_item_preview("  hello\n\n  world \t"), "hello world");
        assert_eq!(list_item_preview(""), "");
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundaries() {
        let body = "é".repeat(LIST_ITEM_PREVIEW_CHARS + 10);
        let preview = list_item_preview(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), LIST_ITEM_PREVIEW_CHARS + 3);
    }

    #[test]
    fn exact_length_body_has_no_ellipsis() {
        let body = "a".repeat(LIST_ITEM_PREVIEW_CHARS);
        assert_eq!(list_item_preview(&body), body);
    }
}

use notesapp_core::{
    AppConfig, AppError, KvNoteStore, Layout, ManualClock, MemoryKvStore, Note, NoteId,
    NoteInput, NoteStore, NotesApp, NotesView, RepoResult,
};
use std::rc::Rc;

#[derive(Default)]
struct RecordingView {
    lists: Vec<Vec<NoteId>>,
    active: Vec<Option<NoteId>>,
    visibility: Vec<bool>,
    confirm_requests: Vec<NoteId>,
    grant_delete: bool,
}

impl NotesView for RecordingView {
    fn update_note_list(&mut self, notes: &[Note]) {
        self.lists
            .push(notes.iter().map(|note| note.id.clone()).collect());
    }

    fn update_active_note(&mut self, note: Option<&Note>) {
        self.active.push(note.map(|note| note.id.clone()));
    }

    fn update_preview_visibility(&mut self, visible: bool) {
        self.visibility.push(visible);
    }

    fn confirm_delete(&mut self, id: &NoteId) -> bool {
        self.confirm_requests.push(id.clone());
        self.grant_delete
    }
}

/// Counts store calls on top of a memory-backed store.
struct SpyStore {
    inner: KvNoteStore<MemoryKvStore>,
    saves: usize,
    deletes: usize,
}

impl NoteStore for SpyStore {
    fn list_all(&self) -> RepoResult<Vec<Note>> {
        self.inner.list_all()
    }

    fn save(&mut self, input: NoteInput) -> RepoResult<Note> {
        self.saves += 1;
        self.inner.save(input)
    }

    fn delete(&mut self, id: &NoteId) -> RepoResult<()> {
        self.deletes += 1;
        self.inner.delete(id)
    }
}

fn spy_store(clock: &Rc<ManualClock>, kv: MemoryKvStore) -> SpyStore {
    SpyStore {
        inner: KvNoteStore::new(kv, "notesapp-notes").with_clock(Rc::clone(clock)),
        saves: 0,
        deletes: 0,
    }
}

fn editor_app(clock: &Rc<ManualClock>) -> NotesApp<SpyStore, RecordingView> {
    let view = RecordingView {
        grant_delete: true,
        ..RecordingView::default()
    };
    NotesApp::start(
        spy_store(clock, MemoryKvStore::new()),
        view,
        &AppConfig::for_layout(Layout::Editor),
    )
    .unwrap()
}

#[test]
fn add_edit_delete_scenario() {
    let clock = Rc::new(ManualClock::new(1_000));
    let mut app = editor_app(&clock);
    assert!(app.notes().is_empty());
    assert_eq!(app.view().visibility, vec![false]);
    assert_eq!(app.view().active, vec![None]);

    let added = app.handle_add().unwrap();
    let stored = app.store().list_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "");
    assert_eq!(stored[0].title, "New note");
    assert_eq!(stored[0].created, stored[0].updated);

    let edited = app.handle_edit(added.id.as_str(), None, "hello").unwrap();
    assert_eq!(edited.content, "hello");
    assert!(edited.updated > edited.created);
    assert_eq!(app.notes()[0].content, "hello");

    assert!(app.handle_delete(added.id.as_str()).unwrap());
    assert!(app.store().list_all().unwrap().is_empty());
    assert!(app.notes().is_empty());
    assert_eq!(app.active_note(), None);
    assert_eq!(app.view().visibility.last(), Some(&false));
}

#[test]
fn declined_delete_never_reaches_the_store() {
    let clock = Rc::new(ManualClock::new(1));
    let mut app = editor_app(&clock);
    let added = app.handle_add().unwrap();
    app.view_mut().grant_delete = false;

    let deleted = app.handle_delete(added.id.as_str()).unwrap();
    assert!(!deleted);
    assert_eq!(app.store().deletes, 0);
    assert_eq!(app.view().confirm_requests, vec![added.id.clone()]);
    assert_eq!(app.store().list_all().unwrap().len(), 1);
}

#[test]
fn every_mutation_rerenders_the_full_list() {
    let clock = Rc::new(ManualClock::new(1));
    let mut app = editor_app(&clock);
    let first = app.handle_add().unwrap();
    clock.advance(1);
    let second = app.handle_add().unwrap();
    clock.advance(1);
    app.handle_edit(first.id.as_str(), None, "bump").unwrap();

    let lists = &app.view().lists;
    assert_eq!(lists.len(), 4);
    assert_eq!(lists[3], vec![first.id.clone(), second.id.clone()]);
}

#[test]
fn editor_selection_follows_add_and_survives_other_edits() {
    let clock = Rc::new(ManualClock::new(1));
    let mut app = editor_app(&clock);
    let first = app.handle_add().unwrap();
    clock.advance(1);
    let second = app.handle_add().unwrap();
    assert_eq!(app.active_note().map(|n| &n.id), Some(&second.id));

    app.handle_select(first.id.as_str()).unwrap();
    assert_eq!(app.active_note().map(|n| &n.id), Some(&first.id));

    clock.advance(1);
    app.handle_edit(second.id.as_str(), None, "moves to top").unwrap();
    assert_eq!(app.notes()[0].id, second.id);
    assert_eq!(app.active_note().map(|n| &n.id), Some(&first.id));
}

#[test]
fn deleting_the_active_note_selects_most_recent_remaining() {
    let clock = Rc::new(ManualClock::new(1));
    let mut app = editor_app(&clock);
    let older = app.handle_add().unwrap();
    clock.advance(1);
    let newer = app.handle_add().unwrap();
    clock.advance(1);
    let newest = app.handle_add().unwrap();

    app.handle_select(older.id.as_str()).unwrap();
    app.handle_delete(older.id.as_str()).unwrap();
    assert_eq!(app.active_note().map(|n| &n.id), Some(&newest.id));
    assert_eq!(app.notes().len(), 2);
    assert!(app.notes().iter().any(|n| n.id == newer.id));
}

#[test]
fn edit_active_targets_selected_note() {
    let clock = Rc::new(ManualClock::new(1));
    let mut app = editor_app(&clock);
    let err = app.handle_edit_active(None, "nothing selected").unwrap_err();
    assert!(matches!(err, AppError::NoActiveNote));

    let added = app.handle_add().unwrap();
    clock.advance(5);
    let edited = app
        .handle_edit_active(Some("Title".to_string()), "Body")
        .unwrap();
    assert_eq!(edited.id, added.id);
    assert_eq!(edited.title, "Title");
    assert_eq!(edited.content, "Body");
}

#[test]
fn select_reads_memory_only_and_rejects_unknown_ids() {
    let clock = Rc::new(ManualClock::new(1));
    let mut app = editor_app(&clock);
    let added = app.handle_add().unwrap();
    let saves_before = app.store().saves;

    let err = app.handle_select("missing").unwrap_err();
    assert!(matches!(err, AppError::NoteNotFound(ref id) if id.as_str() == "missing"));
    app.handle_select(&format!(" {} ", added.id)).unwrap();
    assert_eq!(app.store().saves, saves_before);
    assert_eq!(app.view().active.last(), Some(&Some(added.id.clone())));
}

#[test]
fn blank_ids_from_the_view_are_rejected() {
    let clock = Rc::new(ManualClock::new(1));
    let mut app = editor_app(&clock);
    assert!(matches!(
        app.handle_edit("  ", None, "x").unwrap_err(),
        AppError::InvalidId(_)
    ));
    assert!(matches!(
        app.handle_delete("").unwrap_err(),
        AppError::InvalidId(_)
    ));
    assert!(app.view().confirm_requests.is_empty());
}

#[test]
fn board_layout_has_no_selection_and_untitled_notes() {
    let clock = Rc::new(ManualClock::new(1));
    let config = AppConfig::for_layout(Layout::Board);
    let mut app = NotesApp::start(
        spy_store(&clock, MemoryKvStore::new()),
        RecordingView::default(),
        &config,
    )
    .unwrap();

    let added = app.handle_add().unwrap();
    assert_eq!(added.title, "");
    assert_eq!(added.content, "");
    app.handle_edit(added.id.as_str(), None, "sticky").unwrap();

    assert_eq!(app.layout(), Layout::Board);
    assert_eq!(app.active_note(), None);
    assert!(app.view().active.is_empty());
    assert!(app.view().visibility.is_empty());
    assert_eq!(app.notes()[0].content, "sticky");
}

#[test]
fn board_layout_rejects_selection_without_touching_the_view() {
    let clock = Rc::new(ManualClock::new(1));
    let mut app = NotesApp::start(
        spy_store(&clock, MemoryKvStore::new()),
        RecordingView::default(),
        &AppConfig::for_layout(Layout::Board),
    )
    .unwrap();
    let added = app.handle_add().unwrap();

    let err = app.handle_select(added.id.as_str()).unwrap_err();
    assert!(matches!(err, AppError::SelectionUnsupported(Layout::Board)));
    assert_eq!(app.active_note(), None);
    assert!(app.view().active.is_empty());

    app.handle_edit(added.id.as_str(), None, "after select").unwrap();
    assert_eq!(app.active_note(), None);
    assert!(app.view().active.is_empty());
}

#[test]
fn store_failures_propagate_to_the_caller() {
    let clock = Rc::new(ManualClock::new(1));
    let kv = MemoryKvStore::new().with_entry("notesapp-notes", "not json");
    let result = NotesApp::start(
        spy_store(&clock, kv),
        RecordingView::default(),
        &AppConfig::for_layout(Layout::Editor),
    );
    assert!(matches!(result, Err(AppError::Store(_))));
}

#[test]
fn start_selects_most_recently_updated_stored_note() {
    let clock = Rc::new(ManualClock::new(1));
    let raw = r#"[
        {"id": 1, "title": "a", "body": "older", "created": 1, "updated": 10},
        {"id": 2, "title": "b", "body": "newer", "created": 1, "updated": 20}
    ]"#;
    let kv = MemoryKvStore::new().with_entry("notesapp-notes", raw);
    let app = NotesApp::start(
        spy_store(&clock, kv),
        RecordingView::default(),
        &AppConfig::for_layout(Layout::Editor),
    )
    .unwrap();

    assert_eq!(app.active_note().map(|n| n.content.as_str()), Some("newer"));
    assert_eq!(app.view().visibility, vec![true]);
}

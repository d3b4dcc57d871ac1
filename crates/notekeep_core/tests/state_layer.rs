use notekeep_core::{
    AppState, AuthService, AuthState, JsonStorage, MemoryKvStore, NewNote, NoteService,
    NoteUpdate, NotesState, ALL_CATEGORIES,
};
use uuid::Uuid;

fn auth_state(store: &MemoryKvStore) -> AuthState<&MemoryKvStore> {
    AuthState::new(AuthService::new(JsonStorage::new(store, "test")))
}

fn notes_state(store: &MemoryKvStore) -> NotesState<&MemoryKvStore> {
    NotesState::new(NoteService::new(JsonStorage::new(store, "test")))
}

#[test]
fn auth_init_restores_session_once() {
    let store = MemoryKvStore::new();
    let registered = auth_state(&store).register("a@x.com", "pw", "A").unwrap().clone();

    let mut auth = auth_state(&store);
    assert!(!auth.is_initialized());
    auth.init_from_storage();
    assert!(auth.is_initialized());
    assert!(!auth.is_loading());
    assert_eq!(auth.user(), Some(&registered));

    AuthService::new(JsonStorage::new(&store, "test"))
        .logout()
        .unwrap();
    auth.init_from_storage();
    assert_eq!(auth.user(), Some(&registered));
}

#[test]
fn auth_failure_records_error_and_returns_it() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    auth.register("a@x.com", "pw", "A").unwrap();
    auth.logout().unwrap();
    assert!(auth.user().is_none());

    let err = auth.login("a@x.com", "bad").unwrap_err();
    assert_eq!(err.to_string(), "invalid email or password");
    assert_eq!(auth.error(), Some("invalid email or password"));
    assert!(auth.user().is_none());
    assert!(!auth.is_loading());

    auth.login("a@x.com", "pw").unwrap();
    assert_eq!(auth.error(), None);
    assert_eq!(auth.user().map(|user| user.email.as_str()), Some("a@x.com"));
}

#[test]
fn auth_register_duplicate_keeps_existing_user() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    let first = auth.register("a@x.com", "pw", "A").unwrap().clone();

    assert!(auth.register("A@x.com", "pw", "B").is_err());
    assert_eq!(auth.error(), Some("email already registered"));
    assert_eq!(auth.user(), Some(&first));
}

#[test]
fn notes_load_without_user_is_noop() {
    let store = MemoryKvStore::new();
    let mut notes = notes_state(&store);
    notes.load(None);
    assert!(notes.notes().is_empty());
    assert!(notes.categories().is_empty());
    assert_eq!(notes.add_new(None, NewNote::default()), None);
}

#[test]
fn notes_load_populates_categories_and_selects_most_recent() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    let user = auth.register("a@x.com", "pw", "A").unwrap().clone();
    let service = NoteService::new(JsonStorage::new(&store, "test"));
    service
        .create_note(user.id, NewNote::default().with_category("Work"))
        .unwrap();
    let newest = service
        .create_note(user.id, NewNote::default().with_title("newest"))
        .unwrap();

    let mut notes = notes_state(&store);
    notes.load(Some(&user));
    assert_eq!(notes.notes().len(), 2);
    assert_eq!(
        notes.categories(),
        &[
            ALL_CATEGORIES.to_string(),
            "General".to_string(),
            "Work".to_string()
        ]
    );
    assert_eq!(notes.selected_note_id(), Some(newest.id));
    assert_eq!(notes.selected_note().map(|note| note.title.as_str()), Some("newest"));
}

#[test]
fn notes_mutations_keep_list_in_sync() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    let user = auth.register("a@x.com", "pw", "A").unwrap().clone();
    let mut notes = notes_state(&store);
    notes.load(Some(&user));

    let first = notes
        .add_new(Some(&user), NewNote::default().with_title("first"))
        .unwrap();
    let second = notes
        .add_new(
            Some(&user),
            NewNote::default().with_title("second").with_category("Ideas"),
        )
        .unwrap();
    assert_eq!(notes.selected_note_id(), Some(second));
    assert!(notes.categories().contains(&"Ideas".to_string()));

    notes.save(
        Some(&user),
        first,
        NoteUpdate::default().with_category("Travel"),
    );
    let order: Vec<Uuid> = notes.notes().iter().map(|note| note.id).collect();
    assert_eq!(order, vec![first, second]);
    assert_eq!(notes.categories().last().map(String::as_str), Some("Travel"));

    let persisted: Vec<Uuid> = NoteService::new(JsonStorage::new(&store, "test"))
        .get_notes(user.id)
        .iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(persisted, order);
}

#[test]
fn removing_selected_note_falls_back_to_first() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    let user = auth.register("a@x.com", "pw", "A").unwrap().clone();
    let mut notes = notes_state(&store);

    let older = notes.add_new(Some(&user), NewNote::default()).unwrap();
    let newer = notes.add_new(Some(&user), NewNote::default()).unwrap();
    assert_eq!(notes.selected_note_id(), Some(newer));

    notes.remove(Some(&user), newer);
    assert_eq!(notes.selected_note_id(), Some(older));
    notes.remove(Some(&user), older);
    assert_eq!(notes.selected_note_id(), None);
    assert!(notes.notes().is_empty());
}

#[test]
fn removing_unselected_note_keeps_selection() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    let user = auth.register("a@x.com", "pw", "A").unwrap().clone();
    let mut notes = notes_state(&store);
    let older = notes.add_new(Some(&user), NewNote::default()).unwrap();
    let newer = notes.add_new(Some(&user), NewNote::default()).unwrap();

    notes.remove(Some(&user), older);
    notes.remove(Some(&user), Uuid::new_v4());
    assert_eq!(notes.selected_note_id(), Some(newer));
    assert_eq!(notes.notes().len(), 1);
}

#[test]
fn reload_keeps_existing_selection_and_drops_vanished_one() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    let user = auth.register("a@x.com", "pw", "A").unwrap().clone();
    let mut notes = notes_state(&store);
    let older = notes.add_new(Some(&user), NewNote::default()).unwrap();
    let newer = notes.add_new(Some(&user), NewNote::default()).unwrap();

    notes.select_note(older);
    notes.load(Some(&user));
    assert_eq!(notes.selected_note_id(), Some(older));

    NoteService::new(JsonStorage::new(&store, "test"))
        .delete_note(user.id, older)
        .unwrap();
    notes.load(Some(&user));
    assert_eq!(notes.selected_note_id(), Some(newer));
}

#[test]
fn save_failure_is_recorded_not_returned() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    let user = auth.register("a@x.com", "pw", "A").unwrap().clone();
    let mut notes = notes_state(&store);

    notes.save(Some(&user), Uuid::new_v4(), NoteUpdate::default());
    assert_eq!(notes.error(), Some("note not found"));

    notes.add_new(Some(&user), NewNote::default()).unwrap();
    assert_eq!(notes.error(), None);
}

#[test]
fn filtered_notes_combine_category_and_search() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    let user = auth.register("a@x.com", "pw", "A").unwrap().clone();
    let mut notes = notes_state(&store);
    notes.add_new(
        Some(&user),
        NewNote::default()
            .with_title("Groceries")
            .with_content("milk, eggs")
            .with_category("Home"),
    );
    notes.add_new(
        Some(&user),
        NewNote::default()
            .with_title("Sprint plan")
            .with_content("Ship the MILKSHAKE feature")
            .with_category("Work"),
    );
    notes.add_new(Some(&user), NewNote::default().with_title("Empty"));

    assert_eq!(notes.filtered_notes().len(), 3);

    notes.set_search("  Milk ");
    let titles: Vec<&str> = notes
        .filtered_notes()
        .iter()
        .map(|note| note.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Sprint plan", "Groceries"]);

    notes.set_category("Home");
    let titles: Vec<&str> = notes
        .filtered_notes()
        .iter()
        .map(|note| note.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Groceries"]);

    notes.set_search("");
    notes.set_category(ALL_CATEGORIES);
    assert_eq!(notes.filtered_notes().len(), 3);
}

#[test]
fn app_state_scopes_notes_to_session_user() {
    let store = MemoryKvStore::new();
    let mut app = AppState::new(&store, "test");
    app.init();
    assert!(app.auth().user().is_none());

    app.register("a@x.com", "pw", "A").unwrap();
    let id = app
        .add_note(NewNote::default().with_title("private"))
        .unwrap();
    app.select_note(id);
    app.save_note(id, NoteUpdate::default().with_content("body"));
    assert_eq!(
        app.notes().selected_note().map(|note| note.content.as_str()),
        Some("body")
    );

    app.logout().unwrap();
    assert!(app.notes().notes().is_empty());
    assert_eq!(app.add_note(NewNote::default()), None);

    app.register("b@x.com", "pw", "B").unwrap();
    assert!(app.notes().notes().is_empty());

    app.login("a@x.com", "pw").unwrap();
    assert_eq!(app.notes().notes().len(), 1);
    app.set_search("PRIV");
    app.set_category("General");
    assert_eq!(app.notes().filtered_notes().len(), 1);

    app.remove_note(id);
    assert!(app.notes().notes().is_empty());
    app.load_notes();
    assert!(app.notes().notes().is_empty());
}

#[test]
fn app_state_restores_session_from_shared_store() {
    let store = MemoryKvStore::new();
    {
        let mut app = AppState::new(&store, "test");
        app.register("a@x.com", "pw", "A").unwrap();
        app.add_note(NewNote::default().with_title("kept"));
    }

    let mut app = AppState::new(&store, "test");
    app.init();
    assert_eq!(
        app.auth().user().map(|user| user.email.as_str()),
        Some("a@x.com")
    );
    assert_eq!(
        app.notes().selected_note().map(|note| note.title.as_str()),
        Some("kept")
    );
}

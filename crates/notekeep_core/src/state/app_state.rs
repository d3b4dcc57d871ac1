//! Composition root wiring auth and notes state over one store.

use crate::model::note::{NewNote, NoteId, NoteUpdate};
use crate::router::{Navigation, RouteGuard};
use crate::service::auth_service::{AuthResult, AuthService};
use crate::service::note_service::NoteService;
use crate::state::auth_state::AuthState;
use crate::state::notes_state::NotesState;
use crate::storage::{JsonStorage, KeyValueStore};

/// Application state shared by every view.
///
/// Forwards the session user into note operations and clears cached notes
/// whenever the session changes.
pub struct AppState<S: KeyValueStore> {
    auth: AuthState<S>,
    notes: NotesState<S>,
}

impl<S: KeyValueStore + Clone> AppState<S> {
    /// Builds both state holders over `store` scoped to `namespace`.
    pub fn new(store: S, namespace: &str) -> Self {
        let auth = AuthState::new(AuthService::new(JsonStorage::new(
            store.clone(),
            namespace,
        )));
        let notes = NotesState::new(NoteService::new(JsonStorage::new(store, namespace)));
        Self { auth, notes }
    }
}

impl<S: KeyValueStore> AppState<S> {
    pub fn auth(&self) -> &AuthState<S> {
        &self.auth
    }

    pub fn notes(&self) -> &NotesState<S> {
        &self.notes
    }

    /// Restores the session and loads its notes.
    pub fn init(&mut self) {
        self.auth.init_from_storage();
        self.notes.load(self.auth.user());
    }

    pub fn login(&mut self, email: &str, password: &str) -> AuthResult<()> {
        self.auth.login(email, password)?;
        self.notes.reset();
        self.notes.load(self.auth.user());
        Ok(())
    }

    pub fn register(&mut self, email: &str, password: &str, display_name: &str) -> AuthResult<()> {
        self.auth.register(email, password, display_name)?;
        self.notes.reset();
        self.notes.load(self.auth.user());
        Ok(())
    }

    pub fn logout(&mut self) -> AuthResult<()> {
        self.auth.logout()?;
        self.notes.reset();
        Ok(())
    }

    /// Resolves `path` through the route guard.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        RouteGuard::resolve(path, &mut self.auth)
    }

    pub fn load_notes(&mut self) {
        self.notes.load(self.auth.user());
    }

    pub fn add_note(&mut self, fields: NewNote) -> Option<NoteId> {
        self.notes.add_new(self.auth.user(), fields)
    }

    pub fn save_note(&mut self, id: NoteId, update: NoteUpdate) {
        self.notes.save(self.auth.user(), id, update);
    }

    pub fn remove_note(&mut self, id: NoteId) {
        self.notes.remove(self.auth.user(), id);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.notes.set_category(category);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.notes.set_search(search);
    }

    pub fn select_note(&mut self, id: NoteId) {
        self.notes.select_note(id);
    }
}

use notekeep_core::{
    AppState, AuthService, AuthState, JsonStorage, MemoryKvStore, Navigation, Route, RouteGuard,
};

fn auth_state(store: &MemoryKvStore) -> AuthState<&MemoryKvStore> {
    AuthState::new(AuthService::new(JsonStorage::new(store, "test")))
}

#[test]
fn anonymous_access_to_notes_redirects_to_login_with_return_path() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);

    let navigation = RouteGuard::resolve("/app?tab=2", &mut auth);
    assert!(auth.is_initialized());
    assert_eq!(
        navigation,
        Navigation::Redirect {
            to: Route::Login,
            return_to: Some("/app?tab=2".to_string()),
        }
    );
    assert_eq!(navigation.location(), "/login?redirect=%2Fapp%3Ftab%3D2");
}

#[test]
fn anonymous_access_to_public_routes_is_allowed() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    assert_eq!(
        RouteGuard::resolve("/login", &mut auth),
        Navigation::Allow(Route::Login)
    );
    assert_eq!(
        RouteGuard::resolve("/register", &mut auth),
        Navigation::Allow(Route::Register)
    );
}

#[test]
fn root_and_unknown_paths_resolve_through_notes_route() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    for path in ["/", "/does/not/exist"] {
        assert_eq!(
            RouteGuard::resolve(path, &mut auth),
            Navigation::Redirect {
                to: Route::Login,
                return_to: Some("/app".to_string()),
            }
        );
    }

    auth.register("a@x.com", "pw", "A").unwrap();
    for path in ["/", "/does/not/exist"] {
        let navigation = RouteGuard::resolve(path, &mut auth);
        assert_eq!(navigation.route(), Route::Notes);
        assert_eq!(navigation.location(), "/app");
    }
}

#[test]
fn signed_in_users_skip_public_routes() {
    let store = MemoryKvStore::new();
    let mut auth = auth_state(&store);
    auth.register("a@x.com", "pw", "A").unwrap();

    assert_eq!(
        RouteGuard::resolve("/login", &mut auth),
        Navigation::Redirect {
            to: Route::Notes,
            return_to: None,
        }
    );
    assert_eq!(
        RouteGuard::resolve("/app", &mut auth),
        Navigation::Allow(Route::Notes)
    );
}

#[test]
fn guard_initializes_from_persisted_session() {
    let store = MemoryKvStore::new();
    auth_state(&store).register("a@x.com", "pw", "A").unwrap();

    let mut app = AppState::new(&store, "test");
    assert_eq!(app.navigate("/app"), Navigation::Allow(Route::Notes));
    assert!(app.auth().is_initialized());

    app.logout().unwrap();
    assert_eq!(app.navigate("/app").route(), Route::Login);
}

//! Session user holder wrapping `AuthService`.

use crate::model::user::User;
use crate::service::auth_service::{AuthResult, AuthService};
use crate::storage::KeyValueStore;

/// Auth state consumed by views and the route guard.
pub struct AuthState<S: KeyValueStore> {
    service: AuthService<S>,
    user: Option<User>,
    loading: bool,
    initialized: bool,
    error: Option<String>,
}

impl<S: KeyValueStore> AuthState<S> {
    pub fn new(service: AuthService<S>) -> Self {
        Self {
            service,
            user: None,
            loading: false,
            initialized: false,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Message of the last failed login/register/logout, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loads the session user once. Later calls are no-ops.
    pub fn init_from_storage(&mut self) {
        if self.initialized {
            return;
        }
        self.loading = true;
        self.user = self.service.current_user();
        self.initialized = true;
        self.loading = false;
    }

    /// Logs in and stores the user; failures are recorded and returned.
    pub fn login(&mut self, email: &str, password: &str) -> AuthResult<&User> {
        self.loading = true;
        self.error = None;
        let result = self.service.login(email, password);
        self.finish_sign_in(result)
    }

    /// Registers, logs in, and stores the user; failures are recorded and
    /// returned.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<&User> {
        self.loading = true;
        self.error = None;
        let result = self.service.register(email, password, display_name);
        self.finish_sign_in(result)
    }

    /// Clears the session and the cached user.
    ///
    /// On failure the user stays cached and the error is recorded.
    pub fn logout(&mut self) -> AuthResult<()> {
        if let Err(err) = self.service.logout() {
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.user = None;
        Ok(())
    }

    fn finish_sign_in(&mut self, result: AuthResult<User>) -> AuthResult<&User> {
        self.loading = false;
        match result {
            Ok(user) => {
                self.initialized = true;
                let user: &User = self.user.insert(user);
                Ok(user)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

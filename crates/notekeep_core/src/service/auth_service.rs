//! Registration, login and session pointer management.
//!
//! # Responsibility
//! - Own the persisted user list and the single session pointer.
//! - Map credential failures to stable, user-displayable errors.
//!
//! # Invariants
//! - Emails are unique under case-insensitive comparison.
//! - The session pointer is set only after the user record is persisted.
//! - Logs never carry emails or passwords.
//!
//! # Security
//! `encode_password` is a reversible base64 encoding kept for compatibility
//! with existing stores. It provides no protection for stored credentials.

use crate::model::now_epoch_ms;
use crate::model::user::{User, UserId};
use crate::storage::{keys, JsonStorage, KeyValueStore, RecordList, StorageError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AuthResult<T> = Result<T, AuthError>;

/// Service error for auth use-cases.
#[derive(Debug)]
pub enum AuthError {
    /// Another user already owns the email (case-insensitive).
    EmailAlreadyRegistered,
    /// Unknown email or wrong password. Deliberately indistinguishable.
    InvalidCredentials,
    Storage(StorageError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailAlreadyRegistered => write!(f, "email already registered"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Auth service over namespaced JSON storage.
pub struct AuthService<S: KeyValueStore> {
    storage: JsonStorage<S>,
}

impl<S: KeyValueStore> AuthService<S> {
    pub fn new(storage: JsonStorage<S>) -> Self {
        Self { storage }
    }

    /// Registers a new user and logs them in.
    ///
    /// # Errors
    /// - `AuthError::EmailAlreadyRegistered` on a case-insensitive email match.
    pub fn register(&self, email: &str, password: &str, display_name: &str) -> AuthResult<User> {
        let mut users = self.users();
        if users.iter().any(|user| user.has_email(email)) {
            warn!("event=auth_register module=auth status=rejected error_code=duplicate_email");
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let user = User::new(
            email,
            display_name,
            encode_password(password),
            now_epoch_ms(),
        );
        users.push(user.clone());
        self.storage.set(keys::USERS, &users)?;
        self.set_session(user.id)?;

        info!(
            "event=auth_register module=auth status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Verifies credentials and points the session at the matching user.
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` for an unknown email or wrong password.
    pub fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let encoded = encode_password(password);
        let user = self
            .users()
            .iter()
            .find(|user| user.has_email(email))
            .filter(|user| user.password_hash == encoded)
            .cloned();

        let Some(user) = user else {
            warn!("event=auth_login module=auth status=rejected error_code=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        self.set_session(user.id)?;
        info!("event=auth_login module=auth status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Clears the session pointer. Succeeds when no session exists.
    pub fn logout(&self) -> AuthResult<()> {
        self.storage.remove(keys::SESSION)?;
        info!("event=auth_logout module=auth status=ok");
        Ok(())
    }

    /// Returns the user referenced by the session pointer.
    ///
    /// `None` when there is no session or the referenced user is gone.
    pub fn current_user(&self) -> Option<User> {
        let user_id: Option<UserId> = self.storage.get(keys::SESSION, None);
        let user_id = user_id?;
        self.users().iter().find(|user| user.id == user_id).cloned()
    }

    fn users(&self) -> RecordList<User> {
        self.storage.get_records(keys::USERS)
    }

    fn set_session(&self, user_id: UserId) -> AuthResult<()> {
        self.storage.set(keys::SESSION, &user_id)?;
        Ok(())
    }
}

/// Encodes a password for storage as base64 of its UTF-8 bytes.
///
/// Reversible and unsalted: do not treat the output as a secret.
pub fn encode_password(password: &str) -> String {
    STANDARD.encode(password.as_bytes())
}

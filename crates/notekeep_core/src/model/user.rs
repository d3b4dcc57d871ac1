//! Registered user record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a registered user.
pub type UserId = Uuid;

/// Account created at registration. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Stored as entered; uniqueness is case-insensitive.
    pub email: String,
    pub display_name: String,
    /// Reversible encoding, see `service::auth_service::encode_password`.
    pub password_hash: String,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl User {
    /// Creates a user with a freshly generated id.
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            display_name: display_name.into(),
            password_hash: password_hash.into(),
            created_at,
        }
    }

    /// Case-insensitive email comparison used for lookup and uniqueness.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

//! Signed-in user type.

use serde::{Deserialize, Serialize};

use aarsun_core::UserId;

/// The WordPress user behind the current session.
///
/// Persisted to local storage as a JSON blob under
/// [`keys::USER_DATA`](super::keys::USER_DATA), so the field names use the
/// same camelCase layout the mobile app has always written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// WordPress user ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// First name (empty when not set).
    #[serde(default)]
    pub first_name: String,
    /// Last name (empty when not set).
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// Name to greet the user with: display name, else username.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

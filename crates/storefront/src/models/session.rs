//! Session-related storage keys.

/// Local storage keys for the persisted session.
///
/// Both values are plain strings: the bearer token as issued, and the
/// [`User`](super::User) serialized as JSON.
pub mod keys {
    /// Key for the bearer token issued at login.
    pub const USER_TOKEN: &str = "userToken";

    /// Key for the serialized signed-in user.
    pub const USER_DATA: &str = "userData";
}

//! Session state: the signed-in user and their bearer token.
//!
//! The session is persisted to [`LocalStorage`] under the
//! [`keys`](crate::models::keys) and restored on startup. Login and
//! registration never return `Err`; failures come back as
//! [`AuthOutcome::Failure`] carrying a message for the shopper.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{User, keys};
use crate::storage::{LocalStorage, StorageError};
use crate::woocommerce::{AuthSession, RegisterRequest, WooClient};

/// Message returned when the login form is incomplete.
pub const MISSING_CREDENTIALS: &str = "Please enter both username and password";

/// Result of a login or registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The session is now authenticated.
    Success,
    /// The attempt failed; the session is unchanged.
    Failure(String),
}

impl AuthOutcome {
    /// Whether the attempt succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure(message) => Some(message),
        }
    }
}

/// Authenticated identity of the current run.
pub struct SessionState {
    client: WooClient,
    storage: Arc<dyn LocalStorage>,
    user: Option<User>,
    token: Option<SecretString>,
    loading: bool,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl SessionState {
    /// New, unauthenticated session. Call [`restore`](Self::restore) before use.
    #[must_use]
    pub fn new(client: WooClient, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            client,
            storage,
            user: None,
            token: None,
            loading: true,
        }
    }

    /// The signed-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The bearer token of the signed-in user.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the startup restore has not run yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Load a persisted session from storage.
    ///
    /// A session is restored only when both the token and a parseable user
    /// are stored. Anything else starts unauthenticated; read errors and
    /// corrupt data are logged and otherwise ignored.
    #[instrument(skip(self))]
    pub async fn restore(&mut self) {
        match self.load_persisted().await {
            Ok(Some((token, user))) => {
                info!(user_id = %user.id, "Session restored");
                set_sentry_user(&user.id, Some(&user.email));
                self.install(token, user);
            }
            Ok(None) => info!("No stored session"),
            Err(e) => warn!(error = %e, "Ignoring unreadable stored session"),
        }
        self.loading = false;
    }

    async fn load_persisted(&self) -> Result<Option<(SecretString, User)>, StorageError> {
        let token = self.storage.get_item(keys::USER_TOKEN).await?;
        let user = self.storage.get_item(keys::USER_DATA).await?;

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };
        if token.is_empty() {
            return Ok(None);
        }

        let user: User = serde_json::from_str(&user)?;
        Ok(Some((SecretString::from(token), user)))
    }

    /// Sign in with username and password.
    ///
    /// The username is trimmed. Blank fields fail without a network call.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> AuthOutcome {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return AuthOutcome::Failure(MISSING_CREDENTIALS.to_string());
        }

        let result = self.client.login(username, password).await;
        self.complete(result).await
    }

    /// Create an account and sign in with it.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&mut self, request: &RegisterRequest) -> AuthOutcome {
        if request.username.trim().is_empty() || request.password.expose_secret().trim().is_empty()
        {
            return AuthOutcome::Failure(MISSING_CREDENTIALS.to_string());
        }

        let result = self.client.register(request).await;
        self.complete(result).await
    }

    async fn complete(
        &mut self,
        result: Result<AuthSession, crate::woocommerce::WooError>,
    ) -> AuthOutcome {
        let session = match result {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Sign-in failed");
                return AuthOutcome::Failure(e.user_message());
            }
        };

        if let Err(e) = self.persist(&session).await {
            warn!(error = %e, "Could not persist session");
            return AuthOutcome::Failure(e.to_string());
        }

        info!(user_id = %session.user.id, "User logged in");
        set_sentry_user(&session.user.id, Some(&session.user.email));
        self.install(session.token, session.user);
        AuthOutcome::Success
    }

    async fn persist(&self, session: &AuthSession) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user)?;
        self.storage
            .set_item(keys::USER_TOKEN, session.token.expose_secret())
            .await?;
        if let Err(e) = self.storage.set_item(keys::USER_DATA, &user).await {
            // Never leave a token without its user.
            if let Err(cleanup) = self.storage.remove_item(keys::USER_TOKEN).await {
                warn!(error = %cleanup, "Could not remove orphaned token");
            }
            return Err(e);
        }
        Ok(())
    }

    fn install(&mut self, token: SecretString, user: User) {
        self.client.set_auth_token(Some(token.clone()));
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Sign out. In-memory state is always cleared; storage errors are logged.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        for key in [keys::USER_TOKEN, keys::USER_DATA] {
            if let Err(e) = self.storage.remove_item(key).await {
                warn!(key, error = %e, "Could not remove stored session value");
            }
        }

        self.user = None;
        self.token = None;
        self.client.set_auth_token(None);
        clear_sentry_user();
        info!("Logged out");
    }
}

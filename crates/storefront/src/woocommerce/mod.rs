//! WooCommerce REST API adapter.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`; every body is JSON
//! - WooCommerce is source of truth - NO local sync, direct API calls
//! - No response caching, no retries: each call is attempted exactly once
//!
//! # Endpoints
//!
//! - `<store>/wp-json/wc/v3` - products, categories, customers
//! - `<store>/wp-json/jwt-auth/v1/token` - JWT issuing (login)
//! - `<store>/wp-json/wp/v2/users/me` - profile of the token's owner
//!
//! # Example
//!
//! ```rust,ignore
//! use aarsun_storefront::woocommerce::{ListParams, WooClient};
//!
//! let client = WooClient::new(&config);
//!
//! // First page of a category
//! let products = client
//!     .get_products(&ListParams::new().filter("category", "17"))
//!     .await?;
//!
//! // Sign in; the session layer injects the token afterwards
//! let session = client.login("bob", "hunter2").await?;
//! client.set_auth_token(Some(session.token.clone()));
//! ```

mod auth;
mod client;
pub mod types;

pub use auth::{AuthPolicy, AuthScheme};
pub use client::WooClient;
pub use types::*;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the WooCommerce API.
#[derive(Debug, Error)]
pub enum WooError {
    /// Credentials rejected, or the token endpoint refused the login.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The operation needs a signed-in user and no token is set.
    #[error("Authentication required")]
    AuthRequired,

    /// Account creation rejected (duplicate username or email, etc.).
    #[error("Registration failed: {0}")]
    Registration(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure (DNS, TLS, connection reset, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl WooError {
    /// Message suitable for showing inline to the shopper.
    ///
    /// Upstream messages are returned as-is, without the variant prefix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(message)
            | Self::Registration(message)
            | Self::NotFound(message)
            | Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Error body shape shared by WordPress and WooCommerce.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// Pull the most specific message out of a non-success response body.
///
/// Prefers the JSON `message`, then `code`, then the raw body text, and
/// finally a generic status message.
fn upstream_error_message(status: StatusCode, body: &str) -> String {
    let generic = || format!("HTTP error! status: {}", status.as_u16());

    match serde_json::from_str::<UpstreamErrorBody>(body) {
        Ok(parsed) => parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| parsed.code.filter(|c| !c.trim().is_empty()))
            .unwrap_or_else(generic),
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                generic()
            } else {
                text.chars().take(200).collect()
            }
        }
    }
}

//! WooCommerce REST client implementation.
//!
//! One `reqwest` client per store, shared through an `Arc` so clones are
//! cheap and all observe the same injected bearer token.

mod conversions;
mod raw;

use std::sync::{Arc, PoisonError, RwLock};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use aarsun_core::{CustomerId, ProductId};

use crate::config::{StoreConfig, basic_credentials};
use crate::woocommerce::auth::{AuthPolicy, AuthScheme};
use crate::woocommerce::types::{
    AuthSession, Category, Customer, ListParams, Order, Product, RegisterRequest,
};
use crate::woocommerce::{WooError, upstream_error_message};

use conversions::{convert_category, convert_customer, convert_product, convert_user};
use raw::{RawCategory, RawProfile, RawToken};

// =============================================================================
// WooClient
// =============================================================================

/// Client for the WooCommerce REST API and the WordPress JWT plugin.
///
/// Catalog reads authenticate with the application key/secret; account
/// endpoints use the bearer token injected by the session layer. Which
/// header goes where is decided by the configured [`AuthPolicy`].
#[derive(Clone)]
pub struct WooClient {
    inner: Arc<WooClientInner>,
}

struct WooClientInner {
    client: reqwest::Client,
    store_url: String,
    base_url: String,
    /// Base64 of `consumer_key:consumer_secret`.
    basic_auth: SecretString,
    auth_policy: AuthPolicy,
    placeholder_image: String,
    auth_token: RwLock<Option<SecretString>>,
}

/// Body of the JWT token request.
#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Body of the customer creation request.
#[derive(Serialize)]
struct CreateCustomerBody<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
}

impl WooClient {
    /// Create a new client for the configured store.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let woo = &config.woocommerce;
        let store_url = woo.store_url.trim_end_matches('/').to_string();
        let base_url = format!("{store_url}/wp-json/wc/v3");
        let basic_auth = SecretString::from(BASE64.encode(basic_credentials(woo)));

        Self {
            inner: Arc::new(WooClientInner {
                client: reqwest::Client::new(),
                store_url,
                base_url,
                basic_auth,
                auth_policy: woo.auth_policy,
                placeholder_image: config.placeholder_image.clone(),
                auth_token: RwLock::new(None),
            }),
        }
    }

    /// Base URL of the `wc/v3` namespace.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The header policy this client was built with.
    #[must_use]
    pub fn auth_policy(&self) -> AuthPolicy {
        self.inner.auth_policy
    }

    /// Inject (or clear) the bearer token used for account endpoints.
    pub fn set_auth_token(&self, token: Option<SecretString>) {
        *self
            .inner
            .auth_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Whether a bearer token is currently injected.
    #[must_use]
    pub fn has_auth_token(&self) -> bool {
        self.inner
            .auth_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn auth_token(&self) -> Option<SecretString> {
        self.inner
            .auth_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `Authorization` header value for a request to `path`.
    fn authorization_for(&self, path: &str) -> String {
        let token = self.auth_token();
        match (
            self.inner.auth_policy.scheme_for(path, token.is_some()),
            token,
        ) {
            (AuthScheme::Bearer, Some(token)) => format!("Bearer {}", token.expose_secret()),
            _ => format!("Basic {}", self.inner.basic_auth.expose_secret()),
        }
    }

    fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url, WooError> {
        let mut url = Url::parse(&format!("{}{path}", self.inner.base_url))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET from the `wc/v3` namespace and return the status and body text.
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<(StatusCode, String), WooError> {
        let url = self.endpoint(path, query)?;
        debug!(method = "GET", url = %url, "WooCommerce request");

        let response = self
            .inner
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .header("Authorization", self.authorization_for(path))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "WooCommerce response");
        Ok((status, text))
    }

    /// GET a `wc/v3` resource and deserialize the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, WooError> {
        let (status, text) = self.get(path, query).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WooError::NotFound(upstream_error_message(status, &text)));
        }
        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path,
                body = %text.chars().take(500).collect::<String>(),
                "WooCommerce API returned non-success status"
            );
            return Err(WooError::Status {
                status: status.as_u16(),
                message: upstream_error_message(status, &text),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse WooCommerce response"
            );
            WooError::Parse(e)
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Exchange credentials for a bearer token and load the user's profile.
    ///
    /// The token is returned, not injected; the session layer decides when
    /// to install it.
    ///
    /// # Errors
    ///
    /// Returns `WooError::Auth` if the token endpoint or the profile request
    /// answers with a non-success status.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, WooError> {
        let url = format!("{}/wp-json/jwt-auth/v1/token", self.inner.store_url);
        debug!(method = "POST", url = %url, "WooCommerce request");
        let response = self
            .inner
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_vec(&TokenRequest { username, password })?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "JWT token response");

        if !status.is_success() {
            let message = upstream_error_message(status, &text);
            tracing::warn!(status = %status, message = %message, "Login rejected");
            return Err(WooError::Auth(message));
        }

        let token: RawToken = serde_json::from_str(&text)?;

        let url = format!("{}/wp-json/wp/v2/users/me?context=edit", self.inner.store_url);
        debug!(method = "GET", url = %url, "WooCommerce request");
        let response = self
            .inner
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", token.token))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "Profile response");

        if !status.is_success() {
            let message = upstream_error_message(status, &text);
            tracing::warn!(status = %status, message = %message, "Profile fetch rejected");
            return Err(WooError::Auth(message));
        }

        let profile: RawProfile = serde_json::from_str(&text)?;
        let user = convert_user(profile, &token);

        Ok(AuthSession {
            token: SecretString::from(token.token),
            user,
        })
    }

    /// Create a customer account, then log in with the same credentials.
    ///
    /// # Errors
    ///
    /// Returns `WooError::Registration` if the account is rejected, or any
    /// error from the follow-up [`login`](Self::login).
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, WooError> {
        let password = request.password.expose_secret();
        let body = CreateCustomerBody {
            email: &request.email,
            username: &request.username,
            password,
            first_name: &request.first_name,
            last_name: &request.last_name,
        };

        let url = self.endpoint("/customers", &[])?;
        debug!(method = "POST", url = %url, "WooCommerce request");
        let response = self
            .inner
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header(
                "Authorization",
                format!("Basic {}", self.inner.basic_auth.expose_secret()),
            )
            .body(serde_json::to_vec(&body)?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "Customer creation response");

        if !status.is_success() {
            let message = upstream_error_message(status, &text);
            tracing::warn!(status = %status, message = %message, "Registration rejected");
            return Err(WooError::Registration(message));
        }

        self.login(&request.username, password).await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record cannot be read.
    #[instrument(skip(self))]
    pub async fn get_products(&self, params: &ListParams) -> Result<Vec<Product>, WooError> {
        let records: Vec<serde_json::Value> =
            self.get_json("/products", &params.query_pairs()).await?;

        let products = records
            .into_iter()
            .map(|record| convert_product(record, &self.inner.placeholder_image))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `WooError::NotFound` if no product has this ID.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, WooError> {
        let record: serde_json::Value = self.get_json(&format!("/products/{id}"), &[]).await?;
        Ok(convert_product(record, &self.inner.placeholder_image)?)
    }

    /// List product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self))]
    pub async fn get_categories(&self, params: &ListParams) -> Result<Vec<Category>, WooError> {
        let records: Vec<RawCategory> = self
            .get_json("/products/categories", &params.query_pairs())
            .await?;

        Ok(records.into_iter().map(convert_category).collect())
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Fetch a customer record. Requires an injected bearer token.
    ///
    /// # Errors
    ///
    /// Returns `WooError::AuthRequired` without a token, otherwise any
    /// request error.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: CustomerId) -> Result<Customer, WooError> {
        if !self.has_auth_token() {
            return Err(WooError::AuthRequired);
        }

        let record: serde_json::Value = self.get_json(&format!("/customers/{id}"), &[]).await?;
        Ok(convert_customer(record)?)
    }

    /// Order history of the signed-in user. Requires an injected bearer token.
    ///
    /// Always empty for now.
    ///
    /// # Errors
    ///
    /// Returns `WooError::AuthRequired` without a token.
    #[instrument(skip(self))]
    pub async fn get_user_orders(&self) -> Result<Vec<Order>, WooError> {
        if !self.has_auth_token() {
            return Err(WooError::AuthRequired);
        }
        Ok(Vec::new())
    }
}

impl std::fmt::Debug for WooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooClient")
            .field("base_url", &self.inner.base_url)
            .field("auth_policy", &self.inner.auth_policy)
            .field("has_auth_token", &self.has_auth_token())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::WooCommerceConfig;

    fn client(policy: AuthPolicy) -> WooClient {
        let woo = WooCommerceConfig::new("https://shop.test/", "ck_live", "cs_live")
            .with_auth_policy(policy);
        WooClient::new(&StoreConfig::new(woo))
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        assert_eq!(
            client(AuthPolicy::CatalogBasic).base_url(),
            "https://shop.test/wp-json/wc/v3"
        );
    }

    #[test]
    fn test_basic_header_encodes_key_and_secret() {
        let client = client(AuthPolicy::CatalogBasic);
        assert_eq!(
            client.authorization_for("/products"),
            format!("Basic {}", BASE64.encode("ck_live:cs_live"))
        );
    }

    #[test]
    fn test_token_injection_changes_account_header() {
        let client = client(AuthPolicy::CatalogBasic);
        client.set_auth_token(Some(SecretString::from("jwt-abc")));

        assert!(client.has_auth_token());
        assert_eq!(client.authorization_for("/customers/5"), "Bearer jwt-abc");
        assert!(client.authorization_for("/products").starts_with("Basic "));

        // Clones share the token slot.
        let clone = client.clone();
        clone.set_auth_token(None);
        assert!(!client.has_auth_token());
        assert!(client.authorization_for("/customers/5").starts_with("Basic "));
    }

    #[test]
    fn test_prefer_bearer_applies_to_catalog() {
        let client = client(AuthPolicy::PreferBearer);
        client.set_auth_token(Some(SecretString::from("jwt-abc")));
        assert_eq!(client.authorization_for("/products"), "Bearer jwt-abc");
    }

    #[test]
    fn test_endpoint_query_order() {
        let client = client(AuthPolicy::CatalogBasic);
        let params = ListParams::new().filter("category", "17");
        let url = client.endpoint("/products", &params.query_pairs()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.test/wp-json/wc/v3/products?per_page=100&page=1&category=17"
        );

        let url = client.endpoint("/products/3", &[]).unwrap();
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn test_account_calls_require_token() {
        let client = client(AuthPolicy::CatalogBasic);
        assert!(matches!(
            client.get_user(CustomerId::new(5)).await,
            Err(WooError::AuthRequired)
        ));
        assert!(matches!(
            client.get_user_orders().await,
            Err(WooError::AuthRequired)
        ));

        client.set_auth_token(Some(SecretString::from("jwt-abc")));
        assert!(client.get_user_orders().await.unwrap().is_empty());
    }
}

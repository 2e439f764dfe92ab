//! Integration tests for the Aarsun storefront.
//!
//! Every test runs against a `wiremock` server standing in for the
//! WooCommerce store, so no credentials or network access are needed.
//!
//! ```bash
//! cargo test -p aarsun-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Product and category listing, normalization, errors
//! - `auth_policy` - Which `Authorization` header each endpoint receives
//! - `session` - Login, registration, restore and logout
//! - `checkout` - Cart and simulated order placement end to end
//! - `logging` - Outbound request logging

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aarsun_storefront::config::{StoreConfig, WooCommerceConfig};
use aarsun_storefront::storage::{LocalStorage, MemoryStorage};
use aarsun_storefront::state::Storefront;
use aarsun_storefront::woocommerce::{AuthPolicy, WooClient};

/// Consumer key used against the mock store.
pub const CONSUMER_KEY: &str = "ck_integration";
/// Consumer secret used against the mock store.
pub const CONSUMER_SECRET: &str = "cs_integration";
/// Bearer token the mock JWT endpoint issues.
pub const TOKEN: &str = "jwt-integration-token";

/// Expected `Authorization` value for application credentials.
#[must_use]
pub fn basic_header() -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{CONSUMER_KEY}:{CONSUMER_SECRET}"))
    )
}

/// Expected `Authorization` value for the issued token.
#[must_use]
pub fn bearer_header() -> String {
    format!("Bearer {TOKEN}")
}

/// Store configuration pointing at `server`.
#[must_use]
pub fn store_config(server: &MockServer, policy: AuthPolicy) -> StoreConfig {
    let woo = WooCommerceConfig::new(&server.uri(), CONSUMER_KEY, CONSUMER_SECRET)
        .with_auth_policy(policy);
    StoreConfig::new(woo)
}

/// Client for `server`.
#[must_use]
pub fn client(server: &MockServer, policy: AuthPolicy) -> WooClient {
    WooClient::new(&store_config(server, policy))
}

/// Storefront for `server` with fresh in-memory storage.
pub async fn storefront(server: &MockServer) -> (Storefront, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let shared: Arc<dyn LocalStorage> = storage.clone();
    let storefront = Storefront::init(store_config(server, AuthPolicy::default()), shared).await;
    (storefront, storage)
}

/// A WooCommerce product record.
#[must_use]
pub fn product_json(id: u64, name: &str, price: &str, category: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "images": [{"id": id * 10, "src": format!("https://cdn.test/{id}.jpg")}],
        "description": format!("<p>{name}</p>"),
        "short_description": "",
        "categories": [{"id": 1, "name": category, "slug": category.to_lowercase()}],
        "average_rating": "4.00",
        "stock_status": "instock"
    })
}

/// Mount a working JWT login for `username` (WordPress user 5).
pub async fn mount_login(server: &MockServer, username: &str) {
    Mock::given(method("POST"))
        .and(path("/wp-json/jwt-auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": TOKEN,
            "user_email": format!("{username}@example.com"),
            "user_nicename": username,
            "user_display_name": "Bob Carpenter"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "username": username,
            "name": "Bob Carpenter",
            "email": format!("{username}@example.com"),
            "first_name": "Bob",
            "last_name": "Carpenter"
        })))
        .mount(server)
        .await;
}

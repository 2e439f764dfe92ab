//! Domain types for the WooCommerce API.
//!
//! These types provide a stable shape for the rest of the storefront,
//! separate from the loosely-typed upstream JSON they are normalized from.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use aarsun_core::{CategoryId, CustomerId, OrderId, Price, ProductId, StockStatus};

pub use crate::models::User;

// =============================================================================
// Catalog Types
// =============================================================================

/// A product in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Current price.
    pub price: Price,
    /// Primary image URL (placeholder when the product has none).
    pub image: String,
    /// Every image URL, in upstream order.
    pub images: Vec<String>,
    /// Long description, else the short description, else empty.
    pub description: String,
    /// Name of the first assigned category, else `"Uncategorized"`.
    pub category: String,
    /// Average rating (0 when unrated).
    pub rating: f64,
    /// Stock status.
    pub stock_status: StockStatus,
    /// The upstream record as received.
    pub raw: serde_json::Value,
}

impl Product {
    /// Whether the product is available for purchase.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_status.is_in_stock()
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Description (empty when not set).
    pub description: String,
    /// Category image URL.
    pub image: Option<String>,
    /// Number of products in the category.
    pub count: u64,
}

// =============================================================================
// Account Types
// =============================================================================

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Bearer token issued by the JWT endpoint.
    pub token: SecretString,
    /// Profile of the authenticated user.
    pub user: User,
}

/// Input for creating a customer account.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Login name.
    pub username: String,
    /// Password (also used for the follow-up login).
    pub password: SecretString,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

/// A WooCommerce customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer ID (same as the WordPress user ID).
    pub id: CustomerId,
    /// Account email.
    pub email: String,
    /// Login name.
    pub username: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Gravatar URL.
    pub avatar_url: Option<String>,
    /// The upstream record as received.
    pub raw: serde_json::Value,
}

/// A past order.
///
/// Order history is not served to the app yet, so lists of these are
/// always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Upstream status (e.g. `processing`).
    pub status: String,
    /// Order total.
    pub total: Price,
}

// =============================================================================
// Request Types
// =============================================================================

/// Paging and filters for list endpoints.
///
/// `per_page` and `page` are controlled (defaults 100 and 1, and a zero
/// counts as unset); every other filter key is passed to WooCommerce verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    per_page: Option<u32>,
    page: Option<u32>,
    filters: Vec<(String, String)>,
}

impl ListParams {
    /// Page size used when none is given.
    pub const DEFAULT_PER_PAGE: u32 = 100;
    /// Page used when none is given.
    pub const DEFAULT_PAGE: u32 = 1;

    /// Default paging, no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Set the page number (1-based).
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Add a pass-through filter (e.g. `category`, `search`, `orderby`).
    ///
    /// The controlled keys `per_page` and `page` are routed to their
    /// setters; unparseable values for them are ignored.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match key.as_str() {
            "per_page" => {
                if let Ok(n) = value.trim().parse() {
                    self.per_page = Some(n);
                }
            }
            "page" => {
                if let Ok(n) = value.trim().parse() {
                    self.page = Some(n);
                }
            }
            _ => self.filters.push((key, value)),
        }
        self
    }

    /// Query pairs in request order: `per_page`, `page`, then filters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        pairs.push((
            "per_page".to_string(),
            self.per_page
                .filter(|&n| n > 0)
                .unwrap_or(Self::DEFAULT_PER_PAGE)
                .to_string(),
        ));
        pairs.push((
            "page".to_string(),
            self.page
                .filter(|&n| n > 0)
                .unwrap_or(Self::DEFAULT_PAGE)
                .to_string(),
        ));
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

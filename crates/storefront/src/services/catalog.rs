//! Catalog browsing helpers.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use crate::woocommerce::{ListParams, Product, WooClient, WooError};

/// Number of products shown as featured.
pub const FEATURED_COUNT: u32 = 4;

/// Category selection for a product list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose category name matches exactly.
    Named(String),
}

impl CategoryFilter {
    /// Whether `product` passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => product.category == *name,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(name: &str) -> Self {
        if name == "All" {
            Self::All
        } else {
            Self::Named(name.to_string())
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Products passing `filter`, in their original order.
#[must_use]
pub fn filter_by_category(products: &[Product], filter: &CategoryFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .cloned()
        .collect()
}

/// The first page of [`FEATURED_COUNT`] products.
///
/// # Errors
///
/// Returns any error from the product listing.
#[instrument(skip(client))]
pub async fn featured_products(client: &WooClient) -> Result<Vec<Product>, WooError> {
    client
        .get_products(&ListParams::new().per_page(FEATURED_COUNT))
        .await
}

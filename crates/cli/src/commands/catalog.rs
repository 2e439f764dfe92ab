//! Catalog browsing commands.

use aarsun_core::ProductId;
use aarsun_storefront::services::{CategoryFilter, featured_products, filter_by_category};
use aarsun_storefront::state::Storefront;
use aarsun_storefront::woocommerce::{ListParams, WooError};

use super::{CliError, print_json};

/// Log a hint for the usual causes of a failed catalog read.
fn log_catalog_failure(err: &WooError) {
    tracing::error!(
        error = %err,
        "Could not load the catalog. Check WOO_CONSUMER_KEY and WOO_CONSUMER_SECRET, \
         that the store at WOO_STORE_URL is reachable, and your network connection."
    );
}

fn list_params(per_page: Option<u32>, page: Option<u32>) -> ListParams {
    let mut params = ListParams::new();
    if let Some(per_page) = per_page {
        params = params.per_page(per_page);
    }
    if let Some(page) = page {
        params = params.page(page);
    }
    params
}

/// `aarsun products`
pub async fn products(
    storefront: &Storefront,
    category: Option<String>,
    per_page: Option<u32>,
    page: Option<u32>,
) -> Result<(), CliError> {
    let products = storefront
        .client()
        .get_products(&list_params(per_page, page))
        .await
        .inspect_err(log_catalog_failure)?;

    let filter = category
        .as_deref()
        .map_or(CategoryFilter::All, CategoryFilter::from);

    print_json(&filter_by_category(&products, &filter))
}

/// `aarsun product <ID>`
pub async fn product(storefront: &Storefront, id: ProductId) -> Result<(), CliError> {
    let product = storefront
        .client()
        .get_product(id)
        .await
        .inspect_err(|e| {
            if !matches!(e, WooError::NotFound(_)) {
                log_catalog_failure(e);
            }
        })?;
    print_json(&product)
}

/// `aarsun categories`
pub async fn categories(
    storefront: &Storefront,
    per_page: Option<u32>,
    page: Option<u32>,
) -> Result<(), CliError> {
    let categories = storefront
        .client()
        .get_categories(&list_params(per_page, page))
        .await
        .inspect_err(log_catalog_failure)?;
    print_json(&categories)
}

/// `aarsun featured`
pub async fn featured(storefront: &Storefront) -> Result<(), CliError> {
    let products = featured_products(storefront.client())
        .await
        .inspect_err(log_catalog_failure)?;
    print_json(&products)
}

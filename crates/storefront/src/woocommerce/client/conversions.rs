//! Upstream record conversion functions.

use aarsun_core::{CategoryId, CustomerId, Price, ProductId, StockStatus, UserId};

use crate::woocommerce::types::{Category, Customer, Product, User};

use super::raw::{RawCategory, RawCustomer, RawProduct, RawProfile, RawToken};

/// Category name for products without any category assignment.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// First non-blank value, else empty.
fn first_non_blank(candidates: [Option<String>; 2]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}

// =============================================================================
// Catalog Conversions
// =============================================================================

/// Normalize an upstream product record.
///
/// # Errors
///
/// Returns an error if the record has no numeric `id`.
pub fn convert_product(
    value: serde_json::Value,
    placeholder_image: &str,
) -> Result<Product, serde_json::Error> {
    let raw: RawProduct = serde_json::from_value(value.clone())?;

    let images: Vec<String> = raw
        .images
        .unwrap_or_default()
        .into_iter()
        .filter_map(|img| img.src)
        .filter(|src| !src.is_empty())
        .collect();

    let image = images
        .first()
        .cloned()
        .unwrap_or_else(|| placeholder_image.to_string());

    let category = raw
        .categories
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.name)
        .unwrap_or_else(|| UNCATEGORIZED.to_string());

    let rating = raw
        .average_rating
        .and_then(|r| r.as_text().trim().parse::<f64>().ok())
        .filter(|r| r.is_finite())
        .unwrap_or(0.0);

    Ok(Product {
        id: ProductId::new(raw.id),
        name: raw.name.unwrap_or_default(),
        price: raw
            .price
            .map_or(Price::ZERO, |p| Price::parse_lenient(&p.as_text())),
        image,
        images,
        description: first_non_blank([raw.description, raw.short_description]),
        category,
        rating,
        stock_status: StockStatus::from_upstream(raw.stock_status.as_deref()),
        raw: value,
    })
}

/// Normalize an upstream category record.
#[must_use]
pub fn convert_category(raw: RawCategory) -> Category {
    Category {
        id: CategoryId::new(raw.id),
        name: raw.name.unwrap_or_default(),
        slug: raw.slug.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        image: raw.image.and_then(|img| img.src),
        count: raw.count.unwrap_or(0),
    }
}

// =============================================================================
// Account Conversions
// =============================================================================

/// Build the session user from the profile, filling gaps from the token response.
#[must_use]
pub fn convert_user(profile: RawProfile, token: &RawToken) -> User {
    let username = first_non_blank([profile.username, token.user_nicename.clone()]);
    let name = first_non_blank([profile.name, token.user_display_name.clone()]);

    User {
        id: UserId::new(profile.id),
        email: first_non_blank([profile.email, token.user_email.clone()]),
        name: if name.is_empty() { username.clone() } else { name },
        username,
        first_name: profile.first_name.unwrap_or_default(),
        last_name: profile.last_name.unwrap_or_default(),
    }
}

/// Normalize an upstream customer record.
///
/// # Errors
///
/// Returns an error if the record has no numeric `id`.
pub fn convert_customer(value: serde_json::Value) -> Result<Customer, serde_json::Error> {
    let raw: RawCustomer = serde_json::from_value(value.clone())?;

    Ok(Customer {
        id: CustomerId::new(raw.id),
        email: raw.email.unwrap_or_default(),
        username: raw.username.unwrap_or_default(),
        first_name: raw.first_name.unwrap_or_default(),
        last_name: raw.last_name.unwrap_or_default(),
        avatar_url: raw.avatar_url.filter(|url| !url.is_empty()),
        raw: value,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    const PLACEHOLDER: &str = "https://via.placeholder.com/500";

    #[test]
    fn test_convert_product_full_record() {
        let value = json!({
            "id": 31,
            "name": "Teak Dining Chair",
            "price": "4999.50",
            "images": [{"src": "https://cdn.test/a.jpg"}, {"src": "https://cdn.test/b.jpg"}],
            "description": "<p>Solid teak.</p>",
            "short_description": "Teak chair",
            "categories": [{"id": 4, "name": "Chairs"}, {"id": 5, "name": "Dining"}],
            "average_rating": "4.50",
            "stock_status": "instock"
        });

        let product = convert_product(value.clone(), PLACEHOLDER).unwrap();

        assert_eq!(product.id, ProductId::new(31));
        assert_eq!(product.name, "Teak Dining Chair");
        assert_eq!(product.price, Price::from_cents(499_950));
        assert_eq!(product.image, "https://cdn.test/a.jpg");
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.description, "<p>Solid teak.</p>");
        assert_eq!(product.category, "Chairs");
        assert!((product.rating - 4.5).abs() < f64::EPSILON);
        assert!(product.in_stock());
        assert_eq!(product.raw, value);
    }

    #[test]
    fn test_convert_product_defaults() {
        let value = json!({
            "id": 32,
            "name": "Bare Stool",
            "price": "",
            "description": "",
            "short_description": "Short only",
            "categories": [],
            "stock_status": "outofstock"
        });

        let product = convert_product(value, PLACEHOLDER).unwrap();

        assert_eq!(product.image, PLACEHOLDER);
        assert!(product.images.is_empty());
        assert_eq!(product.description, "Short only");
        assert_eq!(product.category, UNCATEGORIZED);
        assert!((product.rating - 0.0).abs() < f64::EPSILON);
        assert_eq!(product.price, Price::ZERO);
        assert!(!product.in_stock());
    }

    #[test]
    fn test_convert_product_tolerates_nulls_and_numbers() {
        let value = json!({
            "id": 33,
            "name": null,
            "price": 120,
            "images": null,
            "categories": null,
            "average_rating": 3,
        });

        let product = convert_product(value, PLACEHOLDER).unwrap();

        assert_eq!(product.name, "");
        assert_eq!(product.price, Price::from_cents(12_000));
        assert_eq!(product.image, PLACEHOLDER);
        assert_eq!(product.category, UNCATEGORIZED);
        assert!((product.rating - 3.0).abs() < f64::EPSILON);
        assert_eq!(product.stock_status, StockStatus::OutOfStock);
    }

    #[test]
    fn test_convert_product_without_id_fails() {
        assert!(convert_product(json!({"name": "Ghost"}), PLACEHOLDER).is_err());
    }

    #[test]
    fn test_convert_category_defaults() {
        let raw: RawCategory =
            serde_json::from_value(json!({"id": 9, "name": "Beds", "slug": "beds", "image": null}))
                .unwrap();
        let category = convert_category(raw);

        assert_eq!(category.id, CategoryId::new(9));
        assert_eq!(category.description, "");
        assert_eq!(category.image, None);
        assert_eq!(category.count, 0);
    }

    #[test]
    fn test_convert_user_falls_back_to_token_fields() {
        let profile: RawProfile = serde_json::from_value(json!({"id": 5, "name": ""})).unwrap();
        let token: RawToken = serde_json::from_value(json!({
            "token": "jwt",
            "user_email": "bob@example.com",
            "user_nicename": "bob",
            "user_display_name": "Bob C"
        }))
        .unwrap();

        let user = convert_user(profile, &token);

        assert_eq!(user.id, UserId::new(5));
        assert_eq!(user.username, "bob");
        assert_eq!(user.email, "bob@example.com");
        assert_eq!(user.name, "Bob C");
        assert_eq!(user.first_name, "");
    }

    #[test]
    fn test_convert_customer() {
        let value = json!({
            "id": 5,
            "email": "bob@example.com",
            "username": "bob",
            "first_name": "Bob",
            "last_name": "Carpenter",
            "avatar_url": ""
        });

        let customer = convert_customer(value).unwrap();

        assert_eq!(customer.id, CustomerId::new(5));
        assert_eq!(customer.last_name, "Carpenter");
        assert_eq!(customer.avatar_url, None);
    }
}

//! Catalog reads against a mock WooCommerce store.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aarsun_core::{Price, ProductId};
use aarsun_integration_tests::{client, product_json};
use aarsun_storefront::services::{CategoryFilter, featured_products, filter_by_category};
use aarsun_storefront::woocommerce::{AuthPolicy, ListParams, WooError};

#[tokio::test]
async fn test_products_default_paging_and_normalization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Teak Chair", "120.50", "Chairs"),
            {"id": 2, "name": "Plain Stool", "price": "", "images": [], "categories": []},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = client(&server, AuthPolicy::CatalogBasic)
        .get_products(&ListParams::new())
        .await
        .unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, ProductId::new(1));
    assert_eq!(products[0].price, Price::from_cents(12_050));
    assert_eq!(products[0].image, "https://cdn.test/1.jpg");
    assert_eq!(products[0].category, "Chairs");
    assert!(products[0].in_stock());

    assert_eq!(products[1].image, "https://via.placeholder.com/500");
    assert_eq!(products[1].category, "Uncategorized");
    assert_eq!(products[1].price, Price::ZERO);
    assert!(!products[1].in_stock());
}

#[tokio::test]
async fn test_filters_pass_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("per_page", "10"))
        .and(query_param("page", "2"))
        .and(query_param("category", "17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let params = ListParams::new()
        .filter("per_page", 10)
        .page(2)
        .filter("category", 17);
    let products = client(&server, AuthPolicy::CatalogBasic)
        .get_products(&params)
        .await
        .unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_featured_asks_for_four() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .and(query_param("per_page", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "A", "1.00", "Chairs"),
            product_json(2, "B", "2.00", "Tables"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = featured_products(&client(&server, AuthPolicy::CatalogBasic))
        .await
        .unwrap();
    assert_eq!(products.len(), 2);

    let tables = filter_by_category(&products, &CategoryFilter::from("Tables"));
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "B");
}

#[tokio::test]
async fn test_product_detail_and_not_found() {
    let server = MockServer::start().await;

    let mut record = product_json(31, "Dining Table", "999.99", "Tables");
    record["images"] = json!([
        {"src": "https://cdn.test/31-a.jpg"},
        {"src": "https://cdn.test/31-b.jpg"}
    ]);
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "woocommerce_rest_product_invalid_id",
            "message": "Invalid ID.",
            "data": {"status": 404}
        })))
        .mount(&server)
        .await;

    let client = client(&server, AuthPolicy::CatalogBasic);

    let product = client.get_product(ProductId::new(31)).await.unwrap();
    assert_eq!(product.images.len(), 2);
    assert_eq!(product.image, "https://cdn.test/31-a.jpg");

    let err = client.get_product(ProductId::new(404)).await.unwrap_err();
    assert!(matches!(err, WooError::NotFound(ref m) if m == "Invalid ID."));
}

#[tokio::test]
async fn test_categories() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products/categories"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 4, "name": "Chairs", "slug": "chairs", "description": "Seating",
             "image": {"src": "https://cdn.test/chairs.jpg"}, "count": 12},
            {"id": 5, "name": "Beds", "slug": "beds", "image": null},
        ])))
        .mount(&server)
        .await;

    let categories = client(&server, AuthPolicy::CatalogBasic)
        .get_categories(&ListParams::new())
        .await
        .unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].image.as_deref(), Some("https://cdn.test/chairs.jpg"));
    assert_eq!(categories[0].count, 12);
    assert_eq!(categories[1].description, "");
    assert_eq!(categories[1].count, 0);
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "woocommerce_rest_cannot_view",
            "message": "Sorry, you cannot list resources.",
        })))
        .mount(&server)
        .await;

    let err = client(&server, AuthPolicy::CatalogBasic)
        .get_products(&ListParams::new())
        .await
        .unwrap_err();

    match err {
        WooError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Sorry, you cannot list resources.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server, AuthPolicy::CatalogBasic)
        .get_products(&ListParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, WooError::Parse(_)));
}

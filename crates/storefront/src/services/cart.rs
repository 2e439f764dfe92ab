//! In-memory shopping cart.
//!
//! Line items are kept in insertion order and keyed by product ID: adding a
//! product that is already in the cart bumps its quantity instead of adding
//! a second line. The cart is never persisted.

use serde::Serialize;

use aarsun_core::{Price, ProductId};

use crate::error::add_breadcrumb;
use crate::woocommerce::Product;

/// Largest quantity a single line can hold; larger requests are clamped.
pub const MAX_LINE_QUANTITY: i64 = 9_999;

/// One product entry in the cart.
///
/// Name, price and image are snapshots taken when the product was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    /// Between 1 and [`MAX_LINE_QUANTITY`].
    pub quantity: i64,
}

impl CartLineItem {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Ordered collection of line items.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
        } else {
            self.items.push(CartLineItem::from_product(product));
        }
        tracing::debug!(product_id = %product.id, "Added to cart");
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product.id.to_string().as_str())]),
        );
    }

    /// Set the quantity of a line. A quantity below 1 removes the line,
    /// one above [`MAX_LINE_QUANTITY`] is clamped; an unknown product is ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove_from_cart(product_id);
            return;
        }
        let quantity = quantity.min(MAX_LINE_QUANTITY);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
            add_breadcrumb(
                "cart",
                "Updated quantity",
                Some(&[
                    ("product_id", product_id.to_string().as_str()),
                    ("quantity", quantity.to_string().as_str()),
                ]),
            );
        }
    }

    /// Remove a line. Removing an absent product is a no-op.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        if self.items.len() != before {
            add_breadcrumb(
                "cart",
                "Removed from cart",
                Some(&[("product_id", product_id.to_string().as_str())]),
            );
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        add_breadcrumb("cart", "Cleared cart", None);
    }

    /// Exact sum of `price × quantity` over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |count, line| count.saturating_add(line.quantity))
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use aarsun_core::StockStatus;

    use super::*;

    fn product(id: u64, name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_cents(cents),
            image: format!("https://cdn.test/{id}.jpg"),
            images: vec![],
            description: String::new(),
            category: "Chairs".to_string(),
            rating: 0.0,
            stock_status: StockStatus::InStock,
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_add_merges_by_product() {
        let mut cart = Cart::new();
        let chair = product(1, "Chair", 10_000);
        let table = product(2, "Table", 25_050);

        cart.add_to_cart(&chair);
        cart.add_to_cart(&table);
        cart.add_to_cart(&chair);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].product_id, ProductId::new(1));
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.cart_total(), Price::from_cents(45_050));
    }

    #[test]
    fn test_total_is_exact() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product(1, "Cushion", 10));
        cart.add_to_cart(&product(2, "Coaster", 20));
        assert_eq!(cart.cart_total(), Price::from_cents(30));
        assert_eq!(cart.cart_total().to_string(), "$0.30");
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product(1, "Chair", 10_000));

        cart.update_quantity(ProductId::new(1), 5);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 5);

        cart.update_quantity(ProductId::new(99), 3);
        assert_eq!(cart.items().len(), 1);

        cart.update_quantity(ProductId::new(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_negative_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product(1, "Chair", 10_000));
        cart.update_quantity(ProductId::new(1), -2);
        assert!(cart.line(ProductId::new(1)).is_none());
        assert_eq!(cart.cart_total(), Price::ZERO);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product(1, "Chair", 10_000));
        cart.add_to_cart(&product(2, "Table", 20_000));

        cart.remove_from_cart(ProductId::new(1));
        cart.remove_from_cart(ProductId::new(1));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, ProductId::new(2));

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.cart_total(), Price::ZERO);
    }

    #[test]
    fn test_line_snapshot() {
        let mut cart = Cart::new();
        let chair = product(7, "Chair", 999);
        cart.add_to_cart(&chair);

        let line = cart.line(ProductId::new(7)).unwrap();
        assert_eq!(line.name, "Chair");
        assert_eq!(line.image, "https://cdn.test/7.jpg");
        assert_eq!(line.line_total(), Price::from_cents(999));
    }

    #[test]
    fn test_two_chairs_and_a_cushion() {
        let mut cart = Cart::new();
        let chair = product(1, "Chair", 2_000);
        cart.add_to_cart(&chair);
        cart.add_to_cart(&chair);
        cart.add_to_cart(&product(2, "Cushion", 550));

        assert_eq!(cart.cart_total(), Price::from_cents(4_550));
        assert_eq!(cart.cart_total().to_string(), "$45.50");
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_then_remove_restores_total() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product(1, "Cushion", 10));
        cart.add_to_cart(&product(2, "Coaster", 20));
        let before = cart.cart_total();

        cart.add_to_cart(&product(3, "Lamp", 1_999));
        cart.remove_from_cart(ProductId::new(3));

        assert_eq!(cart.cart_total(), before);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_huge_quantity_is_clamped() {
        let mut cart = Cart::new();
        let chair = product(1, "Chair", 10_000);
        cart.add_to_cart(&chair);

        cart.update_quantity(ProductId::new(1), i64::MAX);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, MAX_LINE_QUANTITY);

        cart.add_to_cart(&chair);
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, MAX_LINE_QUANTITY);
        assert_eq!(
            cart.cart_total(),
            Price::from_cents(10_000).times(MAX_LINE_QUANTITY)
        );
    }

    #[test]
    fn test_item_count_with_huge_lines() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product(1, "Chair", 10_000));
        cart.add_to_cart(&product(2, "Table", 20_000));
        cart.update_quantity(ProductId::new(1), i64::MAX);
        cart.update_quantity(ProductId::new(2), i64::MAX);

        assert_eq!(cart.item_count(), 2 * MAX_LINE_QUANTITY);
    }
}

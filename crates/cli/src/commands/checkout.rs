//! Simulated checkout command.

use serde_json::json;

use aarsun_core::ProductId;
use aarsun_storefront::error::AppError;
use aarsun_storefront::services::CheckoutForm;
use aarsun_storefront::state::Storefront;

use super::{CliError, print_json};

/// One `--item` argument: a product and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl ItemSpec {
    /// Parse `ID` or `IDxQTY` (quantity at least 1).
    ///
    /// # Errors
    ///
    /// Returns a message for clap when either part is malformed.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (id, quantity) = match raw.split_once(['x', 'X']) {
            Some((id, quantity)) => (id, quantity),
            None => (raw, "1"),
        };

        let product_id = id
            .parse::<ProductId>()
            .map_err(|e| format!("invalid product id '{id}': {e}"))?;
        let quantity = quantity
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;
        if quantity < 1 {
            return Err(format!("quantity must be at least 1, got {quantity}"));
        }

        Ok(Self {
            product_id,
            quantity,
        })
    }
}

/// `aarsun checkout`
///
/// Fills the cart from `items`, prints the order summary, then places the
/// order.
pub async fn checkout(
    storefront: &mut Storefront,
    items: &[ItemSpec],
    form: &CheckoutForm,
) -> Result<(), CliError> {
    if !storefront.session().is_authenticated() {
        return Err(AppError::from(
            aarsun_storefront::services::CheckoutError::LoginRequired,
        )
        .into());
    }

    for item in items {
        let product = storefront.client().get_product(item.product_id).await?;
        if !product.in_stock() {
            tracing::warn!(product_id = %product.id, "Product is not in stock");
        }
        let cart = storefront.cart_mut();
        cart.add_to_cart(&product);
        let quantity = cart
            .line(product.id)
            .map_or(item.quantity, |line| line.quantity - 1 + item.quantity);
        cart.update_quantity(product.id, quantity);
    }

    let summary = storefront.order_summary();
    let confirmation = storefront.checkout(form).map_err(AppError::from)?;

    print_json(&json!({
        "summary": summary,
        "confirmation": confirmation,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_spec() {
        assert_eq!(
            ItemSpec::parse("31x2").unwrap(),
            ItemSpec {
                product_id: ProductId::new(31),
                quantity: 2
            }
        );
        assert_eq!(ItemSpec::parse("7").unwrap().quantity, 1);
        assert!(ItemSpec::parse("7x0").is_err());
        assert!(ItemSpec::parse("abc").is_err());
        assert!(ItemSpec::parse("7x").is_err());
    }
}

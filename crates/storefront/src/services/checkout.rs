//! Simulated checkout.
//!
//! The form is validated and an order confirmation is produced, but no
//! payment is taken and nothing is sent upstream. Placing an order clears
//! the cart.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use aarsun_core::{Email, Price};

use crate::error::add_breadcrumb;
use crate::services::cart::Cart;
use crate::services::session::SessionState;

/// Errors that reject a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// One or more form fields are blank.
    #[error("Please fill in all fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The email field is not a valid address.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Checkout requires a signed-in user.
    #[error("Please login or create an account to proceed with checkout")]
    LoginRequired,

    /// Nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,
}

/// Shipping and payment details entered at checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl CheckoutForm {
    /// Check that every field is filled in and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns `MissingFields` listing every blank field, else
    /// `InvalidEmail`.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let fields: [(&'static str, &str); 8] = [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("zip code", &self.zip_code),
            ("card number", &self.card_number),
            ("expiry date", &self.expiry_date),
            ("cvv", &self.cvv),
        ];

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| *label)
            .collect();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        Email::parse(&self.email).map_err(|_| CheckoutError::InvalidEmail)?;
        Ok(())
    }
}

/// Money breakdown shown before placing an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Summary for the current cart with a flat shipping rate.
    #[must_use]
    pub fn for_cart(cart: &Cart, shipping: Price) -> Self {
        let subtotal = cart.cart_total();
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// Receipt of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub confirmation_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub item_count: i64,
    pub summary: OrderSummary,
}

/// Place a simulated order for the cart and empty it.
///
/// # Errors
///
/// Returns `LoginRequired`, `EmptyCart` or a form validation error, checked
/// in that order. The cart is left untouched on error.
pub fn place_order(
    session: &SessionState,
    cart: &mut Cart,
    form: &CheckoutForm,
    shipping: Price,
) -> Result<OrderConfirmation, CheckoutError> {
    if !session.is_authenticated() {
        return Err(CheckoutError::LoginRequired);
    }
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    form.validate()?;

    let confirmation = OrderConfirmation {
        confirmation_id: Uuid::new_v4(),
        placed_at: Utc::now(),
        item_count: cart.item_count(),
        summary: OrderSummary::for_cart(cart, shipping),
    };
    cart.clear_cart();

    info!(
        confirmation_id = %confirmation.confirmation_id,
        total = %confirmation.summary.total,
        "Order placed"
    );
    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[(
            "confirmation_id",
            confirmation.confirmation_id.to_string().as_str(),
        )]),
    );

    Ok(confirmation)
}

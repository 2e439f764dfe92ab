//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `session` - Sign-in state, persisted to local storage
//! - `cart` - In-memory cart with exact totals
//! - `catalog` - Category filtering and featured products
//! - `checkout` - Form validation and simulated order placement

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

pub use cart::{Cart, CartLineItem, MAX_LINE_QUANTITY};
pub use catalog::{CategoryFilter, featured_products, filter_by_category};
pub use checkout::{CheckoutError, CheckoutForm, OrderConfirmation, OrderSummary, place_order};
pub use session::{AuthOutcome, SessionState};

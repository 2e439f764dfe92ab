//! Core types for the Aarsun storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod stock;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use stock::StockStatus;

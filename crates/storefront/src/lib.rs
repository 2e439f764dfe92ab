//! Aarsun storefront library.
//!
//! A WooCommerce-backed shopping client: catalog browsing, customer
//! sign-in with a persisted session, an in-memory cart and a simulated
//! checkout. Front ends build a [`state::Storefront`] and drive it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod woocommerce;

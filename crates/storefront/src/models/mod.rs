//! Domain models shared between the session and the WooCommerce adapter.
//!
//! - [`user`] - The signed-in WordPress user
//! - [`session`] - Local storage keys for the persisted session

pub mod session;
pub mod user;

pub use session::keys;
pub use user::User;

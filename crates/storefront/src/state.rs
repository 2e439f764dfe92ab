//! Composition root wiring the adapter, session and cart together.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::services::cart::Cart;
use crate::services::checkout::{
    CheckoutError, CheckoutForm, OrderConfirmation, OrderSummary, place_order,
};
use crate::services::session::SessionState;
use crate::storage::{FileStorage, LocalStorage, MemoryStorage};
use crate::woocommerce::WooClient;

/// Everything a front end needs for one shopper.
///
/// Owned by the front end and passed by reference; session and cart are
/// mutated through [`session_mut`](Self::session_mut) and
/// [`cart_mut`](Self::cart_mut).
#[derive(Debug)]
pub struct Storefront {
    config: StoreConfig,
    client: WooClient,
    session: SessionState,
    cart: Cart,
}

impl Storefront {
    /// Build the client, restore the persisted session, start with an empty cart.
    pub async fn init(config: StoreConfig, storage: Arc<dyn LocalStorage>) -> Self {
        let client = WooClient::new(&config);
        let mut session = SessionState::new(client.clone(), storage);
        session.restore().await;

        info!(
            base_url = %client.base_url(),
            auth_policy = %client.auth_policy(),
            authenticated = session.is_authenticated(),
            "Storefront ready"
        );

        Self {
            config,
            client,
            session,
            cart: Cart::new(),
        }
    }

    /// [`init`](Self::init) with file storage at the configured location.
    ///
    /// Falls back to in-memory storage when no data directory is known.
    pub async fn open(config: StoreConfig) -> Self {
        let storage: Arc<dyn LocalStorage> = match config.resolved_storage_path() {
            Some(path) => Arc::new(FileStorage::new(path)),
            None => {
                warn!("No data directory available, session will not persist");
                Arc::new(MemoryStorage::new())
            }
        };
        Self::init(config, storage).await
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The WooCommerce adapter.
    #[must_use]
    pub const fn client(&self) -> &WooClient {
        &self.client
    }

    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Summary of the current cart with the configured shipping rate.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::for_cart(&self.cart, self.config.shipping_flat_rate)
    }

    /// Place a simulated order for the current cart.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if the shopper is signed out, the cart is
    /// empty or the form is incomplete.
    pub fn checkout(&mut self, form: &CheckoutForm) -> Result<OrderConfirmation, CheckoutError> {
        place_order(
            &self.session,
            &mut self.cart,
            form,
            self.config.shipping_flat_rate,
        )
    }
}

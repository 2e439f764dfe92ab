//! Account and session commands.

use secrecy::SecretString;
use serde_json::json;

use aarsun_core::CustomerId;
use aarsun_storefront::error::AppError;
use aarsun_storefront::services::AuthOutcome;
use aarsun_storefront::state::Storefront;
use aarsun_storefront::woocommerce::RegisterRequest;

use super::{CliError, print_json};

/// Arguments of `aarsun register`.
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

fn finish(storefront: &Storefront, outcome: AuthOutcome) -> Result<(), CliError> {
    match outcome {
        AuthOutcome::Success => print_json(&json!({
            "success": true,
            "user": storefront.session().user(),
        })),
        AuthOutcome::Failure(message) => Err(AppError::BadRequest(message).into()),
    }
}

/// `aarsun login`
pub async fn login(
    storefront: &mut Storefront,
    username: &str,
    password: &str,
) -> Result<(), CliError> {
    let outcome = storefront.session_mut().login(username, password).await;
    finish(storefront, outcome)
}

/// `aarsun register`
pub async fn register(storefront: &mut Storefront, args: Registration) -> Result<(), CliError> {
    let request = RegisterRequest {
        email: args.email,
        username: args.username,
        password: SecretString::from(args.password),
        first_name: args.first_name,
        last_name: args.last_name,
    };
    let outcome = storefront.session_mut().register(&request).await;
    finish(storefront, outcome)
}

/// `aarsun logout`
pub async fn logout(storefront: &mut Storefront) -> Result<(), CliError> {
    storefront.session_mut().logout().await;
    print_json(&json!({ "success": true }))
}

/// `aarsun whoami`
pub fn whoami(storefront: &Storefront) -> Result<(), CliError> {
    let session = storefront.session();
    print_json(&json!({
        "authenticated": session.is_authenticated(),
        "greeting": session.user().map(|user| format!("Hello, {}", user.greeting_name())),
        "user": session.user(),
    }))
}

/// `aarsun customer <ID>`
pub async fn customer(storefront: &Storefront, id: CustomerId) -> Result<(), CliError> {
    let customer = storefront.client().get_user(id).await?;
    print_json(&customer)
}

/// `aarsun orders`
pub async fn orders(storefront: &Storefront) -> Result<(), CliError> {
    let orders = storefront.client().get_user_orders().await?;
    print_json(&orders)
}

//! Command implementations.

pub mod account;
pub mod catalog;
pub mod checkout;

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use aarsun_storefront::error::AppError;
use aarsun_storefront::woocommerce::WooError;

/// Errors a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing the result to stdout failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// The result could not be serialized.
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<WooError> for CliError {
    fn from(err: WooError) -> Self {
        Self::App(err.into())
    }
}

impl CliError {
    /// Log the failure (capturing server-class errors to Sentry).
    pub fn report(&self) {
        match self {
            Self::App(err) => {
                err.report();
                tracing::error!(message = %err.user_message(), "Command failed");
            }
            other => tracing::error!(error = %other, "Command failed"),
        }
    }
}

/// Write `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

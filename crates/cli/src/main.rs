//! Aarsun CLI - Browse the store, manage the session and check out.
//!
//! # Usage
//!
//! ```bash
//! # List chairs, 20 per page
//! aarsun products --category Chairs --per-page 20
//!
//! # Sign in (the session persists between runs)
//! aarsun login --username bob --password hunter2
//!
//! # Two of product 31 and one of product 7
//! aarsun checkout --item 31x2 --item 7 --name "Bob" --email bob@example.com \
//!     --address "1 Teak Lane" --city Jaipur --zip 302001 \
//!     --card 4242424242424242 --expiry 12/30 --cvv 123
//! ```
//!
//! Results are printed as JSON on stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aarsun_core::{CustomerId, ProductId};
use aarsun_storefront::config::StoreConfig;
use aarsun_storefront::state::Storefront;

mod commands;

use commands::CliError;
use commands::checkout::ItemSpec;

#[derive(Parser)]
#[command(name = "aarsun")]
#[command(author, version, about = "Aarsun storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only products in this category ("All" for every product)
        #[arg(short, long)]
        category: Option<String>,

        /// Page size
        #[arg(long)]
        per_page: Option<u32>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one product
    Product {
        /// Product ID
        id: ProductId,
    },
    /// List product categories
    Categories {
        /// Page size
        #[arg(long)]
        per_page: Option<u32>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show featured products
    Featured,
    /// Sign in
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show a customer record (requires sign-in)
    Customer {
        /// Customer ID
        id: CustomerId,
    },
    /// Show order history (requires sign-in)
    Orders,
    /// Place a simulated order
    Checkout {
        /// Item to buy as `ID` or `IDxQTY`; repeat for more items
        #[arg(long = "item", required = true, value_parser = ItemSpec::parse)]
        items: Vec<ItemSpec>,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        zip: String,

        #[arg(long)]
        card: String,

        #[arg(long)]
        expiry: String,

        #[arg(long)]
        cvv: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StoreConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration is needed for Sentry, which must be initialized before tracing
    let config = StoreConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aarsun_storefront=info,aarsun_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(CliError::from(aarsun_storefront::error::AppError::from(e))),
    };

    if let Err(e) = result {
        e.report();
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StoreConfig) -> Result<(), CliError> {
    let mut storefront = Storefront::open(config).await;

    match cli.command {
        Commands::Products {
            category,
            per_page,
            page,
        } => commands::catalog::products(&storefront, category, per_page, page).await?,
        Commands::Product { id } => commands::catalog::product(&storefront, id).await?,
        Commands::Categories { per_page, page } => {
            commands::catalog::categories(&storefront, per_page, page).await?;
        }
        Commands::Featured => commands::catalog::featured(&storefront).await?,
        Commands::Login { username, password } => {
            commands::account::login(&mut storefront, &username, &password).await?;
        }
        Commands::Register {
            email,
            username,
            password,
            first_name,
            last_name,
        } => {
            commands::account::register(
                &mut storefront,
                commands::account::Registration {
                    email,
                    username,
                    password,
                    first_name,
                    last_name,
                },
            )
            .await?;
        }
        Commands::Logout => commands::account::logout(&mut storefront).await?,
        Commands::Whoami => commands::account::whoami(&storefront)?,
        Commands::Customer { id } => commands::account::customer(&storefront, id).await?,
        Commands::Orders => commands::account::orders(&storefront).await?,
        Commands::Checkout {
            items,
            name,
            email,
            address,
            city,
            zip,
            card,
            expiry,
            cvv,
        } => {
            let form = aarsun_storefront::services::CheckoutForm {
                name,
                email,
                address,
                city,
                zip_code: zip,
                card_number: card,
                expiry_date: expiry,
                cvv,
            };
            commands::checkout::checkout(&mut storefront, &items, &form).await?;
        }
    }
    Ok(())
}

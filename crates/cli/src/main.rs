//! Shopfront CLI - Drive a storefront session from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show who the backend thinks we are
//! shopfront status
//!
//! # Browse the catalog
//! shopfront products
//! shopfront products --search potato
//! shopfront products --category vegetables
//! shopfront products --best-sellers
//!
//! # Work with the session cart (local to the process; the binary has no login)
//! shopfront cart show
//! shopfront cart add 6650f1c2a9 --times 2
//! shopfront cart set 6650f1c2a9 5
//! shopfront cart remove 6650f1c2a9
//! ```
//!
//! Configuration is read from the environment (see `shopfront_client::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_client::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront session tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show authentication, seller and cart status
    Status,
    /// List catalog products
    Products {
        /// Filter by name or category (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Show only this category
        #[arg(short, long, conflicts_with = "search")]
        category: Option<String>,

        /// Show the best-seller strip instead of the full grid
        #[arg(long, conflicts_with_all = ["search", "category"])]
        best_sellers: bool,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product identifier
        id: String,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1)]
        times: u32,
    },
    /// Set the exact quantity of a product (0 removes it)
    Set {
        /// Product identifier
        id: String,
        /// New quantity
        quantity: u32,
    },
    /// Remove one unit of a product
    Remove {
        /// Product identifier
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
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

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry(&config);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_client=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = commands::open_session(config).await?;

    match cli.command {
        Commands::Status => commands::status::show(&session.store),
        Commands::Products {
            search,
            category,
            best_sellers,
        } => commands::products::list(&session.store, search, category.as_deref(), best_sellers),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session.store),
            CartAction::Add { id, times } => commands::cart::add(&session.store, &id, times),
            CartAction::Set { id, quantity } => commands::cart::set(&session.store, &id, quantity),
            CartAction::Remove { id } => commands::cart::remove(&session.store, &id),
        },
    }

    session.close().await;
    Ok(())
}

//! HighFlight CLI - Inspect and edit persisted page state.
//!
//! Works against the same key layout the site pages use, stored in a JSON
//! file (`HIGHFLIGHT_STORAGE_PATH`, default `.highflight/storage.json`).
//!
//! # Usage
//!
//! ```bash
//! # Add two pizzas and show the cart with totals
//! hf cart add pizza "Pizza Margherita" 12.50 --quantity 2
//! hf cart show
//!
//! # Confirm the order and print the last order record
//! hf cart checkout --flight "Singapore - Emirates"
//! hf cart last-order
//!
//! # Favorites, comparison list and theme
//! hf favorites toggle hotel-ritz
//! hf compare toggle --title "Hotel Plaza Mayor"
//! hf theme toggle
//!
//! # Check a discount code against a total
//! hf discount EARLY15 240
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use highflight_core::Theme;
use highflight_storefront::notify::TracingNotifier;
use highflight_storefront::{FileStore, PageState, StoreConfig};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "hf")]
#[command(author, version, about = "HighFlight page state tools")]
struct Cli {
    /// Storage file (overrides `HIGHFLIGHT_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Manage the hotel comparison list
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },
    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Apply a discount code to a total
    Discount {
        /// Discount code (case-insensitive)
        code: String,
        /// Total to discount
        total: Decimal,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print items and totals
    Show,
    /// Add an item
    Add {
        id: String,
        name: String,
        price: Decimal,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove an item
    Remove { id: String },
    /// Set an item's quantity (0 or less removes it)
    Update {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Confirm the cart as an order
    Checkout {
        /// Flight or trip the order belongs to
        #[arg(long)]
        flight: Option<String>,
    },
    /// Print the last confirmed order
    LastOrder,
}

#[derive(Subcommand)]
enum ListAction {
    /// Print ids
    List,
    /// Toggle an id
    Toggle { id: String },
    /// Remove every id
    Clear,
}

#[derive(Subcommand)]
enum CompareAction {
    /// Print ids
    List,
    /// Toggle a hotel by id or by title
    Toggle {
        #[arg(required_unless_present = "title")]
        id: Option<String>,
        /// Derive the id from a hotel title
        #[arg(long, conflicts_with = "id")]
        title: Option<String>,
    },
    /// Remove every hotel
    Clear,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set { theme: Theme },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "highflight_storefront=info,hf=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;

    // Discount codes need no stored state
    if let Commands::Discount { code, total } = &cli.command {
        commands::discount::apply(code, *total, config.currency)?;
        return Ok(());
    }

    let path = cli.storage.unwrap_or_else(|| config.storage_path.clone());
    let storage = Arc::new(FileStore::open(&path)?);
    tracing::debug!(path = %path.display(), "Using storage file");

    let mut page = PageState::open(config, storage, Some(Arc::new(TracingNotifier)));

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&page),
            CartAction::Add {
                id,
                name,
                price,
                quantity,
            } => commands::cart::add(&mut page, &id, &name, price, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut page, &id),
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut page, &id, quantity);
            }
            CartAction::Clear => commands::cart::clear(&mut page),
            CartAction::Checkout { flight } => commands::cart::checkout(&mut page, flight)?,
            CartAction::LastOrder => commands::cart::last_order(&page),
        },
        Commands::Favorites { action } => match action {
            ListAction::List => commands::lists::list_favorites(&page),
            ListAction::Toggle { id } => commands::lists::toggle_favorite(&mut page, &id),
            ListAction::Clear => page.favorites_mut().clear(),
        },
        Commands::Compare { action } => match action {
            CompareAction::List => commands::lists::list_compare(&page),
            CompareAction::Toggle { id, title } => {
                commands::lists::toggle_compare(&mut page, id.as_deref(), title.as_deref())?;
            }
            CompareAction::Clear => page.compare_mut().clear(),
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show(&page),
            ThemeAction::Toggle => commands::theme::toggle(&page),
            ThemeAction::Set { theme } => commands::theme::set(&page, theme),
        },
        Commands::Discount { .. } => {}
    }
    Ok(())
}

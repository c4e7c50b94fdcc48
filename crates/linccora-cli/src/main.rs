use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use linccora_api::CatalogClient;
use linccora_cache::SqliteStore;
use linccora_core::{
    catalog::filter_by_price, price::display_price, Applied, Config, FavoritesStore, FilterState,
    Product, SearchOrchestrator,
};
use linccora_tui::App;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "linccora")]
#[command(version, about = "Terminal storefront for the LINCCORA fashion catalog", long_about = None)]
struct Cli {
    /// Catalog backend URL (also LINCCORA_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Wishlist database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Search the catalog and print the results
    Search {
        /// Search text
        query: Option<String>,

        /// Brand to include (repeatable)
        #[arg(long = "brand")]
        brands: Vec<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        min_price: Option<f64>,

        #[arg(long)]
        max_price: Option<f64>,

        /// Print raw JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Inspect or clear the saved wishlist
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(clap::Subcommand)]
enum FavoritesCommand {
    /// Show saved items
    List {
        #[arg(long)]
        min_price: Option<f64>,

        #[arg(long)]
        max_price: Option<f64>,

        #[arg(long)]
        json: bool,
    },
    /// Remove every saved item
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file
    init_logging(cli.command.is_none())?;

    let config = resolve_config(&cli)?;
    debug!("Using catalog at {}", config.api.base_url);

    match cli.command {
        Some(Commands::Search {
            query,
            brands,
            category,
            min_price,
            max_price,
            json,
        }) => {
            let filters = search_filters(query, brands, category, min_price, max_price);
            run_search(&config, &filters, json).await
        }
        Some(Commands::Favorites { action }) => {
            let mut favorites = open_favorites(&config)?;
            match action {
                FavoritesCommand::List {
                    min_price,
                    max_price,
                    json,
                } => {
                    let items = filter_by_price(favorites.items(), min_price, max_price);
                    print_products(&items, json)
                }
                FavoritesCommand::Clear => {
                    let count = favorites.len();
                    favorites.clear()?;
                    println!("Removed {} item(s) from your wishlist", count);
                    Ok(())
                }
            }
        }
        None => {
            let client = catalog_client(&config)?;
            let app = App::new(
                SearchOrchestrator::new(Arc::new(client)),
                open_favorites(&config)?,
                config.ui.clone(),
            );
            linccora_tui::run_tui(app).await
        }
    }
}

fn init_logging(to_file: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "linccora=info".into());

    if to_file {
        let path = Config::log_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

/// Priority: CLI > Env > File > Defaults
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    config.apply_env();
    config.api.apply_override(cli.api_url.clone());
    if let Some(db) = &cli.db {
        config.storage.db_path = Some(db.clone());
    }
    Ok(config)
}

fn catalog_client(config: &Config) -> anyhow::Result<CatalogClient> {
    let timeout = Duration::from_secs(config.api.timeout_secs);
    Ok(CatalogClient::with_timeout(config.api.base_url.clone(), timeout)?)
}

fn open_favorites(config: &Config) -> anyhow::Result<FavoritesStore> {
    let path = config.database_path()?;
    let store = SqliteStore::open(&path)
        .with_context(|| format!("Failed to open wishlist database {}", path.display()))?;
    Ok(FavoritesStore::open(Box::new(store)))
}

fn search_filters(
    query: Option<String>,
    brands: Vec<String>,
    category: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> FilterState {
    let mut filters = FilterState::new();
    filters.set_query(query.unwrap_or_default());
    filters.select_brands(brands);
    filters.set_category(category);
    filters.set_price_range(min_price, max_price);
    filters
}

async fn run_search(config: &Config, filters: &FilterState, json: bool) -> anyhow::Result<()> {
    let client = catalog_client(config)?;
    let mut orchestrator = SearchOrchestrator::new(Arc::new(client));

    match orchestrator.refresh(filters).await {
        Applied::Failed => {
            let reason = orchestrator.results().last_error().unwrap_or("unknown error");
            anyhow::bail!("Search failed: {}", reason)
        }
        Applied::Published(count) => info!("Found {} products", count),
        Applied::Stale => {}
    }

    print_products(orchestrator.products(), json)
}

fn print_products(products: &[Product], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(products)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("No products found");
        return Ok(());
    }

    for product in products {
        println!("{}", product_line(product));
    }
    Ok(())
}

fn product_line(product: &Product) -> String {
    let mut line = format!(
        "{} | {} | {}",
        product.name_label(),
        product.brand_label(),
        display_price(product.price.as_ref())
    );
    if let Some(url) = product.url() {
        line.push_str(" | ");
        line.push_str(url);
    }
    line
}

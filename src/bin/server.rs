//! Aisler API server
//!
//! Serves the shopping-list API backed by SQLite.
//!
//! # Configuration
//!
//! Config file (default: ~/.config/aisler/config.yaml) plus environment
//! overrides:
//! - `AISLER_PORT`: Port to listen on (default: 8080)
//! - `AISLER_DATABASE_PATH`: Path to the SQLite database
//! - `AISLER_CATALOG`: Optional YAML file overriding the built-in
//!   supermarket/area enumerations
//!
//! # Endpoints
//!
//! - `GET  /health`: Health check
//! - `POST /api/lists`: Create a list from categorized items
//! - `GET  /api/list/{slug}`: Fetch a list grouped by aisle
//! - `GET  /api/list/{slug}/version`: Version token for change polling
//! - `GET  /api/list/{slug}/progress`: Checked/total counts
//! - `PUT  /api/list/{slug}/item/{item_id}`: Toggle an item
//! - `POST /api/list/{slug}/edit`: Replace the item set, keeping checked state

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aisler::catalog::Catalog;
use aisler::config::Config;
use aisler::db::{init_db, ListRepository};
use aisler::server::{router, AppState};

#[derive(Parser)]
#[command(name = "aisler-server")]
#[command(version)]
#[command(about = "Shopping list API server")]
struct Cli {
    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aisler=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.config)?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::default(),
    };

    tracing::info!("Database: {}", config.database_path.display());
    let pool = init_db(&config.database_path).await?;

    let state = AppState {
        repo: ListRepository::new(pool),
        catalog: Arc::new(catalog),
    };

    let app = router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

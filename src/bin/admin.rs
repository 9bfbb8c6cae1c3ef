//! Aisler Admin CLI
//!
//! Maintenance tool for the shopping-list database.
//!
//! # Usage
//!
//! ```bash
//! aisler-admin cleanup              # delete lists older than 28 days
//! aisler-admin cleanup --days 7
//! aisler-admin cleanup --dry-run
//! ```

use chrono::{Duration, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use aisler::config::Config;
use aisler::db::{init_db, ListRepository};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "aisler-admin")]
#[command(version)]
#[command(about = "Aisler database administration tool")]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete shopping lists past the retention window
    Cleanup(CleanupArgs),
}

#[derive(Args)]
struct CleanupArgs {
    /// Delete lists created more than this many days ago
    #[arg(long, default_value_t = 28)]
    days: i64,

    /// Report what would be deleted without deleting anything
    #[arg(long)]
    dry_run: bool,
}

// ============================================================================
// Commands
// ============================================================================

async fn cleanup(
    repo: &ListRepository,
    args: CleanupArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let cutoff = Utc::now() - Duration::days(args.days);

    if args.dry_run {
        let count = repo.count_created_before(cutoff).await?;
        println!(
            "Would delete {} shopping list(s) older than {} days",
            count, args.days
        );
        return Ok(());
    }

    let deleted = repo.purge_created_before(cutoff).await?;
    println!(
        "Deleted {} shopping list(s) older than {} days",
        deleted, args.days
    );

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    let pool = init_db(&config.database_path).await?;
    let repo = ListRepository::new(pool);

    match cli.command {
        Commands::Cleanup(args) => cleanup(&repo, args).await?,
    }

    Ok(())
}

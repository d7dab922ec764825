//! CLI administration tool for linkvault.
//!
//! Provides commands for inspecting and managing short keys and performing
//! database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View record counts
//! cargo run --bin admin -- stats
//!
//! # Inspect a short key without purging it
//! cargo run --bin admin -- lookup 0LQfXx
//!
//! # Create a short key, optionally with a custom key
//! cargo run --bin admin -- shorten https://www.google.com/ --key MyKey1
//!
//! # Delete a short key from the store and the cache
//! cargo run --bin admin -- delete 0LQfXx --yes
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `linkvault::config`. A Redis cache is used when
//! configured, otherwise the CLI runs without a cache.

use linkvault::application::services::LinkService;
use linkvault::config::{CacheBackend, Config};
use linkvault::domain::repositories::UrlRepository;
use linkvault::domain::task_coordinator::TaskCoordinator;
use linkvault::infrastructure::cache::{CacheService, NullCache};
use linkvault::infrastructure::persistence::PgUrlRepository;
use linkvault::server;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkvault.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show record counts
    Stats,

    /// Show the stored record for a short key
    Lookup {
        /// Short key to look up
        key: String,
    },

    /// Create a short key
    Shorten {
        /// URL to shorten
        url: String,

        /// Custom short key (6 alphanumeric characters)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Delete a short key from the store and the cache
    Delete {
        /// Short key to delete
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Lookup { key } => handle_lookup(&pool, &key).await?,
        Commands::Shorten { url, key } => {
            let service = link_service(&config, &pool).await;
            handle_shorten(&service, &url, key.as_deref()).await?;
        }
        Commands::Delete { key, yes } => {
            let service = link_service(&config, &pool).await;
            handle_delete(&service, &pool, &key, yes).await?;
        }
    }

    Ok(())
}

/// Builds a link service on the configured Redis cache, or without a cache.
async fn link_service(config: &Config, pool: &PgPool) -> LinkService {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));

    let cache: Arc<dyn CacheService> = match config.cache_backend {
        CacheBackend::Redis => server::build_cache(config).await,
        _ => Arc::new(NullCache::new()),
    };

    let tasks = TaskCoordinator::new(config.task_timeout());

    LinkService::new(repository, cache, tasks, config.link_settings())
}

/// Creates a short key and prints the resulting short URL.
async fn handle_shorten(service: &LinkService, url: &str, key: Option<&str>) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let shortened = service
        .shorten(url, key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    // Let the cache write finish before the runtime shuts down
    service.tasks().wait_idle().await;

    println!("  Original:  {}", shortened.record.original_url.cyan());
    println!(
        "  Short URL: {}",
        shortened.short_url.bright_yellow().bold()
    );
    println!(
        "  Expires:   {}",
        shortened
            .record
            .expire_time
            .format("%Y-%m-%d %H:%M UTC")
            .to_string()
            .bright_black()
    );
    println!();
    println!("{}", "✅ Short key created".green().bold());

    Ok(())
}

/// Prints the stored record for a key. Expired records are reported, not purged.
async fn handle_lookup(pool: &PgPool, key: &str) -> Result<()> {
    println!("{}", "🔍 Lookup".bright_blue().bold());
    println!();

    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let record = repo
        .find_by_key(key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(record) = record else {
        println!("{}", "  Short key not found".yellow());
        return Ok(());
    };

    let status = if record.is_expired_at(Utc::now()) {
        "EXPIRED".red()
    } else {
        "LIVE".green()
    };

    println!("  ID:       {}", record.id.to_string().bright_black());
    println!("  Key:      {}", record.short_key.cyan());
    println!("  URL:      {}", record.original_url.bright_white());
    println!(
        "  Expires:  {}",
        record
            .expire_time
            .format("%Y-%m-%d %H:%M UTC")
            .to_string()
            .bright_black()
    );
    println!("  Status:   {}", status);
    println!();

    Ok(())
}

/// Deletes a key after confirmation (default: No).
async fn handle_delete(service: &LinkService, pool: &PgPool, key: &str, yes: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Key".bright_blue().bold());
    println!();

    let repo = PgUrlRepository::new(Arc::new(pool.clone()));
    let record = repo
        .find_by_key(key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short key not found")?;

    println!("  Key: {}", record.short_key.cyan());
    println!("  URL: {}", record.original_url.bright_white());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short key?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete(key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete short key: {}", e))?;

    if deleted {
        println!("{}", "✅ Short key deleted".green().bold());
    } else {
        println!("{}", "⚠️  Short key was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays record counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgUrlRepository::new(Arc::new(pool.clone()));
    let counts = repo
        .counts()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Records:         {}",
        counts.total.to_string().bright_green().bold()
    );
    println!(
        "  Live:            {}",
        (counts.total - counts.expired)
            .to_string()
            .bright_green()
            .bold()
    );
    println!(
        "  Awaiting purge:  {}",
        counts.expired.to_string().yellow().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

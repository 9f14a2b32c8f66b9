//! CLI administration tool for short-link-store.
//!
//! Runs the short link operations directly against the database and cache,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- create https://example.com/some/long/path
//!
//! # Look up a key without counting a hit
//! cargo run --bin admin -- expand Qw2rTy
//!
//! # Follow a key (counts a hit, like the redirect endpoint)
//! cargo run --bin admin -- resolve Qw2rTy
//!
//! # Show hit counter
//! cargo run --bin admin -- stats Qw2rTy
//!
//! # Delete a link
//! cargo run --bin admin -- delete Qw2rTy
//!
//! # Check database and cache connections
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see [`short_link_store::config::Config`].

use short_link_store::application::services::{CreateInput, HealthService, ShortLinkService};
use short_link_store::config;
use short_link_store::error::ShortLinkError;
use short_link_store::server::{build_services, connect_cache, connect_database};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing short links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Create {
        /// URL to shorten (http or https)
        url: String,
    },

    /// Print the original URL and count a hit
    Resolve { key: String },

    /// Print the original URL without counting a hit
    Expand { key: String },

    /// Show hit counter and creation time
    Stats { key: String },

    /// Delete a short link
    Delete {
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
    /// Check database and cache connections
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_database(&config).await?;
    let cache = connect_cache(&config).await;
    let (service, health) = build_services(&config, pool, cache);

    match cli.command {
        Commands::Create { url } => create(&service, url).await?,
        Commands::Resolve { key } => resolve(&service, &key).await?,
        Commands::Expand { key } => expand(&service, &key).await?,
        Commands::Stats { key } => stats(&service, &key).await?,
        Commands::Delete { key, yes } => delete(&service, &key, yes).await?,
        Commands::Db { action } => handle_db_action(action, &health).await,
    }

    Ok(())
}

async fn create(service: &ShortLinkService, url: String) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let output = service.create(CreateInput { original_url: url }).await?;

    println!("  Key:       {}", output.key.bright_yellow().bold());
    println!("  Short URL: {}", output.short_url.cyan());
    println!();
    println!("{}", "✅ Short link created".green().bold());

    Ok(())
}

async fn resolve(service: &ShortLinkService, key: &str) -> Result<()> {
    match service.original_url(key).await {
        Ok(url) => println!("{}", url.cyan()),
        Err(err) => report(err)?,
    }
    Ok(())
}

async fn expand(service: &ShortLinkService, key: &str) -> Result<()> {
    match service.expand(key).await {
        Ok(link) => {
            println!("  Key:       {}", link.key.bright_yellow().bold());
            println!("  URL:       {}", link.original_url.cyan());
            println!("  Short URL: {}", link.short_url.bright_black());
        }
        Err(err) => report(err)?,
    }
    Ok(())
}

/// Prints the hit counter of a link.
///
/// # Output Format
///
/// ```text
/// 📊 Statistics for Qw2rTy
///
///   Hits:    42
///   Created: 2025-01-15 10:30
/// ```
async fn stats(service: &ShortLinkService, key: &str) -> Result<()> {
    match service.stats(key).await {
        Ok(stats) => {
            println!("{} {}", "📊 Statistics for".bright_blue().bold(), key.bold());
            println!();
            println!(
                "  Hits:    {}",
                stats.hits.to_string().bright_green().bold()
            );
            println!(
                "  Created: {}",
                stats
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            println!();
        }
        Err(err) => report(err)?,
    }
    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete(service: &ShortLinkService, key: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    match service.expand(key).await {
        Ok(link) => {
            println!("  Key: {}", link.key.cyan());
            println!("  URL: {}", link.original_url.bright_black());
            println!();
        }
        Err(ShortLinkError::NotFound { .. }) => {
            println!("{}", "⚠️  No link with this key".yellow());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete(key).await?;

    println!("{}", "✅ Link deleted".green().bold());

    Ok(())
}

/// Prints not-found as a warning and propagates every other error.
fn report(err: ShortLinkError) -> Result<()> {
    match err {
        ShortLinkError::NotFound { key } => {
            println!("{} {}", "⚠️  Not found:".yellow(), key);
            Ok(())
        }
        other => Err(other.into()),
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, health: &HealthService) {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking connections...".bright_blue());

            let report = health.check().await;

            for service in &report.services {
                let status = if service.healthy {
                    "OK".green().bold()
                } else {
                    "FAILED".red().bold()
                };
                println!(
                    "  {:<10} {} {}",
                    service.name,
                    status,
                    format!("({} ms)", service.check_duration.as_millis()).bright_black()
                );
                if let Some(ref error) = service.error {
                    println!("             {}", error.red());
                }
            }

            if report.all_healthy {
                println!("{}", "✅ All connections OK".green().bold());
            }
        }
    }
}

//! CLI administration tool for link-shortener.
//!
//! Runs the shortening and redirection services directly against PostgreSQL,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL, optionally under a custom token
//! cargo run --bin admin -- shorten example.com/page --token promo
//!
//! # List links, most recently used first
//! cargo run --bin admin -- list
//!
//! # Resolve a token (counts one use)
//! cargo run --bin admin -- resolve promo
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_USER`/`DB_PASSWORD`/`DB_NAME`: PostgreSQL connection
//! - `TOKEN_LENGTH`, `TOKEN_MAX_ATTEMPTS`: token generation settings

use link_shortener::application::read_model::LinkListView;
use link_shortener::application::services::{RedirectService, ShortenService};
use link_shortener::config::Config;
use link_shortener::domain::entities::Link;
use link_shortener::domain::notifier::ChangeNotifier;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use link_shortener::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// URL to shorten; `http://` is assumed when no scheme is given
        url: String,

        /// Custom token (auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Fail if the URL was already shortened
        #[arg(long)]
        require_new: bool,
    },

    /// List all links
    List {
        /// Show least recently updated links first
        #[arg(long)]
        oldest_first: bool,
    },

    /// Resolve a token to its URL, counting one use
    Resolve { token: String },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = Arc::new(connect_pool(&config).await?);
    let repository = Arc::new(PgLinkRepository::new(pool.clone()));

    match cli.command {
        Commands::Shorten {
            url,
            token,
            require_new,
        } => {
            let service =
                ShortenService::new(repository, ChangeNotifier::default(), config.token_policy());
            shorten(&service, &url, token.as_deref(), require_new).await?
        }
        Commands::List { oldest_first } => {
            list(&RedirectService::new(repository), oldest_first).await?
        }
        Commands::Resolve { token } => resolve(&RedirectService::new(repository), &token).await?,
        Commands::Db {
            action: DbAction::Check,
        } => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1")
                .fetch_one(pool.as_ref())
                .await
                .context("Database check failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Turns a service error into a CLI error showing both message and detail.
fn cli_error(err: AppError) -> anyhow::Error {
    anyhow::anyhow!("{}: {}", err.message(), err.detail())
}

async fn shorten(
    service: &ShortenService<PgLinkRepository>,
    url: &str,
    token: Option<&str>,
    require_new: bool,
) -> Result<()> {
    let outcome = service.shorten(url, token).await.map_err(cli_error)?;
    let created = outcome.is_created();

    let link = if require_new {
        outcome.into_created().map_err(cli_error)?
    } else {
        outcome.into_link()
    };

    if created {
        println!("{}", "✅ Short link created".green().bold());
    } else {
        println!("{}", "⚠️  URL was already shortened".yellow());
    }
    println!("  Token: {}", link.token.bright_yellow().bold());
    println!("  URL:   {}", link.long_url.cyan());

    Ok(())
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Token      Uses    Updated            URL
///   ─────────────────────────────────────────────────────────────
///   promo      3       2026-01-15 10:30   http://example.com/page
/// ```
async fn list(service: &RedirectService<PgLinkRepository>, oldest_first: bool) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links: Vec<Link> = if oldest_first {
        service.list_all().await.map_err(cli_error)?
    } else {
        let mut view = LinkListView::new();
        view.refresh(service).await.map_err(cli_error)?;
        view.items().to_vec()
    };

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<7} {:<18} {}",
        "Token".bright_white().bold(),
        "Uses".bright_white().bold(),
        "Updated".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let uses = if link.is_unused() {
            link.usage_count.to_string().bright_black()
        } else {
            link.usage_count.to_string().bright_green()
        };

        println!(
            "  {:<10} {:<7} {:<18} {}",
            link.token.cyan(),
            uses,
            link.updated_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.long_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn resolve(service: &RedirectService<PgLinkRepository>, token: &str) -> Result<()> {
    let link = service.resolve(Some(token)).await.map_err(cli_error)?;

    println!("{}", link.long_url.cyan());
    println!(
        "  Uses: {}",
        link.usage_count.to_string().bright_green().bold()
    );

    Ok(())
}

//! CLI administration tool for beerhall.
//!
//! Manages API tokens, inserts demo data and runs database diagnostics
//! without going through the web screens.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin token
//! cargo run --bin admin -- token create --name "Back office" --role admin
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Back office"
//!
//! # Insert demo brewers into an empty database
//! cargo run --bin admin -- seed
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server

use beerhall::application::services::auth_service::hash_token;
use beerhall::config::Config;
use beerhall::domain::repositories::{Role, TokenRepository};
use beerhall::infrastructure::persistence::seed::seed_demo_data;
use beerhall::infrastructure::persistence::{PgBrewerRepository, PgTokenRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing beerhall.
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
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Insert demo locations and brewers when no brewer exists
    Seed {
        /// Apply migrations first
        #[arg(long)]
        migrate: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Back office", "Shop frontend")
        #[arg(short, long)]
        name: Option<String>,

        /// Role granted to the token: admin or customer
        #[arg(short, long, default_value = "admin")]
        role: Role,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show server version and row counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Seed { migrate } => handle_seed(&pool, migrate).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = PgTokenRepository::new(Arc::new(pool.clone()));

    match action {
        TokenAction::Create {
            name,
            role,
            token,
            yes,
        } => {
            let secret = std::env::var("TOKEN_SIGNING_SECRET")
                .context("TOKEN_SIGNING_SECRET must be set")?;
            create_token(&repo, &secret, name, role, token, yes).await?;
        }
        TokenAction::List => list_tokens(&repo).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(&repo, name_or_id).await?,
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// Only the HMAC of the token is stored; the raw value is printed once.
async fn create_token(
    repo: &PgTokenRepository,
    signing_secret: &str,
    name: Option<String>,
    role: Role,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create API token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Back office")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "Using provided token value".yellow());
            t
        }
        None => {
            println!("{}", "Generated new token".green());
            generate_token()
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Name:  {}", token_name.cyan());
    println!("  Role:  {}", role.as_str().cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(signing_secret, &token_value);

    repo.create_token(&token_name, &token_hash, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!("{}", "Token created successfully!".green().bold());
    println!();
    println!("{}", "Sign in on the web screens at /login, or call the API:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/brewers",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with role and status.
///
/// ```text
///   ID  Name                           Role       Created              Status
///   1   Back office                    admin      2025-01-15 10:30     ACTIVE
/// ```
async fn list_tokens(repo: &PgTokenRepository) -> Result<()> {
    println!("{}", "API tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<10} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<30} {:<10} {:<20} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.role.as_str(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Revokes a token by name or ID after confirmation.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: &PgTokenRepository, name_or_id: String) -> Result<()> {
    println!("{}", "Revoke API token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  Role:  {}", token.role.as_str());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!("{}", "Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Inserts the demo data set.
async fn handle_seed(pool: &PgPool, migrate: bool) -> Result<()> {
    if migrate {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .context("Failed to migrate")?;
        println!("{}", "Migrations applied".green());
    }

    let repository = PgBrewerRepository::new(Arc::new(pool.clone()));

    let inserted = seed_demo_data(pool, &repository)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed: {}", e))?;

    if inserted {
        println!("{}", "Demo brewers inserted".green().bold());
    } else {
        println!("{}", "Brewers already present, nothing inserted".yellow());
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            println!("  PostgreSQL: {}", version.bright_white());

            for (label, sql) in [
                ("Locations", "SELECT COUNT(*) FROM location"),
                ("Brewers", "SELECT COUNT(*) FROM brewer"),
                ("Beers", "SELECT COUNT(*) FROM beer"),
                (
                    "Active tokens",
                    "SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL",
                ),
            ] {
                let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
                println!("  {:<14} {}", format!("{label}:"), count.to_string().bright_green().bold());
            }
            println!();
        }
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// 48 characters from A-Z, a-z, 0-9 (~286 bits of entropy).
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

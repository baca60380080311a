//! CLI provisioning tool for affiliate-tracker.
//!
//! Creates affiliates, offers and links, and shows basic counts, using the
//! elevated database credentials. There is no HTTP API for these operations.
//!
//! # Usage
//!
//! ```bash
//! # Register an affiliate with a random code
//! cargo run --bin admin -- affiliate create
//!
//! # Register an offer
//! cargo run --bin admin -- offer create --name "Summer Sale" --slug summer-sale \
//!     --url https://shop.example/summer
//!
//! # Give the affiliate a link to it
//! cargo run --bin admin -- link create --affiliate jane --offer summer-sale
//!
//! # Pause the offer
//! cargo run --bin admin -- offer deactivate summer-sale
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use affiliate_tracker::config::Config;
use affiliate_tracker::domain::entities::NewLink;
use affiliate_tracker::domain::repositories::{AffiliateRepository, LinkRepository};
use affiliate_tracker::infrastructure::persistence::{PgAffiliateRepository, PgLinkRepository};
use affiliate_tracker::utils::code_generator::{
    AFFILIATE_CODE_LENGTH, generate_short_code, validate_slug,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

const MAX_CODE_ATTEMPTS: usize = 10;

/// CLI tool for provisioning affiliate-tracker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage affiliates
    Affiliate {
        #[command(subcommand)]
        action: AffiliateAction,
    },

    /// Manage offers
    Offer {
        #[command(subcommand)]
        action: OfferAction,
    },

    /// Manage tracking links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show row counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum AffiliateAction {
    /// Create an affiliate
    Create {
        /// Public code used in vanity URLs (random if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List all affiliates
    List,
}

#[derive(Subcommand)]
enum OfferAction {
    /// Create an offer
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// URL segment used in vanity URLs
        #[arg(short, long)]
        slug: Option<String>,

        /// Absolute http(s) destination
        #[arg(short, long)]
        url: Option<String>,
    },

    /// List all offers
    List,

    /// Resume redirects for an offer
    Activate {
        slug: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Stop redirects for an offer
    Deactivate {
        slug: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Create a link with a generated short code
    Create {
        /// Affiliate code
        #[arg(short, long)]
        affiliate: String,

        /// Offer slug
        #[arg(short, long)]
        offer: String,

        /// Optional display name
        #[arg(short, long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(sqlx::FromRow)]
struct AffiliateRow {
    code: String,
    created_at: DateTime<Utc>,
    links: i64,
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    name: String,
    slug: String,
    destination_url: String,
    active: bool,
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
        Commands::Affiliate { action } => handle_affiliate_action(action, &pool).await?,
        Commands::Offer { action } => handle_offer_action(action, &pool).await?,
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_affiliate_action(action: AffiliateAction, pool: &PgPool) -> Result<()> {
    match action {
        AffiliateAction::Create { code } => create_affiliate(pool, code).await,
        AffiliateAction::List => list_affiliates(pool).await,
    }
}

/// Creates an affiliate with the given or a generated code.
async fn create_affiliate(pool: &PgPool, code: Option<String>) -> Result<()> {
    println!("{}", "👤 Create Affiliate".bright_blue().bold());
    println!();

    let code = match code {
        Some(c) => {
            let c = c.trim().to_lowercase();
            validate_slug("code", &c).map_err(|e| anyhow::anyhow!("{}", e))?;
            c
        }
        None => {
            let generated = generate_affiliate_code();
            println!("{}", "✨ Generated affiliate code".green());
            generated
        }
    };

    let id: Uuid = sqlx::query_scalar("INSERT INTO affiliates (code) VALUES ($1) RETURNING id")
        .bind(&code)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to create affiliate '{}'", code))?;

    println!();
    println!("{}", "✅ Affiliate created".green().bold());
    println!("  Code: {}", code.bright_yellow().bold());
    println!("  ID:   {}", id.to_string().bright_black());
    println!();

    Ok(())
}

async fn list_affiliates(pool: &PgPool) -> Result<()> {
    println!("{}", "📋 Affiliates".bright_blue().bold());
    println!();

    let affiliates = sqlx::query_as::<_, AffiliateRow>(
        r#"
        SELECT a.code, a.created_at, COUNT(l.id) AS links
        FROM affiliates a
        LEFT JOIN links l ON l.affiliate_id = a.id
        GROUP BY a.id
        ORDER BY a.created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    if affiliates.is_empty() {
        println!("{}", "  No affiliates found".yellow());
        println!();
        println!(
            "  Create one with: {} admin affiliate create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<24} {:<20} {:<6}",
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Links".bright_white().bold()
    );
    println!("  {}", "─".repeat(52).bright_black());

    for affiliate in &affiliates {
        println!(
            "  {:<24} {:<20} {}",
            affiliate.code.cyan(),
            affiliate
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            affiliate.links
        );
    }

    println!();
    println!(
        "  Total: {}",
        affiliates.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_offer_action(action: OfferAction, pool: &PgPool) -> Result<()> {
    match action {
        OfferAction::Create { name, slug, url } => create_offer(pool, name, slug, url).await,
        OfferAction::List => list_offers(pool).await,
        OfferAction::Activate { slug, yes } => set_offer_active(pool, &slug, true, yes).await,
        OfferAction::Deactivate { slug, yes } => set_offer_active(pool, &slug, false, yes).await,
    }
}

/// Creates an offer, prompting for any field not given on the command line.
async fn create_offer(
    pool: &PgPool,
    name: Option<String>,
    slug: Option<String>,
    url: Option<String>,
) -> Result<()> {
    println!("{}", "🏷️  Create Offer".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Offer name").interact_text()?,
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Offer name cannot be empty");
    }

    let slug = match slug {
        Some(s) => s,
        None => Input::new().with_prompt("Slug").interact_text()?,
    };
    let slug = slug.trim().to_lowercase();
    validate_slug("slug", &slug).map_err(|e| anyhow::anyhow!("{}", e))?;

    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Destination URL").interact_text()?,
    };
    let destination_url = validate_destination(url.trim())?;

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO offers (name, slug, destination_url) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&name)
    .bind(&slug)
    .bind(&destination_url)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to create offer '{}'", slug))?;

    println!("{}", "✅ Offer created".green().bold());
    println!("  Name: {}", name.cyan());
    println!("  Slug: {}", slug.bright_yellow());
    println!("  URL:  {}", destination_url.bright_white());
    println!("  ID:   {}", id.to_string().bright_black());
    println!();

    Ok(())
}

async fn list_offers(pool: &PgPool) -> Result<()> {
    println!("{}", "📋 Offers".bright_blue().bold());
    println!();

    let offers = sqlx::query_as::<_, OfferRow>(
        "SELECT name, slug, destination_url, active FROM offers ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    if offers.is_empty() {
        println!("{}", "  No offers found".yellow());
        return Ok(());
    }

    println!(
        "  {:<24} {:<24} {:<10} {}",
        "Name".bright_white().bold(),
        "Slug".bright_white().bold(),
        "Status".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for offer in &offers {
        let status = if offer.active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<24} {:<24} {:<10} {}",
            offer.name.cyan(),
            offer.slug,
            status,
            offer.destination_url.bright_black()
        );
    }

    println!();

    Ok(())
}

/// Flips an offer's active flag after confirmation.
///
/// Deactivating takes effect on the next redirect: links to the offer start
/// answering 404.
async fn set_offer_active(pool: &PgPool, slug: &str, active: bool, skip_confirm: bool) -> Result<()> {
    let current: Option<bool> = sqlx::query_scalar("SELECT active FROM offers WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    let current = current.with_context(|| format!("Offer '{}' not found", slug))?;

    if current == active {
        let state = if active { "active" } else { "inactive" };
        println!("{}", format!("⚠️  Offer is already {}", state).yellow());
        return Ok(());
    }

    let verb = if active { "Activate" } else { "Deactivate" };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} offer '{}'?", verb, slug))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    sqlx::query("UPDATE offers SET active = $1 WHERE slug = $2")
        .bind(active)
        .bind(slug)
        .execute(pool)
        .await?;

    println!("{}", format!("✅ {}d '{}'", verb, slug).green().bold());

    Ok(())
}

async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let affiliates = PgAffiliateRepository::new(pool.clone());
    let links = PgLinkRepository::new(pool.clone());

    match action {
        LinkAction::Create {
            affiliate,
            offer,
            name,
        } => create_link(&pool, &affiliates, &links, &affiliate, &offer, name).await,
    }
}

/// Creates a link for an affiliate and offer with a fresh short code.
///
/// Inactive offers are accepted here; the link simply won't redirect until
/// the offer is activated.
async fn create_link(
    pool: &PgPool,
    affiliates: &PgAffiliateRepository,
    links: &PgLinkRepository,
    affiliate_code: &str,
    offer_slug: &str,
    name: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let affiliate = affiliates
        .find_by_code(affiliate_code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Affiliate '{}' not found", affiliate_code))?;

    let offer_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM offers WHERE slug = $1")
        .bind(offer_slug)
        .fetch_optional(pool)
        .await?;
    let offer_id = offer_id.with_context(|| format!("Offer '{}' not found", offer_slug))?;

    let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    for _ in 0..MAX_CODE_ATTEMPTS {
        let short_code = generate_short_code();
        let taken = links
            .short_code_exists(&short_code)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
        if taken {
            continue;
        }

        let link = links
            .create(NewLink {
                affiliate_id: affiliate.id,
                offer_id,
                short_code,
                name: name.clone(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

        println!("{}", "✅ Link created".green().bold());
        println!("  Short code: {}", link.short_code.bright_yellow().bold());
        println!(
            "  Short URL:  /r/{}",
            link.short_code.bright_white()
        );
        println!(
            "  Vanity URL: /go/{}/{}",
            affiliate.code.bright_white(),
            offer_slug.bright_white()
        );
        println!();

        return Ok(());
    }

    anyhow::bail!("Failed to generate unique code after {} attempts", MAX_CODE_ATTEMPTS)
}

/// Displays row counts for the main tables.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    for (label, table) in [
        ("Affiliates", "affiliates"),
        ("Offers", "offers"),
        ("Links", "links"),
        ("Clicks", "clicks"),
        ("Conversions", "conversions"),
    ] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await?;

        println!(
            "  {:<13} {}",
            format!("{}:", label),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

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
            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Checks that a destination is an absolute http(s) URL and normalizes it.
fn validate_destination(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("Invalid URL '{}'", raw))?;

    match url.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("URL scheme must be http or https, got '{}'", other),
    }

    if url.host_str().is_none() {
        anyhow::bail!("URL must have a host");
    }

    Ok(url.to_string())
}

/// Generates a random affiliate code.
///
/// # Format
///
/// - Length: 8 characters
/// - Character set: a-z, 0-9, so the code is always a valid slug
fn generate_affiliate_code() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();

    (0..AFFILIATE_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

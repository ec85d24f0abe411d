//! CLI administration tool for named-links.
//!
//! Read-only inspection of the entry store without going through HTTP.
//! Mutations are left to the running server, which is the only writer; the
//! store file must already exist and is never touched by this tool.
//!
//! # Usage
//!
//! ```bash
//! # List all entries with redirect counts
//! cargo run --bin admin -- list
//!
//! # Show one entry (does not count as a redirect)
//! cargo run --bin admin -- show docs
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Verify the store file can be opened and parsed
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_PATH` (optional): collection file, default `db.json`

use named_links::application::services::ShortenerService;
use named_links::config::DEFAULT_STORE_PATH;
use named_links::domain::entities::Entry;
use named_links::infrastructure::persistence::JsonEntryRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for inspecting the named-links store.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store file (overrides `STORE_PATH`)
    #[arg(short, long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all entries
    List,

    /// Show a single entry
    Show {
        /// Short name to look up
        name: String,
    },

    /// Show totals
    Stats,

    /// Check that the store can be opened and parsed
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let store_path = cli
        .store
        .or_else(|| std::env::var("STORE_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

    let repository = JsonEntryRepository::open_existing(&store_path, Duration::from_secs(5))
        .await
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;
    let service = ShortenerService::new(Arc::new(repository));

    match cli.command {
        Commands::List => list_entries(&service).await?,
        Commands::Show { name } => show_entry(&service, &name).await?,
        Commands::Stats => show_stats(&service).await?,
        Commands::Check => {
            let entries = service
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load entries: {}", e))?;
            println!(
                "{} {} ({} entries)",
                "Store OK:".green().bold(),
                store_path.display().to_string().cyan(),
                entries.len()
            );
        }
    }

    Ok(())
}

/// Prints every entry as a table.
///
/// # Output Format
///
/// ```text
/// Entries
///
///   Name                 Count    Destination
///   ───────────────────────────────────────────────────────────────
///   docs                 12       https://example.com/docs
/// ```
async fn list_entries(service: &ShortenerService<JsonEntryRepository>) -> Result<()> {
    println!("{}", "Entries".bright_blue().bold());
    println!();

    let entries = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load entries: {}", e))?;

    if entries.is_empty() {
        println!("{}", "  No entries found".yellow());
        println!();
        println!(
            "  Register one with: {}",
            "POST /shorten {\"from_name\": ..., \"to_url\": ...}".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<20} {:<8} {}",
        "Name".bright_white().bold(),
        "Count".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for entry in &entries {
        println!(
            "  {:<20} {:<8} {}",
            entry.name.cyan(),
            entry.count.to_string().bright_green(),
            entry.destination
        );
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_entry(service: &ShortenerService<JsonEntryRepository>, name: &str) -> Result<()> {
    let entry: Entry = service
        .stats(name)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", name, e))?;

    println!("  Name:        {}", entry.name.cyan());
    println!("  UUID:        {}", entry.id.bright_black());
    println!("  Destination: {}", entry.destination);
    println!(
        "  Redirects:   {}",
        entry.count.to_string().bright_green().bold()
    );

    Ok(())
}

/// Displays totals and the most redirected entry.
async fn show_stats(service: &ShortenerService<JsonEntryRepository>) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let entries = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load entries: {}", e))?;

    let redirects: u64 = entries.iter().map(|e| e.count).sum();

    println!(
        "  Entries:   {}",
        entries.len().to_string().bright_green().bold()
    );
    println!(
        "  Redirects: {}",
        redirects.to_string().bright_green().bold()
    );

    if let Some(top) = entries.iter().max_by_key(|e| e.count) {
        println!(
            "  Top:       {} ({})",
            top.name.cyan(),
            top.count.to_string().bright_white()
        );
    }
    println!();

    Ok(())
}

//! Conversion CLI
//!
//! Command-line interface for the Currency Conversion API.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use conversion_client::ConversionClient;
use conversion_repo::build_rates;
use conversion_types::{CurrencyCode, NewExchangeRate};

#[derive(Parser)]
#[command(name = "conversion")]
#[command(author, version, about = "Currency Conversion API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Conversion API
    #[arg(
        long,
        env = "CONVERSION_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the exchange rate between two currencies
    Convert {
        /// Source currency code, e.g. EUR
        source: String,
        /// Target currency code, e.g. USD
        target: String,
        /// Instant to resolve at (RFC 3339), defaults to now
        #[arg(long)]
        date: Option<String>,
    },
    /// Check API health
    Health,
    /// Load rate records from a JSON file into a database
    Seed {
        /// Database to write to, e.g. sqlite://rates.db
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
        /// JSON array of rate records
        #[arg(long)]
        file: PathBuf,
    },
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.to_uppercase()
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}", s))
}

fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| anyhow::anyhow!("Invalid date {}: {}", s, e))
}

async fn seed(database_url: &str, file: &PathBuf) -> Result<usize> {
    if database_url.starts_with("memory:") {
        anyhow::bail!("Seeding an in-memory store has no lasting effect; use a sqlite:// URL");
    }

    let contents = tokio::fs::read_to_string(file).await?;
    let records: Vec<NewExchangeRate> = serde_json::from_str(&contents)?;

    let rates = build_rates(database_url).await?;
    let inserted = rates.insert_rates(records).await?;
    Ok(inserted.len())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = ConversionClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }
        Commands::Convert {
            source,
            target,
            date,
        } => {
            let source = parse_currency(&source)?;
            let target = parse_currency(&target)?;
            let date = date.as_deref().map(parse_date).transpose()?;

            match client.convert(source, target, date).await? {
                Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                None => {
                    println!("✗ No rate available for {} -> {}", source, target);
                    std::process::exit(1);
                }
            }
        }
        Commands::Seed { database_url, file } => {
            let count = seed(&database_url, &file).await?;
            println!("✓ Seeded {} rate records", count);
        }
    }

    Ok(())
}

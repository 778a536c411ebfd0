use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pocket_core::contacts::factory::{DEFAULT_API_KEY, DEFAULT_ROOT_URL};
use pocket_core::contacts::ApiConfig;
use pocket_data::ContactImporter;
use pocket_http::HttpContactRepository;

/// Import contacts from a CSV file into the ContactBook web API.
///
/// The CSV file needs a header row with these columns (any order):
/// - name: the contact's display name
/// - phone: the contact's phone number
#[derive(Parser, Debug)]
#[command(name = "pocket-import")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing contacts
    #[arg(short, long)]
    file: PathBuf,

    /// Root URL of the contact book API
    #[arg(long, env = "POCKET_API_ROOT", default_value = DEFAULT_ROOT_URL)]
    root_url: String,

    /// API key identifying the contact book
    #[arg(long, env = "POCKET_API_KEY", default_value = DEFAULT_API_KEY)]
    api_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        root_url: args.root_url,
        api_key: args.api_key,
        ..ApiConfig::default()
    };
    let repo = HttpContactRepository::new(&config).context("Failed to set up the HTTP client")?;

    println!("Importing contacts from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = ContactImporter::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let added = ContactImporter::load(&repo, &records)
        .await
        .context("Failed to import contacts")?;

    println!("Successfully added {} contacts.", added);

    Ok(())
}

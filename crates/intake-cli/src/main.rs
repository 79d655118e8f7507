//! Intake CLI - command-line client for the intake API.
//!
//! Set INTAKE_API_URL or pass --url to point at a server.

use anyhow::Context;
use clap::{Parser, Subcommand};
use intake_cli::{init_tracing, ApiClient};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "intake", about = "Intake API CLI")]
struct Cli {
    /// API base URL (overrides INTAKE_API_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file as an import
    Submit {
        /// Path to the file to upload
        file: std::path::PathBuf,
        /// Submitter identity (server defaults to "anon")
        #[arg(long)]
        user: Option<String>,
    },
    /// Show an import record by ID
    Status {
        /// Import UUID
        id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let client = match cli.url {
        Some(url) => ApiClient::new(url),
        None => ApiClient::from_env(),
    }
    .context("Failed to create API client")?;

    match cli.command {
        Commands::Submit { file, user } => {
            let response = client.submit_file(&file, user.as_deref()).await?;
            print_json(&response)?;
        }
        Commands::Status { id } => {
            let record = client.get_import(&id).await?;
            print_json(&record)?;
        }
    }

    Ok(())
}

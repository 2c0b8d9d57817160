//! Editable Request CLI - App setup and configuration tools.
//!
//! # Usage
//!
//! ```bash
//! # Print the Slack app manifest
//! editable-request-cli manifest --base-url https://requests.example.com
//!
//! # Validate configuration
//! editable-request-cli check-config --verify-token
//! ```
//!
//! # Commands
//!
//! - `manifest` - Generate the Slack app manifest
//! - `check-config` - Validate environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::manifest::ManifestFormat;

#[derive(Parser)]
#[command(name = "editable-request-cli")]
#[command(author, version, about = "Editable Request CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Slack app manifest
    Manifest {
        /// Public base URL of the app (defaults to `APP_BASE_URL`)
        #[arg(short, long)]
        base_url: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: ManifestFormat,
    },
    /// Validate environment configuration
    CheckConfig {
        /// Call Slack `auth.test` with the bot token
        #[arg(long)]
        verify_token: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Manifest { base_url, format } => {
            let _ = dotenvy::dotenv();
            commands::manifest::print(base_url.as_deref(), format)?;
        }
        Commands::CheckConfig { verify_token } => {
            commands::config::check(verify_token).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_manifest_format() {
        let cli = Cli::try_parse_from([
            "editable-request-cli",
            "manifest",
            "--base-url",
            "https://requests.example.com",
            "--format",
            "json",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        assert!(matches!(
            cli.command,
            Commands::Manifest {
                format: ManifestFormat::Json,
                ..
            }
        ));
    }
}

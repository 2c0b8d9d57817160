//! Slack app manifest generation.
//!
//! # Usage
//!
//! ```bash
//! # YAML, ready to paste into the app configuration page
//! editable-request-cli manifest --base-url https://requests.example.com
//!
//! # JSON
//! editable-request-cli manifest --base-url https://requests.example.com --format json
//! ```
//!
//! # Environment Variables
//!
//! - `APP_BASE_URL` - Used when `--base-url` is not given

use clap::ValueEnum;
use editable_request_app::manifest::{AppManifest, build_manifest};
use thiserror::Error;
use url::Url;

/// Errors that can occur while generating the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No base URL on the command line or in the environment.
    #[error("No base URL: pass --base-url or set APP_BASE_URL")]
    MissingBaseUrl,

    /// Base URL could not be parsed or joined.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// YAML serialization failed.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Manifest output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

/// Render the manifest for an app served at `base_url`.
///
/// # Errors
///
/// Returns an error if the URL is invalid or serialization fails.
pub fn render(base_url: Option<&str>, format: ManifestFormat) -> Result<String, ManifestError> {
    let base_url = base_url
        .map(ToString::to_string)
        .or_else(|| std::env::var("APP_BASE_URL").ok())
        .ok_or(ManifestError::MissingBaseUrl)?;
    let manifest = build_manifest(&Url::parse(&base_url)?)?;

    serialize(&manifest, format)
}

fn serialize(manifest: &AppManifest, format: ManifestFormat) -> Result<String, ManifestError> {
    Ok(match format {
        ManifestFormat::Yaml => serde_yaml::to_string(manifest)?,
        ManifestFormat::Json => serde_json::to_string_pretty(manifest)?,
    })
}

/// Print the manifest to stdout.
///
/// # Errors
///
/// Returns an error if the manifest cannot be rendered.
pub fn print(base_url: Option<&str>, format: ManifestFormat) -> Result<(), ManifestError> {
    let rendered = render(base_url, format)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which conversion backend the export pipeline talks to.
#[derive(Debug, Clone)]
pub enum RendererConfig {
    /// Gotenberg-compatible HTTP conversion service (default).
    Service { url: String },
    /// Local wkhtmltopdf process.
    Wkhtmltopdf { binary: String },
}

/// Application configuration loaded from environment variables.
/// Fails fast at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub site_dir: PathBuf,
    pub data_dir: PathBuf,
    pub renderer: RendererConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let renderer = match std::env::var("PDF_RENDERER")
            .unwrap_or_else(|_| "service".to_string())
            .as_str()
        {
            "service" => RendererConfig::Service {
                url: require_env("PDF_SERVICE_URL")?,
            },
            "wkhtmltopdf" => RendererConfig::Wkhtmltopdf {
                binary: std::env::var("WKHTMLTOPDF_BIN")
                    .unwrap_or_else(|_| "wkhtmltopdf".to_string()),
            },
            other => bail!("PDF_RENDERER must be 'service' or 'wkhtmltopdf', got '{other}'"),
        };

        Ok(Config {
            redis_url: require_env("REDIS_URL")?,
            site_dir: PathBuf::from(std::env::var("SITE_DIR").unwrap_or_else(|_| "site".to_string())),
            data_dir: PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
            renderer,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

mod config;
mod content;
mod errors;
mod export;
mod i18n;
mod markup;
mod migrate;
mod models;
mod pdf_client;
mod prefs;
mod render;
mod routes;
mod site;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::Semaphore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, RendererConfig};
use crate::content::ContentStore;
use crate::pdf_client::{HttpRenderer, PdfRenderer, WkhtmltopdfRenderer};
use crate::prefs::PrefStore;
use crate::render::CvStyle;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // `migrate` is the one-shot CLI arm; no argument boots the server.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(command) = args.first() {
        if command != "migrate" {
            bail!("unknown command '{command}' (expected: migrate <index.html> <resume.json>)");
        }
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
        let (Some(index), Some(resume)) = (args.get(1), args.get(2)) else {
            bail!("usage: folio-api migrate <index.html> <resume.json>");
        };
        return migrate::run(Path::new(index), Path::new(resume)).await;
    }

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Redis (preference store)
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize the conversion backend behind the PdfRenderer seam
    let pdf: Arc<dyn PdfRenderer> = match &config.renderer {
        RendererConfig::Service { url } => {
            info!("PDF renderer: conversion service at {url}");
            Arc::new(HttpRenderer::new(url.clone()))
        }
        RendererConfig::Wkhtmltopdf { binary } => {
            info!("PDF renderer: local process ({binary})");
            Arc::new(WkhtmltopdfRenderer::new(binary.clone()))
        }
    };

    // Build app state
    let state = AppState {
        store: ContentStore::new(&config.data_dir),
        prefs: PrefStore::new(redis),
        pdf,
        cv_style: CvStyle::default(),
        config: config.clone(),
        export_gate: Arc::new(Semaphore::new(1)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

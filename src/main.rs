//! Instant-Film Soft-Proof Conversion Service
//!
//! Accepts an uploaded photo over HTTP, resizes and sharpens it, remaps it
//! through an ICC transform emulating an instant-film printer's output
//! gamut, and returns the JPEG raw or embedded in a download-ready page.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use instaxify::api::auth::BasicAuth;
use instaxify::api::rest::{create_router, AppState};
use instaxify::config::Config;
use instaxify::convert::Converter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting conversion service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load(Config::default_path()).unwrap_or_else(|e| {
        info!("Using default config ({})", e);
        Config::default()
    });

    info!("Configuration loaded:");
    info!("  Port: {}", config.server.port);
    info!("  Target dimension: {}", config.pipeline.max_dim);
    info!("  JPEG quality: {}", config.pipeline.jpeg_quality);
    info!("  Auth enabled: {}", config.auth.is_some());
    info!("  TLS enabled: {}", config.server.tls.is_some());

    // The ICC transform is built exactly once and reused for every request
    info!("Creating ICC conversion transform...");
    let converter = Converter::from_config(&config).context("failed to build converter")?;

    let state = Arc::new(AppState {
        converter,
        auth: config.auth.as_ref().map(BasicAuth::new),
        max_payload_size: config.pipeline.max_payload_size,
    });

    let router = create_router(state);
    let addr: SocketAddr = format!("0.0.0.0:{}", config.server.port).parse()?;

    match &config.server.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
                .await
                .context("failed to load TLS certificate")?;
            info!("Listening on https://{}", addr);
            axum_server::bind_rustls(addr, rustls)
                .serve(router.into_make_service())
                .await?;
        }
        None => {
            let listener = TcpListener::bind(addr).await?;
            info!("Listening on http://{}", addr);
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}

mod compile;
mod config;
mod db;
mod errors;
mod models;
mod render;
mod routes;
mod scoring;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::render::PdfLatexTypesetter;
use crate::routes::build_router;
use crate::state::{AppState, CompileLocks};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("tailor_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (the inventory document store)
    let db = create_pool(&config.database_url).await?;

    // Typesetting backend: pdflatex behind the Typesetter trait
    let typesetter = Arc::new(PdfLatexTypesetter::new(
        config.pdflatex_bin.clone(),
        Duration::from_secs(config.typeset_timeout_secs),
    ));
    info!("Typesetter initialized (bin: {})", config.pdflatex_bin);

    // Output directory for compiled PDFs must exist before the first compile
    tokio::fs::create_dir_all(&config.output_dir).await?;

    let state = AppState {
        db,
        config: config.clone(),
        typesetter,
        compile_locks: CompileLocks::default(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! # Inkwell API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use inkwell_infra::Storage;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Inkwell API Server on {}:{}",
        config.host,
        config.port
    );

    // The store lives for the whole process and is closed after the server stops.
    let storage = Storage::open(config.database.as_ref())
        .await
        .context("failed to open the post store")?;
    let state = AppState::new(storage.posts());

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    tracing::info!("HTTP server stopped, closing store");
    storage.close().await.context("failed to close the post store")?;

    Ok(())
}

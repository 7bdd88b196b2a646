// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Getaway Planner API Server
//!
//! Serves the view state and planning actions of the getaway app, backed by
//! the Gemini generateContent API.

use getaway_planner::{
    config::Config,
    controller::Controller,
    routes::spawn_pending,
    services::{Gateway, GeminiClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        model = %config.gemini_model,
        "Starting Getaway Planner API"
    );

    let gemini = GeminiClient::from_config(&config)?;
    let controller = Controller::new(
        Gateway::new(Arc::new(gemini)),
        config.prediction_debounce(),
    );

    // Guest session starts on the explore tab; load its first result set
    spawn_pending(controller.refresh_suggestions().await);

    let state = Arc::new(AppState {
        config: config.clone(),
        controller,
    });

    // Build router
    let app = getaway_planner::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("getaway_planner=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

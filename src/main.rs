// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Camp Booking API Server
//!
//! Serves camps, organizers, camp types, booking requests and events to the
//! web client, with Firestore for storage and Firebase Authentication for
//! sign-in.

use camp_booking::{
    config::Config, db::FirestoreDb, services::FirebaseTokenVerifier, AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        archival_policy = ?config.archival_policy,
        "Starting Camp Booking API"
    );

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    let identity_verifier = Arc::new(FirebaseTokenVerifier::new(&config)?);

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), db, identity_verifier));

    // Build router
    let app = camp_booking::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("camp_booking=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

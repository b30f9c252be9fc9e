// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MedMinder API Server
//!
//! Stores medication reminders and emails caregivers when one fires.

use medminder::{
    config::{Config, DatastoreKind},
    db::{Datastore, FirestoreDb, MemoryDb},
    services::SmtpMailer,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, datastore = ?config.datastore, "Starting MedMinder API");

    let db: Arc<dyn Datastore> = match config.datastore {
        DatastoreKind::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        DatastoreKind::Memory => {
            tracing::warn!("Using in-memory datastore; data will not survive a restart");
            Arc::new(MemoryDb::new())
        }
    };

    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);

    // Build shared state
    let state = Arc::new(AppState::new(db, mailer));

    // Build router
    let app = medminder::routes::create_router(state.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let caregiver emails that are already on their way finish.
    state.notifier.shutdown().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("medminder=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}

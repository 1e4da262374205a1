//! HTTP server for the nomad API.
//!
//! | Method | Path                                      | Description                      |
//! |--------|-------------------------------------------|----------------------------------|
//! | GET    | `/health`                                 | Liveness                         |
//! | GET    | `/ready`                                  | Node reachability                |
//! | POST   | `/api/transaction-confirmation`           | Receipt status of a transaction  |
//! | GET    | `/api/experiences?q=`                     | Catalog cards, optionally filtered |
//! | POST   | `/api/experiences/draft`                  | createExperience wallet payload  |
//! | GET    | `/api/experiences/{id}`                   | One experience card              |
//! | GET    | `/api/experiences/{id}/status/{address}`  | Membership status                |
//! | GET    | `/api/users/{address}/schedule`           | Upcoming and past experiences    |
//! | GET    | `/api/users/{address}/profile`            | Profile summary                  |

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Build the router; separate from [`start_server`] so tests can drive it
pub fn create_router(state: AppState) -> Router {
    // Mini-app hosts load the front end from their own origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route(
            "/api/transaction-confirmation",
            post(handlers::confirm_transaction),
        )
        .route("/api/experiences", get(handlers::list_experiences))
        .route("/api/experiences/draft", post(handlers::draft_experience))
        .route("/api/experiences/{id}", get(handlers::get_experience))
        .route(
            "/api/experiences/{id}/status/{address}",
            get(handlers::experience_status),
        )
        .route("/api/users/{address}/schedule", get(handlers::user_schedule))
        .route("/api/users/{address}/profile", get(handlers::user_profile))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve until ctrl-c
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let ledger = state.marketplace.ledger().endpoint_name();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, %ledger, "nomad API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("nomad API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

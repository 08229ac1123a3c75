// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use triage_config::model::GatewayConfig;
use triage_core::TriageError;
use triage_tickets::TicketService;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub service: Arc<TicketService>,
    /// Page size for `GET /v1/tickets` when no `limit` is given.
    pub recent_limit: usize,
}

/// Build the API router.
pub fn router(service: Arc<TicketService>, recent_limit: usize) -> Router {
    let state = GatewayState {
        service,
        recent_limit,
    };

    Router::new()
        .route(
            "/v1/tickets",
            post(handlers::create_ticket).get(handlers::list_tickets),
        )
        .route("/v1/tickets/{id}", get(handlers::get_ticket))
        .route("/v1/tickets/{id}/resolve", post(handlers::resolve_ticket))
        .route("/v1/summary", get(handlers::get_summary))
        .route("/v1/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until `token` is cancelled.
pub async fn serve(
    config: &GatewayConfig,
    service: Arc<TicketService>,
    token: CancellationToken,
) -> Result<(), TriageError> {
    let app = router(service, config.recent_limit);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TriageError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await
        .map_err(|e| TriageError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

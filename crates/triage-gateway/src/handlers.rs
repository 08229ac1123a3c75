// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the ticket API.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use triage_core::{Adapter, HealthStatus, Ticket, TicketId, TicketSource, TriageError};
use triage_tickets::{TicketRequest, TicketSummary};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Request body for POST /v1/tickets.
#[derive(Debug, Deserialize)]
pub struct CreateTicketBody {
    #[serde(default)]
    pub description: String,
    /// Defaults to `medium` when omitted.
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Intake channel label; defaults to `web`.
    #[serde(default)]
    pub source: Option<String>,
}

/// Request body for POST /v1/tickets/{id}/resolve. An empty body means no notes.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveBody {
    #[serde(default)]
    pub resolution_notes: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TicketList {
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: String,
    pub version: &'static str,
}

/// POST /v1/tickets
pub async fn create_ticket(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let body: CreateTicketBody = serde_json::from_slice(&body)
        .map_err(|e| TriageError::validation("body", format!("malformed body: {e}")))?;
    let source = match body.source.as_deref().map(str::trim) {
        None | Some("") => TicketSource::Web,
        Some(raw) => raw.parse().map_err(|_| {
            TriageError::validation(
                "source",
                format!("`{raw}` is not one of web, api, email, cli"),
            )
        })?,
    };
    let mut request = TicketRequest::new(body.description, source)
        .with_priority(body.priority.unwrap_or_else(|| "medium".to_string()));
    request.contact_email = body.contact_email;

    let ticket = state.service.create(request).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /v1/tickets?limit=N
pub async fn list_tickets(
    State(state): State<GatewayState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TicketList>, ApiError> {
    let limit = query.limit.unwrap_or(state.recent_limit);
    let tickets = state.service.list_recent(limit).await?;
    Ok(Json(TicketList { tickets }))
}

/// GET /v1/tickets/{id}
pub async fn get_ticket(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, ApiError> {
    Ok(Json(state.service.get(TicketId(id)).await?))
}

/// POST /v1/tickets/{id}/resolve
pub async fn resolve_ticket(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<Ticket>, ApiError> {
    let body: ResolveBody = if body.iter().all(u8::is_ascii_whitespace) {
        ResolveBody::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            TriageError::validation("resolution_notes", format!("malformed body: {e}"))
        })?
    };
    let ticket = state
        .service
        .resolve(TicketId(id), body.resolution_notes)
        .await?;
    Ok(Json(ticket))
}

/// GET /v1/summary
pub async fn get_summary(
    State(state): State<GatewayState>,
) -> Result<Json<TicketSummary>, ApiError> {
    Ok(Json(state.service.summary().await?))
}

/// GET /v1/health
pub async fn get_health(State(state): State<GatewayState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, store) = match state.service.store().health_check().await {
        Ok(HealthStatus::Healthy) => (StatusCode::OK, "ok", "healthy".to_string()),
        Ok(HealthStatus::Degraded(reason)) => (StatusCode::OK, "degraded", reason),
        Ok(HealthStatus::Unhealthy(reason)) => {
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", reason)
        }
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", e.to_string()),
    };
    (
        code,
        Json(HealthResponse {
            status,
            store,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

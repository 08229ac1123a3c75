// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from `TriageError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use triage_core::TriageError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// The offending request field, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

/// Handler error wrapper so `?` works on service calls.
#[derive(Debug)]
pub struct ApiError(pub TriageError);

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TriageError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            TriageError::NotFound { .. } => StatusCode::NOT_FOUND,
            TriageError::InvalidState { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let field = match &self.0 {
            TriageError::Validation { field, .. } => Some(*field),
            _ => None,
        };
        // Internal details stay in the log.
        let message = if status.is_server_error() {
            error!(error = %self.0, "request failed");
            "internal error".to_string()
        } else {
            self.0.to_string()
        };
        (status, Json(ErrorResponse { error: message, field })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{TicketId, TicketStatus};

    #[test]
    fn status_mapping() {
        let cases = [
            (TriageError::validation("priority", "is required"), 422),
            (TriageError::NotFound { id: TicketId(1) }, 404),
            (
                TriageError::InvalidState {
                    id: TicketId(1),
                    status: TicketStatus::Resolved,
                },
                409,
            ),
            (TriageError::Internal("boom".into()), 500),
        ];
        for (err, code) in cases {
            assert_eq!(ApiError(err).status().as_u16(), code);
        }
    }
}

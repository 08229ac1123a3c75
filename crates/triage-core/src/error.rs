// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Triage support desk.

use thiserror::Error;

use crate::types::{TicketId, TicketStatus};

/// The primary error type used across collaborator traits and core operations.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Malformed input to ticket creation. The ticket is not created.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending request field.
        field: &'static str,
        message: String,
    },

    /// A ticket id that does not reference an existing ticket.
    #[error("ticket {id} not found")]
    NotFound { id: TicketId },

    /// A lifecycle transition that is not allowed from the ticket's current status.
    #[error("ticket {id} is {status}, expected open")]
    InvalidState { id: TicketId, status: TicketStatus },

    /// Notification delivery failures. Reported, never fatal to a ticket operation.
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Intake source errors (mailbox connection, message fetch).
    #[error("intake error: {message}")]
    Intake {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors detected after startup validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TriageError {
    /// Shorthand for a [`TriageError::Validation`] on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for a [`TriageError::Notification`] wrapping a transport error.
    pub fn notification(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Notification {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the caller supplied a bad request, as opposed to a system failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::InvalidState { .. }
        )
    }
}

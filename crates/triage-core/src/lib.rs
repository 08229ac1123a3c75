// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Triage support desk.
//!
//! This crate provides the ticket model, the error taxonomy, and the
//! collaborator traits (store, notifier) the rest of the workspace
//! implements or consumes.

pub mod error;
pub mod traits;
pub mod types;

pub use error::TriageError;
pub use types::{
    AdapterType, Category, HealthStatus, NotificationEvent, Priority, Ticket, TicketId,
    TicketSource, TicketState, TicketStatus,
};

pub use traits::{Adapter, Notifier, TicketStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = TriageError::validation("description", "must not be empty");
        assert_eq!(err.to_string(), "invalid description: must not be empty");
        assert!(err.is_client_error());

        let err = TriageError::NotFound { id: TicketId(42) };
        assert_eq!(err.to_string(), "ticket 42 not found");
        assert!(err.is_client_error());

        let err = TriageError::InvalidState {
            id: TicketId(3),
            status: TicketStatus::Resolved,
        };
        assert_eq!(err.to_string(), "ticket 3 is resolved, expected open");

        let err = TriageError::notification("smtp down", std::io::Error::other("refused"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_store<T: TicketStore>() {}
        fn _assert_notifier<T: Notifier>() {}
        fn _assert_adapter<T: Adapter>() {}
    }
}

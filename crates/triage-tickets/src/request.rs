// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw intake requests and their validation.

use std::str::FromStr;

use triage_core::{Priority, TicketSource, TriageError};

/// Whether `email` is acceptable as a contact address: one token with an `@`.
pub fn is_email_address(email: &str) -> bool {
    email.contains('@') && !email.contains(char::is_whitespace)
}

/// A raw `(text, priority?, contact?, source)` tuple from an intake source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    pub description: String,
    pub priority: Option<String>,
    pub contact_email: Option<String>,
    pub source: TicketSource,
}

impl TicketRequest {
    pub fn new(description: impl Into<String>, source: TicketSource) -> Self {
        Self {
            description: description.into(),
            priority: None,
            contact_email: None,
            source,
        }
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    /// Check required fields and normalize the request.
    ///
    /// A blank contact email counts as absent.
    pub fn validate(self) -> Result<ValidRequest, TriageError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(TriageError::validation("description", "must not be empty"));
        }

        let priority = match self.priority.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(TriageError::validation("priority", "is required"));
            }
            Some(raw) => Priority::from_str(raw).map_err(|_| {
                TriageError::validation(
                    "priority",
                    format!("`{raw}` is not one of low, medium, high"),
                )
            })?,
        };

        let contact_email = match self.contact_email.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(email) if is_email_address(email) => {
                Some(email.to_string())
            }
            Some(email) => {
                return Err(TriageError::validation(
                    "contact_email",
                    format!("`{email}` is not an email address"),
                ));
            }
        };

        Ok(ValidRequest {
            description: description.to_string(),
            priority,
            contact_email,
            source: self.source,
        })
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub description: String,
    pub priority: Priority,
    pub contact_email: Option<String>,
    pub source: TicketSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: TriageError) -> &'static str {
        match err {
            TriageError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_request_is_normalized() {
        let valid = TicketRequest::new("  printer on fire  ", TicketSource::Web)
            .with_priority("HIGH")
            .with_contact_email(" me@example.com ")
            .validate()
            .unwrap();
        assert_eq!(valid.description, "printer on fire");
        assert_eq!(valid.priority, Priority::High);
        assert_eq!(valid.contact_email.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn email_address_shape() {
        assert!(is_email_address("a@example.com"));
        assert!(!is_email_address("postmaster"));
        assert!(!is_email_address("a b@example.com"));
    }

    #[test]
    fn empty_description_names_field() {
        let err = TicketRequest::new("   ", TicketSource::Web)
            .with_priority("low")
            .validate()
            .unwrap_err();
        assert_eq!(field_of(err), "description");
    }

    #[test]
    fn missing_priority_names_field() {
        let err = TicketRequest::new("help", TicketSource::Cli)
            .validate()
            .unwrap_err();
        assert_eq!(field_of(err), "priority");
    }

    #[test]
    fn unknown_priority_names_field() {
        let err = TicketRequest::new("help", TicketSource::Cli)
            .with_priority("urgent")
            .validate()
            .unwrap_err();
        assert_eq!(field_of(err), "priority");
    }

    #[test]
    fn blank_contact_is_absent() {
        let valid = TicketRequest::new("help", TicketSource::Web)
            .with_priority("low")
            .with_contact_email("  ")
            .validate()
            .unwrap();
        assert!(valid.contact_email.is_none());
    }

    #[test]
    fn malformed_contact_is_rejected() {
        let err = TicketRequest::new("help", TicketSource::Web)
            .with_priority("low")
            .with_contact_email("not an address")
            .validate()
            .unwrap_err();
        assert_eq!(field_of(err), "contact_email");
    }
}

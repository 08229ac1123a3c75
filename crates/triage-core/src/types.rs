// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket model and common types used across collaborator traits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::TriageError;

/// Unique, monotonically assigned ticket identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TicketId(pub i64);

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TicketId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(TicketId)
    }
}

/// Triage label assigned once at creation by the classifier.
///
/// The set of valid labels is configuration data, so this is a thin
/// wrapper around the label text rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Submitter-assigned urgency.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Where a ticket came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TicketSource {
    /// Web form submission.
    Web,
    /// Programmatic JSON API submission.
    Api,
    /// Ingested from the support inbox.
    Email,
    /// Submitted from the command line.
    Cli,
}

/// Lifecycle status without its payload, used for reporting and errors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Resolved,
}

/// Lifecycle state of a ticket.
///
/// `resolved_at` and `resolution_notes` only exist on the `Resolved`
/// variant, so an open ticket can never carry either and a resolved one
/// always carries both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TicketState {
    Open,
    Resolved {
        resolved_at: DateTime<Utc>,
        resolution_notes: String,
    },
}

impl TicketState {
    pub fn status(&self) -> TicketStatus {
        match self {
            TicketState::Open => TicketStatus::Open,
            TicketState::Resolved { .. } => TicketStatus::Resolved,
        }
    }
}

/// A single submitted issue tracked through open/resolved states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub source: TicketSource,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: TicketState,
}

impl Ticket {
    /// Build a freshly created, open ticket.
    pub fn open(
        id: TicketId,
        description: String,
        category: Category,
        priority: Priority,
        contact_email: Option<String>,
        source: TicketSource,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description,
            category,
            priority,
            contact_email,
            source,
            created_at,
            state: TicketState::Open,
        }
    }

    pub fn status(&self) -> TicketStatus {
        self.state.status()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, TicketState::Open)
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            TicketState::Resolved { resolved_at, .. } => Some(*resolved_at),
            TicketState::Open => None,
        }
    }

    pub fn resolution_notes(&self) -> Option<&str> {
        match &self.state {
            TicketState::Resolved {
                resolution_notes, ..
            } => Some(resolution_notes),
            TicketState::Open => None,
        }
    }

    /// Transition open → resolved.
    ///
    /// Resolved is terminal: resolving again fails with
    /// [`TriageError::InvalidState`] and leaves the ticket untouched.
    pub fn resolve(
        &mut self,
        resolution_notes: impl Into<String>,
        resolved_at: DateTime<Utc>,
    ) -> Result<(), TriageError> {
        if !self.is_open() {
            return Err(TriageError::InvalidState {
                id: self.id,
                status: self.status(),
            });
        }
        self.state = TicketState::Resolved {
            resolved_at,
            resolution_notes: resolution_notes.into(),
        };
        Ok(())
    }
}

/// Lifecycle events handed to the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationEvent {
    /// A ticket was created; addressed to administrators.
    Created,
    /// Submission receipt; addressed to the submitter.
    Confirmed,
    /// The ticket was resolved; addressed to the submitter.
    Resolved,
}

impl NotificationEvent {
    /// Events that go to the ticket's contact address rather than the admins.
    pub fn is_submitter_facing(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Resolved)
    }
}

/// Health status reported by collaborator health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Collaborator is fully operational.
    Healthy,
    /// Collaborator is operational but experiencing issues.
    Degraded(String),
    /// Collaborator is not operational.
    Unhealthy(String),
}

/// Identifies the role of a collaborator adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Store,
    Notifier,
}

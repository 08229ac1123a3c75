// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier trait for outbound lifecycle messages (SMTP, logs).

use async_trait::async_trait;

use crate::error::TriageError;
use crate::traits::adapter::Adapter;
use crate::types::{NotificationEvent, Ticket};

/// Delivers lifecycle messages for tickets.
///
/// Submitter-facing events for a ticket without a contact address are a
/// no-op and return `Ok(())`. Errors are reported as
/// [`TriageError::Notification`]; callers log them and carry on.
#[async_trait]
pub trait Notifier: Adapter {
    async fn notify(&self, event: NotificationEvent, ticket: &Ticket) -> Result<(), TriageError>;
}

// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket store trait for persistence backends (SQLite, in-memory).

use async_trait::async_trait;

use crate::error::TriageError;
use crate::traits::adapter::Adapter;
use crate::types::{Ticket, TicketId};

/// Persistence collaborator for tickets, keyed by id.
///
/// Callers serialize `next_id` + `save` pairs themselves; the store only
/// guarantees that `next_id` never hands out the same id twice for the
/// lifetime of the backing data.
#[async_trait]
pub trait TicketStore: Adapter {
    /// Reserves the next ticket id.
    async fn next_id(&self) -> Result<TicketId, TriageError>;

    /// Inserts or replaces the ticket with `ticket.id`. Last write wins.
    async fn save(&self, ticket: &Ticket) -> Result<(), TriageError>;

    /// Fetches a ticket by id.
    async fn get(&self, id: TicketId) -> Result<Option<Ticket>, TriageError>;

    /// Returns every ticket. Order is unspecified.
    async fn list(&self) -> Result<Vec<Ticket>, TriageError>;
}

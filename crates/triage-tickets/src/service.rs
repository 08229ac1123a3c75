// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket lifecycle: create, resolve, and query.
//!
//! Every intake source funnels through [`TicketService::create`], which
//! classifies the description, reserves an id, persists the ticket, and
//! hands lifecycle events to the notifier. Id assignment and the
//! open → resolved transition run under one service-wide lock; notifier
//! calls happen after the lock is released and never undo a committed
//! change.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use triage_classifier::KeywordClassifier;
use triage_core::{NotificationEvent, Notifier, Ticket, TicketId, TicketStore, TriageError};

use crate::request::TicketRequest;
use crate::summary::TicketSummary;

/// Orchestrates classification, persistence, and notification for tickets.
pub struct TicketService {
    store: Arc<dyn TicketStore>,
    notifier: Arc<dyn Notifier>,
    classifier: KeywordClassifier,
    /// Serializes read-modify-write sequences against the store.
    write_lock: Mutex<()>,
}

impl TicketService {
    pub fn new(
        store: Arc<dyn TicketStore>,
        notifier: Arc<dyn Notifier>,
        classifier: KeywordClassifier,
    ) -> Self {
        Self {
            store,
            notifier,
            classifier,
            write_lock: Mutex::new(()),
        }
    }

    pub fn classifier(&self) -> &KeywordClassifier {
        &self.classifier
    }

    pub fn store(&self) -> &Arc<dyn TicketStore> {
        &self.store
    }

    /// Validate, classify, and persist a new open ticket.
    ///
    /// Emits `Created` for the admins and, when the submitter left an
    /// address, `Confirmed` for them.
    pub async fn create(&self, request: TicketRequest) -> Result<Ticket, TriageError> {
        let request = request.validate()?;
        let category = self.classifier.classify(&request.description);

        let ticket = {
            let _guard = self.write_lock.lock().await;
            let id = self.store.next_id().await?;
            let ticket = Ticket::open(
                id,
                request.description,
                category,
                request.priority,
                request.contact_email,
                request.source,
                Utc::now(),
            );
            self.store.save(&ticket).await?;
            ticket
        };

        info!(
            ticket_id = %ticket.id,
            category = %ticket.category,
            priority = %ticket.priority,
            source = %ticket.source,
            "ticket created"
        );

        self.dispatch(NotificationEvent::Created, &ticket).await;
        if ticket.contact_email.is_some() {
            self.dispatch(NotificationEvent::Confirmed, &ticket).await;
        }

        Ok(ticket)
    }

    /// Resolve an open ticket with the given notes (which may be empty).
    pub async fn resolve(
        &self,
        id: TicketId,
        resolution_notes: impl Into<String>,
    ) -> Result<Ticket, TriageError> {
        let ticket = {
            let _guard = self.write_lock.lock().await;
            let mut ticket = self
                .store
                .get(id)
                .await?
                .ok_or(TriageError::NotFound { id })?;
            ticket.resolve(resolution_notes, Utc::now())?;
            self.store.save(&ticket).await?;
            ticket
        };

        info!(ticket_id = %ticket.id, "ticket resolved");

        if ticket.contact_email.is_some() {
            self.dispatch(NotificationEvent::Resolved, &ticket).await;
        }

        Ok(ticket)
    }

    /// Fetch one ticket, failing with `NotFound` when absent.
    pub async fn get(&self, id: TicketId) -> Result<Ticket, TriageError> {
        self.store
            .get(id)
            .await?
            .ok_or(TriageError::NotFound { id })
    }

    /// The `limit` most recently created tickets, newest first.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<Ticket>, TriageError> {
        let mut tickets = self.store.list().await?;
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        tickets.truncate(limit);
        Ok(tickets)
    }

    /// Trend summary over every stored ticket.
    pub async fn summary(&self) -> Result<TicketSummary, TriageError> {
        let tickets = self.store.list().await?;
        Ok(TicketSummary::from_tickets(
            &tickets,
            self.classifier.categories(),
        ))
    }

    async fn dispatch(&self, event: NotificationEvent, ticket: &Ticket) {
        if let Err(e) = self.notifier.notify(event, ticket).await {
            warn!(
                ticket_id = %ticket.id,
                event = %event,
                error = %e,
                "notification failed, ticket state unaffected"
            );
        }
    }
}

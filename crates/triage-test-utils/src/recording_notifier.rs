// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier that records deliveries instead of sending them.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use triage_core::{
    Adapter, AdapterType, NotificationEvent, Notifier, Ticket, TicketId, TriageError,
};

/// A captured notification.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub event: NotificationEvent,
    pub ticket: Ticket,
}

/// Captures every delivered notification for assertions.
///
/// Submitter-facing events for tickets without a contact address are
/// accepted and dropped, matching the real notifier contract. When set
/// to fail, every call returns a notification error and nothing is recorded.
#[derive(Default)]
pub struct RecordingNotifier {
    deliveries: Mutex<Vec<Delivery>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.set_failing(true);
        notifier
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().await.clone()
    }

    /// Delivered `(event, ticket id)` pairs in order.
    pub async fn events(&self) -> Vec<(NotificationEvent, TicketId)> {
        self.deliveries
            .lock()
            .await
            .iter()
            .map(|d| (d.event, d.ticket.id))
            .collect()
    }

    pub async fn clear(&self) {
        self.deliveries.lock().await.clear();
    }
}

#[async_trait]
impl Adapter for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: NotificationEvent, ticket: &Ticket) -> Result<(), TriageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TriageError::Notification {
                message: format!("injected failure for {event}"),
                source: None,
            });
        }
        if event.is_submitter_facing() && ticket.contact_email.is_none() {
            return Ok(());
        }
        self.deliveries.lock().await.push(Delivery {
            event,
            ticket: ticket.clone(),
        });
        Ok(())
    }
}

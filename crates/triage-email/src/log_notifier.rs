// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notifier used when SMTP is disabled: events go to the log only.

use async_trait::async_trait;
use tracing::info;

use triage_core::{Adapter, AdapterType, NotificationEvent, Notifier, Ticket, TriageError};

use crate::smtp::recipient;
use crate::templates;

pub struct LogNotifier {
    admin_email: String,
}

impl LogNotifier {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }
}

#[async_trait]
impl Adapter for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: NotificationEvent, ticket: &Ticket) -> Result<(), TriageError> {
        if let Some(to) = recipient(event, ticket, &self.admin_email) {
            let subject = templates::render(event, ticket, "").subject;
            info!(
                ticket_id = %ticket.id,
                %event,
                to,
                subject = %subject,
                "notification (smtp disabled)"
            );
        }
        Ok(())
    }
}

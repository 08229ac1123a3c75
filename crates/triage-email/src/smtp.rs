// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP notifier using lettre's async STARTTLS transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use triage_config::model::SmtpConfig;
use triage_core::{
    Adapter, AdapterType, HealthStatus, NotificationEvent, Notifier, Ticket, TriageError,
};

use crate::templates;

/// Who receives `event` for `ticket`, if anyone.
///
/// Admin events go to `admin`; submitter events go to the ticket's
/// contact address and are skipped when it has none.
pub fn recipient<'a>(
    event: NotificationEvent,
    ticket: &'a Ticket,
    admin: &'a str,
) -> Option<&'a str> {
    if event.is_submitter_facing() {
        ticket.contact_email.as_deref()
    } else {
        Some(admin)
    }
}

/// Sends lifecycle notifications as multipart Markdown/HTML email.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    admin_email: String,
    signature: String,
}

impl SmtpNotifier {
    /// Build the transport from config. `signature` is the team name used
    /// in the From header and message sign-off.
    pub fn new(config: &SmtpConfig, signature: &str) -> Result<Self, TriageError> {
        let sender = config
            .sender()
            .ok_or_else(|| TriageError::Config("smtp.from or smtp.username must be set".into()))?;
        let from = Mailbox::new(
            Some(signature.to_string()),
            sender
                .parse()
                .map_err(|e| TriageError::Config(format!("invalid smtp sender `{sender}`: {e}")))?,
        );

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| TriageError::Config(format!("invalid smtp host: {e}")))?
            .port(config.port);
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        debug!(host = %config.host, port = config.port, "SMTP notifier configured");

        Ok(Self {
            transport: builder.build(),
            from,
            admin_email: config.admin_email.clone(),
            signature: signature.to_string(),
        })
    }
}

/// Assemble a multipart/alternative message: the Markdown source as the
/// plain part and its rendered HTML.
pub fn build_message(
    from: &Mailbox,
    to: &str,
    rendered: &templates::RenderedMessage,
) -> Result<Message, TriageError> {
    let to: Mailbox = to
        .parse()
        .map_err(|e| TriageError::notification(format!("invalid recipient `{to}`"), e))?;
    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(rendered.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            rendered.markdown.clone(),
            rendered.html(),
        ))
        .map_err(|e| TriageError::notification("failed to build email", e))
}

#[async_trait]
impl Adapter for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, TriageError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Degraded("SMTP server did not respond".into())),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, event: NotificationEvent, ticket: &Ticket) -> Result<(), TriageError> {
        let Some(to) = recipient(event, ticket, &self.admin_email) else {
            debug!(ticket_id = %ticket.id, %event, "no contact address, skipping");
            return Ok(());
        };

        let rendered = templates::render(event, ticket, &self.signature);
        let message = build_message(&self.from, to, &rendered)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| {
                TriageError::notification(format!("SMTP send to {to} failed"), e)
            })?;

        info!(ticket_id = %ticket.id, %event, to, "notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use triage_core::{Category, Priority, TicketId, TicketSource};

    fn ticket(contact: Option<&str>) -> Ticket {
        Ticket::open(
            TicketId(1),
            "refund".into(),
            Category::from("Billing"),
            Priority::Low,
            contact.map(String::from),
            TicketSource::Web,
            Utc::now(),
        )
    }

    fn sender() -> Mailbox {
        "Support Team <desk@example.com>".parse().unwrap()
    }

    #[test]
    fn admin_events_go_to_admin() {
        let t = ticket(Some("user@example.com"));
        assert_eq!(
            recipient(NotificationEvent::Created, &t, "ops@example.com"),
            Some("ops@example.com")
        );
        assert_eq!(
            recipient(NotificationEvent::Confirmed, &t, "ops@example.com"),
            Some("user@example.com")
        );
    }

    #[test]
    fn submitter_events_without_contact_have_no_recipient() {
        let t = ticket(None);
        assert_eq!(recipient(NotificationEvent::Resolved, &t, "ops@example.com"), None);
    }

    #[test]
    fn builds_multipart_message() {
        let rendered = templates::render(NotificationEvent::Created, &ticket(None), "Support Team");
        let message = build_message(&sender(), "ops@example.com", &rendered).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: New Ticket #1 - Billing"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn invalid_recipient_is_a_notification_error() {
        let rendered = templates::render(NotificationEvent::Created, &ticket(None), "x");
        let err = build_message(&sender(), "not an address", &rendered).unwrap_err();
        assert!(matches!(err, TriageError::Notification { .. }));
    }

    #[test]
    fn missing_sender_is_config_error() {
        let err = SmtpNotifier::new(&SmtpConfig::default(), "Support Team").err().unwrap();
        assert!(matches!(err, TriageError::Config(_)));
    }
}

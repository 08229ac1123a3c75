// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification bodies, authored as Markdown and rendered to HTML with comrak.

use chrono::{DateTime, Utc};
use triage_core::{NotificationEvent, Ticket};

/// Subject plus Markdown body for one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub markdown: String,
}

impl RenderedMessage {
    pub fn html(&self) -> String {
        markdown_to_html(&self.markdown)
    }
}

/// Render the subject and body for `event` about `ticket`.
///
/// `signature` closes the submitter-facing messages.
pub fn render(event: NotificationEvent, ticket: &Ticket, signature: &str) -> RenderedMessage {
    match event {
        NotificationEvent::Created => RenderedMessage {
            subject: format!("New Ticket #{} - {}", ticket.id, ticket.category),
            markdown: format!(
                "## New Support Ticket\n\n\
                 - **Ticket ID:** #{id}\n\
                 - **Category:** {category}\n\
                 - **Priority:** {priority}\n\
                 - **Source:** {source}\n\
                 - **Date Submitted:** {date}\n\
                 - **Contact Email:** {contact}\n\n\
                 ### Description\n\n{description}\n",
                id = ticket.id,
                category = ticket.category,
                priority = ticket.priority,
                source = ticket.source,
                date = format_date(&ticket.created_at),
                contact = ticket.contact_email.as_deref().unwrap_or("Not provided"),
                description = quote(&ticket.description),
            ),
        },
        NotificationEvent::Confirmed => RenderedMessage {
            subject: format!("Ticket #{} Received - {}", ticket.id, ticket.category),
            markdown: format!(
                "## Ticket Received\n\n\
                 Dear user,\n\n\
                 Your ticket has been received and is being processed. Here are the details:\n\n\
                 - **Ticket ID:** #{id}\n\
                 - **Category:** {category}\n\
                 - **Priority:** {priority}\n\
                 - **Date Submitted:** {date}\n\n\
                 We will notify you when your issue is resolved.\n\n\
                 Thank you,  \n{signature}\n",
                id = ticket.id,
                category = ticket.category,
                priority = ticket.priority,
                date = format_date(&ticket.created_at),
            ),
        },
        NotificationEvent::Resolved => {
            let notes = match ticket.resolution_notes() {
                Some(notes) if !notes.trim().is_empty() => quote(notes),
                _ => "_No notes provided._".to_string(),
            };
            RenderedMessage {
                subject: format!("Ticket #{} Resolved", ticket.id),
                markdown: format!(
                    "## Ticket Resolved\n\n\
                     Dear user,\n\n\
                     Your ticket has been resolved. Here are the details:\n\n\
                     - **Ticket ID:** #{id}\n\
                     - **Category:** {category}\n\
                     - **Resolution Date:** {date}\n\n\
                     ### Resolution Notes\n\n{notes}\n\n\
                     Thank you for your patience.\n\n\
                     Regards,  \n{signature}\n",
                    id = ticket.id,
                    category = ticket.category,
                    date = ticket
                        .resolved_at()
                        .as_ref()
                        .map_or_else(|| "N/A".to_string(), format_date),
                ),
            }
        }
    }
}

/// Convert Markdown to HTML. Raw HTML in the input is not passed through.
pub fn markdown_to_html(markdown: &str) -> String {
    comrak::markdown_to_html(markdown, &comrak::Options::default())
}

fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

// Submitted text is blockquoted so it cannot restructure the message.
fn quote(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use triage_core::{Category, Priority, TicketId, TicketSource};

    fn ticket(contact: Option<&str>) -> Ticket {
        Ticket::open(
            TicketId(7),
            "Printer shows error 42\nsecond line".into(),
            Category::from("Technical Support"),
            Priority::High,
            contact.map(String::from),
            TicketSource::Email,
            Utc.with_ymd_and_hms(2026, 5, 4, 10, 30, 0).unwrap(),
        )
    }

    #[test]
    fn subjects_follow_event() {
        let t = ticket(Some("u@example.com"));
        assert_eq!(
            render(NotificationEvent::Created, &t, "Support Team").subject,
            "New Ticket #7 - Technical Support"
        );
        assert_eq!(
            render(NotificationEvent::Confirmed, &t, "Support Team").subject,
            "Ticket #7 Received - Technical Support"
        );
        assert_eq!(
            render(NotificationEvent::Resolved, &t, "Support Team").subject,
            "Ticket #7 Resolved"
        );
    }

    #[test]
    fn admin_body_lists_details() {
        let msg = render(NotificationEvent::Created, &ticket(None), "Support Team");
        assert!(msg.markdown.contains("**Priority:** high"));
        assert!(msg.markdown.contains("**Contact Email:** Not provided"));
        assert!(msg.markdown.contains("2026-05-04 10:30 UTC"));
        assert!(msg.markdown.contains("> Printer shows error 42\n> second line"));
    }

    #[test]
    fn resolution_notes_or_placeholder() {
        let mut t = ticket(Some("u@example.com"));
        t.resolve("", Utc::now()).unwrap();
        let msg = render(NotificationEvent::Resolved, &t, "Helpdesk");
        assert!(msg.markdown.contains("_No notes provided._"));
        assert!(msg.markdown.ends_with("Helpdesk\n"));
    }

    #[test]
    fn html_is_rendered_and_raw_html_dropped() {
        let mut t = ticket(None);
        t.description = "<script>alert(1)</script>".into();
        let html = render(NotificationEvent::Created, &t, "Support Team").html();
        assert!(html.contains("<h2>New Support Ticket</h2>"));
        assert!(html.contains("<strong>Category:</strong>"));
        assert!(!html.contains("<script>"));
    }
}

// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot CLI commands against the configured store.
//!
//! Each command returns its rendered output so `main` decides where it goes.

use triage_classifier::KeywordClassifier;
use triage_core::{TicketId, TicketSource, TriageError};
use triage_tickets::{TicketRequest, TicketService};

use crate::output::{self, Style};

pub async fn submit(
    service: &TicketService,
    description: String,
    priority: String,
    contact_email: Option<String>,
    style: Style,
) -> Result<String, TriageError> {
    let mut request = TicketRequest::new(description, TicketSource::Cli).with_priority(priority);
    request.contact_email = contact_email;
    let ticket = service.create(request).await?;
    Ok(output::ticket(&ticket, style))
}

pub async fn resolve(
    service: &TicketService,
    id: TicketId,
    notes: String,
    style: Style,
) -> Result<String, TriageError> {
    let ticket = service.resolve(id, notes).await?;
    Ok(output::ticket(&ticket, style))
}

pub async fn show(
    service: &TicketService,
    id: TicketId,
    style: Style,
) -> Result<String, TriageError> {
    let ticket = service.get(id).await?;
    Ok(output::ticket(&ticket, style))
}

pub async fn list(
    service: &TicketService,
    limit: usize,
    style: Style,
) -> Result<String, TriageError> {
    let tickets = service.list_recent(limit).await?;
    Ok(output::ticket_list(&tickets, style))
}

pub async fn summary(service: &TicketService, style: Style) -> Result<String, TriageError> {
    let summary = service.summary().await?;
    Ok(output::summary(&summary, style))
}

/// Classify without touching the store.
pub fn classify(classifier: &KeywordClassifier, text: &str, style: Style) -> String {
    output::classification(&classifier.classify_detailed(text), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_test_utils::TestHarness;

    const JSON: Style = Style {
        json: true,
        color: false,
    };

    fn parse(out: &str) -> serde_json::Value {
        serde_json::from_str(out).unwrap()
    }

    #[tokio::test]
    async fn submit_then_resolve() {
        let h = TestHarness::new().await.unwrap();

        let out = submit(
            &h.service,
            "Payment declined at checkout".into(),
            "high".into(),
            Some("buyer@example.com".into()),
            JSON,
        )
        .await
        .unwrap();
        let created = parse(&out);
        assert_eq!(created["category"], "Billing");
        assert_eq!(created["source"], "cli");

        let out = resolve(&h.service, TicketId(1), "card re-run".into(), JSON)
            .await
            .unwrap();
        assert_eq!(parse(&out)["status"], "resolved");

        let err = resolve(&h.service, TicketId(1), String::new(), JSON)
            .await
            .unwrap_err();
        assert!(matches!(err, TriageError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn show_missing_ticket_fails() {
        let h = TestHarness::new().await.unwrap();
        let err = show(&h.service, TicketId(5), JSON).await.unwrap_err();
        assert!(matches!(err, TriageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_and_summary_render() {
        let h = TestHarness::new().await.unwrap();
        for text in ["login loop", "refund request"] {
            submit(&h.service, text.into(), "low".into(), None, JSON)
                .await
                .unwrap();
        }

        let listed = parse(&list(&h.service, 10, JSON).await.unwrap());
        assert_eq!(listed["tickets"].as_array().unwrap().len(), 2);
        assert_eq!(listed["tickets"][0]["id"], 2);

        let plain = Style {
            json: false,
            color: false,
        };
        let text = summary(&h.service, plain).await.unwrap();
        assert!(text.starts_with("Tickets: 2 total, 2 open, 0 high priority"));
    }

    #[test]
    fn classify_reports_scores() {
        let out = classify(&KeywordClassifier::default(), "my invoice shows an error", JSON);
        let value = parse(&out);
        assert_eq!(value["category"], "Technical Support");
        assert_eq!(value["reason"], "tie broken by configured order");
        assert_eq!(value["scores"][1]["keywords"][0], "invoice");
    }
}

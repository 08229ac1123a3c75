// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket trend summary for dashboards and the `summary` command.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use triage_core::{Category, Priority, Ticket, TicketStatus};

/// Aggregate counts over a set of tickets. Maps are ordered for stable output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketSummary {
    pub total: usize,
    pub open: usize,
    pub high_priority: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
    pub by_status: BTreeMap<TicketStatus, usize>,
    /// Tickets created per UTC calendar day.
    pub by_day: BTreeMap<NaiveDate, usize>,
    /// Mean open → resolved time over resolved tickets.
    pub mean_resolution_secs: Option<i64>,
}

impl TicketSummary {
    /// Summarize `tickets`, listing every category in `categories` even at zero.
    pub fn from_tickets<'a>(
        tickets: &[Ticket],
        categories: impl IntoIterator<Item = &'a Category>,
    ) -> Self {
        let mut summary = Self {
            by_category: categories
                .into_iter()
                .map(|c| (c.to_string(), 0))
                .collect(),
            ..Self::default()
        };

        let mut resolution_total = 0i64;
        let mut resolved = 0i64;

        for ticket in tickets {
            summary.total += 1;
            if ticket.is_open() {
                summary.open += 1;
            }
            if ticket.priority == Priority::High {
                summary.high_priority += 1;
            }
            *summary
                .by_category
                .entry(ticket.category.to_string())
                .or_default() += 1;
            *summary.by_priority.entry(ticket.priority).or_default() += 1;
            *summary.by_status.entry(ticket.status()).or_default() += 1;
            *summary
                .by_day
                .entry(ticket.created_at.date_naive())
                .or_default() += 1;

            if let Some(resolved_at) = ticket.resolved_at() {
                resolution_total += (resolved_at - ticket.created_at).num_seconds();
                resolved += 1;
            }
        }

        if resolved > 0 {
            summary.mean_resolution_secs = Some(resolution_total / resolved);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use triage_core::{TicketId, TicketSource};

    fn ticket(id: i64, category: &str, priority: Priority, day: u32) -> Ticket {
        Ticket::open(
            TicketId(id),
            "x".into(),
            Category::from(category),
            priority,
            None,
            TicketSource::Web,
            Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn counts_every_dimension() {
        let mut resolved = ticket(2, "Billing", Priority::Low, 2);
        let at = resolved.created_at + Duration::hours(2);
        resolved.resolve("ok", at).unwrap();

        let tickets = vec![
            ticket(1, "Billing", Priority::High, 1),
            resolved,
            ticket(3, "Technical Support", Priority::High, 2),
        ];
        let categories = [
            Category::from("Technical Support"),
            Category::from("Billing"),
            Category::from("General Inquiry"),
        ];

        let s = TicketSummary::from_tickets(&tickets, &categories);
        assert_eq!(s.total, 3);
        assert_eq!(s.open, 2);
        assert_eq!(s.high_priority, 2);
        assert_eq!(s.by_category["Billing"], 2);
        assert_eq!(s.by_category["General Inquiry"], 0);
        assert_eq!(s.by_priority[&Priority::High], 2);
        assert_eq!(s.by_status[&TicketStatus::Resolved], 1);
        assert_eq!(
            s.by_day[&NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()],
            2
        );
        assert_eq!(s.mean_resolution_secs, Some(7200));
    }

    #[test]
    fn empty_input_has_no_mean() {
        let s = TicketSummary::from_tickets(&[], []);
        assert_eq!(s.total, 0);
        assert!(s.mean_resolution_secs.is_none());
    }
}

// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human and JSON rendering for CLI output.

use std::fmt::Write;

use colored::Colorize;
use serde::Serialize;

use triage_classifier::ClassificationResult;
use triage_core::{Priority, Ticket, TicketStatus};
use triage_tickets::TicketSummary;

/// Output mode chosen on the command line.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub json: bool,
    pub color: bool,
}

pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn status_label(status: TicketStatus, width: usize, color: bool) -> String {
    let label = format!("{:<width$}", status.as_ref());
    match (color, status) {
        (false, _) => label,
        (true, TicketStatus::Open) => label.yellow().to_string(),
        (true, TicketStatus::Resolved) => label.green().to_string(),
    }
}

fn priority_label(priority: Priority, color: bool) -> String {
    let label = format!("{:<6}", priority.as_ref());
    if color && priority == Priority::High {
        label.red().bold().to_string()
    } else {
        label
    }
}

fn excerpt(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > max || text.lines().nth(1).is_some() {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

pub fn ticket(ticket: &Ticket, style: Style) -> String {
    if style.json {
        return to_json(ticket);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Ticket #{}  [{}]",
        ticket.id,
        status_label(ticket.status(), 0, style.color)
    );
    let _ = writeln!(out, "  Category:  {}", ticket.category);
    let _ = writeln!(
        out,
        "  Priority:  {}",
        priority_label(ticket.priority, style.color).trim_end()
    );
    let _ = writeln!(out, "  Source:    {}", ticket.source);
    let _ = writeln!(
        out,
        "  Contact:   {}",
        ticket.contact_email.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "  Created:   {}",
        ticket.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(resolved_at) = ticket.resolved_at() {
        let _ = writeln!(
            out,
            "  Resolved:  {}",
            resolved_at.format("%Y-%m-%d %H:%M UTC")
        );
        let notes = ticket.resolution_notes().unwrap_or_default();
        let _ = writeln!(out, "  Notes:     {}", if notes.is_empty() { "-" } else { notes });
    }
    let _ = writeln!(out);
    for line in ticket.description.lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

#[derive(Serialize)]
struct TicketListJson<'a> {
    tickets: &'a [Ticket],
}

pub fn ticket_list(tickets: &[Ticket], style: Style) -> String {
    if style.json {
        return to_json(&TicketListJson { tickets });
    }
    if tickets.is_empty() {
        return "No tickets.\n".to_string();
    }

    let mut out = String::new();
    for t in tickets {
        let _ = writeln!(
            out,
            "#{:<5} {} {} {:<20} {}  {}",
            t.id,
            status_label(t.status(), 8, style.color),
            priority_label(t.priority, style.color),
            t.category.as_str(),
            t.created_at.format("%Y-%m-%d %H:%M"),
            excerpt(&t.description, 48)
        );
    }
    out
}

#[derive(Serialize)]
struct ScoreJson<'a> {
    category: &'a str,
    matches: usize,
    keywords: &'a [String],
}

#[derive(Serialize)]
struct ClassificationJson<'a> {
    category: &'a str,
    reason: &'a str,
    scores: Vec<ScoreJson<'a>>,
}

pub fn classification(result: &ClassificationResult, style: Style) -> String {
    if style.json {
        return to_json(&ClassificationJson {
            category: result.category.as_str(),
            reason: result.reason,
            scores: result
                .scores
                .iter()
                .map(|s| ScoreJson {
                    category: s.category.as_str(),
                    matches: s.count(),
                    keywords: &s.matched,
                })
                .collect(),
        });
    }

    let category = if style.color {
        result.category.as_str().bold().to_string()
    } else {
        result.category.to_string()
    };
    let mut out = format!("{category} ({})\n", result.reason);
    for score in &result.scores {
        let _ = write!(out, "  {:<20} {}", score.category.as_str(), score.count());
        if !score.matched.is_empty() {
            let _ = write!(out, "  ({})", score.matched.join(", "));
        }
        out.push('\n');
    }
    out
}

fn format_duration(secs: i64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

pub fn summary(summary: &TicketSummary, style: Style) -> String {
    if style.json {
        return to_json(summary);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Tickets: {} total, {} open, {} high priority",
        summary.total, summary.open, summary.high_priority
    );
    let _ = writeln!(out, "\nBy category:");
    for (category, count) in &summary.by_category {
        let _ = writeln!(out, "  {category:<20} {count}");
    }
    let _ = writeln!(out, "\nBy priority:");
    for (priority, count) in &summary.by_priority {
        let _ = writeln!(out, "  {:<20} {count}", priority.as_ref());
    }
    if !summary.by_day.is_empty() {
        let _ = writeln!(out, "\nBy day:");
        for (day, count) in &summary.by_day {
            let _ = writeln!(out, "  {day}           {count}");
        }
    }
    if let Some(secs) = summary.mean_resolution_secs {
        let _ = writeln!(out, "\nMean resolution time: {}", format_duration(secs));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use triage_core::{Category, TicketId, TicketSource};

    const PLAIN: Style = Style {
        json: false,
        color: false,
    };

    fn sample() -> Ticket {
        Ticket::open(
            TicketId(12),
            "Cannot login to the portal\nsince this morning".into(),
            Category::from("Account Management"),
            Priority::High,
            None,
            TicketSource::Cli,
            Utc::now(),
        )
    }

    #[test]
    fn plain_ticket_detail() {
        let out = ticket(&sample(), PLAIN);
        assert!(out.starts_with("Ticket #12  [open]"));
        assert!(out.contains("Contact:   -"));
        assert!(out.contains("  since this morning"));
    }

    #[test]
    fn list_row_excerpts_description() {
        let out = ticket_list(&[sample()], PLAIN);
        assert!(out.starts_with("#12    open     high   Account Management"));
        assert!(out.trim_end().ends_with("Cannot login to the portal..."));
        assert_eq!(ticket_list(&[], PLAIN), "No tickets.\n");
    }

    #[test]
    fn json_ticket_is_parseable() {
        let style = Style {
            json: true,
            color: false,
        };
        let value: serde_json::Value = serde_json::from_str(&ticket(&sample(), style)).unwrap();
        assert_eq!(value["id"], 12);
        assert_eq!(value["status"], "open");
    }

    #[test]
    fn durations_are_humanized() {
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90000), "1d 1h 0m");
    }
}

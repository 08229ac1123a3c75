// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket CRUD operations.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use triage_core::{Category, Ticket, TicketId, TicketState, TriageError};

use crate::database::{Database, map_tr_err};

const SELECT_COLUMNS: &str = "SELECT id, description, category, priority, contact_email, source, \
     status, created_at, resolved_at, resolution_notes FROM tickets";

/// Fixed-width RFC 3339 so stored timestamps sort lexicographically.
fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn conversion_err(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn parse_col<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| conversion_err(idx, e))
}

fn parse_ts(raw: &str, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| conversion_err(idx, e))
}

fn row_to_ticket(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ticket> {
    let status: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    let resolved_at: Option<String> = row.get(8)?;
    let resolution_notes: Option<String> = row.get(9)?;

    let state = match (status.as_str(), resolved_at, resolution_notes) {
        ("open", None, None) => TicketState::Open,
        ("resolved", Some(at), Some(notes)) => TicketState::Resolved {
            resolved_at: parse_ts(&at, 8)?,
            resolution_notes: notes,
        },
        _ => {
            return Err(conversion_err(
                6,
                std::io::Error::other(format!("inconsistent ticket state `{status}`")),
            ));
        }
    };

    Ok(Ticket {
        id: TicketId(row.get(0)?),
        description: row.get(1)?,
        category: Category(row.get(2)?),
        priority: parse_col(row, 3)?,
        contact_email: row.get(4)?,
        source: parse_col(row, 5)?,
        created_at: parse_ts(&created_at, 7)?,
        state,
    })
}

/// Reserve the next ticket id.
///
/// The counter never moves backwards and always lands above the highest
/// stored id, so rows inserted outside the counter cannot be collided with.
pub async fn next_id(db: &Database) -> Result<TicketId, TriageError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row(
                "UPDATE ticket_sequence \
                 SET value = MAX(value, (SELECT COALESCE(MAX(id), 0) FROM tickets)) + 1 \
                 WHERE id = 1 RETURNING value",
                [],
                |row| row.get(0),
            )
        })
        .await
        .map(TicketId)
        .map_err(map_tr_err)
}

/// Insert a ticket, or overwrite the stored row with the same id.
pub async fn upsert_ticket(db: &Database, ticket: &Ticket) -> Result<(), TriageError> {
    let id = ticket.id.0;
    let description = ticket.description.clone();
    let category = ticket.category.0.clone();
    let priority = ticket.priority.to_string();
    let contact_email = ticket.contact_email.clone();
    let source = ticket.source.to_string();
    let status = ticket.status().to_string();
    let created_at = format_ts(&ticket.created_at);
    let resolved_at = ticket.resolved_at().as_ref().map(format_ts);
    let resolution_notes = ticket.resolution_notes().map(str::to_string);

    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO tickets (id, description, category, priority, contact_email, \
                 source, status, created_at, resolved_at, resolution_notes) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
                 ON CONFLICT(id) DO UPDATE SET \
                 description = excluded.description, \
                 category = excluded.category, \
                 priority = excluded.priority, \
                 contact_email = excluded.contact_email, \
                 source = excluded.source, \
                 status = excluded.status, \
                 created_at = excluded.created_at, \
                 resolved_at = excluded.resolved_at, \
                 resolution_notes = excluded.resolution_notes",
                rusqlite::params![
                    id,
                    description,
                    category,
                    priority,
                    contact_email,
                    source,
                    status,
                    created_at,
                    resolved_at,
                    resolution_notes,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a ticket by id.
pub async fn get_ticket(db: &Database, id: TicketId) -> Result<Option<Ticket>, TriageError> {
    db.connection()
        .call(move |conn| -> Result<Option<Ticket>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
            let mut rows = stmt.query_map(rusqlite::params![id.0], row_to_ticket)?;
            rows.next().transpose()
        })
        .await
        .map_err(map_tr_err)
}

/// Every stored ticket, oldest first.
pub async fn list_tickets(db: &Database) -> Result<Vec<Ticket>, TriageError> {
    db.connection()
        .call(|conn| -> Result<Vec<Ticket>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at, id"))?;
            let rows = stmt.query_map([], row_to_ticket)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

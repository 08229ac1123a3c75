// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket intake and lifecycle for the Triage support desk.
//!
//! This crate provides:
//! - [`TicketRequest`]: raw intake tuples and their validation
//! - [`TicketService`]: create/resolve/query over an injected store and notifier
//! - [`TicketSummary`]: category, priority, status, and daily trend counts

pub mod request;
pub mod service;
pub mod summary;

pub use request::{TicketRequest, ValidRequest, is_email_address};
pub use service::TicketService;
pub use summary::TicketSummary;

// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Triage support desk.
//!
//! Routes:
//! - `POST /v1/tickets` submit a ticket
//! - `GET /v1/tickets` recent tickets, newest first
//! - `GET /v1/tickets/{id}` one ticket
//! - `POST /v1/tickets/{id}/resolve` resolve an open ticket
//! - `GET /v1/summary` trend summary
//! - `GET /v1/health` store health

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{GatewayState, router, serve};

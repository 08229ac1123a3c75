// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email integration for the Triage support desk.
//!
//! Outbound lifecycle notifications go through [`SmtpNotifier`] (or
//! [`LogNotifier`] when SMTP is disabled); inbound support mail is turned
//! into tickets by [`InboxPoller`].

pub mod inbox;
pub mod log_notifier;
pub mod smtp;
pub mod templates;

pub use inbox::{InboxPoller, request_from_message, should_flag};
pub use log_notifier::LogNotifier;
pub use smtp::SmtpNotifier;

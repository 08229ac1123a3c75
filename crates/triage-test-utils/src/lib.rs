// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Triage integration tests.
//!
//! Provides collaborator doubles and a harness for fast, deterministic
//! tests without a mail server.
//!
//! # Components
//!
//! - [`InMemoryStore`] - Map-backed ticket store with save-failure injection
//! - [`RecordingNotifier`] - Notifier that captures deliveries

pub mod harness;
pub mod memory_store;
pub mod recording_notifier;

pub use harness::TestHarness;
pub use memory_store::InMemoryStore;
pub use recording_notifier::{Delivery, RecordingNotifier};

// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory ticket store for deterministic testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use triage_core::{Adapter, AdapterType, Ticket, TicketId, TicketStore, TriageError};

/// A `TicketStore` backed by a map, with switchable save failures.
#[derive(Default)]
pub struct InMemoryStore {
    tickets: Mutex<BTreeMap<TicketId, Ticket>>,
    last_id: AtomicI64,
    fail_saves: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail with a storage error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.tickets.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tickets.lock().await.is_empty()
    }
}

#[async_trait]
impl Adapter for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }
}

#[async_trait]
impl TicketStore for InMemoryStore {
    async fn next_id(&self) -> Result<TicketId, TriageError> {
        Ok(TicketId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1))
    }

    async fn save(&self, ticket: &Ticket) -> Result<(), TriageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(TriageError::Storage {
                source: "injected save failure".into(),
            });
        }
        self.tickets.lock().await.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn get(&self, id: TicketId) -> Result<Option<Ticket>, TriageError> {
        Ok(self.tickets.lock().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Ticket>, TriageError> {
        Ok(self.tickets.lock().await.values().cloned().collect())
    }
}

// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end lifecycle testing.
//!
//! `TestHarness` wires a [`TicketService`] to a recording notifier and
//! either an in-memory store or a temp SQLite database.

use std::sync::Arc;

use triage_classifier::KeywordClassifier;
use triage_config::model::StorageConfig;
use triage_core::{TicketSource, TicketStore, TriageError};
use triage_storage::SqliteTicketStore;
use triage_tickets::{TicketRequest, TicketService};

use crate::memory_store::InMemoryStore;
use crate::recording_notifier::RecordingNotifier;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    sqlite: bool,
    classifier: Option<KeywordClassifier>,
    failing_notifier: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            sqlite: false,
            classifier: None,
            failing_notifier: false,
        }
    }

    /// Back the service with a SQLite database in a temp directory.
    pub fn with_sqlite(mut self) -> Self {
        self.sqlite = true;
        self
    }

    pub fn with_classifier(mut self, classifier: KeywordClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Start with a notifier that fails every call.
    pub fn with_failing_notifier(mut self) -> Self {
        self.failing_notifier = true;
        self
    }

    pub async fn build(self) -> Result<TestHarness, TriageError> {
        let mut temp_dir = None;
        let mut memory = None;

        let store: Arc<dyn TicketStore> = if self.sqlite {
            let dir =
                tempfile::TempDir::new().map_err(|e| TriageError::Storage { source: e.into() })?;
            let config = StorageConfig {
                database_path: dir.path().join("tickets.db").to_string_lossy().to_string(),
                wal_mode: true,
            };
            let store = SqliteTicketStore::open(&config).await?;
            temp_dir = Some(dir);
            Arc::new(store)
        } else {
            let store = Arc::new(InMemoryStore::new());
            memory = Some(Arc::clone(&store));
            store
        };

        let notifier = Arc::new(if self.failing_notifier {
            RecordingNotifier::failing()
        } else {
            RecordingNotifier::new()
        });

        let service = Arc::new(TicketService::new(
            Arc::clone(&store),
            notifier.clone(),
            self.classifier.unwrap_or_default(),
        ));

        Ok(TestHarness {
            service,
            store,
            memory,
            notifier,
            _temp_dir: temp_dir,
        })
    }
}

/// A ticket service with observable collaborators.
pub struct TestHarness {
    pub service: Arc<TicketService>,
    pub store: Arc<dyn TicketStore>,
    /// Set when the harness uses the in-memory store, for failure injection.
    pub memory: Option<Arc<InMemoryStore>>,
    pub notifier: Arc<RecordingNotifier>,
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// In-memory store, default classifier, recording notifier.
    pub async fn new() -> Result<Self, TriageError> {
        Self::builder().build().await
    }

    /// A web request with the given text and priority and no contact.
    pub fn request(description: &str, priority: &str) -> TicketRequest {
        TicketRequest::new(description, TicketSource::Web).with_priority(priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_harness_creates_tickets() {
        let h = TestHarness::new().await.unwrap();
        let t = h
            .service
            .create(TestHarness::request("my invoice is wrong", "low"))
            .await
            .unwrap();
        assert_eq!(t.category.as_str(), "Billing");
        assert_eq!(h.memory.as_ref().unwrap().len().await, 1);
    }

    #[tokio::test]
    async fn sqlite_harness_persists() {
        let h = TestHarness::builder().with_sqlite().build().await.unwrap();
        assert!(h.memory.is_none());
        let t = h
            .service
            .create(TestHarness::request("password reset", "high"))
            .await
            .unwrap();
        assert_eq!(h.store.get(t.id).await.unwrap(), Some(t));
    }
}

// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the TicketStore trait.

use async_trait::async_trait;
use tracing::debug;

use triage_config::model::StorageConfig;
use triage_core::{
    Adapter, AdapterType, HealthStatus, Ticket, TicketId, TicketStore, TriageError,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed ticket store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
pub struct SqliteTicketStore {
    db: Database,
    path: String,
}

impl SqliteTicketStore {
    /// Open the store at the configured path, applying migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, TriageError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite ticket store initialized");
        Ok(Self {
            db,
            path: config.database_path.clone(),
        })
    }

    /// A throwaway in-memory store.
    pub async fn in_memory() -> Result<Self, TriageError> {
        Ok(Self {
            db: Database::open_in_memory().await?,
            path: ":memory:".to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl Adapter for SqliteTicketStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, TriageError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TriageError> {
        self.db.checkpoint().await?;
        debug!("shutdown: WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl TicketStore for SqliteTicketStore {
    async fn next_id(&self) -> Result<TicketId, TriageError> {
        queries::tickets::next_id(&self.db).await
    }

    async fn save(&self, ticket: &Ticket) -> Result<(), TriageError> {
        queries::tickets::upsert_ticket(&self.db, ticket).await
    }

    async fn get(&self, id: TicketId) -> Result<Option<Ticket>, TriageError> {
        queries::tickets::get_ticket(&self.db, id).await
    }

    async fn list(&self) -> Result<Vec<Ticket>, TriageError> {
        queries::tickets::list_tickets(&self.db).await
    }
}

// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of the ticket service from configuration.

use std::sync::Arc;

use tracing::info;

use triage_classifier::KeywordClassifier;
use triage_config::TriageConfig;
use triage_core::{Adapter, Notifier, TriageError};
use triage_email::{LogNotifier, SmtpNotifier};
use triage_storage::SqliteTicketStore;
use triage_tickets::TicketService;

/// Open the store, pick the notifier, and build the service.
pub async fn build_service(config: &TriageConfig) -> Result<Arc<TicketService>, TriageError> {
    let store = SqliteTicketStore::open(&config.storage).await?;

    let notifier: Arc<dyn Notifier> = if config.smtp.enabled {
        Arc::new(SmtpNotifier::new(&config.smtp, &config.service.name)?)
    } else {
        Arc::new(LogNotifier::new(config.smtp.admin_email.clone()))
    };

    let classifier = KeywordClassifier::from_config(&config.classifier);

    info!(
        database = %config.storage.database_path,
        notifier = notifier.name(),
        categories = classifier.rules().len() + 1,
        "ticket service ready"
    );

    Ok(Arc::new(TicketService::new(
        Arc::new(store),
        notifier,
        classifier,
    )))
}

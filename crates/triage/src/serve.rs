// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `triage serve`: HTTP gateway plus inbox poller until shutdown.

use tracing::{error, info, warn};

use triage_config::TriageConfig;
use triage_core::{Adapter, TriageError};
use triage_email::InboxPoller;

use crate::app::build_service;
use crate::shutdown::install_signal_handler;

pub async fn run_serve(config: TriageConfig) -> Result<(), TriageError> {
    let service = build_service(&config).await?;
    let token = install_signal_handler();

    let poller = if config.inbox.enabled {
        let poller = InboxPoller::new(config.inbox.clone(), service.clone());
        Some(tokio::spawn(poller.run(token.clone())))
    } else {
        info!("inbox intake disabled");
        None
    };

    let gateway_result = if config.gateway.enabled {
        triage_gateway::serve(&config.gateway, service.clone(), token.clone()).await
    } else {
        info!("gateway disabled, waiting for shutdown signal");
        token.cancelled().await;
        Ok(())
    };

    // A gateway failure stops the poller too.
    token.cancel();
    if let Some(handle) = poller {
        if let Err(e) = handle.await {
            error!(error = %e, "inbox poller task panicked");
        }
    }

    if let Err(e) = service.store().shutdown().await {
        warn!(error = %e, "store shutdown failed");
    }

    info!("triage stopped");
    gateway_result
}

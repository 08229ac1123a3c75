// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IMAP inbox intake.
//!
//! Polls a mailbox for unseen messages, turns each into a ticket through
//! the shared [`TicketService`], and flags it `\Seen` so it is processed
//! once. Messages that hit a storage or other transient failure stay
//! unseen and are retried on the next tick, as is a failed poll cycle.

use std::sync::Arc;
use std::time::Duration;

use futures::TryStreamExt;
use mail_parser::MessageParser;
use rustls_pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use triage_config::model::InboxConfig;
use triage_core::{Ticket, TicketSource, TriageError};
use triage_tickets::{TicketRequest, TicketService, is_email_address};

type ImapSession = async_imap::Session<TlsStream<TcpStream>>;

/// Build a ticket request from a raw RFC 822 message.
///
/// The description is the subject followed by the plain-text body; the
/// sender becomes the contact address when it looks like one, otherwise the
/// ticket is filed without a contact. Returns `None` when the bytes do not
/// parse as a message.
pub fn request_from_message(raw: &[u8], default_priority: &str) -> Option<TicketRequest> {
    let message = MessageParser::default().parse(raw)?;

    let subject = message.subject().unwrap_or_default().trim();
    let body = message.body_text(0).unwrap_or_default();
    let body = body.trim();
    let description = match (subject.is_empty(), body.is_empty()) {
        (false, false) => format!("{subject}\n\n{body}"),
        (false, true) => subject.to_string(),
        _ => body.to_string(),
    };

    let mut request =
        TicketRequest::new(description, TicketSource::Email).with_priority(default_priority);
    if let Some(sender) = message
        .from()
        .and_then(|from| from.first())
        .and_then(|addr| addr.address())
        .map(str::trim)
    {
        if is_email_address(sender) {
            request = request.with_contact_email(sender);
        } else {
            debug!(sender, "unusable sender address dropped");
        }
    }
    Some(request)
}

/// Whether a message should be flagged `\Seen` after an ingest attempt.
///
/// Created tickets and messages that can never become tickets are flagged.
/// Any other failure leaves the message unseen for the next poll.
pub fn should_flag(outcome: &Result<Ticket, TriageError>) -> bool {
    matches!(outcome, Ok(_) | Err(TriageError::Validation { .. }))
}

fn intake_err(
    message: impl Into<String>,
    source: impl std::error::Error + Send + Sync + 'static,
) -> TriageError {
    TriageError::Intake {
        message: message.into(),
        source: Some(Box::new(source)),
    }
}

/// Periodic poller feeding inbox messages into the ticket service.
pub struct InboxPoller {
    config: InboxConfig,
    service: Arc<TicketService>,
}

impl InboxPoller {
    pub fn new(config: InboxConfig, service: Arc<TicketService>) -> Self {
        Self { config, service }
    }

    /// Poll every `poll_interval_secs` until `token` is cancelled.
    ///
    /// Cancellation is only observed between messages, so a ticket is never
    /// left created but unflagged.
    pub async fn run(self, token: CancellationToken) {
        let mut interval =
            tokio::time::interval(Duration::from_secs(self.config.poll_interval_secs.max(1)));
        info!(
            host = %self.config.host,
            mailbox = %self.config.mailbox,
            interval_secs = self.config.poll_interval_secs,
            "inbox poller started"
        );

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {}
            }
            match self.poll_once(&token).await {
                Ok(0) => debug!("no new messages"),
                Ok(count) => info!(count, "inbox messages processed"),
                Err(e) => warn!(error = %e, "inbox poll failed, retrying next tick"),
            }
        }

        info!("inbox poller stopped");
    }

    /// Run a single poll cycle, returning the number of messages flagged.
    ///
    /// Stops early, between messages, once `token` is cancelled.
    pub async fn poll_once(&self, token: &CancellationToken) -> Result<usize, TriageError> {
        let mut session = self.connect().await?;

        session
            .select(&self.config.mailbox)
            .await
            .map_err(|e| intake_err(format!("cannot select {}", self.config.mailbox), e))?;

        let uids = session
            .uid_search("UNSEEN")
            .await
            .map_err(|e| intake_err("UNSEEN search failed", e))?;
        if uids.is_empty() {
            let _ = session.logout().await;
            return Ok(0);
        }

        let mut uids: Vec<u32> = uids.into_iter().collect();
        uids.sort_unstable();
        let set = uids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let fetches: Vec<_> = session
            .uid_fetch(&set, "RFC822")
            .await
            .map_err(|e| intake_err("fetch failed", e))?
            .try_collect()
            .await
            .map_err(|e| intake_err("fetch failed", e))?;

        let messages: Vec<(u32, &[u8])> = fetches
            .iter()
            .filter_map(|fetch| Some((fetch.uid?, fetch.body()?)))
            .collect();
        let seen = self.ingest_batch(&messages, token).await;

        if !seen.is_empty() {
            let set = seen
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let _: Vec<_> = session
                .uid_store(&set, "+FLAGS (\\Seen)")
                .await
                .map_err(|e| intake_err("flag update failed", e))?
                .try_collect()
                .await
                .map_err(|e| intake_err("flag update failed", e))?;
        }

        let _ = session.logout().await;
        Ok(seen.len())
    }

    /// Ingest fetched `(uid, raw)` messages in order, returning the uids to
    /// flag `\Seen`.
    ///
    /// Stops before the next message once `token` is cancelled.
    pub async fn ingest_batch(
        &self,
        messages: &[(u32, &[u8])],
        token: &CancellationToken,
    ) -> Vec<u32> {
        let mut seen = Vec::with_capacity(messages.len());
        for &(uid, raw) in messages {
            if token.is_cancelled() {
                debug!("cancelled, leaving remaining messages for the next run");
                break;
            }
            if self.ingest(uid, raw).await {
                seen.push(uid);
            }
        }
        seen
    }

    /// Turn one message into a ticket. Returns whether to flag it seen.
    async fn ingest(&self, uid: u32, raw: &[u8]) -> bool {
        let Some(request) = request_from_message(raw, &self.config.default_priority) else {
            warn!(uid, "unparseable message skipped");
            return true;
        };
        let outcome = self.service.create(request).await;
        match &outcome {
            Ok(ticket) => info!(uid, ticket_id = %ticket.id, "ticket created from email"),
            Err(e @ TriageError::Validation { .. }) => warn!(uid, error = %e, "email rejected"),
            Err(e) => warn!(uid, error = %e, "email left unseen for retry"),
        }
        should_flag(&outcome)
    }

    async fn connect(&self) -> Result<ImapSession, TriageError> {
        let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) else {
            return Err(TriageError::Config(
                "inbox.username and inbox.password must be set".into(),
            ));
        };

        let mut roots = rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let tls_config = rustls::ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .map_err(|e| intake_err("TLS setup failed", e))?
        .with_root_certificates(roots)
        .with_no_client_auth();
        let connector = TlsConnector::from(Arc::new(tls_config));

        let host = self.config.host.as_str();
        let tcp = TcpStream::connect((host, self.config.port))
            .await
            .map_err(|e| intake_err(format!("cannot reach {host}"), e))?;
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| intake_err(format!("invalid IMAP host {host}"), e))?;
        let tls = connector
            .connect(server_name, tcp)
            .await
            .map_err(|e| intake_err("TLS handshake failed", e))?;

        let mut client = async_imap::Client::new(tls);
        // Server greeting.
        let _ = client.read_response().await;

        client
            .login(user, pass)
            .await
            .map_err(|(e, _)| intake_err("IMAP login failed", e))
    }
}

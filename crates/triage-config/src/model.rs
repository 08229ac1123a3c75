// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Triage support desk.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Triage configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Ticket store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Keyword classifier rules.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Outbound notification mail settings.
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Support inbox polling settings.
    #[serde(default)]
    pub inbox: InboxConfig,

    /// HTTP intake and query API settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name used in notification signatures.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "Support Team".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ticket store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("triage").join("tickets.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("tickets.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Keyword classifier configuration.
///
/// Rules are evaluated in the order listed; on a tie the earlier rule wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Catch-all category returned when no keyword matches.
    #[serde(default = "default_default_category")]
    pub default_category: String,

    /// Ordered keyword rules.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_category: default_default_category(),
            categories: default_categories(),
        }
    }
}

/// A category and the keywords that vote for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRule {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

fn default_default_category() -> String {
    "General Inquiry".to_string()
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Technical Support",
            &[
                "error",
                "bug",
                "not working",
                "broken",
                "failed",
                "issue",
                "problem",
                "crash",
            ],
        ),
        CategoryRule::new(
            "Billing",
            &[
                "payment",
                "invoice",
                "charge",
                "bill",
                "subscription",
                "price",
                "cost",
                "refund",
            ],
        ),
        CategoryRule::new(
            "Account Management",
            &["login", "password", "account", "profile", "settings", "access"],
        ),
    ]
}

/// Outbound notification mail configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SmtpConfig {
    /// Send notifications over SMTP. When disabled, events are only logged.
    #[serde(default)]
    pub enabled: bool,

    /// SMTP relay host (STARTTLS).
    #[serde(default = "default_smtp_host")]
    pub host: String,

    /// SMTP submission port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Sender address. Falls back to `username` when unset.
    #[serde(default)]
    pub from: Option<String>,

    /// Recipient of new-ticket notifications.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            from: None,
            admin_email: default_admin_email(),
        }
    }
}

impl SmtpConfig {
    /// The effective sender address.
    pub fn sender(&self) -> Option<&str> {
        self.from.as_deref().or(self.username.as_deref())
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

/// Support inbox polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InboxConfig {
    /// Poll the inbox for new tickets while serving.
    #[serde(default)]
    pub enabled: bool,

    /// IMAP host (implicit TLS).
    #[serde(default = "default_imap_host")]
    pub host: String,

    #[serde(default = "default_imap_port")]
    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Mailbox to watch for unseen messages.
    #[serde(default = "default_mailbox")]
    pub mailbox: String,

    /// Seconds between polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Priority given to tickets created from email.
    #[serde(default = "default_inbox_priority")]
    pub default_priority: String,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_imap_host(),
            port: default_imap_port(),
            username: None,
            password: None,
            mailbox: default_mailbox(),
            poll_interval_secs: default_poll_interval_secs(),
            default_priority: default_inbox_priority(),
        }
    }
}

fn default_imap_host() -> String {
    "imap.gmail.com".to_string()
}

fn default_imap_port() -> u16 {
    993
}

fn default_mailbox() -> String {
    "INBOX".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_inbox_priority() -> String {
    "medium".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Serve the HTTP API from `triage serve`.
    #[serde(default = "default_gateway_enabled")]
    pub enabled: bool,

    /// Address to bind the server to.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Default page size for the recent-tickets listing.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_gateway_enabled(),
            host: default_gateway_host(),
            port: default_gateway_port(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_gateway_enabled() -> bool {
    true
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_recent_limit() -> usize {
    10
}

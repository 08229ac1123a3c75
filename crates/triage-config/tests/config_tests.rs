// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Triage configuration system.

use figment::Jail;
use triage_config::diagnostic::ConfigError;
use triage_config::{
    load_and_validate, load_and_validate_str, load_config_from_str, render_toml,
};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[service]
name = "Helpdesk"
log_level = "debug"

[storage]
database_path = "/tmp/tickets.db"
wal_mode = false

[classifier]
default_category = "Other"

[[classifier.categories]]
name = "Hardware"
keywords = ["printer", "monitor"]

[[classifier.categories]]
name = "Network"
keywords = ["wifi", "vpn"]

[smtp]
enabled = true
host = "mail.example.com"
port = 2525
username = "desk@example.com"
password = "hunter2"
admin_email = "ops@example.com"

[inbox]
enabled = true
username = "desk@example.com"
password = "hunter2"
poll_interval_secs = 30
default_priority = "low"

[gateway]
host = "0.0.0.0"
port = 9000
recent_limit = 25
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.service.name, "Helpdesk");
    assert_eq!(config.storage.database_path, "/tmp/tickets.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.classifier.default_category, "Other");
    assert_eq!(config.classifier.categories.len(), 2);
    assert_eq!(config.classifier.categories[1].name, "Network");
    assert_eq!(config.smtp.port, 2525);
    assert_eq!(config.smtp.sender(), Some("desk@example.com"));
    assert_eq!(config.inbox.poll_interval_secs, 30);
    assert_eq!(config.inbox.mailbox, "INBOX");
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.gateway.recent_limit, 25);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty config is valid");
    assert_eq!(config.classifier.default_category, "General Inquiry");
    let names: Vec<&str> = config
        .classifier
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["Technical Support", "Billing", "Account Management"]);
    assert!(!config.smtp.enabled);
    assert!(!config.inbox.enabled);
    assert!(config.gateway.enabled);
    assert_eq!(config.gateway.port, 8080);
}

#[test]
fn configured_categories_replace_defaults() {
    let toml = r#"
[[classifier.categories]]
name = "Hardware"
keywords = ["printer"]
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.classifier.categories.len(), 1);
}

#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[smtp]
admin_emial = "ops@example.com"
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown key must be rejected");
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "admin_emial");
            assert_eq!(suggestion.as_deref(), Some("admin_email"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[gateway]
port = "eighty"
"#;
    let errors = load_and_validate_str(toml).expect_err("string port must be rejected");
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }));
}

#[test]
fn semantic_errors_are_collected() {
    let toml = r#"
[[classifier.categories]]
name = "Billing"
keywords = ["invoice"]

[[classifier.categories]]
name = "Billing"
keywords = [""]
"#;
    let errors = load_and_validate_str(toml).expect_err("duplicate category");
    assert_eq!(errors.len(), 2);
}

#[test]
fn env_overrides_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "triage.toml",
            r#"
[gateway]
port = 9000

[smtp]
admin_email = "file@example.com"
"#,
        )?;
        jail.set_env("TRIAGE_GATEWAY_PORT", "9100");
        jail.set_env("TRIAGE_SMTP_ADMIN_EMAIL", "env@example.com");

        let config = load_and_validate().expect("layered config is valid");
        assert_eq!(config.gateway.port, 9100);
        assert_eq!(config.smtp.admin_email, "env@example.com");
        Ok(())
    });
}

#[test]
fn rendered_config_reloads_with_masked_secrets() {
    let toml = r#"
[smtp]
username = "desk@example.com"
password = "hunter2"

[[classifier.categories]]
name = "Hardware"
keywords = ["printer", "monitor"]
"#;
    let config = load_and_validate_str(toml).unwrap();
    let rendered = render_toml(&config).unwrap();
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("********"));

    let reloaded = load_and_validate_str(&rendered).expect("rendered config is loadable");
    assert_eq!(reloaded.classifier.categories[0].keywords, ["printer", "monitor"]);
    assert_eq!(reloaded.smtp.username.as_deref(), Some("desk@example.com"));
    assert_eq!(reloaded.gateway.port, config.gateway.port);
}

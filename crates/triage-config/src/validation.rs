// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express: non-empty
//! paths, a well-formed classifier rule set, and credentials for enabled
//! mail integrations.

use std::collections::HashSet;
use std::str::FromStr;

use triage_core::Priority;

use crate::diagnostic::ConfigError;
use crate::model::{ClassifierConfig, TriageConfig};

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &TriageConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    validate_classifier(&config.classifier, &mut errors);

    let smtp = &config.smtp;
    if smtp.enabled {
        if smtp.host.trim().is_empty() {
            errors.push(ConfigError::validation(
                "smtp.host must not be empty when smtp is enabled",
            ));
        }
        if smtp.username.is_none() || smtp.password.is_none() {
            errors.push(ConfigError::validation(
                "smtp.username and smtp.password are required when smtp is enabled",
            ));
        }
        if smtp.sender().is_none_or(|s| !s.contains('@')) {
            errors.push(ConfigError::validation(
                "smtp.from (or smtp.username) must be an email address",
            ));
        }
        if !smtp.admin_email.contains('@') {
            errors.push(ConfigError::validation(format!(
                "smtp.admin_email `{}` is not an email address",
                smtp.admin_email
            )));
        }
    }

    let inbox = &config.inbox;
    if inbox.enabled {
        if inbox.host.trim().is_empty() {
            errors.push(ConfigError::validation(
                "inbox.host must not be empty when inbox is enabled",
            ));
        }
        if inbox.username.is_none() || inbox.password.is_none() {
            errors.push(ConfigError::validation(
                "inbox.username and inbox.password are required when inbox is enabled",
            ));
        }
    }
    if inbox.poll_interval_secs == 0 {
        errors.push(ConfigError::validation(
            "inbox.poll_interval_secs must be at least 1",
        ));
    }
    if Priority::from_str(&inbox.default_priority).is_err() {
        errors.push(ConfigError::validation(format!(
            "inbox.default_priority `{}` must be one of low, medium, high",
            inbox.default_priority
        )));
    }

    let host = config.gateway.host.trim();
    let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
    let is_valid_hostname = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
    if !is_valid_ip && !is_valid_hostname {
        errors.push(ConfigError::validation(format!(
            "gateway.host `{host}` is not a valid IP address or hostname"
        )));
    }
    if config.gateway.recent_limit == 0 {
        errors.push(ConfigError::validation(
            "gateway.recent_limit must be at least 1",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_classifier(classifier: &ClassifierConfig, errors: &mut Vec<ConfigError>) {
    if classifier.default_category.trim().is_empty() {
        errors.push(ConfigError::validation(
            "classifier.default_category must not be empty",
        ));
    }

    let mut seen = HashSet::new();
    for (i, rule) in classifier.categories.iter().enumerate() {
        if rule.name.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "classifier.categories[{i}].name must not be empty"
            )));
            continue;
        }
        if !seen.insert(rule.name.as_str()) {
            errors.push(ConfigError::validation(format!(
                "duplicate category `{}` in [[classifier.categories]]",
                rule.name
            )));
        }
        if rule.name == classifier.default_category && !rule.keywords.is_empty() {
            errors.push(ConfigError::validation(format!(
                "default category `{}` must not have keywords",
                rule.name
            )));
        }
        if rule.keywords.iter().any(|k| k.trim().is_empty()) {
            errors.push(ConfigError::validation(format!(
                "category `{}` has an empty keyword",
                rule.name
            )));
        }
    }
}

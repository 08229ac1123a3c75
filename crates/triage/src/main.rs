// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage - keyword-classifying support ticket desk.
//!
//! This is the binary entry point.

mod app;
mod commands;
mod output;
mod serve;
mod shutdown;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use triage_classifier::KeywordClassifier;
use triage_config::TriageConfig;
use triage_core::{TicketId, TriageError};

use crate::output::Style;

/// Triage - keyword-classifying support ticket desk.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP gateway and inbox poller until interrupted.
    Serve,
    /// Submit a new ticket.
    Submit {
        /// Issue description.
        description: String,
        /// low, medium or high.
        #[arg(short, long)]
        priority: String,
        /// Address for confirmation and resolution emails.
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Resolve an open ticket.
    Resolve {
        /// Ticket id (a leading `#` is accepted).
        id: TicketId,
        /// Resolution notes.
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List recent tickets, newest first.
    List {
        /// Number of tickets to show (defaults to gateway.recent_limit).
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one ticket.
    Show {
        id: TicketId,
    },
    /// Classify text without creating a ticket.
    Classify {
        text: String,
    },
    /// Ticket counts and trends.
    Summary,
    /// Print the effective configuration as TOML (passwords masked).
    Config,
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("triage={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> TriageConfig {
    let result = match path {
        Some(path) => triage_config::load_and_validate_path(path),
        None => triage_config::load_and_validate(),
    };
    match result {
        Ok(config) => config,
        Err(errors) => {
            triage_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli, config: TriageConfig) -> Result<Option<String>, TriageError> {
    let style = Style {
        json: cli.json,
        color: !cli.plain && !cli.json && std::io::stdout().is_terminal(),
    };

    if let Commands::Classify { text } = &cli.command {
        let classifier = KeywordClassifier::from_config(&config.classifier);
        return Ok(Some(commands::classify(&classifier, text, style)));
    }
    if let Commands::Config = cli.command {
        let rendered = triage_config::render_toml(&config)
            .map_err(|e| TriageError::Config(format!("cannot render configuration: {e}")))?;
        return Ok(Some(rendered));
    }
    if let Commands::Serve = cli.command {
        serve::run_serve(config).await?;
        return Ok(None);
    }

    let service = app::build_service(&config).await?;
    let out = match cli.command {
        Commands::Submit {
            description,
            priority,
            email,
        } => commands::submit(&service, description, priority, email, style).await,
        Commands::Resolve { id, notes } => commands::resolve(&service, id, notes, style).await,
        Commands::List { limit } => {
            let limit = limit.unwrap_or(config.gateway.recent_limit);
            commands::list(&service, limit, style).await
        }
        Commands::Show { id } => commands::show(&service, id, style).await,
        Commands::Summary => commands::summary(&service, style).await,
        Commands::Serve | Commands::Classify { .. } | Commands::Config => return Ok(None),
    };

    let shutdown = service.store().shutdown().await;
    let out = out?;
    shutdown?;
    Ok(Some(out))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.service.log_level);

    match run(cli, config).await {
        Ok(Some(out)) => print!("{}", if out.ends_with('\n') { out } else { out + "\n" }),
        Ok(None) => {}
        Err(e) => {
            eprintln!("triage: {e}");
            std::process::exit(if e.is_client_error() { 2 } else { 1 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_submit_with_global_flags() {
        let cli = Cli::try_parse_from([
            "triage",
            "submit",
            "App crashes on launch",
            "--priority",
            "high",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Submit {
                description,
                priority,
                email,
            } => {
                assert_eq!(description, "App crashes on launch");
                assert_eq!(priority, "high");
                assert!(email.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn resolve_accepts_hash_prefixed_id() {
        let cli = Cli::try_parse_from(["triage", "resolve", "#42", "-n", "done"]).unwrap();
        match cli.command {
            Commands::Resolve { id, notes } => {
                assert_eq!(id, TicketId(42));
                assert_eq!(notes, "done");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn submit_requires_priority() {
        assert!(Cli::try_parse_from(["triage", "submit", "help"]).is_err());
    }

    #[tokio::test]
    async fn classify_runs_without_a_store() {
        let cli = Cli::try_parse_from(["triage", "classify", "refund my invoice", "--json"]).unwrap();
        let out = run(cli, TriageConfig::default()).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["category"], "Billing");
    }

    #[tokio::test]
    async fn config_prints_toml() {
        let cli = Cli::try_parse_from(["triage", "config"]).unwrap();
        let out = run(cli, TriageConfig::default()).await.unwrap().unwrap();
        assert!(out.contains("[gateway]"));
        assert!(out.contains("default_category = \"General Inquiry\""));
    }

    #[tokio::test]
    async fn submit_and_show_against_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TriageConfig::default();
        config.storage.database_path = dir.path().join("t.db").to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["triage", "submit", "cannot login", "-p", "low", "--json"])
            .unwrap();
        run(cli, config.clone()).await.unwrap();

        let cli = Cli::try_parse_from(["triage", "show", "1", "--json"]).unwrap();
        let out = run(cli, config).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["category"], "Account Management");
        assert_eq!(value["source"], "cli");
    }
}

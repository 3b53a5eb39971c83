// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quill - a conversational legal document drafting assistant.
//!
//! This is the binary entry point.

mod commands;
mod input;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// Quill - draft legal documents by conversation.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive drafting session.
    Shell {
        /// Resume a saved conversation.
        #[arg(long)]
        conversation: Option<String>,
    },
    /// List saved conversations.
    List,
    /// Delete a saved conversation.
    Delete { id: String },
    /// Export a saved conversation's document as PDF.
    Export {
        id: String,
        /// Output path (defaults to `<title>.pdf`).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Manage Quill configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Validate the configuration and print the effective values.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => quill_config::load_and_validate_path(path),
        None => quill_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            quill_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command.unwrap_or(Commands::Shell { conversation: None }) {
        Commands::Shell { conversation } => shell::run_shell(config, conversation).await,
        Commands::List => commands::run_list(&config).await,
        Commands::Delete { id } => commands::run_delete(&config, id).await,
        Commands::Export { id, output } => commands::run_export(&config, id, output).await,
        Commands::Config {
            action: ConfigAction::Check,
        } => commands::run_config_check(&config),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("{}: {}", "error".red(), e.user_facing_message());
        std::process::exit(1);
    }
}

/// Logs go to stderr so shell output stays readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quill={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_loads_config_defaults() {
        let config = quill_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.agent.name, "quill");
    }

    #[test]
    fn cli_parses_export_with_output() {
        let cli = Cli::parse_from(["quill", "export", "c-1", "--output", "lease.pdf"]);
        match cli.command {
            Some(Commands::Export { id, output }) => {
                assert_eq!(id, "c-1");
                assert_eq!(output, Some(PathBuf::from("lease.pdf")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_shell_resume() {
        let cli = Cli::parse_from(["quill", "shell", "--conversation", "abc"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Shell { conversation: Some(ref id) }) if id == "abc"
        ));
    }

    #[test]
    fn cli_parses_config_check() {
        let cli = Cli::parse_from(["quill", "--config", "q.toml", "config", "check"]);
        assert_eq!(cli.config, Some(PathBuf::from("q.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Check
            })
        ));
    }
}

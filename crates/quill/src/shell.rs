// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `quill shell` command implementation.
//!
//! Interactive drafting session with colored output and readline history.
//! Plain lines go to the synthesis controller; slash commands save, sign,
//! edit and export. After every action the shell prints whatever visible
//! messages the conversation gained.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use quill_agent::{
    Conversation, ConversationPersistence, DocumentController, SaveOutcome, SignatureWorkflow,
    SynthesisOutcome,
};
use quill_backend::HttpBackend;
use quill_config::QuillConfig;
use quill_context::ContextBuilder;
use quill_core::error::QuillError;
use quill_core::types::{ConversationId, Message, Sender};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

use crate::commands::{export_pdf, read_signature};
use crate::input::{self, HELP, ShellCommand};

/// Everything one shell session works with.
struct Session {
    backend: Arc<HttpBackend>,
    controller: DocumentController,
    signatures: SignatureWorkflow,
    persistence: ConversationPersistence,
    /// Number of visible messages already printed.
    shown: usize,
}

/// Runs the `quill shell` interactive REPL.
///
/// Resumes `conversation` when given, otherwise starts a new unsaved one.
pub async fn run_shell(
    config: QuillConfig,
    conversation: Option<String>,
) -> Result<(), QuillError> {
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    let persistence = ConversationPersistence::new(backend.clone());

    let loaded = match conversation {
        Some(id) => persistence.load(&ConversationId(id)).await?,
        None => Conversation::new(),
    };
    let controller = DocumentController::new(
        loaded,
        backend.clone(),
        ContextBuilder::new(&config.context),
    );
    let signatures = SignatureWorkflow::new(backend.clone(), &config.signature);

    let mut session = Session {
        backend,
        controller,
        signatures,
        persistence,
        shown: 0,
    };

    let mut rl = DefaultEditor::new()
        .map_err(|e| QuillError::Internal(format!("failed to initialize readline: {e}")))?;
    let history = history_path();
    if let Some(path) = &history
        && rl.load_history(path).is_err()
    {
        debug!(path = %path.display(), "no shell history yet");
    }

    println!("{}", format!("{} shell", config.agent.name).bold().green());
    println!("Describe the document you need. Type {} for commands.\n", "/help".yellow());
    session.print_new().await;

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match input::parse(trimmed) {
                    Ok(command) => command,
                    Err(usage) => {
                        eprintln!("{}", usage.yellow());
                        continue;
                    }
                };
                if command == ShellCommand::Quit {
                    break;
                }
                if let Err(e) = session.handle(command).await {
                    eprintln!("{}: {}", "error".red(), e.user_facing_message());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(path) {
            warn!(error = %e, "failed to save shell history");
        }
    }

    let conversation = session.controller.conversation().await;
    if !conversation.identity().is_persisted() && !conversation.messages().is_empty() {
        println!("{}", "conversation was not saved".yellow());
    }
    println!("{}", "goodbye".dimmed());
    Ok(())
}

impl Session {
    async fn handle(&mut self, command: ShellCommand) -> Result<(), QuillError> {
        match command {
            ShellCommand::Chat(text) => {
                println!("{}", "drafting...".dimmed());
                let outcome = self.controller.submit(&text).await?;
                debug!(?outcome, "chat round finished");
                self.print_new().await;
            }
            ShellCommand::Save(title) => {
                if let Some(title) = title {
                    self.controller.set_title(title).await;
                }
                let (verb, id) = match self.persistence.save(&self.controller).await? {
                    SaveOutcome::Created(id) => ("saved", id),
                    SaveOutcome::Updated(id) => ("updated", id),
                };
                println!("{verb} conversation {}", id.to_string().cyan());
            }
            ShellCommand::Sign { role, path } => {
                let image = read_signature(&path).await?;
                println!("{}", format!("uploading {} signature...", role.party_label()).dimmed());
                let outcome = self.signatures.embed(&self.controller, role, &image).await?;
                self.print_new().await;
                if matches!(outcome, SynthesisOutcome::ContractViolation { .. }) {
                    println!("{}", "the document was not changed".yellow());
                }
            }
            ShellCommand::ShowDocument => match self.controller.document().await {
                Some(document) => println!("{document}"),
                None => println!("{}", "no document yet".dimmed()),
            },
            ShellCommand::Edit(path) => {
                let text = tokio::fs::read_to_string(&path).await?;
                self.controller.edit_document(text).await?;
                println!("document replaced from {}", path.display());
            }
            ShellCommand::Pdf(output) => {
                let conversation = self.controller.conversation().await;
                let document = conversation.document().unwrap_or_default();
                let output =
                    output.unwrap_or_else(|| PathBuf::from(conversation.export_file_name()));
                let written = export_pdf(self.backend.as_ref(), document, &output).await?;
                println!("wrote {} ({written} bytes)", output.display());
            }
            ShellCommand::Status => self.print_status().await,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    /// Prints visible messages added since the last call.
    async fn print_new(&mut self) {
        let messages = self.controller.displayable().await;
        for message in messages.iter().skip(self.shown) {
            print_message(message);
        }
        self.shown = messages.len();
    }

    async fn print_status(&self) {
        let conversation = self.controller.conversation().await;
        let identity = match conversation.identity().id() {
            Some(id) => id.to_string(),
            None => "unsaved".to_string(),
        };
        let title = if conversation.title().is_empty() {
            "(untitled)"
        } else {
            conversation.title()
        };
        println!("state:     {}", self.controller.state());
        println!("id:        {identity}");
        println!("title:     {title}");
        println!("messages:  {}", conversation.messages().len());
        match conversation.document() {
            Some(document) => println!("document:  {} bytes", document.len()),
            None => println!("document:  none"),
        }
    }
}

fn print_message(message: &Message) {
    match message.sender() {
        Sender::User => println!("{} {}", "you:".green().bold(), message.text()),
        Sender::Assistant if message.text().starts_with("Error: ") => {
            println!("{} {}", "quill:".blue().bold(), message.text().red())
        }
        Sender::Assistant => println!("{} {}", "quill:".blue().bold(), message.text()),
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("quill").join("history.txt"))
}

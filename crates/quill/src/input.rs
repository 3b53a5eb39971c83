// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of shell input lines.
//!
//! Plain text is a chat message. Lines starting with `/` are commands.

use std::path::PathBuf;
use std::str::FromStr;

use quill_core::types::SignatureRole;

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Chat(String),
    /// `/save [title]`; the title may be omitted once one is set.
    Save(Option<String>),
    Sign { role: SignatureRole, path: PathBuf },
    ShowDocument,
    Edit(PathBuf),
    Pdf(Option<PathBuf>),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
/save [title]                          save the conversation (title required the first time)
/sign <first-party|second-party> <path> upload a signature image and place it in the document
/doc                                   print the current document
/edit <path>                           replace the document with the contents of a file
/pdf [path]                            export the document as PDF
/status                                show conversation state
/help                                  show this help
/quit                                  leave the shell";

/// Parses a non-empty, trimmed line.
pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(ShellCommand::Chat(line.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    match name {
        "save" => Ok(ShellCommand::Save(non_empty(args).map(str::to_string))),
        "sign" => {
            let (role, path) = args
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: /sign <first-party|second-party> <path>".to_string())?;
            let role = SignatureRole::from_str(role)
                .map_err(|_| format!("unknown role `{role}`; use first-party or second-party"))?;
            Ok(ShellCommand::Sign {
                role,
                path: PathBuf::from(path.trim()),
            })
        }
        "doc" => Ok(ShellCommand::ShowDocument),
        "edit" => non_empty(args)
            .map(|p| ShellCommand::Edit(PathBuf::from(p)))
            .ok_or_else(|| "usage: /edit <path>".to_string()),
        "pdf" => Ok(ShellCommand::Pdf(non_empty(args).map(PathBuf::from))),
        "status" => Ok(ShellCommand::Status),
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command `/{other}`; type /help")),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

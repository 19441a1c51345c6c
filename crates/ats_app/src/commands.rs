//! Terminal input: each line the user types becomes one command.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ats_core::Document;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick a resume file.
    Open(PathBuf),
    /// Clear the picked file.
    ClearSelection,
    /// Submit with the given link text, verbatim.
    Analyze(String),
    Copy,
    Save,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for the list")]
    Unknown(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "open" if rest.is_empty() => Command::ClearSelection,
        "open" => Command::Open(PathBuf::from(rest)),
        "analyze" | "submit" => Command::Analyze(rest.to_string()),
        "copy" => Command::Copy,
        "save" | "download" => Command::Save,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Media type a file picker would declare for this path, judged by extension.
pub fn declared_media_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

pub fn load_document(path: &Path) -> io::Result<Document> {
    let contents = fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Document::new(
        file_name,
        declared_media_type(path),
        contents,
    ))
}

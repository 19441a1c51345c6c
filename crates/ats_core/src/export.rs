use std::fmt;

use thiserror::Error;

use crate::Effect;

/// Name of the saved email file.
pub const EMAIL_FILE_NAME: &str = "job_application_email.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAction {
    Copy,
    Download,
}

impl ExportAction {
    pub fn success_message(self) -> &'static str {
        match self {
            ExportAction::Copy => "Email copied to clipboard!",
            ExportAction::Download => "Email downloaded successfully",
        }
    }
}

impl fmt::Display for ExportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportAction::Copy => write!(f, "copy"),
            ExportAction::Download => write!(f, "download"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("nothing to {0}: email surface is empty")]
    EmptyContent(ExportAction),
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("could not save email: {0}")]
    SaveFailed(String),
}

impl ExportError {
    /// Text shown to the user; details stay in the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::EmptyContent(ExportAction::Copy) => "No email content to copy",
            ExportError::EmptyContent(ExportAction::Download) => "No email content to download",
            ExportError::ClipboardUnavailable(_) => "Failed to copy email",
            ExportError::SaveFailed(_) => "Failed to download email",
        }
    }
}

pub fn prepare_copy(email_text: &str) -> Result<Effect, ExportError> {
    if email_text.is_empty() {
        return Err(ExportError::EmptyContent(ExportAction::Copy));
    }
    Ok(Effect::CopyToClipboard {
        text: email_text.to_string(),
    })
}

pub fn prepare_download(email_text: &str) -> Result<Effect, ExportError> {
    if email_text.is_empty() {
        return Err(ExportError::EmptyContent(ExportAction::Download));
    }
    Ok(Effect::SaveEmail {
        text: email_text.to_string(),
        file_name: EMAIL_FILE_NAME.to_string(),
    })
}

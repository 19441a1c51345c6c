use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// Used when an error response carries no readable `detail`.
pub const GENERIC_SERVICE_ERROR: &str = "Error analyzing resume";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDocument {
    pub file_name: String,
    pub media_type: String,
    pub contents: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub request_id: RequestId,
    pub document: UploadDocument,
    pub job_link: String,
}

/// Success body of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisReport {
    pub html_content: String,
    pub email_content: String,
}

/// Error body of `POST /analyze`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No response was received.
    #[error("could not reach the analysis service: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("{0}")]
    Service(String),
    #[error("unreadable response from the analysis service: {0}")]
    MalformedResponse(String),
    #[error("invalid analysis endpoint: {0}")]
    InvalidEndpoint(String),
}

impl AnalysisError {
    /// Text to show the user.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Service(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    Completed {
        request_id: RequestId,
        result: Result<AnalysisReport, AnalysisError>,
    },
}

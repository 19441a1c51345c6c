use thiserror::Error;
use url::Url;

use crate::Document;

/// The only document format the analysis service accepts.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";

/// Why a document or job link was rejected. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a resume PDF")]
    MissingDocument,
    #[error("Please upload a PDF file")]
    UnsupportedDocumentType { media_type: String },
    #[error("Please enter a job link")]
    MissingLink,
    #[error("Please enter a valid URL")]
    MalformedLink { input: String },
}

/// A document/link pair that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub document: Document,
    pub job_link: String,
}

/// Checks the declared media type of a picked document.
pub fn validate_document_type(document: &Document) -> Result<(), ValidationError> {
    let declared = document.media_type();
    let essence = declared.split(';').next().unwrap_or(declared).trim();
    if essence.eq_ignore_ascii_case(ACCEPTED_MEDIA_TYPE) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedDocumentType {
            media_type: declared.to_string(),
        })
    }
}

/// Full pre-submission validation. Checks run in order: document presence,
/// document type, link presence, link shape.
pub fn validate(
    document: Option<&Document>,
    job_link_text: &str,
) -> Result<ValidatedInput, ValidationError> {
    let document = document.ok_or(ValidationError::MissingDocument)?;
    validate_document_type(document)?;

    let job_link = job_link_text.trim();
    if job_link.is_empty() {
        return Err(ValidationError::MissingLink);
    }
    if !is_absolute_url(job_link) {
        return Err(ValidationError::MalformedLink {
            input: job_link.to_string(),
        });
    }

    Ok(ValidatedInput {
        document: document.clone(),
        job_link: job_link.to_string(),
    })
}

// Scheme plus authority; rejects `mailto:` style and host-less URLs.
fn is_absolute_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => !url.cannot_be_a_base() && url.has_host(),
        Err(_) => false,
    }
}

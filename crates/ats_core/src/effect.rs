use crate::{Document, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run exactly one analysis request.
    SubmitAnalysis {
        request_id: RequestId,
        document: Document,
        job_link: String,
    },
    /// Bring the results surface into view.
    RevealResults,
    CopyToClipboard { text: String },
    SaveEmail { text: String, file_name: String },
}

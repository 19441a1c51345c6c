use crate::{AnalysisResult, Document, ExportAction, ExportError, RequestId};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file, or cleared the picker (`None`).
    DocumentSelected(Option<Document>),
    /// User clicked Analyze; carries the job link text as typed.
    SubmitClicked { job_link_text: String },
    /// Analysis request finished with a decoded result.
    AnalysisSucceeded {
        request_id: RequestId,
        result: AnalysisResult,
    },
    /// Analysis request failed. `message` is the user-facing text, if the failure carried one.
    AnalysisFailed {
        request_id: RequestId,
        message: Option<String>,
    },
    /// User clicked Copy.
    CopyClicked,
    /// User clicked Download.
    DownloadClicked,
    /// Platform finished a clipboard write or file save.
    ExportFinished {
        action: ExportAction,
        outcome: Result<(), ExportError>,
    },
    /// Wall-clock time passed; drives notification timers.
    Tick { elapsed: Duration },
    /// Fallback for placeholder wiring.
    NoOp,
}

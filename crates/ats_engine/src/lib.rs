//! ATS client engine: analysis requests, report conversion and email export.
mod client;
mod clipboard;
mod convert;
mod engine;
mod export;
mod types;

pub use client::{AnalysisClient, ClientSettings, ReqwestAnalysisClient};
pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use convert::{Html2MdConverter, ReportConverter};
pub use engine::{AnalysisHandle, ChannelEventSink, EngineError, EventSink};
pub use export::{ensure_output_dir, EmailExporter, SaveError, SavedEmail, DEFAULT_RELEASE_DELAY};
pub use types::{
    AnalysisError, AnalysisEvent, AnalysisReport, AnalysisRequest, RequestId, UploadDocument,
    GENERIC_SERVICE_ERROR,
};

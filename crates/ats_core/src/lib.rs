//! ATS client core: pure workflow state machine and view-model helpers.
mod effect;
mod export;
mod msg;
mod notification;
mod render;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use export::{prepare_copy, prepare_download, ExportAction, ExportError, EMAIL_FILE_NAME};
pub use msg::Msg;
pub use notification::{
    Notification, NotificationCenter, NotificationId, NotificationStage, NotificationTimings,
    Severity,
};
pub use render::{render, DisplaySurfaces, EmailContent, ReportContent, NO_FILE_LABEL};
pub use state::{AnalysisResult, AppState, Document, Phase, RequestId, SessionState};
pub use update::{update, GENERIC_FAILURE_MESSAGE};
pub use validate::{
    validate, validate_document_type, ValidatedInput, ValidationError, ACCEPTED_MEDIA_TYPE,
};
pub use view_model::{AppViewModel, NotificationView};

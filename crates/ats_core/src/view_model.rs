use crate::{NotificationId, NotificationStage, Phase, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub stage: NotificationStage,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub file_label: String,
    pub has_document: bool,
    pub loading_visible: bool,
    pub results_visible: bool,
    pub report_markup: String,
    pub email_text: String,
    pub in_flight: usize,
    pub notifications: Vec<NotificationView>,
    pub dirty: bool,
}

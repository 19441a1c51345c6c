use std::collections::BTreeSet;
use std::time::Duration;

use bytes::Bytes;

use crate::render::{render, DisplaySurfaces, NO_FILE_LABEL};
use crate::view_model::AppViewModel;
use crate::{NotificationCenter, NotificationTimings, Severity};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// A picked resume file: name, declared media type and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    file_name: String,
    media_type: String,
    contents: Bytes,
}

impl Document {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        contents: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            contents: contents.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn contents(&self) -> &Bytes {
        &self.contents
    }
}

/// Decoded success payload of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    report_markup: String,
    email_text: String,
}

impl AnalysisResult {
    pub fn new(report_markup: impl Into<String>, email_text: impl Into<String>) -> Self {
        Self {
            report_markup: report_markup.into(),
            email_text: email_text.into(),
        }
    }

    pub fn report_markup(&self) -> &str {
        &self.report_markup
    }

    pub fn email_text(&self) -> &str {
        &self.email_text
    }
}

/// Session data owned by the workflow. `last_result` is `Some` exactly when
/// the phase is `Succeeded`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    selected_document: Option<Document>,
    phase: Phase,
    last_result: Option<AnalysisResult>,
}

impl SessionState {
    pub fn selected_document(&self) -> Option<&Document> {
        self.selected_document.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    fn settle_to_idle(&mut self) {
        if matches!(self.phase, Phase::Succeeded | Phase::Failed) {
            self.phase = Phase::Idle;
            self.last_result = None;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    surfaces: DisplaySurfaces,
    notifications: NotificationCenter,
    in_flight: BTreeSet<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timings(timings: NotificationTimings) -> Self {
        Self {
            notifications: NotificationCenter::new(timings),
            ..Self::default()
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn surfaces(&self) -> &DisplaySurfaces {
        &self.surfaces
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.session.phase,
            file_label: self.surfaces.file_label.clone(),
            has_document: self.session.selected_document.is_some(),
            loading_visible: self.surfaces.loading_visible,
            results_visible: self.surfaces.results_visible,
            report_markup: self.surfaces.report.markup().to_string(),
            email_text: self.surfaces.email.text().to_string(),
            in_flight: self.in_flight.len(),
            notifications: self.notifications.views(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select_document(&mut self, document: Document) {
        self.surfaces.file_label = document.file_name().to_string();
        self.session.selected_document = Some(document);
        self.session.settle_to_idle();
        self.dirty = true;
    }

    pub(crate) fn clear_document(&mut self) {
        self.surfaces.file_label = NO_FILE_LABEL.to_string();
        self.session.selected_document = None;
        self.session.settle_to_idle();
        self.dirty = true;
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight.insert(request_id);
        self.session.phase = Phase::Pending;
        self.session.last_result = None;
        self.surfaces.loading_visible = true;
        self.surfaces.results_visible = false;
        self.dirty = true;
        request_id
    }

    /// Marks a request as resolved. Returns false for ids that are not in flight.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if !self.in_flight.remove(&request_id) {
            return false;
        }
        if self.in_flight.is_empty() {
            self.surfaces.loading_visible = false;
        }
        self.dirty = true;
        true
    }

    pub(crate) fn apply_success(&mut self, result: AnalysisResult) {
        render(&result, &mut self.surfaces);
        self.surfaces.results_visible = true;
        self.session.phase = Phase::Succeeded;
        self.session.last_result = Some(result);
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self) {
        self.session.phase = Phase::Failed;
        self.session.last_result = None;
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.notify(message, severity);
        self.dirty = true;
    }

    pub(crate) fn advance_clock(&mut self, elapsed: Duration) {
        if self.notifications.advance(elapsed) {
            self.dirty = true;
        }
    }
}

use std::sync::{mpsc, Arc};

use ats_core::{AnalysisResult, Effect, ExportAction, ExportError, Msg};
use ats_engine::{
    AnalysisEvent, AnalysisHandle, AnalysisRequest, ClipboardWriter, EmailExporter, EngineError,
    EventSink, SystemClipboard, UploadDocument,
};
use ats_logging::{ats_info, ats_warn};

use crate::app::AppEvent;
use crate::config::AppConfig;

/// Forwards engine completions into the app's event queue as messages.
pub(crate) struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl MsgSink {
    pub(crate) fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: AnalysisEvent) {
        let _ = self.tx.send(AppEvent::Msg(completion_msg(event)));
    }
}

fn completion_msg(event: AnalysisEvent) -> Msg {
    match event {
        AnalysisEvent::Completed {
            request_id,
            result: Ok(report),
        } => {
            ats_info!("request_id={} succeeded", request_id);
            Msg::AnalysisSucceeded {
                request_id,
                result: AnalysisResult::new(report.html_content, report.email_content),
            }
        }
        AnalysisEvent::Completed {
            request_id,
            result: Err(err),
        } => {
            ats_warn!("request_id={} failed: {}", request_id, err);
            Msg::AnalysisFailed {
                request_id,
                message: Some(err.user_message()),
            }
        }
    }
}

/// Executes the IO effects produced by `update`.
pub struct EffectRunner {
    analysis: AnalysisHandle,
    clipboard: Box<dyn ClipboardWriter>,
    exporter: EmailExporter,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, event_tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink::new(event_tx));
        let analysis = AnalysisHandle::new(config.client_settings(), sink)?;
        Ok(Self::with_parts(
            analysis,
            Box::new(SystemClipboard::new()),
            EmailExporter::new(config.output_dir.clone()),
        ))
    }

    pub fn with_parts(
        analysis: AnalysisHandle,
        clipboard: Box<dyn ClipboardWriter>,
        exporter: EmailExporter,
    ) -> Self {
        Self {
            analysis,
            clipboard,
            exporter,
        }
    }

    /// Runs one effect. Synchronous effects report back with a follow-up message.
    pub fn run(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::SubmitAnalysis {
                request_id,
                document,
                job_link,
            } => {
                ats_info!(
                    "SubmitAnalysis request_id={} file={} link={}",
                    request_id,
                    document.file_name(),
                    job_link
                );
                let submitted = self.analysis.submit(AnalysisRequest {
                    request_id,
                    document: UploadDocument {
                        file_name: document.file_name().to_string(),
                        media_type: document.media_type().to_string(),
                        contents: document.contents().clone(),
                    },
                    job_link,
                });
                // No completion will arrive for a request the runner never took.
                submitted.err().map(|err| {
                    ats_warn!("request_id={} not submitted: {}", request_id, err);
                    Msg::AnalysisFailed {
                        request_id,
                        message: Some(err.to_string()),
                    }
                })
            }
            Effect::CopyToClipboard { text } => {
                let outcome = self.clipboard.write_text(&text).map_err(|err| {
                    ats_warn!("Could not copy email: {}", err);
                    ExportError::ClipboardUnavailable(err.to_string())
                });
                Some(Msg::ExportFinished {
                    action: ExportAction::Copy,
                    outcome,
                })
            }
            Effect::SaveEmail { text, file_name } => {
                let outcome = self
                    .exporter
                    .save(&file_name, &text)
                    .map(|_| ())
                    .map_err(|err| {
                        ats_warn!("Could not save email: {}", err);
                        ExportError::SaveFailed(err.to_string())
                    });
                Some(Msg::ExportFinished {
                    action: ExportAction::Download,
                    outcome,
                })
            }
            // Presentation only; the app handles it.
            Effect::RevealResults => None,
        }
    }

    pub fn shutdown(&mut self) {
        self.analysis.shutdown();
    }
}

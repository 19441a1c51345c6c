use crate::{
    prepare_copy, prepare_download, validate, validate_document_type, AppState, Effect, Msg,
    Severity, ValidatedInput,
};

/// Shown when an analysis failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// Pure update function: applies a message to state and returns any effects.
///
/// Every failure path ends in exactly one error notification; nothing here
/// disables later submits or exports.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DocumentSelected(Some(document)) => {
            match validate_document_type(&document) {
                Ok(()) => state.select_document(document),
                Err(err) => {
                    state.clear_document();
                    state.notify(err.to_string(), Severity::Error);
                }
            }
            Vec::new()
        }
        Msg::DocumentSelected(None) => {
            state.clear_document();
            Vec::new()
        }
        Msg::SubmitClicked { job_link_text } => {
            match validate(state.session().selected_document(), &job_link_text) {
                Ok(ValidatedInput { document, job_link }) => {
                    // No guard against an in-flight request: a second submit
                    // issues a second request alongside the first.
                    let request_id = state.begin_request();
                    vec![Effect::SubmitAnalysis {
                        request_id,
                        document,
                        job_link,
                    }]
                }
                Err(err) => {
                    state.notify(err.to_string(), Severity::Error);
                    Vec::new()
                }
            }
        }
        Msg::AnalysisSucceeded { request_id, result } => {
            if !state.finish_request(request_id) {
                return (state, Vec::new());
            }
            state.apply_success(result);
            vec![Effect::RevealResults]
        }
        Msg::AnalysisFailed {
            request_id,
            message,
        } => {
            if !state.finish_request(request_id) {
                return (state, Vec::new());
            }
            state.apply_failure();
            let message = message
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            state.notify(message, Severity::Error);
            Vec::new()
        }
        Msg::CopyClicked => export_or_notify(&mut state, prepare_copy),
        Msg::DownloadClicked => export_or_notify(&mut state, prepare_download),
        Msg::ExportFinished { action, outcome } => {
            match outcome {
                Ok(()) => state.notify(action.success_message(), Severity::Success),
                Err(err) => state.notify(err.user_message(), Severity::Error),
            }
            Vec::new()
        }
        Msg::Tick { elapsed } => {
            state.advance_clock(elapsed);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn export_or_notify(
    state: &mut AppState,
    prepare: fn(&str) -> Result<Effect, crate::ExportError>,
) -> Vec<Effect> {
    match prepare(state.surfaces().email().text()) {
        Ok(effect) => vec![effect],
        Err(err) => {
            state.notify(err.user_message(), Severity::Error);
            Vec::new()
        }
    }
}

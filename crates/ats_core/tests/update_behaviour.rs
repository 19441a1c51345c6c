use std::sync::Once;

use ats_core::{
    update, AnalysisResult, AppState, Document, Effect, ExportAction, ExportError, Msg,
    NotificationView, Phase, Severity, EMAIL_FILE_NAME, GENERIC_FAILURE_MESSAGE, NO_FILE_LABEL,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ats_logging::initialize_for_tests);
}

fn pdf(name: &str) -> Document {
    Document::new(name, "application/pdf", b"%PDF-1.7 fake".to_vec())
}

fn select(state: AppState, document: Document) -> AppState {
    let (state, effects) = update(state, Msg::DocumentSelected(Some(document)));
    assert!(effects.is_empty());
    state
}

fn submit(state: AppState, link: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SubmitClicked {
            job_link_text: link.to_string(),
        },
    )
}

fn messages(state: &AppState) -> Vec<(String, Severity)> {
    state
        .view()
        .notifications
        .into_iter()
        .map(|NotificationView { message, severity, .. }| (message, severity))
        .collect()
}

fn request_id_of(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitAnalysis { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("submit effect")
}

#[test]
fn non_pdf_selection_clears_document_and_notifies_once() {
    init_logging();
    let state = select(AppState::new(), pdf("resume.pdf"));
    assert_eq!(state.view().file_label, "resume.pdf");

    for media_type in ["text/plain", "image/png", "application/msword", ""] {
        let doc = Document::new("resume.docx", media_type, b"data".to_vec());
        let (mut next, effects) = update(state.clone(), Msg::DocumentSelected(Some(doc)));

        assert!(effects.is_empty());
        assert!(next.session().selected_document().is_none());
        assert_eq!(next.view().file_label, NO_FILE_LABEL);
        assert_eq!(
            messages(&next),
            vec![("Please upload a PDF file".to_string(), Severity::Error)]
        );
        assert!(next.consume_dirty());
    }
}

#[test]
fn clearing_the_picker_resets_label_without_notification() {
    init_logging();
    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, _) = update(state, Msg::DocumentSelected(None));

    assert!(state.session().selected_document().is_none());
    assert_eq!(state.view().file_label, NO_FILE_LABEL);
    assert!(messages(&state).is_empty());
}

#[test]
fn submit_validation_failures_notify_and_stay_idle() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://example.com/job");
    assert!(effects.is_empty());
    assert_eq!(state.session().phase(), Phase::Idle);
    assert_eq!(
        messages(&state),
        vec![("Please upload a resume PDF".to_string(), Severity::Error)]
    );

    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, effects) = submit(state, "   ");
    assert!(effects.is_empty());
    assert_eq!(
        messages(&state),
        vec![("Please enter a job link".to_string(), Severity::Error)]
    );
}

#[test]
fn malformed_links_never_reach_the_client() {
    init_logging();
    let base = select(AppState::new(), pdf("cv.pdf"));
    for link in ["not a url", "example.com/careers", "http://", "jobs/42", "mailto:hr@x.io"] {
        let (state, effects) = submit(base.clone(), link);
        assert!(effects.is_empty(), "{link} produced effects");
        assert_eq!(state.session().phase(), Phase::Idle);
        assert!(!state.view().loading_visible);
        assert_eq!(
            messages(&state),
            vec![("Please enter a valid URL".to_string(), Severity::Error)]
        );
    }
}

#[test]
fn valid_submit_goes_pending_with_one_request() {
    init_logging();
    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, effects) = submit(state, "  https://jobs.example.com/42 ");

    assert_eq!(
        effects,
        vec![Effect::SubmitAnalysis {
            request_id: 1,
            document: pdf("cv.pdf"),
            job_link: "https://jobs.example.com/42".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Pending);
    assert!(view.loading_visible);
    assert!(!view.results_visible);
    assert!(state.session().last_result().is_none());
}

#[test]
fn success_renders_surfaces_and_reveals_results() {
    init_logging();
    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, effects) = submit(state, "https://example.com/job");
    let request_id = request_id_of(&effects);

    let (state, effects) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id,
            result: AnalysisResult::new("<p>ok</p>", "Hello"),
        },
    );

    assert_eq!(effects, vec![Effect::RevealResults]);
    let view = state.view();
    assert_eq!(view.phase, Phase::Succeeded);
    assert_eq!(view.report_markup, "<p>ok</p>");
    assert_eq!(view.email_text, "Hello");
    assert!(!view.loading_visible);
    assert!(view.results_visible);
    assert_eq!(
        state.session().last_result(),
        Some(&AnalysisResult::new("<p>ok</p>", "Hello"))
    );
}

#[test]
fn service_detail_becomes_the_error_message() {
    init_logging();
    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, effects) = submit(state, "https://example.com/job");
    let request_id = request_id_of(&effects);

    let (state, effects) = update(
        state,
        Msg::AnalysisFailed {
            request_id,
            message: Some("quota exceeded".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.session().phase(), Phase::Failed);
    assert!(state.session().last_result().is_none());
    assert!(!state.view().loading_visible);
    assert_eq!(
        messages(&state),
        vec![("quota exceeded".to_string(), Severity::Error)]
    );
}

#[test]
fn failure_without_message_uses_generic_text() {
    init_logging();
    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, effects) = submit(state, "https://example.com/job");
    let (state, _) = update(
        state,
        Msg::AnalysisFailed {
            request_id: request_id_of(&effects),
            message: None,
        },
    );

    assert_eq!(
        messages(&state),
        vec![(GENERIC_FAILURE_MESSAGE.to_string(), Severity::Error)]
    );
}

#[test]
fn overlapping_submits_each_issue_a_request() {
    init_logging();
    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, first) = submit(state, "https://example.com/a");
    let (state, second) = submit(state, "https://example.com/b");
    let (first, second) = (request_id_of(&first), request_id_of(&second));
    assert_ne!(first, second);
    assert_eq!(state.in_flight(), 2);

    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: first,
            result: AnalysisResult::new("<p>a</p>", "A"),
        },
    );
    // One request still outstanding.
    assert!(state.view().loading_visible);

    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: second,
            result: AnalysisResult::new("<p>b</p>", "B"),
        },
    );
    let view = state.view();
    assert!(!view.loading_visible);
    assert_eq!(view.email_text, "B");
}

#[test]
fn completion_for_unknown_request_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::AnalysisFailed {
            request_id: 99,
            message: Some("late".to_string()),
        },
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn new_selection_after_success_returns_to_idle() {
    init_logging();
    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, effects) = submit(state, "https://example.com/job");
    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: request_id_of(&effects),
            result: AnalysisResult::new("<p>ok</p>", "Hello"),
        },
    );
    let state = select(state, pdf("other.pdf"));

    assert_eq!(state.session().phase(), Phase::Idle);
    assert!(state.session().last_result().is_none());
    // Surfaces keep showing the previous draft.
    assert_eq!(state.view().email_text, "Hello");
}

#[test]
fn copy_with_empty_surface_notifies_without_effect() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CopyClicked);
    assert!(effects.is_empty());
    assert_eq!(
        messages(&state),
        vec![("No email content to copy".to_string(), Severity::Error)]
    );

    let (state, effects) = update(AppState::new(), Msg::DownloadClicked);
    assert!(effects.is_empty());
    assert_eq!(
        messages(&state),
        vec![("No email content to download".to_string(), Severity::Error)]
    );
}

#[test]
fn export_actions_read_the_email_surface() {
    init_logging();
    let state = select(AppState::new(), pdf("cv.pdf"));
    let (state, effects) = submit(state, "https://example.com/job");
    let (state, _) = update(
        state,
        Msg::AnalysisSucceeded {
            request_id: request_id_of(&effects),
            result: AnalysisResult::new("<h1>Match</h1>", "Dear hiring manager,"),
        },
    );

    let (state, effects) = update(state, Msg::CopyClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "Dear hiring manager,".to_string()
        }]
    );
    let (_, effects) = update(state, Msg::DownloadClicked);
    assert_eq!(
        effects,
        vec![Effect::SaveEmail {
            text: "Dear hiring manager,".to_string(),
            file_name: EMAIL_FILE_NAME.to_string(),
        }]
    );
}

#[test]
fn export_outcomes_are_reported() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::ExportFinished {
            action: ExportAction::Copy,
            outcome: Ok(()),
        },
    );
    let (state, _) = update(
        state,
        Msg::ExportFinished {
            action: ExportAction::Copy,
            outcome: Err(ExportError::ClipboardUnavailable("no display".to_string())),
        },
    );
    let (state, _) = update(
        state,
        Msg::ExportFinished {
            action: ExportAction::Download,
            outcome: Ok(()),
        },
    );

    assert_eq!(
        messages(&state),
        vec![
            ("Email copied to clipboard!".to_string(), Severity::Success),
            ("Failed to copy email".to_string(), Severity::Error),
            ("Email downloaded successfully".to_string(), Severity::Success),
        ]
    );
}

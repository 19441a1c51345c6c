//! Stand-ins for the network client and the clipboard.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};

use ats_engine::{
    AnalysisClient, AnalysisError, AnalysisHandle, AnalysisReport, AnalysisRequest,
    ClipboardError, ClipboardWriter, EmailExporter,
};

use crate::app::AppEvent;
use crate::effects::{EffectRunner, MsgSink};

/// Answers every request with a fixed report, or a service error when the
/// job link mentions "quota".
#[derive(Default)]
pub struct CountingClient {
    calls: AtomicUsize,
}

impl CountingClient {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AnalysisClient for CountingClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.job_link.contains("quota") {
            return Err(AnalysisError::Service("quota exceeded".to_string()));
        }
        Ok(AnalysisReport {
            html_content: "<p>ok</p>".to_string(),
            email_content: "Hello".to_string(),
        })
    }
}

pub struct RecordingClipboard {
    pub written: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub runner: EffectRunner,
    pub client: Arc<CountingClient>,
    pub events: mpsc::Receiver<AppEvent>,
    pub copied: Arc<Mutex<Vec<String>>>,
    pub output: tempfile::TempDir,
}

pub fn harness(clipboard_fails: bool) -> Harness {
    let (tx, events) = mpsc::channel();
    let client = Arc::new(CountingClient::default());
    let analysis = AnalysisHandle::with_client(client.clone(), Arc::new(MsgSink::new(tx))).unwrap();
    let copied = Arc::new(Mutex::new(Vec::new()));
    let output = tempfile::TempDir::new().unwrap();
    let runner = EffectRunner::with_parts(
        analysis,
        Box::new(RecordingClipboard {
            written: copied.clone(),
            fail: clipboard_fails,
        }),
        EmailExporter::new(output.path().to_path_buf()),
    );
    Harness {
        runner,
        client,
        events,
        copied,
        output,
    }
}

use std::sync::{mpsc, Arc};
use std::thread;

use ats_logging::{ats_debug, ats_error};
use thiserror::Error;

use crate::client::{AnalysisClient, ClientSettings, ReqwestAnalysisClient};
use crate::{AnalysisError, AnalysisEvent, AnalysisRequest};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start analysis runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Client(#[from] AnalysisError),
    #[error("the analysis runner has stopped")]
    RunnerStopped,
}

/// Receives completion events from the background runner.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AnalysisEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<AnalysisEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<AnalysisEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: AnalysisEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Submit(AnalysisRequest),
}

/// Runs analysis requests on a background runtime. Every submitted request
/// runs as its own task, so overlapping submissions proceed concurrently and
/// none cancels another.
pub struct AnalysisHandle {
    /// `None` once shut down.
    cmd_tx: Option<mpsc::Sender<EngineCommand>>,
}

impl AnalysisHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client = ReqwestAnalysisClient::new(settings)?;
        Self::with_client(Arc::new(client), sink)
    }

    pub fn with_client(
        client: Arc<dyn AnalysisClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, sink.as_ref()).await;
                });
            }
            ats_debug!("analysis command channel closed");
        });

        Ok(Self {
            cmd_tx: Some(cmd_tx),
        })
    }

    /// Hands the request to the runner. Fails when the runner is gone, in
    /// which case no completion event will ever arrive for it.
    pub fn submit(&self, request: AnalysisRequest) -> Result<(), EngineError> {
        let request_id = request.request_id;
        let sent = match &self.cmd_tx {
            Some(cmd_tx) => cmd_tx.send(EngineCommand::Submit(request)).is_ok(),
            None => false,
        };
        if !sent {
            ats_error!("analysis runner is gone; request_id={} dropped", request_id);
            return Err(EngineError::RunnerStopped);
        }
        Ok(())
    }

    /// Stops accepting requests and lets the runner thread wind down.
    /// Requests still in flight are abandoned.
    pub fn shutdown(&mut self) {
        if self.cmd_tx.take().is_some() {
            ats_debug!("analysis runner shutting down");
        }
    }
}

async fn handle_command(client: &dyn AnalysisClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Submit(request) => {
            let result = client.analyze(&request).await;
            sink.emit(AnalysisEvent::Completed {
                request_id: request.request_id,
                result,
            });
        }
    }
}

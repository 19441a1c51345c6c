use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use ats_core::{update, AppState, Effect, Msg, NotificationStage};
use ats_engine::Html2MdConverter;
use ats_logging::{ats_debug, ats_info, ats_trace, ats_warn};

use crate::commands::{load_document, parse_command, Command};
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::ui::render::TerminalRenderer;

/// Drives notification timers.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything that can wake the main loop.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Command(Command),
    InvalidInput(String),
    InputClosed,
}

/// Work requested on the command line.
#[derive(Debug, Default)]
pub struct Startup {
    pub commands: Vec<Command>,
    /// Dispatched once, when the first results are revealed.
    pub after_results: Vec<Msg>,
}

pub fn run_app(config: AppConfig, startup: Startup) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner =
        EffectRunner::new(&config, event_tx.clone()).context("starting the analysis engine")?;
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let renderer = TerminalRenderer::new(stdout, Box::new(Html2MdConverter), color);
    let state = AppState::with_timings(config.notification_timings());
    let mut app = App::new(state, runner, renderer, startup.after_results);
    ats_info!(
        "ats-client started: api_url={} output_dir={:?}",
        config.api_url,
        config.output_dir
    );

    spawn_ticker(event_tx.clone());
    spawn_input_reader(event_tx);

    report(app.renderer.help());
    for command in startup.commands {
        app.handle_command(command);
    }
    report(app.renderer.prompt());

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Msg(msg) => app.dispatch(msg),
            AppEvent::Command(command) => {
                app.handle_command(command);
                if !app.quit_requested {
                    report(app.renderer.prompt());
                }
            }
            AppEvent::InvalidInput(text) => {
                report(app.renderer.line(&text));
                report(app.renderer.prompt());
            }
            AppEvent::InputClosed => app.input_closed = true,
        }
        if app.quit_requested || (app.input_closed && app.is_settled()) {
            break;
        }
    }

    app.runner.shutdown();
    ats_info!("ats-client exiting");
    Ok(())
}

struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    renderer: TerminalRenderer<W>,
    after_results: Vec<Msg>,
    input_closed: bool,
    quit_requested: bool,
}

impl<W: Write> App<W> {
    fn new(
        state: AppState,
        runner: EffectRunner,
        renderer: TerminalRenderer<W>,
        after_results: Vec<Msg>,
    ) -> Self {
        Self {
            state,
            runner,
            renderer,
            after_results,
            input_closed: false,
            quit_requested: false,
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Open(path) => match load_document(&path) {
                Ok(document) => self.dispatch(Msg::DocumentSelected(Some(document))),
                Err(err) => {
                    ats_warn!("Could not read {:?}: {}", path, err);
                    let text = format!("Could not read {}: {}", path.display(), err);
                    report(self.renderer.line(&text));
                }
            },
            Command::ClearSelection => self.dispatch(Msg::DocumentSelected(None)),
            Command::Analyze(job_link_text) => self.dispatch(Msg::SubmitClicked { job_link_text }),
            Command::Copy => self.dispatch(Msg::CopyClicked),
            Command::Save => self.dispatch(Msg::DownloadClicked),
            Command::Show => {
                let view = self.state.view();
                report(self.renderer.show(&view));
            }
            Command::Help => report(self.renderer.help()),
            Command::Quit => self.quit_requested = true,
        }
    }

    /// Applies a message, repaints if needed, and runs the resulting effects.
    /// Follow-up messages from synchronous effects are processed in order.
    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            if matches!(msg, Msg::Tick { .. }) {
                ats_trace!("dispatch Tick");
            } else {
                ats_debug!("dispatch {}", msg_label(&msg));
            }
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            let was_dirty = state.consume_dirty();
            self.state = state;
            if was_dirty {
                let view = self.state.view();
                report(self.renderer.render(&view));
            }

            for effect in effects {
                match effect {
                    Effect::RevealResults => {
                        let view = self.state.view();
                        report(self.renderer.reveal_results(&view));
                        inbox.extend(std::mem::take(&mut self.after_results));
                    }
                    other => inbox.extend(self.runner.run(other)),
                }
            }
        }
    }

    /// Nothing in flight and no notification still waiting to appear.
    fn is_settled(&self) -> bool {
        self.state.in_flight() == 0
            && self
                .state
                .view()
                .notifications
                .iter()
                .all(|n| n.stage != NotificationStage::Entering)
    }
}

fn report(result: io::Result<()>) {
    if let Err(err) = result {
        ats_warn!("Terminal write failed: {}", err);
    }
}

fn msg_label(msg: &Msg) -> &'static str {
    match msg {
        Msg::DocumentSelected(Some(_)) => "DocumentSelected",
        Msg::DocumentSelected(None) => "DocumentCleared",
        Msg::SubmitClicked { .. } => "SubmitClicked",
        Msg::AnalysisSucceeded { .. } => "AnalysisSucceeded",
        Msg::AnalysisFailed { .. } => "AnalysisFailed",
        Msg::CopyClicked => "CopyClicked",
        Msg::DownloadClicked => "DownloadClicked",
        Msg::ExportFinished { .. } => "ExportFinished",
        Msg::Tick { .. } => "Tick",
        Msg::NoOp => "NoOp",
    }
}

fn spawn_ticker(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let mut last = Instant::now();
        loop {
            thread::sleep(TICK_INTERVAL);
            let now = Instant::now();
            let elapsed = now.duration_since(last);
            last = now;
            if tx.send(AppEvent::Msg(Msg::Tick { elapsed })).is_err() {
                break;
            }
        }
    });
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(line) => match parse_command(&line) {
                    Ok(Some(command)) => AppEvent::Command(command),
                    Ok(None) => continue,
                    Err(err) => AppEvent::InvalidInput(err.to_string()),
                },
                Err(err) => {
                    ats_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::{Arc, Mutex};

    use ats_core::{Document, Phase, EMAIL_FILE_NAME};
    use ats_engine::EngineError;

    use super::*;
    use crate::test_support::{harness, CountingClient, Harness};
    use crate::ui::constants::REPORT_HEADING;

    struct Fixture {
        app: App<Vec<u8>>,
        events: mpsc::Receiver<AppEvent>,
        client: Arc<CountingClient>,
        copied: Arc<Mutex<Vec<String>>>,
        output: tempfile::TempDir,
    }

    fn fixture(after_results: Vec<Msg>) -> Fixture {
        let Harness {
            runner,
            client,
            events,
            copied,
            output,
        } = harness(false);
        let renderer = TerminalRenderer::new(Vec::new(), Box::new(Html2MdConverter), false);
        Fixture {
            app: App::new(AppState::new(), runner, renderer, after_results),
            events,
            client,
            copied,
            output,
        }
    }

    impl Fixture {
        fn select_resume(&mut self) {
            self.app.dispatch(Msg::DocumentSelected(Some(Document::new(
                "cv.pdf",
                "application/pdf",
                b"%PDF".to_vec(),
            ))));
        }

        fn analyze(&mut self, link: &str) {
            self.app.handle_command(Command::Analyze(link.to_string()));
        }

        /// Waits for the next engine completion and dispatches it.
        fn deliver_completion(&mut self) {
            match self
                .events
                .recv_timeout(Duration::from_secs(5))
                .expect("completion")
            {
                AppEvent::Msg(msg) => self.app.dispatch(msg),
                other => panic!("unexpected event {other:?}"),
            }
        }

        fn messages(&self) -> Vec<String> {
            self.app
                .state
                .view()
                .notifications
                .into_iter()
                .map(|n| n.message)
                .collect()
        }
    }

    #[test]
    fn first_results_run_startup_exports_once_in_order() {
        let mut f = fixture(vec![Msg::CopyClicked, Msg::DownloadClicked]);
        f.select_resume();
        f.analyze("https://example.com/job");
        assert_eq!(f.app.state.in_flight(), 1);
        assert!(f.copied.lock().unwrap().is_empty());

        f.deliver_completion();
        assert_eq!(*f.copied.lock().unwrap(), vec!["Hello".to_string()]);
        assert_eq!(
            fs::read_to_string(f.output.path().join(EMAIL_FILE_NAME)).unwrap(),
            "Hello"
        );
        assert_eq!(
            f.messages(),
            vec!["Email copied to clipboard!", "Email downloaded successfully"]
        );

        // Later results leave the startup exports alone.
        f.analyze("https://example.com/other");
        f.deliver_completion();
        assert_eq!(f.client.calls(), 2);
        assert_eq!(f.copied.lock().unwrap().len(), 1);

        let text = String::from_utf8(f.app.renderer.into_inner()).unwrap();
        assert_eq!(text.matches(REPORT_HEADING).count(), 2);
        assert!(text.contains("Hello"));
    }

    #[test]
    fn settles_once_nothing_is_in_flight_or_entering() {
        let mut f = fixture(Vec::new());
        f.select_resume();
        assert!(f.app.is_settled());

        f.analyze("https://example.com/job");
        assert!(!f.app.is_settled());
        f.deliver_completion();
        assert!(f.app.is_settled());

        f.app.dispatch(Msg::CopyClicked);
        assert_eq!(f.messages(), vec!["Email copied to clipboard!"]);
        assert!(!f.app.is_settled());

        f.app.dispatch(Msg::Tick {
            elapsed: Duration::from_millis(20),
        });
        assert!(f.app.is_settled());
    }

    #[test]
    fn stopped_runner_fails_the_submit_instead_of_hanging() {
        let mut f = fixture(Vec::new());
        f.app.runner.shutdown();
        f.select_resume();
        f.analyze("https://example.com/job");

        let view = f.app.state.view();
        assert_eq!(view.in_flight, 0);
        assert!(!view.loading_visible);
        assert_eq!(view.phase, Phase::Failed);
        assert_eq!(f.messages(), vec![EngineError::RunnerStopped.to_string()]);
        assert_eq!(f.client.calls(), 0);

        f.app.dispatch(Msg::Tick {
            elapsed: Duration::from_millis(20),
        });
        assert!(f.app.is_settled());
    }
}

use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use holocron_core::{update, AppState, LoadPhase, Msg};
use holocron_engine::{EngineError, EngineHandle};
use holocron_logging::{holo_error, holo_info, holo_warn};

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::publish::ResultsPublisher;
use super::ui::input::{self, UiEvent};
use super::ui::render::{TerminalView, HELP_TEXT};

/// How often the loop wakes up without input, to fire debounced searches and
/// pick up engine events.
const TICK: Duration = Duration::from_millis(25);

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli).context("loading configuration")?;
    let settings = config.resolve().context("validating configuration")?;

    holocron_logging::initialize(
        settings.log_destination,
        settings.log_level,
        &settings.log_file,
    );
    holo_info!(
        "Starting holocron: listing={} quiet_window={:?}",
        settings.endpoints.default_listing(),
        settings.quiet_window
    );

    let publisher =
        ResultsPublisher::create(&settings.output_dir).context("preparing output directory")?;
    let engine = EngineHandle::new(settings.fetch.clone()).context("starting fetch engine")?;

    let (ui_tx, ui_rx) = mpsc::channel();
    input::spawn_stdin_reader(ui_tx).context("starting input reader")?;

    let mut session = Session {
        runner: EffectRunner::new(engine),
        view: TerminalView::new(io::stdout(), publisher),
        tick: TICK,
    };
    session.say(HELP_TEXT);

    let state = AppState::with_quiet_window(settings.endpoints, settings.quiet_window);
    let outcome = session.event_loop(state, &ui_rx);
    session.runner.shutdown();
    outcome.context("running session")?;

    holo_info!("Exiting holocron");
    Ok(())
}

struct Session<W: Write> {
    runner: EffectRunner,
    view: TerminalView<W>,
    tick: Duration,
}

impl<W: Write> Session<W> {
    /// Runs until `:quit`, or until input has ended and the last search has
    /// settled. Fails if the fetch engine goes away underneath the session.
    fn event_loop(
        &mut self,
        state: AppState,
        ui_rx: &mpsc::Receiver<(UiEvent, Instant)>,
    ) -> Result<(), EngineError> {
        let mut state = self.dispatch(state, Msg::Started);
        let mut draining = false;

        loop {
            let received = if draining {
                thread::sleep(self.tick);
                Err(RecvTimeoutError::Timeout)
            } else {
                ui_rx.recv_timeout(self.tick)
            };
            match received {
                Ok((UiEvent::Quit, _)) => break,
                Ok((UiEvent::EndOfInput, _)) | Err(RecvTimeoutError::Disconnected) => {
                    draining = true;
                }
                Ok((event, at)) => {
                    if let Some(msg) = self.translate(event, at) {
                        state = self.dispatch(state, msg);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
            }

            state = self.dispatch(state, Msg::Tick { now: Instant::now() });
            loop {
                match self.runner.poll() {
                    Ok(Some(msg)) => state = self.dispatch(state, msg),
                    Ok(None) => break,
                    Err(err) => {
                        holo_error!("Fetch engine is gone: {}", err);
                        if let Some(request_id) = state.in_flight() {
                            let message = err.to_string();
                            self.dispatch(state, Msg::LoadFailed { request_id, message });
                        }
                        return Err(err);
                    }
                }
            }

            // Once input is gone, leave after the last search has settled.
            if draining && state.phase() == LoadPhase::Idle && !state.has_pending_search() {
                break;
            }
        }
        Ok(())
    }

    fn translate(&mut self, event: UiEvent, at: Instant) -> Option<Msg> {
        match event {
            UiEvent::SearchInput(text) => Some(Msg::InputChanged { text, at }),
            UiEvent::PrevPage => Some(Msg::PrevClicked),
            UiEvent::NextPage => Some(Msg::NextClicked),
            UiEvent::Help => {
                self.say(HELP_TEXT);
                None
            }
            UiEvent::UnknownCommand(command) => {
                self.say(&format!("Unknown command ':{command}'. Type :help."));
                None
            }
            UiEvent::Quit | UiEvent::EndOfInput => None,
        }
    }

    fn dispatch(&mut self, state: AppState, msg: Msg) -> AppState {
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        if state.consume_dirty() {
            self.view.render(&state.view());
        }
        state
    }

    fn say(&mut self, text: &str) {
        if let Err(err) = self.view.write_text(text) {
            holo_warn!("Failed to write to terminal: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;

    use holocron_core::Endpoints;
    use holocron_engine::{FetchError, Fetcher, PeoplePage, PersonRecord};

    use super::*;
    use crate::platform::publish::ResultsPublisher;

    const WAIT: Duration = Duration::from_secs(5);
    const API: &str = "https://swapi.test/api";

    /// Answers searches for "luke" quickly and the plain listing slowly.
    /// Anything on `slow.test` never answers in time.
    struct ScriptedFetcher;

    #[async_trait::async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn fetch_page(&self, url: &str) -> Result<PeoplePage, FetchError> {
            let names: &[&str] = if url.contains("slow.test") {
                tokio::time::sleep(Duration::from_secs(30)).await;
                &[]
            } else if url.contains("search=luke") {
                tokio::time::sleep(Duration::from_millis(10)).await;
                &["Luke Skywalker"]
            } else {
                tokio::time::sleep(Duration::from_millis(200)).await;
                &["Leia Organa", "Han Solo"]
            };
            Ok(PeoplePage {
                results: Some(
                    names
                        .iter()
                        .map(|name| PersonRecord {
                            name: name.to_string(),
                            ..PersonRecord::default()
                        })
                        .collect(),
                ),
                next: None,
                previous: None,
            })
        }
    }

    fn new_session(dir: &std::path::Path) -> (Session<Vec<u8>>, PathBuf) {
        let publisher = ResultsPublisher::create(dir).unwrap();
        let results = publisher.target();
        let engine = EngineHandle::with_fetcher(Arc::new(ScriptedFetcher)).unwrap();
        let session = Session {
            runner: EffectRunner::new(engine),
            view: TerminalView::new(Vec::new(), publisher),
            tick: Duration::from_millis(5),
        };
        (session, results)
    }

    fn new_state(base: &str) -> AppState {
        AppState::with_quiet_window(Endpoints::new(base).unwrap(), Duration::from_millis(20))
    }

    /// Runs the loop on its own thread so a loop that never exits fails the
    /// test instead of hanging it.
    fn run_until_exit(
        mut session: Session<Vec<u8>>,
        state: AppState,
        ui_rx: mpsc::Receiver<(UiEvent, Instant)>,
    ) -> Result<(), EngineError> {
        let (done_tx, done_rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = done_tx.send(session.event_loop(state, &ui_rx));
        });
        done_rx.recv_timeout(WAIT).expect("event loop did not exit")
    }

    #[test]
    fn end_of_input_waits_for_startup_load_then_exits() {
        let temp = tempfile::tempdir().unwrap();
        let (session, results) = new_session(temp.path());
        let (ui_tx, ui_rx) = mpsc::channel();
        ui_tx.send((UiEvent::EndOfInput, Instant::now())).unwrap();

        run_until_exit(session, new_state(API), ui_rx).unwrap();

        let html = fs::read_to_string(results).unwrap();
        assert!(html.contains("Showing 2 characters."));
        assert!(html.contains("Leia Organa"));
        assert!(html.contains("Han Solo"));
    }

    #[test]
    fn end_of_input_waits_for_pending_search() {
        let temp = tempfile::tempdir().unwrap();
        let (session, results) = new_session(temp.path());
        let (ui_tx, ui_rx) = mpsc::channel();
        let typed_at = Instant::now();
        ui_tx
            .send((UiEvent::SearchInput("luke".to_string()), typed_at))
            .unwrap();
        ui_tx.send((UiEvent::EndOfInput, typed_at)).unwrap();
        drop(ui_tx);

        run_until_exit(session, new_state(API), ui_rx).unwrap();

        let html = fs::read_to_string(results).unwrap();
        assert!(html.contains("Showing 1 characters."));
        assert!(html.contains("Luke Skywalker"));
        assert!(html.contains("search=luke"));
    }

    #[test]
    fn quit_exits_without_waiting_for_load() {
        let temp = tempfile::tempdir().unwrap();
        let (session, results) = new_session(temp.path());
        let (ui_tx, ui_rx) = mpsc::channel();
        ui_tx.send((UiEvent::Quit, Instant::now())).unwrap();

        run_until_exit(session, new_state("https://slow.test/api"), ui_rx).unwrap();

        let html = fs::read_to_string(results).unwrap();
        assert!(html.contains("<p class=\"status\">Loading…</p>"));
    }

    #[test]
    fn stopped_engine_fails_the_load_and_ends_the_loop() {
        let temp = tempfile::tempdir().unwrap();
        let (session, results) = new_session(temp.path());
        session.runner.shutdown();
        // Input stays open: only the engine going away may end the loop.
        let (_ui_tx, ui_rx) = mpsc::channel();

        let outcome = run_until_exit(session, new_state(API), ui_rx);

        assert!(matches!(outcome, Err(EngineError::Stopped)));
        let html = fs::read_to_string(results).unwrap();
        assert!(html.contains("Could not load the API."));
        assert!(html.contains("Error loading data (fetch engine stopped)."));
    }
}

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use holocron_logging::{holo_debug, holo_info};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineError, EngineEvent, RequestId};

enum EngineCommand {
    Load { request_id: RequestId, url: String },
    Cancel { request_id: RequestId },
    Shutdown,
}

/// Handle to the fetch thread. At most one load is live at a time: starting a
/// load cancels the previous one.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(settings)?);
        Self::with_fetcher(fetcher)
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("holocron-fetch")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("holocron-engine".to_string())
            .spawn(move || dispatch(runtime, fetcher, cmd_rx, event_tx))?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Load {
            request_id,
            url: url.into(),
        });
    }

    /// Cancels `request_id` if it is still the live load.
    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    /// Cancels the live load and stops the fetch thread. Later loads are dropped
    /// and receiving reports [`EngineError::Stopped`] once pending events drain.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    pub fn try_recv(&self) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(EngineError::Stopped),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Stopped),
        }
    }
}

fn dispatch(
    runtime: Runtime,
    fetcher: Arc<dyn Fetcher>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut live: Option<(RequestId, CancellationToken)> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Load { request_id, url } => {
                if let Some((superseded, token)) = live.take() {
                    holo_debug!("Request {} superseded by {}", superseded, request_id);
                    token.cancel();
                }
                holo_info!("Request {} GET {}", request_id, url);
                let token = CancellationToken::new();
                live = Some((request_id, token.clone()));
                runtime.spawn(run_load(
                    fetcher.clone(),
                    request_id,
                    url,
                    token,
                    event_tx.clone(),
                ));
            }
            EngineCommand::Cancel { request_id } => match live.take() {
                Some((live_id, token)) if live_id == request_id => {
                    holo_debug!("Request {} cancelled", request_id);
                    token.cancel();
                }
                other => live = other,
            },
            EngineCommand::Shutdown => {
                if let Some((live_id, token)) = live.take() {
                    holo_debug!("Request {} cancelled by shutdown", live_id);
                    token.cancel();
                }
                break;
            }
        }
    }
    holo_debug!("Engine stopping; shutting down fetch runtime");
}

async fn run_load(
    fetcher: Arc<dyn Fetcher>,
    request_id: RequestId,
    url: String,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let outcome = token.run_until_cancelled(fetcher.fetch_page(&url)).await;
    let event = match outcome {
        // A response that raced the cancellation is discarded.
        Some(result) if !token.is_cancelled() => EngineEvent::LoadCompleted { request_id, result },
        _ => EngineEvent::LoadCancelled { request_id },
    };
    let _ = event_tx.send(event);
}

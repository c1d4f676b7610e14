use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use userlist_core::{FailureKind, FetchFailure, RequestId};
use userlist_logging::{ul_debug, ul_error};

use crate::repository::UserSource;
use crate::EngineEvent;

enum EngineCommand {
    Fetch { request_id: RequestId },
}

/// Runs fetches on a background runtime and hands completions back to the
/// thread that owns the handle.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    ul_error!("Failed to start engine runtime: {}", err);
                    fail_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(handle_command(source, command, event_tx));
            }
            ul_debug!("Engine command channel closed; shutting down");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until an event arrives or the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    source: Arc<dyn UserSource>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { request_id } => {
            // The source runs in its own task so a panic still yields a completion.
            let task = tokio::spawn(async move { source.get_users().await });
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    ul_error!("Fetch task for request {} failed: {}", request_id, err);
                    Err(lost_task_failure(&err))
                }
            };
            let _ = event_tx.send(EngineEvent::FetchCompleted {
                request_id,
                outcome,
            });
        }
    }
}

fn lost_task_failure(err: &tokio::task::JoinError) -> FetchFailure {
    let reason = if err.is_panic() {
        "the request crashed"
    } else {
        "the request was cancelled"
    };
    FetchFailure::new(
        FailureKind::Network,
        format!("Could not load users: {reason}"),
    )
}

fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Fetch { request_id }) = cmd_rx.recv() {
        let outcome = Err(FetchFailure::new(
            FailureKind::Network,
            format!("engine unavailable: {reason}"),
        ));
        let _ = event_tx.send(EngineEvent::FetchCompleted {
            request_id,
            outcome,
        });
    }
}

//! Handshake backend.
//!
//! Runs on its own thread with a Tokio runtime, like a network backend would.
//! The handshake itself is mocked: it waits for the configured delay and then
//! reports success.

use std::collections::HashMap;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::protocol::{BackendAction, GuiEvent};

/// How often the loop checks for new actions from the UI.
const ACTION_POLL_INTERVAL: Duration = Duration::from_millis(10);

pub fn run_backend(action_rx: Receiver<BackendAction>, event_tx: Sender<GuiEvent>) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Error(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    rt.block_on(backend_loop(action_rx, event_tx));
    tracing::debug!("handshake backend stopped");
}

pub(crate) async fn backend_loop(action_rx: Receiver<BackendAction>, event_tx: Sender<GuiEvent>) {
    let mut pending: HashMap<u64, JoinHandle<()>> = HashMap::new();

    loop {
        // Check for actions from the UI (non-blocking)
        loop {
            match action_rx.try_recv() {
                Ok(BackendAction::BeginHandshake { attempt, delay }) => {
                    tracing::debug!(attempt, ?delay, "starting mock handshake");
                    let handle = tokio::spawn(mock_handshake(attempt, delay, event_tx.clone()));
                    if let Some(previous) = pending.insert(attempt, handle) {
                        previous.abort();
                    }
                }
                Ok(BackendAction::Cancel { attempt }) => {
                    if let Some(handle) = pending.remove(&attempt) {
                        tracing::debug!(attempt, "aborting mock handshake");
                        handle.abort();
                    }
                }
                Ok(BackendAction::Shutdown) | Err(TryRecvError::Disconnected) => {
                    for (_, handle) in pending.drain() {
                        handle.abort();
                    }
                    return;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        pending.retain(|_, handle| !handle.is_finished());
        tokio::time::sleep(ACTION_POLL_INTERVAL).await;
    }
}

/// Stand-in for the wallet handshake: wait `delay`, then report success.
pub async fn mock_handshake(attempt: u64, delay: Duration, event_tx: Sender<GuiEvent>) {
    tokio::time::sleep(delay).await;
    // The UI may already be gone; nothing to report to then.
    let _ = event_tx.send(GuiEvent::HandshakeComplete { attempt });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[tokio::test(start_paused = true)]
    async fn test_mock_handshake_waits_full_delay() {
        let (event_tx, event_rx) = unbounded::<GuiEvent>();
        let delay = Duration::from_millis(5000);
        let handle = tokio::spawn(mock_handshake(7, delay, event_tx));
        // Let the task register its timer before the clock moves.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(4999)).await;
        tokio::task::yield_now().await;
        assert!(event_rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        handle.await.unwrap();
        assert_eq!(
            event_rx.try_recv().unwrap(),
            GuiEvent::HandshakeComplete { attempt: 7 }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_handshake_survives_closed_ui() {
        let (event_tx, event_rx) = unbounded::<GuiEvent>();
        drop(event_rx);
        mock_handshake(1, Duration::from_millis(10), event_tx).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_cancel_suppresses_completion() {
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();
        let backend = tokio::spawn(backend_loop(action_rx, event_tx));

        let delay = Duration::from_millis(500);
        action_tx.send(BackendAction::BeginHandshake { attempt: 1, delay }).unwrap();
        action_tx.send(BackendAction::BeginHandshake { attempt: 2, delay }).unwrap();
        action_tx.send(BackendAction::Cancel { attempt: 1 }).unwrap();

        tokio::time::sleep(Duration::from_secs(2)).await;
        let events: Vec<_> = event_rx.try_iter().collect();
        assert_eq!(events, vec![GuiEvent::HandshakeComplete { attempt: 2 }]);

        action_tx.send(BackendAction::Shutdown).unwrap();
        backend.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_exits_when_ui_disconnects() {
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();
        let backend = tokio::spawn(backend_loop(action_rx, event_tx));

        action_tx
            .send(BackendAction::BeginHandshake {
                attempt: 1,
                delay: Duration::from_secs(60),
            })
            .unwrap();
        drop(action_tx);
        backend.await.unwrap();

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(event_rx.try_recv().is_err());
    }
}

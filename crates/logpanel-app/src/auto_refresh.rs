//! Auto-refresh scheduler
//!
//! A background task that feeds [`Message::AutoRefreshTick`] into the
//! controller's message channel: once immediately, then every
//! [`AUTO_REFRESH_INTERVAL`]. The task never touches panel state itself.
//!
//! Cancellation goes through a `watch::channel(false)` stop signal. It is
//! observed before every tick and while waiting, so a reload that is already
//! being processed finishes but no new one is requested.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::message::Message;

/// Time between automatic reloads
pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// A running auto-refresh task
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct AutoRefreshHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl AutoRefreshHandle {
    /// Spawn the task on the current tokio runtime
    ///
    /// Must be called from within a runtime context.
    pub fn spawn(msg_tx: mpsc::Sender<Message>) -> Self {
        Self::spawn_with_interval(msg_tx, AUTO_REFRESH_INTERVAL)
    }

    pub(crate) fn spawn_with_interval(msg_tx: mpsc::Sender<Message>, period: Duration) -> Self {
        // Create the stop channel outside the task so a cancel issued before
        // the task first runs is still observed.
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run_ticks(msg_tx, stop_rx, period));
        debug!("Auto-refresh started ({:?} interval)", period);
        Self {
            stop_tx,
            task: Some(task),
        }
    }

    /// Signal the task to stop at its next wait boundary
    pub fn cancel(&self) {
        // Err means the task already exited
        let _ = self.stop_tx.send(true);
    }

    /// Whether the task is still running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel and wait for the task to exit
    pub async fn shutdown(mut self) {
        self.cancel();
        let Some(task) = self.task.take() else {
            return;
        };
        if let Err(e) = task.await {
            if e.is_panic() {
                tracing::error!("Auto-refresh task panicked: {}", e);
            }
        }
    }
}

impl Drop for AutoRefreshHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_ticks(
    msg_tx: mpsc::Sender<Message>,
    mut stop_rx: watch::Receiver<bool>,
    period: Duration,
) {
    // First tick completes immediately
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = stop_rx.changed() => {
                // Err: every handle is gone
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
                continue;
            }
        }

        if *stop_rx.borrow() {
            break;
        }

        trace!("Auto-refresh tick");
        if msg_tx.send(Message::AutoRefreshTick).await.is_err() {
            debug!("Message channel closed, stopping auto-refresh");
            return;
        }
    }
    debug!("Auto-refresh stopped");
}

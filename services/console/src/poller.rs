//! Cancellable polling scheduler

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::controller::Controller;

/// Owns the recurring log refresh.
///
/// The first refresh happens immediately; each following cycle starts one
/// interval after the previous cycle finished, so cycles never overlap and at
/// least one interval elapses between cycle starts.
pub struct Poller {
    controller: Arc<Controller>,
    interval: Duration,
    cancel: CancellationToken,
}

impl Poller {
    pub fn new(controller: Arc<Controller>, interval: Duration, cancel: CancellationToken) -> Self {
        Self {
            controller,
            interval,
            cancel,
        }
    }

    /// Run the polling loop. Returns when the cancellation token fires.
    pub async fn run(&self) {
        loop {
            self.controller.refresh_logs().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }
}

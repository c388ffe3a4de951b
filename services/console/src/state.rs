//! Shared state for indicator statuses

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::subsystem::{IndicatorState, Subsystem};

/// Status of a single indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorStatus {
    pub subsystem: Subsystem,
    pub state: IndicatorState,
    pub last_change_epoch_ms: Option<u64>,
}

/// Shared state accessible by the controller and the CLI
#[derive(Debug)]
pub struct SystemStatus {
    pub indicators: Vec<IndicatorStatus>,
    pub last_command_epoch_ms: Option<u64>,
    pub started_at: Instant,
}

impl SystemStatus {
    pub fn new() -> Self {
        let indicators = Subsystem::ALL
            .into_iter()
            .map(|subsystem| IndicatorStatus {
                subsystem,
                state: IndicatorState::Unknown,
                last_change_epoch_ms: None,
            })
            .collect();

        Self {
            indicators,
            last_command_epoch_ms: None,
            started_at: Instant::now(),
        }
    }

    /// Apply the result of a successful control command to all indicators.
    ///
    /// This is the only mutation path; indicators never change on a failed
    /// or error-carrying command.
    pub fn apply_command(&mut self, running: bool, now_ms: u64) {
        let state = if running {
            IndicatorState::On
        } else {
            IndicatorState::Off
        };
        for indicator in &mut self.indicators {
            if indicator.state != state {
                indicator.last_change_epoch_ms = Some(now_ms);
            }
            indicator.state = state;
        }
        self.last_command_epoch_ms = Some(now_ms);
    }

    /// Get an indicator's current state
    pub fn get(&self, subsystem: Subsystem) -> IndicatorState {
        self.indicators
            .iter()
            .find(|i| i.subsystem == subsystem)
            .map(|i| i.state)
            .unwrap_or(IndicatorState::Unknown)
    }
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared state handle
pub type StatusHandle = Arc<RwLock<SystemStatus>>;

pub fn new_status_handle() -> StatusHandle {
    Arc::new(RwLock::new(SystemStatus::new()))
}

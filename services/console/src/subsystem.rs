//! Subsystem identifiers and indicator states

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three monitored subsystems of the detection backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Suricata,
    Ann,
    Hybrid,
}

impl Subsystem {
    /// All subsystems, in display order
    pub const ALL: [Subsystem; 3] = [Subsystem::Suricata, Subsystem::Ann, Subsystem::Hybrid];

    /// Path of this subsystem's log stream endpoint
    pub fn stream_path(&self) -> &'static str {
        match self {
            Subsystem::Suricata => "/stream_suricata",
            Subsystem::Ann => "/stream_ann",
            Subsystem::Hybrid => "/stream_hybrid",
        }
    }

    /// Fixed heading shown above this subsystem's log panel
    pub fn panel_heading(&self) -> &'static str {
        match self {
            Subsystem::Suricata => "📡 Suricata IDS",
            Subsystem::Ann => "🔍 ANN Predictions",
            Subsystem::Hybrid => "🛡 Hybrid Engine",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subsystem::Suricata => write!(f, "suricata"),
            Subsystem::Ann => write!(f, "ann"),
            Subsystem::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// The state of a status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorState {
    On,
    Off,
    Unknown,
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorState::On => write!(f, "on"),
            IndicatorState::Off => write!(f, "off"),
            IndicatorState::Unknown => write!(f, "unknown"),
        }
    }
}

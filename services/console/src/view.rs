//! View port for indicators, panels, and alerts

use crate::subsystem::Subsystem;

/// Rendering surface injected into the controller.
///
/// Implementations own the presentation; the controller only reports
/// indicator flips, panel snapshots, and alerts. `render_panel` replaces the
/// panel's whole content with the given batch of lines.
#[cfg_attr(test, mockall::automock)]
pub trait View: Send + Sync {
    /// Set a subsystem's status light
    fn set_indicator(&self, subsystem: Subsystem, running: bool);

    /// Replace a subsystem's panel content with a new batch of lines
    fn render_panel(&self, subsystem: Subsystem, lines: &[String]);

    /// Surface an error message to the user
    fn alert(&self, message: &str);
}

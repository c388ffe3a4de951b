//! Terminal rendering of the dashboard

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

use crate::subsystem::{IndicatorState, Subsystem};
use crate::view::View;

const CLEAR: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";

struct Screen<W> {
    out: W,
    lights: Vec<(Subsystem, IndicatorState)>,
    panels: Vec<(Subsystem, Vec<String>)>,
    alert: Option<String>,
}

/// Renders the dashboard to a terminal.
///
/// Keeps a snapshot of every light and panel and redraws the whole screen on
/// each change; the internal lock serializes concurrent renders, so the last
/// write for a region wins.
pub struct TerminalView<W: Write + Send> {
    screen: Mutex<Screen<W>>,
    color: bool,
    clear_screen: bool,
}

impl TerminalView<io::Stdout> {
    /// Terminal view writing to stdout
    pub fn stdout(color: bool, clear_screen: bool) -> Self {
        Self::new(io::stdout(), color, clear_screen)
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, color: bool, clear_screen: bool) -> Self {
        Self {
            screen: Mutex::new(Screen {
                out,
                lights: Subsystem::ALL
                    .iter()
                    .map(|s| (*s, IndicatorState::Unknown))
                    .collect(),
                panels: Subsystem::ALL.iter().map(|s| (*s, Vec::new())).collect(),
                alert: None,
            }),
            color,
            clear_screen,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Screen<W>> {
        self.screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn redraw(&self, screen: &mut Screen<W>) -> io::Result<()> {
        let lights = &screen.lights;
        let panels = &screen.panels;
        let alert = &screen.alert;
        let out = &mut screen.out;

        if self.clear_screen {
            write!(out, "{}", CLEAR)?;
        }
        writeln!(out, "{}", self.paint("NetWatch Console", BOLD))?;
        for (subsystem, state) in lights {
            let code = match state {
                IndicatorState::On => GREEN,
                IndicatorState::Off => RED,
                IndicatorState::Unknown => DIM,
            };
            writeln!(out, " {} {:<8} {}", self.paint("●", code), subsystem, state)?;
        }
        for (subsystem, lines) in panels {
            writeln!(out)?;
            writeln!(out, "{}", self.paint(subsystem.panel_heading(), BOLD))?;
            for line in lines {
                writeln!(out, "  {}", line)?;
            }
        }
        if let Some(message) = alert {
            writeln!(out)?;
            writeln!(out, "{}", self.paint(&format!("ALERT: {}", message), RED))?;
        }
        out.flush()
    }

    fn apply(&self, mutate: impl FnOnce(&mut Screen<W>)) {
        let mut screen = self.lock();
        mutate(&mut screen);
        if let Err(e) = self.redraw(&mut screen) {
            tracing::debug!("Terminal redraw failed: {}", e);
        }
    }

    #[cfg(test)]
    fn into_writer(self) -> W {
        self.screen
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .out
    }
}

impl<W: Write + Send> View for TerminalView<W> {
    fn set_indicator(&self, subsystem: Subsystem, running: bool) {
        let state = if running {
            IndicatorState::On
        } else {
            IndicatorState::Off
        };
        self.apply(|screen| {
            if let Some(light) = screen.lights.iter_mut().find(|(s, _)| *s == subsystem) {
                light.1 = state;
            }
        });
    }

    fn render_panel(&self, subsystem: Subsystem, lines: &[String]) {
        self.apply(|screen| {
            if let Some(panel) = screen.panels.iter_mut().find(|(s, _)| *s == subsystem) {
                panel.1 = lines.to_vec();
            }
        });
    }

    fn alert(&self, message: &str) {
        self.apply(|screen| {
            screen.alert = Some(message.to_string());
        });
    }
}

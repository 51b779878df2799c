//! TUI message types (Elm Messages).

use std::time::Duration;

use crate::keymap::KeyAction;

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiMessage {
    /// Wall-clock time passed; advances every component's timers.
    Tick(Duration),
    /// Activity log line.
    Log(String),
    /// Key press forwarded from the event loop.
    KeyPress(KeyAction),
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Error line, shown in the log and kept for the error count.
    Error(String),
    /// Quit the application.
    Quit,
}

//! # trafficdeck-tui
//!
//! Interactive TrafficDeck dashboard using ratatui with Elm architecture.

pub mod bridge;
pub mod cards;
pub mod chart;
pub mod footer;
pub mod form;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod metrics;
pub mod model;
pub mod styles;
pub mod tabs;

pub use bridge::LogBridge;
pub use keymap::{InputMode, KeyAction};
pub use logs::ActivityLog;
pub use messages::TuiMessage;
pub use model::TuiApp;

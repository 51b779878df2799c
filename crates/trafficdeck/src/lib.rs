//! TrafficDeck library: configuration, dispatch and exit-code mapping for
//! the `trafficdeck` binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod logging;

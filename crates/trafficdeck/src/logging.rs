//! Tracing subscriber setup.

use crossbeam_channel::Sender;
use tracing_subscriber::EnvFilter;

use trafficdeck_tui::{LogBridge, TuiMessage};

/// `RUST_LOG` filter with a floor of WARN, or DEBUG when verbose.
fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    EnvFilter::from_default_env().add_directive(level.into())
}

/// Log to stderr.
pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log into the TUI activity panel; stderr is unusable in raw mode.
pub fn init_tui(tx: Sender<TuiMessage>, verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(LogBridge::new(tx))
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
}

//! Default timings, ranges and exit codes.

use std::time::Duration;

/// Fraction of the 0-100 viewport height a value of 1.0 spans.
pub const DEFAULT_VIEWPORT_HEIGHT_FRACTION: f64 = 0.8;

/// Delay (seconds) before the first data point is revealed.
pub const DEFAULT_REVEAL_BASE: f64 = 1.0;

/// Additional delay (seconds) between consecutive data points.
pub const DEFAULT_REVEAL_STEP: f64 = 0.1;

/// Width and height of the normalized chart coordinate space.
pub const VIEWPORT_EXTENT: f64 = 100.0;

/// Interval between live-counter ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Exclusive upper bound of a single live-counter increment.
pub const DEFAULT_TICK_BOUND: u64 = 50;

/// Live counter value shown before the first tick.
pub const INITIAL_LIVE_COUNTER: u64 = 1247;

/// Simulated latency of the reference submission call.
pub const DEFAULT_SUBMIT_LATENCY: Duration = Duration::from_secs(3);

/// Time the success banner stays up before the form resets.
pub const DEFAULT_RESET_AFTER: Duration = Duration::from_secs(3);

/// Seconds between consecutive case cards appearing.
pub const CARD_STAGGER: f64 = 0.2;

/// Seconds before the first metric value appears on a card.
pub const METRIC_REVEAL_BASE: f64 = 0.3;

/// Seconds between consecutive metric values appearing.
pub const METRIC_REVEAL_STEP: f64 = 0.1;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Rejected input (empty series, unknown category).
    pub const ERROR_INPUT: i32 = 2;
    /// The submission was rejected or failed.
    pub const ERROR_SUBMISSION: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Interrupted by the user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}

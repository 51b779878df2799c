//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use trafficdeck_core::constants::DEFAULT_VIEWPORT_HEIGHT_FRACTION;
use trafficdeck_core::ApplicationFields;

/// TrafficDeck: affiliate traffic performance dashboard.
///
/// Without a mode flag the case-study catalog is printed.
#[derive(Parser, Debug)]
#[command(name = "trafficdeck", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Launch the interactive dashboard.
    #[arg(long)]
    pub tui: bool,

    /// Synthesize and print the chart curve of a comma-separated series.
    #[arg(
        long,
        value_delimiter = ',',
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub series: Vec<f64>,

    /// Print the curve or catalog as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the case-study catalog with formatted metrics (the default).
    #[arg(long, conflicts_with_all = ["tui", "series", "apply", "completion"])]
    pub list: bool,

    /// Category to list, or the first tab shown in the dashboard.
    #[arg(long, env = "TRAFFICDECK_CATEGORY")]
    pub category: Option<String>,

    /// JSON catalog to use instead of the built-in one.
    #[arg(long, env = "TRAFFICDECK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Submit an application non-interactively.
    #[arg(long)]
    pub apply: bool,

    /// Applicant name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Telegram handle.
    #[arg(long, default_value = "")]
    pub contact: String,

    /// Traffic experience.
    #[arg(long, default_value = "")]
    pub experience: String,

    /// Area of interest: gambling, nutra, crypto, dating, sweepstakes or other.
    #[arg(long, default_value = "")]
    pub interest: String,

    /// Reject every submission with this reason.
    #[arg(long, env = "TRAFFICDECK_FAIL_SUBMISSIONS")]
    pub fail_submissions: Option<String>,

    /// Interval between live-counter ticks (e.g. "2s", "500ms").
    #[arg(long, default_value = "2s", value_parser = parse_duration, env = "TRAFFICDECK_TICK_INTERVAL")]
    pub tick_interval: Duration,

    /// Simulated submission latency.
    #[arg(long, default_value = "3s", value_parser = parse_duration, env = "TRAFFICDECK_SUBMIT_LATENCY")]
    pub submit_latency: Duration,

    /// How long the success banner stays before the form clears.
    #[arg(long, default_value = "3s", value_parser = parse_duration, env = "TRAFFICDECK_RESET_AFTER")]
    pub reset_after: Duration,

    /// Seed for the live counter's random increments.
    #[arg(long, env = "TRAFFICDECK_SEED")]
    pub seed: Option<u64>,

    /// Fraction of the chart height covered by a value of 1.0.
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT_FRACTION)]
    pub viewport: f64,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,

    /// Write the curve's path data to a file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quiet mode (bare output only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (debug logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Form values from the `--name/--contact/--experience/--interest` flags.
    #[must_use]
    pub fn application_fields(&self) -> ApplicationFields {
        ApplicationFields {
            name: self.name.clone(),
            contact: self.contact.clone(),
            experience: self.experience.clone(),
            interest: self.interest.clone(),
        }
    }
}

/// Parse a duration string like "500ms", "2s", "1m" or a bare number of seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let invalid = || format!("invalid duration '{s}' (expected e.g. 500ms, 2s, 1m)");
    let (digits, unit): (&str, fn(u64) -> Duration) = if let Some(ms) = s.strip_suffix("ms") {
        (ms, Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        (mins, |n| Duration::from_secs(n.saturating_mul(60)))
    } else {
        (s, Duration::from_secs)
    };
    digits.trim().parse::<u64>().map(unit).map_err(|_| invalid())
}

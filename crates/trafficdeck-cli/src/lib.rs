//! # trafficdeck-cli
//!
//! CLI output, catalog presentation, the non-interactive apply runner, and
//! shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod runner;

pub use presenter::{CatalogPresenter, Styler};
pub use runner::{ApplyRunner, ApplySummary};

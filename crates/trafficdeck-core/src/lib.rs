//! # trafficdeck-core
//!
//! Behavioral core of the TrafficDeck dashboard: curve synthesis for the
//! case-study charts, the live metrics dashboard model, and the timed
//! application-form workflow. Time is virtual and randomness is injected,
//! so every component can be driven deterministically.

pub mod cancel;
pub mod catalog;
pub mod constants;
pub mod curve;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod timer;
pub mod workflow;

pub use catalog::{CaseRecord, DatasetGroup, Metric};
pub use constants::exit_codes;
pub use curve::{synthesize, CurveOptions, CurveSpec, PathCommand, Point2D};
pub use dashboard::{DashboardConfig, DashboardEvent, DashboardModel, DashboardState};
pub use error::DeckError;
pub use format::{format_metric, format_metric_for_key, metric_icon, MetricKind};
pub use timer::{Scheduler, TimerId, VirtualScheduler};
pub use workflow::{
    ApplicationFields, FormField, Phase, ScriptedSubmitter, SimulatedSubmitter, SubmissionState,
    SubmissionWorkflow, SubmitCapability, SubmitOutcome, WorkflowConfig, WorkflowNotice,
};

/// Synthesize a chart curve with default options.
///
/// # Example
/// ```
/// let curve = trafficdeck_core::chart_curve(&[0.0, 1.0]).unwrap();
/// assert_eq!(curve.path_data(), "M 0,100 C 50,100 50,20 100,20");
/// assert!(trafficdeck_core::chart_curve(&[]).is_err());
/// ```
pub fn chart_curve(series: &[f64]) -> Result<CurveSpec, DeckError> {
    synthesize(series, &CurveOptions::default())
}

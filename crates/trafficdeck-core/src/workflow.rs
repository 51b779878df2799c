//! Timed application-form workflow.
//!
//! ```text
//!  Editing --submit (valid)--> Submitting --ok--> Succeeded --reset timer--> Editing
//!     ^                            |                                         (fields cleared)
//!     +-----------failed-----------+ (fields kept)
//! ```
//!
//! The remote call is an injected [`SubmitCapability`]; its outcome is
//! delivered through the workflow's own scheduler after the latency the
//! capability reports. While `Submitting`, further submits are rejected.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use crate::constants::{DEFAULT_RESET_AFTER, DEFAULT_SUBMIT_LATENCY};
use crate::error::DeckError;
use crate::timer::{Scheduler, TimerId, VirtualScheduler};

/// Selectable areas of interest as `(key, label)`.
pub const INTEREST_OPTIONS: [(&str, &str); 6] = [
    ("gambling", "Gambling & Casino"),
    ("nutra", "Nutra & Health"),
    ("crypto", "Crypto & Finance"),
    ("dating", "Dating & Adult"),
    ("sweepstakes", "Sweepstakes & Offers"),
    ("other", "Other Verticals"),
];

/// Label of an interest key, if it is one of [`INTEREST_OPTIONS`].
#[must_use]
pub fn interest_label(key: &str) -> Option<&'static str> {
    INTEREST_OPTIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

/// The four required form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormField {
    Name,
    Contact,
    Experience,
    Interest,
}

impl FormField {
    /// Fields in form order.
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Contact,
        FormField::Experience,
        FormField::Interest,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Contact => "Telegram",
            Self::Experience => "Your Experience",
            Self::Interest => "Area of Interest",
        }
    }

    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Enter your codename...",
            Self::Contact => "@yourusername",
            Self::Experience => "Tell us about your traffic experience...",
            Self::Interest => "Select your focus area...",
        }
    }

    /// Following field, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Contact,
            Self::Contact => Self::Experience,
            Self::Experience => Self::Interest,
            Self::Interest => Self::Name,
        }
    }

    /// Preceding field, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            Self::Name => Self::Interest,
            Self::Contact => Self::Name,
            Self::Experience => Self::Contact,
            Self::Interest => Self::Experience,
        }
    }
}

/// Values entered into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationFields {
    pub name: String,
    pub contact: String,
    pub experience: String,
    /// Key from [`INTEREST_OPTIONS`].
    pub interest: String,
}

impl ApplicationFields {
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Contact => &self.contact,
            FormField::Experience => &self.experience,
            FormField::Interest => &self.interest,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Contact => &mut self.contact,
            FormField::Experience => &mut self.experience,
            FormField::Interest => &mut self.interest,
        }
    }

    /// Required fields that are empty or whitespace-only.
    #[must_use]
    pub fn missing(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|&f| self.get(f).trim().is_empty())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|&f| self.get(f).is_empty())
    }
}

/// Workflow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Editing,
    Submitting,
    Succeeded,
}

impl Phase {
    /// Text of the submit control in this phase.
    #[must_use]
    pub fn status_label(self) -> &'static str {
        match self {
            Self::Editing => "Access Node",
            Self::Submitting => "Scanning Credentials...",
            Self::Succeeded => "Access Granted",
        }
    }
}

/// Read-only snapshot for presentation code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionState {
    pub phase: Phase,
    pub fields: ApplicationFields,
    /// Most recent validation or submission error, cleared on edit.
    #[serde(skip)]
    pub last_error: Option<DeckError>,
}

/// Result reported by a [`SubmitCapability`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { reason: String },
}

/// A started submission: what it will resolve to, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub latency: Duration,
    pub outcome: SubmitOutcome,
}

/// The remote end of the form.
pub trait SubmitCapability {
    /// Start submitting `fields`.
    fn submit(&mut self, fields: &ApplicationFields) -> Submission;
}

impl<T: SubmitCapability + ?Sized> SubmitCapability for Box<T> {
    fn submit(&mut self, fields: &ApplicationFields) -> Submission {
        (**self).submit(fields)
    }
}

/// Reference collaborator: accepts everything after a fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    latency: Duration,
}

impl SimulatedSubmitter {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_LATENCY)
    }
}

impl SubmitCapability for SimulatedSubmitter {
    fn submit(&mut self, _fields: &ApplicationFields) -> Submission {
        Submission {
            latency: self.latency,
            outcome: SubmitOutcome::Accepted,
        }
    }
}

/// Shared record of the fields passed to a [`ScriptedSubmitter`].
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<ApplicationFields>>>);

impl CallLog {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<ApplicationFields> {
        self.0.lock().clone()
    }
}

/// Collaborator with injected latency and outcomes.
///
/// Outcomes are consumed in order; once the script runs out, `fallback`
/// is returned.
#[derive(Debug, Clone)]
pub struct ScriptedSubmitter {
    latency: Duration,
    script: VecDeque<SubmitOutcome>,
    fallback: SubmitOutcome,
    log: CallLog,
}

impl ScriptedSubmitter {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            script: VecDeque::new(),
            fallback: SubmitOutcome::Accepted,
            log: CallLog::default(),
        }
    }

    /// Reject every submission with `reason`.
    #[must_use]
    pub fn failing(latency: Duration, reason: impl Into<String>) -> Self {
        Self::new(latency).with_fallback(SubmitOutcome::Rejected {
            reason: reason.into(),
        })
    }

    #[must_use]
    pub fn then(mut self, outcome: SubmitOutcome) -> Self {
        self.script.push_back(outcome);
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, outcome: SubmitOutcome) -> Self {
        self.fallback = outcome;
        self
    }

    /// Handle that keeps observing calls after the submitter is moved.
    #[must_use]
    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }
}

impl SubmitCapability for ScriptedSubmitter {
    fn submit(&mut self, fields: &ApplicationFields) -> Submission {
        self.log.0.lock().push(fields.clone());
        let outcome = self
            .script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        Submission {
            latency: self.latency,
            outcome,
        }
    }
}

/// Messages delivered by the workflow's timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    SubmissionResolved(SubmitOutcome),
    ResetElapsed,
}

/// Something the presentation layer should surface.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowNotice {
    Succeeded,
    Failed(DeckError),
    Reset,
}

/// Workflow tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// How long the success state lasts before the form clears.
    pub reset_after: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            reset_after: DEFAULT_RESET_AFTER,
        }
    }
}

/// The form state machine.
pub struct SubmissionWorkflow<C, S = VirtualScheduler<WorkflowEvent>> {
    phase: Phase,
    fields: ApplicationFields,
    last_error: Option<DeckError>,
    submitter: C,
    scheduler: S,
    config: WorkflowConfig,
    timer: Option<TimerId>,
}

impl<C: SubmitCapability> SubmissionWorkflow<C> {
    /// Workflow on its own virtual scheduler.
    #[must_use]
    pub fn with_submitter(submitter: C, config: WorkflowConfig) -> Self {
        Self::new(submitter, config, VirtualScheduler::new())
    }
}

impl<C, S> SubmissionWorkflow<C, S>
where
    C: SubmitCapability,
    S: Scheduler<WorkflowEvent>,
{
    #[must_use]
    pub fn new(submitter: C, config: WorkflowConfig, scheduler: S) -> Self {
        Self {
            phase: Phase::Editing,
            fields: ApplicationFields::default(),
            last_error: None,
            submitter,
            scheduler,
            config,
            timer: None,
        }
    }

    /// Replace one field's value.
    ///
    /// Ignored (returns `false`) unless the form is in `Editing`.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if self.phase != Phase::Editing {
            tracing::debug!(?field, phase = ?self.phase, "edit ignored, form locked");
            return false;
        }
        *self.fields.slot(field) = value.into();
        self.last_error = None;
        true
    }

    /// Submit the form.
    ///
    /// # Errors
    ///
    /// - [`DeckError::SubmissionInFlight`] while a submission is pending or
    ///   the success banner is showing; no second call is made.
    /// - [`DeckError::ValidationFailed`] when required fields are blank; the
    ///   form stays in `Editing`.
    pub fn submit(&mut self) -> Result<(), DeckError> {
        if self.phase != Phase::Editing {
            tracing::warn!(phase = ?self.phase, "submit rejected");
            return Err(DeckError::SubmissionInFlight);
        }

        let missing = self.fields.missing();
        if !missing.is_empty() {
            let err = DeckError::ValidationFailed(missing);
            tracing::debug!(%err, "validation failed");
            self.last_error = Some(err.clone());
            return Err(err);
        }

        let submission = self.submitter.submit(&self.fields);
        self.phase = Phase::Submitting;
        self.last_error = None;
        self.timer = Some(self.scheduler.after(
            submission.latency,
            WorkflowEvent::SubmissionResolved(submission.outcome),
        ));
        tracing::debug!(latency = ?submission.latency, "submission started");
        Ok(())
    }

    /// Advance virtual time, applying every transition that falls due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<WorkflowNotice> {
        let until = self.scheduler.now().saturating_add(elapsed);
        let mut notices = Vec::new();
        while let Some(event) = self.scheduler.pop_due(until) {
            self.timer = None;
            if let Some(notice) = self.apply(event) {
                notices.push(notice);
            }
        }
        self.scheduler.settle(until);
        notices
    }

    fn apply(&mut self, event: WorkflowEvent) -> Option<WorkflowNotice> {
        match (self.phase, event) {
            (Phase::Submitting, WorkflowEvent::SubmissionResolved(SubmitOutcome::Accepted)) => {
                self.phase = Phase::Succeeded;
                self.timer = Some(
                    self.scheduler
                        .after(self.config.reset_after, WorkflowEvent::ResetElapsed),
                );
                tracing::info!("submission accepted");
                Some(WorkflowNotice::Succeeded)
            }
            (
                Phase::Submitting,
                WorkflowEvent::SubmissionResolved(SubmitOutcome::Rejected { reason }),
            ) => {
                self.phase = Phase::Editing;
                let err = DeckError::SubmissionFailed(reason);
                tracing::info!(%err, "submission rejected");
                self.last_error = Some(err.clone());
                Some(WorkflowNotice::Failed(err))
            }
            (Phase::Succeeded, WorkflowEvent::ResetElapsed) => {
                self.phase = Phase::Editing;
                self.fields = ApplicationFields::default();
                tracing::debug!("form reset");
                Some(WorkflowNotice::Reset)
            }
            (phase, event) => {
                tracing::warn!(?phase, ?event, "stale workflow event dropped");
                None
            }
        }
    }

    /// Cancel the workflow's pending timer. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
            tracing::debug!("workflow timers cancelled");
        }
    }

    /// Snapshot of the observable state.
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        SubmissionState {
            phase: self.phase,
            fields: self.fields.clone(),
            last_error: self.last_error.clone(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn fields(&self) -> &ApplicationFields {
        &self.fields
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&DeckError> {
        self.last_error.as_ref()
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn fill<C: SubmitCapability>(wf: &mut SubmissionWorkflow<C>) {
        wf.edit(FormField::Name, "neo");
        wf.edit(FormField::Contact, "@neo");
        wf.edit(FormField::Experience, "five years of push traffic");
        wf.edit(FormField::Interest, "crypto");
    }

    fn reference() -> SubmissionWorkflow<SimulatedSubmitter> {
        SubmissionWorkflow::with_submitter(SimulatedSubmitter::default(), WorkflowConfig::default())
    }

    #[test]
    fn starts_editing_and_empty() {
        let wf = reference();
        assert_eq!(wf.phase(), Phase::Editing);
        assert!(wf.fields().is_empty());
        assert!(wf.can_submit());
    }

    #[test]
    fn blank_fields_fail_validation() {
        let mut wf = reference();
        wf.edit(FormField::Name, "neo");
        wf.edit(FormField::Contact, "   ");
        let err = wf.submit().unwrap_err();
        assert_eq!(
            err,
            DeckError::ValidationFailed(vec![
                FormField::Contact,
                FormField::Experience,
                FormField::Interest
            ])
        );
        assert_eq!(wf.phase(), Phase::Editing);
        assert_eq!(wf.last_error(), Some(&err));
        assert_eq!(wf.scheduler().pending(), 0);
    }

    #[test]
    fn edit_clears_last_error() {
        let mut wf = reference();
        let _ = wf.submit();
        assert!(wf.last_error().is_some());
        wf.edit(FormField::Name, "n");
        assert!(wf.last_error().is_none());
    }

    #[test]
    fn reference_run_resets_after_success() {
        let mut wf = reference();
        fill(&mut wf);
        wf.submit().unwrap();
        assert_eq!(wf.phase(), Phase::Submitting);
        assert!(!wf.can_submit());

        assert!(wf.advance(secs(2)).is_empty());
        assert_eq!(wf.advance(secs(1)), vec![WorkflowNotice::Succeeded]);
        assert_eq!(wf.phase(), Phase::Succeeded);
        assert_eq!(wf.fields().name, "neo");

        assert_eq!(wf.advance(secs(3)), vec![WorkflowNotice::Reset]);
        assert_eq!(wf.phase(), Phase::Editing);
        assert!(wf.fields().is_empty());
    }

    #[test]
    fn one_long_advance_runs_whole_cycle() {
        let mut wf = reference();
        fill(&mut wf);
        wf.submit().unwrap();
        let notices = wf.advance(secs(6));
        assert_eq!(notices, vec![WorkflowNotice::Succeeded, WorkflowNotice::Reset]);
        assert_eq!(wf.scheduler().now(), secs(6));
    }

    #[test]
    fn second_submit_is_rejected_while_submitting() {
        let submitter = ScriptedSubmitter::new(secs(3));
        let log = submitter.call_log();
        let mut wf = SubmissionWorkflow::with_submitter(submitter, WorkflowConfig::default());
        fill(&mut wf);
        wf.submit().unwrap();
        assert_eq!(wf.submit(), Err(DeckError::SubmissionInFlight));
        assert_eq!(log.len(), 1);
        assert_eq!(wf.scheduler().pending(), 1);
    }

    #[test]
    fn edits_are_locked_while_submitting() {
        let mut wf = reference();
        fill(&mut wf);
        wf.submit().unwrap();
        assert!(!wf.edit(FormField::Name, "trinity"));
        assert_eq!(wf.fields().name, "neo");
    }

    #[test]
    fn failure_keeps_fields() {
        let submitter = ScriptedSubmitter::failing(secs(1), "node offline");
        let mut wf = SubmissionWorkflow::with_submitter(submitter, WorkflowConfig::default());
        fill(&mut wf);
        let before = wf.fields().clone();
        wf.submit().unwrap();
        let notices = wf.advance(secs(1));
        let err = DeckError::SubmissionFailed("node offline".into());
        assert_eq!(notices, vec![WorkflowNotice::Failed(err.clone())]);
        assert_eq!(wf.phase(), Phase::Editing);
        assert_eq!(wf.fields(), &before);
        assert_eq!(wf.last_error(), Some(&err));
        // Nothing left to fire.
        assert!(wf.advance(secs(10)).is_empty());
        assert_eq!(wf.fields(), &before);
    }

    #[test]
    fn retry_after_failure_succeeds() {
        let submitter = ScriptedSubmitter::new(secs(1)).then(SubmitOutcome::Rejected {
            reason: "busy".into(),
        });
        let log = submitter.call_log();
        let mut wf = SubmissionWorkflow::with_submitter(submitter, WorkflowConfig::default());
        fill(&mut wf);
        wf.submit().unwrap();
        wf.advance(secs(1));
        wf.submit().unwrap();
        assert_eq!(wf.advance(secs(1)), vec![WorkflowNotice::Succeeded]);
        assert_eq!(log.len(), 2);
        assert_eq!(log.calls()[1].interest, "crypto");
    }

    #[test]
    fn teardown_while_submitting_stops_mutation() {
        let mut wf = reference();
        fill(&mut wf);
        wf.submit().unwrap();
        wf.teardown();
        wf.teardown();
        assert!(wf.advance(secs(30)).is_empty());
        assert_eq!(wf.phase(), Phase::Submitting);
        assert_eq!(wf.scheduler().pending(), 0);
    }

    #[test]
    fn teardown_cancels_reset() {
        let mut wf = reference();
        fill(&mut wf);
        wf.submit().unwrap();
        wf.advance(secs(3));
        assert_eq!(wf.phase(), Phase::Succeeded);
        wf.teardown();
        assert!(wf.advance(secs(30)).is_empty());
        assert_eq!(wf.fields().name, "neo");
    }

    #[test]
    fn custom_reset_duration() {
        let config = WorkflowConfig {
            reset_after: Duration::from_millis(500),
        };
        let mut wf = SubmissionWorkflow::with_submitter(SimulatedSubmitter::new(secs(1)), config);
        fill(&mut wf);
        wf.submit().unwrap();
        wf.advance(secs(1));
        assert_eq!(wf.advance(Duration::from_millis(500)), vec![WorkflowNotice::Reset]);
    }

    #[test]
    fn unbounded_reset_keeps_banner() {
        let config = WorkflowConfig {
            reset_after: Duration::MAX,
        };
        let mut wf = SubmissionWorkflow::with_submitter(SimulatedSubmitter::new(secs(1)), config);
        fill(&mut wf);
        wf.submit().unwrap();
        assert_eq!(wf.advance(secs(1)), vec![WorkflowNotice::Succeeded]);
        assert!(wf.advance(Duration::MAX).is_empty());
        assert_eq!(wf.phase(), Phase::Succeeded);
        wf.teardown();
        assert_eq!(wf.scheduler().pending(), 0);
    }

    #[test]
    fn field_navigation_wraps() {
        assert_eq!(FormField::Interest.next(), FormField::Name);
        assert_eq!(FormField::Name.previous(), FormField::Interest);
        for f in FormField::ALL {
            assert_eq!(f.next().previous(), f);
        }
    }

    #[test]
    fn interest_labels() {
        assert_eq!(interest_label("nutra"), Some("Nutra & Health"));
        assert_eq!(interest_label("unknown"), None);
    }

    #[test]
    fn phase_labels() {
        assert_eq!(Phase::Editing.status_label(), "Access Node");
        assert_eq!(Phase::Submitting.status_label(), "Scanning Credentials...");
    }
}

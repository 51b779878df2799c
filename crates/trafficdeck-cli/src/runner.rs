//! Non-interactive application runner.
//!
//! Fills the form, submits it, then advances the workflow from the wall
//! clock until the submission resolves, showing a spinner meanwhile.

use std::thread;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use trafficdeck_core::cancel::CancellationToken;
use trafficdeck_core::{
    ApplicationFields, DeckError, FormField, Phase, SubmissionWorkflow, SubmitCapability,
    WorkflowNotice,
};

/// Default wall-clock polling interval.
pub const DEFAULT_POLL: Duration = Duration::from_millis(50);

/// Result of an accepted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplySummary {
    pub fields: ApplicationFields,
    /// Time from submit to acceptance.
    pub elapsed: Duration,
}

/// Drives a [`SubmissionWorkflow`] to completion in real time.
#[derive(Debug, Clone, Copy)]
pub struct ApplyRunner {
    poll: Duration,
    spinner: bool,
}

impl ApplyRunner {
    #[must_use]
    pub fn new(poll: Duration, spinner: bool) -> Self {
        Self { poll, spinner }
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.spinner {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }

    /// Submit `fields` and wait for the outcome.
    ///
    /// Every workflow timer is cancelled before returning.
    ///
    /// # Errors
    ///
    /// - [`DeckError::ValidationFailed`] when required fields are blank.
    /// - [`DeckError::SubmissionFailed`] when the collaborator rejects.
    /// - [`DeckError::Cancelled`] when `cancel` fires while waiting.
    pub fn run<C: SubmitCapability>(
        &self,
        workflow: &mut SubmissionWorkflow<C>,
        fields: &ApplicationFields,
        cancel: &CancellationToken,
    ) -> Result<ApplySummary, DeckError> {
        for field in FormField::ALL {
            workflow.edit(field, fields.get(field));
        }
        workflow.submit()?;

        let bar = self.progress_bar();
        bar.set_message(Phase::Submitting.status_label());
        let result = self.wait(workflow, cancel);
        workflow.teardown();

        match &result {
            Ok(_) => bar.finish_with_message(Phase::Succeeded.status_label()),
            Err(_) => bar.finish_and_clear(),
        }
        result.map(|elapsed| ApplySummary {
            fields: fields.clone(),
            elapsed,
        })
    }

    fn wait<C: SubmitCapability>(
        &self,
        workflow: &mut SubmissionWorkflow<C>,
        cancel: &CancellationToken,
    ) -> Result<Duration, DeckError> {
        let start = Instant::now();
        let mut last = start;
        loop {
            cancel.check_cancelled()?;
            thread::sleep(self.poll);

            let now = Instant::now();
            for notice in workflow.advance(now - last) {
                match notice {
                    WorkflowNotice::Succeeded => return Ok(start.elapsed()),
                    WorkflowNotice::Failed(err) => return Err(err),
                    WorkflowNotice::Reset => {}
                }
            }
            last = now;
            tracing::trace!(phase = ?workflow.phase(), "waiting for submission");
        }
    }
}

impl Default for ApplyRunner {
    fn default() -> Self {
        Self::new(DEFAULT_POLL, true)
    }
}

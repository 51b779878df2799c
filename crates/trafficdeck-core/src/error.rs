//! Error type shared by every TrafficDeck component.

use crate::workflow::FormField;

/// Error type for curve synthesis, the dashboard and the submission workflow.
///
/// None of these is fatal: `InvalidInput` and `UnknownCategory` are contract
/// violations rejected at the boundary, the rest are recoverable states the
/// caller surfaces to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeckError {
    /// Input rejected by a pure function (e.g. an empty series).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested category is not part of the catalog.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Submit attempted while required fields are blank.
    #[error("missing required fields: {}", field_list(.0))]
    ValidationFailed(Vec<FormField>),

    /// The submission collaborator reported a failure.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// Submit attempted while a submission is already in flight.
    #[error("a submission is already in progress")]
    SubmissionInFlight,

    /// The run was interrupted by the user.
    #[error("cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DeckError {
    /// Whether the component stays usable after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed(_) | Self::SubmissionFailed(_) | Self::SubmissionInFlight
        )
    }
}

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

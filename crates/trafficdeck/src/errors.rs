//! Error handling and exit codes.

use trafficdeck_core::constants::exit_codes;
use trafficdeck_core::DeckError;

/// Exit code for a component error.
#[must_use]
pub fn handle_error(err: &DeckError) -> i32 {
    match err {
        DeckError::InvalidInput(_)
        | DeckError::UnknownCategory(_)
        | DeckError::ValidationFailed(_) => exit_codes::ERROR_INPUT,
        DeckError::SubmissionFailed(_) | DeckError::SubmissionInFlight => {
            exit_codes::ERROR_SUBMISSION
        }
        DeckError::Config(_) => exit_codes::ERROR_CONFIG,
        DeckError::Cancelled => exit_codes::ERROR_CANCELED,
    }
}

/// Process exit status for an error returned by [`crate::app::run`].
///
/// Errors that do not wrap a [`DeckError`] map to the generic code.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<DeckError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error);
    u8::try_from(code).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficdeck_core::FormField;

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&DeckError::Cancelled), 130);
        assert_eq!(handle_error(&DeckError::InvalidInput("empty".into())), 2);
        assert_eq!(handle_error(&DeckError::UnknownCategory("x".into())), 2);
        assert_eq!(
            handle_error(&DeckError::ValidationFailed(vec![FormField::Name])),
            2
        );
        assert_eq!(handle_error(&DeckError::SubmissionFailed("down".into())), 3);
        assert_eq!(handle_error(&DeckError::Config("bad".into())), 4);
    }

    #[test]
    fn anyhow_wrapping() {
        let err = anyhow::Error::new(DeckError::Cancelled);
        assert_eq!(exit_status(&err), 130);
        let err = anyhow::anyhow!("terminal gone");
        assert_eq!(exit_status(&err), 1);
        let err = anyhow::Error::new(DeckError::Config("bad".into())).context("loading catalog");
        assert_eq!(exit_status(&err), 4);
    }
}

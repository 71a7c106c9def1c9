use serenenow_common::CoreError;
use thiserror::Error;

/// Errors returned by [`BookingFlow`](crate::flow::BookingFlow) methods.
///
/// These are the caller-correctable problems: bad local input or a call
/// that does not apply to the current state. Remote and business failures
/// are not errors here; they resolve to
/// [`BookingState::Failed`](crate::state::BookingState) so the
/// presentation layer can render them and offer a restart.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Rejected locally; no network call was made
    #[error("invite code must be exactly six digits")]
    InvalidCodeFormat,

    /// Name or email rejected locally; no network call was made
    #[error("invalid client details: {0}")]
    InvalidClientInfo(String),

    /// Slot date/time rejected locally; no network call was made
    #[error("invalid slot selection: {0}")]
    InvalidSlotSelection(String),

    /// The selected service is not among those the code resolved to
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// Not a recognized IANA timezone name
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The operation does not apply to the flow's current state
    #[error("{operation} is not allowed while {state}")]
    WrongState {
        operation: &'static str,
        state: &'static str,
    },

    /// A required draft field was missing when assembling the booking
    #[error("booking draft incomplete: missing {0}")]
    IncompleteDraft(&'static str),

    /// An underlying component error that is not a terminal flow failure
    /// (e.g. a slot lookup that the caller may simply retry)
    #[error(transparent)]
    Core(#[from] CoreError),
}

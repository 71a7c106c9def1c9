//! The booking flow's externally observable state.
//!
//! Every transition lands on one of these variants; the presentation
//! layer renders them and relays user input back to the matching
//! [`BookingFlow`](crate::flow::BookingFlow) method.

use serenenow_common::models::BookingDraft;

/// Why a booking flow ended in [`BookingState::Failed`].
///
/// Local input problems (a malformed code, a bad email) are *not* failure
/// reasons: they are returned as errors without leaving the current state,
/// so the user can correct the input in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The code was well-formed but the backend does not know it.
    CodeNotFound,
    /// The backend rejected a step with an unexpected error.
    ServerError,
    /// Valid code, but the expert offers nothing bookable.
    NoServicesAvailable,
    /// The chosen slot was taken between lookup and submission.
    SlotUnavailable,
    /// Client registration/invite was rejected.
    RegistrationFailed,
    /// The hosted checkout was declined or abandoned.
    PaymentFailed,
    /// No response received; retrying from the current step may work.
    NetworkError,
}

/// Observable state of one booking flow instance.
///
/// `Failed` is terminal for the instance; callers construct a new flow to
/// retry (the persisted draft lets the new instance resume mid-flow).
#[derive(Debug, Clone, PartialEq)]
pub enum BookingState {
    AwaitingCode,
    AwaitingServiceSelection,
    AwaitingSlot,
    AwaitingClientInfo,
    AwaitingPayment {
        booking_id: String,
        order_id: String,
        payment_session_id: String,
        meeting_link: Option<String>,
    },
    Confirmed {
        booking_id: String,
        meeting_link: Option<String>,
    },
    Failed(FailureReason),
}

impl BookingState {
    /// Stable name used in wrong-state errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            BookingState::AwaitingCode => "awaiting_code",
            BookingState::AwaitingServiceSelection => "awaiting_service_selection",
            BookingState::AwaitingSlot => "awaiting_slot",
            BookingState::AwaitingClientInfo => "awaiting_client_info",
            BookingState::AwaitingPayment { .. } => "awaiting_payment",
            BookingState::Confirmed { .. } => "confirmed",
            BookingState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingState::Confirmed { .. } | BookingState::Failed(_)
        )
    }

    /// Derives the state a reloaded page should resume at from a
    /// persisted draft. Booking creation itself is never resumed; a
    /// draft with a chosen slot re-enters at the client-info step
    /// (the flow constructor routes authenticated clients back to the
    /// slot choice instead, since their identity is already stored).
    pub fn resume_from(draft: &BookingDraft) -> BookingState {
        match &draft.outcome {
            None => BookingState::AwaitingCode,
            Some(_) if draft.service_id.is_none() => BookingState::AwaitingServiceSelection,
            Some(_) if draft.date.is_none() || draft.time.is_none() => BookingState::AwaitingSlot,
            Some(_) => BookingState::AwaitingClientInfo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serenenow_common::models::{
        CodeValidationOutcome, ExpertSummary, PaymentMode, ServiceDetail,
    };

    fn outcome() -> CodeValidationOutcome {
        CodeValidationOutcome {
            client: None,
            expert: ExpertSummary {
                id: "exp_1".into(),
                name: "Dr. Rao".into(),
                email: None,
            },
            services: vec![ServiceDetail {
                id: "svc_1".into(),
                title: "Individual Therapy".into(),
                price: 150000,
                currency: "INR".into(),
                duration_minutes: 50,
                buffer_minutes: 10,
                cancellation_window_hours: 24,
                reschedule_window_hours: 12,
                min_notice_minutes: 120,
            }],
        }
    }

    #[test]
    fn empty_draft_resumes_at_code_entry() {
        assert_eq!(
            BookingState::resume_from(&BookingDraft::default()),
            BookingState::AwaitingCode
        );
    }

    #[test]
    fn draft_with_outcome_resumes_at_service_selection() {
        let draft = BookingDraft {
            outcome: Some(outcome()),
            ..Default::default()
        };
        assert_eq!(
            BookingState::resume_from(&draft),
            BookingState::AwaitingServiceSelection
        );
    }

    #[test]
    fn draft_with_service_resumes_at_slot_choice() {
        let draft = BookingDraft {
            outcome: Some(outcome()),
            service_id: Some("svc_1".into()),
            ..Default::default()
        };
        assert_eq!(BookingState::resume_from(&draft), BookingState::AwaitingSlot);
    }

    #[test]
    fn draft_with_slot_resumes_at_client_info() {
        let draft = BookingDraft {
            outcome: Some(outcome()),
            service_id: Some("svc_1".into()),
            date: NaiveDate::from_ymd_opt(2024, 12, 1),
            time: Some("10:00".into()),
            timezone: Some("Asia/Kolkata".into()),
            payment_mode: Some(PaymentMode::Online),
        };
        assert_eq!(
            BookingState::resume_from(&draft),
            BookingState::AwaitingClientInfo
        );
    }

    #[test]
    fn terminal_states() {
        assert!(BookingState::Failed(FailureReason::PaymentFailed).is_terminal());
        assert!(BookingState::Confirmed {
            booking_id: "b".into(),
            meeting_link: None
        }
        .is_terminal());
        assert!(!BookingState::AwaitingSlot.is_terminal());
    }
}

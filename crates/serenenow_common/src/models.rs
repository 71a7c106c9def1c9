use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The therapist resolved from an invite code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpertSummary {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// Profile of a client as known to the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Whether the client has finished onboarding. An incomplete profile
    /// still goes through the client-info step of the booking flow.
    #[serde(default)]
    pub setup_complete: bool,
}

/// A bookable offering. Immutable within a booking flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceDetail {
    pub id: String,
    pub title: String,
    /// Price in minor units (e.g. paise, cents).
    pub price: i64,
    pub currency: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub buffer_minutes: i64,
    /// How long before the start a client may still cancel, in hours.
    #[serde(default)]
    pub cancellation_window_hours: i64,
    /// How long before the start a client may still reschedule, in hours.
    #[serde(default)]
    pub reschedule_window_hours: i64,
    /// Minimum lead time between booking and start, in minutes.
    #[serde(default)]
    pub min_notice_minutes: i64,
}

/// The server's resolution of a 6-digit invite code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeValidationOutcome {
    /// Present when the code maps to an already-known client. Carried
    /// for the presentation layer (pre-filling the client-info form);
    /// it holds no token, so the flow itself authenticates only via the
    /// stored session.
    pub client: Option<ClientProfile>,
    pub expert: ExpertSummary,
    /// Ordered list of services the expert offers for this code.
    pub services: Vec<ServiceDetail>,
}

/// Parameters for one slot lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotQuery {
    pub expert_id: String,
    pub service_id: String,
    /// None asks the backend for every upcoming available date.
    pub date: Option<NaiveDate>,
    /// IANA timezone name the slots should be rendered in.
    pub timezone: String,
}

/// One candidate start time within a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    /// Local wall-clock start, `HH:MM`.
    pub start_time: String,
    pub available: bool,
}

/// Available appointment windows for one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// How the client intends to settle the session fee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Hosted checkout, settled before the session is confirmed.
    Online,
    /// Settled directly with the therapist; no checkout handoff.
    Direct,
}

/// Registration/invite request for a new client entering through the
/// public booking flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterClientRequest {
    pub expert_id: String,
    pub name: String,
    pub email: String,
    pub service_ids: Vec<String>,
    pub direct_payment: bool,
}

/// Backend response to a client registration/invite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisteredClient {
    pub client_id: String,
    pub access_token: String,
}

/// The assembled booking submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateBookingRequest {
    pub client_id: String,
    pub expert_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    /// Local wall-clock start, `HH:MM`.
    pub time: String,
    pub timezone: String,
    pub payment_mode: PaymentMode,
    pub service_details: ServiceDetail,
    /// Caller-generated reference linking the booking to a checkout session.
    pub client_reference_id: String,
}

/// Server-reported status of a created appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    PendingPayment,
    Failed,
}

/// Confirmation of a created appointment. Terminal for the creation step:
/// either the flow ends here or it transitions to the payment handoff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentResult {
    pub booking_id: String,
    pub order_id: String,
    pub status: BookingStatus,
    /// Present iff `status` is `PendingPayment`.
    pub payment_session_id: Option<String>,
    pub meeting_link: Option<String>,
}

/// Authenticated client identity, persisted durably between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSession {
    /// Opaque bearer token. Non-empty iff the session counts as
    /// authenticated; actual validity is only confirmed remotely.
    pub access_token: String,
    pub profile: ClientProfile,
}

/// In-progress booking payload, assembled incrementally across steps and
/// persisted so a reload mid-flow can rehydrate where it left off.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    pub outcome: Option<CodeValidationOutcome>,
    pub service_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub timezone: Option<String>,
    pub payment_mode: Option<PaymentMode>,
}

impl BookingDraft {
    /// The selected service, once both the code outcome and a selection
    /// are in place.
    pub fn selected_service(&self) -> Option<&ServiceDetail> {
        let id = self.service_id.as_deref()?;
        self.outcome
            .as_ref()?
            .services
            .iter()
            .find(|service| service.id == id)
    }
}

//! Service abstractions for the booking flow's external collaborators.
//!
//! These traits decouple the orchestrator from the concrete HTTP clients so
//! flows can be driven against test doubles. Implementations live in
//! `serenenow-api` and `serenenow-checkout`.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{
    AppointmentResult, ClientProfile, CodeValidationOutcome, CreateBookingRequest, DaySlots,
    RegisterClientRequest, RegisteredClient, SlotQuery,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A trait for the remote booking backend.
///
/// Every method is a single request/response round trip with no retry,
/// backoff, or fan-out; the orchestrator awaits each call to completion
/// before issuing the next.
pub trait BookingApi: Send + Sync {
    /// Resolve a 6-digit invite code into client, expert and services.
    fn validate_code(&self, code: &str) -> BoxFuture<'_, CodeValidationOutcome, CoreError>;

    /// Fetch available appointment windows for an expert+service+date tuple.
    fn fetch_slots(&self, query: SlotQuery) -> BoxFuture<'_, Vec<DaySlots>, CoreError>;

    /// Register (or invite) a client, establishing their identity.
    fn register_client(
        &self,
        request: RegisterClientRequest,
    ) -> BoxFuture<'_, RegisteredClient, CoreError>;

    /// Create an appointment, optionally opening a payment session.
    fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> BoxFuture<'_, AppointmentResult, CoreError>;

    /// Confirm a stored bearer token against the backend.
    fn validate_token(&self, token: &str) -> BoxFuture<'_, ClientProfile, CoreError>;

    /// Attach (or drop) the bearer token used for authenticated
    /// endpoints on subsequent calls. Overwrites, never merges.
    fn set_bearer_token(&self, token: Option<String>);
}

/// Result of a hosted-checkout handoff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// The session was settled; the booking can be confirmed.
    Paid,
    /// The session is still open; payment may settle shortly (the client
    /// can hit the return URL before the gateway finishes processing).
    Pending,
    /// The payment was attempted and rejected.
    Declined,
    /// The client abandoned or the session expired before payment.
    Cancelled,
}

/// A trait for the hosted payment checkout.
///
/// The provider is handed the payment session opened by the booking
/// backend and reports how the checkout ended. It never retries.
pub trait CheckoutProvider: Send + Sync {
    fn complete_checkout(
        &self,
        payment_session_id: &str,
        order_id: &str,
    ) -> BoxFuture<'_, CheckoutOutcome, CoreError>;
}

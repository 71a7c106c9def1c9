//! The booking orchestrator.
//!
//! Drives the multi-step public booking transaction: validate code →
//! resolve services → fetch slots → collect client identity → create
//! appointment → hand off to payment → confirm. Steps are strictly
//! sequential; each touches the network at most once and is awaited to
//! completion before the next begins. Remote and business failures
//! resolve to an observable [`BookingState::Failed`]; only locally
//! correctable input problems are returned as [`FlowError`]s, leaving the
//! state unchanged.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use serenenow_common::models::{
    BookingDraft, BookingStatus, ClientProfile, ClientSession, CreateBookingRequest, DaySlots,
    PaymentMode, RegisterClientRequest, SlotQuery,
};
use serenenow_common::validation::{is_valid_email, is_valid_timezone, parse_booking_time};
use serenenow_common::{BookingApi, CheckoutOutcome, CheckoutProvider, CoreError};
use serenenow_store::{FlowRepository, SessionRepository};

use crate::cache::{SlotCache, SlotCacheKey};
use crate::error::FlowError;
use crate::state::{BookingState, FailureReason};

/// One public booking attempt.
///
/// Collaborators are constructor-injected so flows can be driven against
/// test doubles and several instances can coexist without shared ambient
/// state. The flow exclusively owns its draft and slot cache; the session
/// and flow stores are shared with the rest of the application.
pub struct BookingFlow<A: BookingApi, P: CheckoutProvider> {
    api: A,
    checkout: P,
    sessions: Arc<dyn SessionRepository>,
    flow_store: Arc<dyn FlowRepository>,
    cache: SlotCache,
    draft: BookingDraft,
    state: BookingState,
}

impl<A: BookingApi, P: CheckoutProvider> BookingFlow<A, P> {
    /// Builds a flow for a client browsing in `timezone`, resuming any
    /// draft a previous page load persisted.
    pub fn new(
        api: A,
        checkout: P,
        sessions: Arc<dyn SessionRepository>,
        flow_store: Arc<dyn FlowRepository>,
        timezone: &str,
    ) -> Result<Self, FlowError> {
        if !is_valid_timezone(timezone) {
            return Err(FlowError::InvalidTimezone(timezone.to_string()));
        }

        let mut draft = flow_store
            .load()
            .map_err(CoreError::from)?
            .unwrap_or_default();
        draft.timezone = Some(timezone.to_string());

        // A stored session authenticates subsequent requests until the
        // backend says otherwise.
        let mut authenticated = false;
        if let Ok(Some(session)) = sessions.get() {
            if !session.access_token.is_empty() {
                api.set_bearer_token(Some(session.access_token));
                authenticated = true;
            }
        }

        let mut state = BookingState::resume_from(&draft);
        // An authenticated client never re-enters the client-info step:
        // their identity is the stored session, so a slot-complete draft
        // re-enters at the slot choice instead.
        if authenticated && state == BookingState::AwaitingClientInfo {
            state = BookingState::AwaitingSlot;
        }
        if state != BookingState::AwaitingCode {
            info!("Resuming booking flow at {}", state.name());
        }

        Ok(Self {
            api,
            checkout,
            sessions,
            flow_store,
            cache: SlotCache::new(),
            draft,
            state,
        })
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Validates the 6-digit invite code and resolves the expert's
    /// services. Exactly one service skips the selection step; zero
    /// services ends the flow.
    pub async fn submit_code(&mut self, code: &str) -> Result<BookingState, FlowError> {
        self.ensure("submit_code", matches!(self.state, BookingState::AwaitingCode))?;

        if !serenenow_common::validation::is_valid_client_code(code) {
            return Err(FlowError::InvalidCodeFormat);
        }

        info!("Validating invite code");
        let outcome = match self.api.validate_code(code).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let reason = match &err {
                    CoreError::Transport(_) => FailureReason::NetworkError,
                    CoreError::Application { status: 404, .. } => FailureReason::CodeNotFound,
                    _ => FailureReason::ServerError,
                };
                return Ok(self.fail(reason, &err));
            }
        };

        if outcome.services.is_empty() {
            // Valid code, nothing offerable: a business rule, not a
            // transport problem.
            return Ok(self.fail_with(FailureReason::NoServicesAvailable));
        }

        let single_service = (outcome.services.len() == 1).then(|| outcome.services[0].id.clone());
        self.draft.outcome = Some(outcome);
        self.state = match single_service {
            Some(service_id) => {
                debug!("Single service offered; skipping selection");
                self.draft.service_id = Some(service_id);
                BookingState::AwaitingSlot
            }
            None => BookingState::AwaitingServiceSelection,
        };
        self.persist_draft();
        Ok(self.state.clone())
    }

    /// Picks one of the services the code resolved to.
    pub fn select_service(&mut self, service_id: &str) -> Result<BookingState, FlowError> {
        self.ensure(
            "select_service",
            matches!(self.state, BookingState::AwaitingServiceSelection),
        )?;

        let known = self
            .draft
            .outcome
            .as_ref()
            .is_some_and(|outcome| outcome.services.iter().any(|s| s.id == service_id));
        if !known {
            return Err(FlowError::UnknownService(service_id.to_string()));
        }

        self.draft.service_id = Some(service_id.to_string());
        self.state = BookingState::AwaitingSlot;
        self.persist_draft();
        Ok(self.state.clone())
    }

    /// Looks up available slots for the chosen service, consulting the
    /// read-through cache first. Re-entrant: stays in the slot step, and
    /// a lookup failure leaves the state unchanged so the caller can
    /// simply try again.
    pub async fn available_slots(
        &mut self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<DaySlots>, FlowError> {
        self.ensure(
            "available_slots",
            matches!(self.state, BookingState::AwaitingSlot),
        )?;

        let expert_id = self.expert_id()?;
        let service_id = self.service_id()?;
        let timezone = self.timezone()?;

        let key = SlotCacheKey::new(&expert_id, &service_id, date, &timezone);
        if let Some(hit) = self.cache.get(&key) {
            debug!("Slot cache hit for {}/{} {}", expert_id, service_id, key.date);
            return Ok(hit.clone());
        }

        let query = SlotQuery {
            expert_id,
            service_id,
            date,
            timezone,
        };
        let days = self.api.fetch_slots(query).await?;
        self.cache.insert(key, days.clone());
        Ok(days)
    }

    /// Fixes the slot and payment mode. An authenticated client goes
    /// straight to booking creation; a new visitor must provide their
    /// details first.
    pub async fn choose_slot(
        &mut self,
        date: NaiveDate,
        time: &str,
        payment_mode: PaymentMode,
    ) -> Result<BookingState, FlowError> {
        self.ensure(
            "choose_slot",
            matches!(self.state, BookingState::AwaitingSlot),
        )?;

        if parse_booking_time(time).is_none() {
            return Err(FlowError::InvalidSlotSelection(format!(
                "time '{}' is not HH:MM",
                time
            )));
        }

        self.draft.date = Some(date);
        self.draft.time = Some(time.to_string());
        self.draft.payment_mode = Some(payment_mode);
        self.persist_draft();

        match self.authenticated_client_id() {
            Some(client_id) => self.create_booking(client_id).await,
            None => {
                self.state = BookingState::AwaitingClientInfo;
                Ok(self.state.clone())
            }
        }
    }

    /// Registers the client (establishing a durable session) and then
    /// creates the appointment.
    pub async fn submit_client_info(
        &mut self,
        name: &str,
        email: &str,
    ) -> Result<BookingState, FlowError> {
        self.ensure(
            "submit_client_info",
            matches!(self.state, BookingState::AwaitingClientInfo),
        )?;

        let name = name.trim();
        if name.is_empty() {
            return Err(FlowError::InvalidClientInfo(
                "name must not be empty".to_string(),
            ));
        }
        if !is_valid_email(email) {
            return Err(FlowError::InvalidClientInfo(format!(
                "email '{}' is not valid",
                email
            )));
        }

        let request = RegisterClientRequest {
            expert_id: self.expert_id()?,
            name: name.to_string(),
            email: email.to_string(),
            service_ids: vec![self.service_id()?],
            direct_payment: matches!(self.draft.payment_mode, Some(PaymentMode::Direct)),
        };

        info!("Registering client with expert {}", request.expert_id);
        let registered = match self.api.register_client(request).await {
            Ok(registered) => registered,
            Err(err) => {
                let reason = if err.is_transport() {
                    FailureReason::NetworkError
                } else {
                    FailureReason::RegistrationFailed
                };
                return Ok(self.fail(reason, &err));
            }
        };

        let session = ClientSession {
            access_token: registered.access_token.clone(),
            profile: ClientProfile {
                id: registered.client_id.clone(),
                name: name.to_string(),
                email: email.to_string(),
                setup_complete: true,
            },
        };
        if let Err(err) = self.sessions.set(session) {
            // The flow can finish on the in-memory token; only the next
            // visit loses the session.
            warn!("Failed to persist client session: {}", err);
        }
        self.api.set_bearer_token(Some(registered.access_token));

        self.create_booking(registered.client_id).await
    }

    /// Settles the payment session opened at booking creation.
    pub async fn complete_payment(&mut self) -> Result<BookingState, FlowError> {
        let (booking_id, order_id, session_id, meeting_link) = match &self.state {
            BookingState::AwaitingPayment {
                booking_id,
                order_id,
                payment_session_id,
                meeting_link,
            } => (
                booking_id.clone(),
                order_id.clone(),
                payment_session_id.clone(),
                meeting_link.clone(),
            ),
            other => {
                return Err(FlowError::WrongState {
                    operation: "complete_payment",
                    state: other.name(),
                })
            }
        };

        match self.checkout.complete_checkout(&session_id, &order_id).await {
            Ok(CheckoutOutcome::Paid) => {
                info!("Checkout settled; booking {} confirmed", booking_id);
                self.state = BookingState::Confirmed {
                    booking_id,
                    meeting_link,
                };
                self.finish();
                Ok(self.state.clone())
            }
            Ok(CheckoutOutcome::Pending) => {
                // Gateway still processing; stay put so the caller can
                // check again.
                info!("Checkout session {} still open; awaiting settlement", session_id);
                Ok(self.state.clone())
            }
            Ok(CheckoutOutcome::Declined) | Ok(CheckoutOutcome::Cancelled) => {
                Ok(self.fail_with(FailureReason::PaymentFailed))
            }
            Err(err) => {
                let reason = if err.is_transport() {
                    FailureReason::NetworkError
                } else {
                    FailureReason::PaymentFailed
                };
                Ok(self.fail(reason, &err))
            }
        }
    }

    /// Confirms the stored session against the backend, clearing it when
    /// the token is rejected. The local `is_authenticated` check is
    /// optimistic; this is the authoritative one.
    pub async fn verify_session(&mut self) -> Result<Option<ClientProfile>, FlowError> {
        let session = match self.sessions.get().map_err(CoreError::from)? {
            Some(session) if !session.access_token.is_empty() => session,
            _ => return Ok(None),
        };

        match self.api.validate_token(&session.access_token).await {
            Ok(profile) => Ok(Some(profile)),
            Err(err) if matches!(err.status(), Some(401) | Some(403)) => {
                info!("Stored session token rejected by backend; clearing");
                self.sessions.clear().map_err(CoreError::from)?;
                self.api.set_bearer_token(None);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    // --- Shared booking-creation tail ---

    /// Invariant: never reached until the code is validated, a slot is
    /// chosen, and a client identity exists.
    async fn create_booking(&mut self, client_id: String) -> Result<BookingState, FlowError> {
        let request = self.assemble_request(client_id)?;
        info!(
            "Creating booking for service {} on {} {}",
            request.service_id, request.date, request.time
        );

        let result = match self.api.create_booking(request).await {
            Ok(result) => result,
            Err(err) => {
                let reason = match &err {
                    CoreError::Transport(_) => FailureReason::NetworkError,
                    CoreError::Application { status: 409, .. } => FailureReason::SlotUnavailable,
                    _ => FailureReason::ServerError,
                };
                return Ok(self.fail(reason, &err));
            }
        };

        match result.status {
            BookingStatus::Confirmed => {
                info!("Booking {} confirmed", result.booking_id);
                self.state = BookingState::Confirmed {
                    booking_id: result.booking_id,
                    meeting_link: result.meeting_link,
                };
                self.finish();
                Ok(self.state.clone())
            }
            BookingStatus::PendingPayment => match result.payment_session_id {
                Some(session_id) if !session_id.is_empty() => {
                    self.state = BookingState::AwaitingPayment {
                        booking_id: result.booking_id,
                        order_id: result.order_id,
                        payment_session_id: session_id,
                        meeting_link: result.meeting_link,
                    };
                    Ok(self.state.clone())
                }
                _ => {
                    error!(
                        "Booking {} is pending payment but carries no payment session",
                        result.booking_id
                    );
                    Ok(self.fail_with(FailureReason::ServerError))
                }
            },
            BookingStatus::Failed => Ok(self.fail_with(FailureReason::ServerError)),
        }
    }

    fn assemble_request(&self, client_id: String) -> Result<CreateBookingRequest, FlowError> {
        let outcome = self
            .draft
            .outcome
            .as_ref()
            .ok_or(FlowError::IncompleteDraft("code validation"))?;
        let service = self
            .draft
            .selected_service()
            .ok_or(FlowError::IncompleteDraft("service selection"))?;

        Ok(CreateBookingRequest {
            client_id,
            expert_id: outcome.expert.id.clone(),
            service_id: service.id.clone(),
            date: self.draft.date.ok_or(FlowError::IncompleteDraft("date"))?,
            time: self
                .draft
                .time
                .clone()
                .ok_or(FlowError::IncompleteDraft("time"))?,
            timezone: self
                .draft
                .timezone
                .clone()
                .ok_or(FlowError::IncompleteDraft("timezone"))?,
            payment_mode: self
                .draft
                .payment_mode
                .ok_or(FlowError::IncompleteDraft("payment mode"))?,
            service_details: service.clone(),
            client_reference_id: Uuid::new_v4().to_string(),
        })
    }

    // --- Helpers ---

    fn ensure(&self, operation: &'static str, allowed: bool) -> Result<(), FlowError> {
        if allowed {
            Ok(())
        } else {
            Err(FlowError::WrongState {
                operation,
                state: self.state.name(),
            })
        }
    }

    fn expert_id(&self) -> Result<String, FlowError> {
        self.draft
            .outcome
            .as_ref()
            .map(|outcome| outcome.expert.id.clone())
            .ok_or(FlowError::IncompleteDraft("code validation"))
    }

    fn service_id(&self) -> Result<String, FlowError> {
        self.draft
            .service_id
            .clone()
            .ok_or(FlowError::IncompleteDraft("service selection"))
    }

    fn timezone(&self) -> Result<String, FlowError> {
        self.draft
            .timezone
            .clone()
            .ok_or(FlowError::IncompleteDraft("timezone"))
    }

    fn authenticated_client_id(&self) -> Option<String> {
        match self.sessions.get() {
            Ok(Some(session)) if !session.access_token.is_empty() => Some(session.profile.id),
            _ => None,
        }
    }

    fn fail(&mut self, reason: FailureReason, err: &CoreError) -> BookingState {
        error!("Booking step failed ({:?}): {}", reason, err);
        self.state = BookingState::Failed(reason);
        // Failed is terminal: the draft is spent, and the next instance
        // restarts from code entry.
        self.finish();
        self.state.clone()
    }

    fn fail_with(&mut self, reason: FailureReason) -> BookingState {
        warn!("Booking flow ended: {:?}", reason);
        self.state = BookingState::Failed(reason);
        self.finish();
        self.state.clone()
    }

    /// Draft persistence is best-effort: losing it only costs the
    /// ability to resume after a reload.
    fn persist_draft(&self) {
        if let Err(err) = self.flow_store.save(&self.draft) {
            warn!("Failed to persist booking draft: {}", err);
        }
    }

    fn finish(&mut self) {
        if let Err(err) = self.flow_store.clear() {
            warn!("Failed to clear completed booking draft: {}", err);
        }
    }
}

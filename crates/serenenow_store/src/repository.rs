//! Repository traits for local persistence.
//!
//! Two scopes exist, mirroring the two lifetimes the booking flow needs:
//! the client session is durable (survives restarts until logout or
//! invalid-token detection) while the flow draft is session-scoped
//! (survives a reload mid-flow, cleared on completion). Both are
//! single-writer under the event model; writes are idempotent overwrites,
//! never merges.

use serenenow_common::models::{BookingDraft, ClientSession};

use crate::error::StoreError;

/// Durable persistence of the authenticated client's token and profile.
pub trait SessionRepository: Send + Sync {
    fn get(&self) -> Result<Option<ClientSession>, StoreError>;

    fn set(&self, session: ClientSession) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;

    /// Local, optimistic check: true iff a non-empty token is present.
    /// Actual validity is only confirmed by a remote validation call.
    fn is_authenticated(&self) -> bool {
        matches!(self.get(), Ok(Some(session)) if !session.access_token.is_empty())
    }
}

/// Session-scoped persistence of the in-progress booking draft.
pub trait FlowRepository: Send + Sync {
    fn load(&self) -> Result<Option<BookingDraft>, StoreError>;

    fn save(&self, draft: &BookingDraft) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

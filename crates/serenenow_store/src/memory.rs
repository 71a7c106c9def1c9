//! In-memory store implementations.
//!
//! The defaults for tests and for embedders that manage persistence
//! themselves. A poisoned lock is recovered rather than propagated: the
//! stored value is a plain snapshot, so the last write is always usable.

use std::sync::Mutex;

use serenenow_common::models::{BookingDraft, ClientSession};

use crate::error::StoreError;
use crate::repository::{FlowRepository, SessionRepository};

#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<ClientSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for MemorySessionStore {
    fn get(&self) -> Result<Option<ClientSession>, StoreError> {
        let guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(guard.clone())
    }

    fn set(&self, session: ClientSession) -> Result<(), StoreError> {
        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryFlowStore {
    draft: Mutex<Option<BookingDraft>>,
}

impl MemoryFlowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlowRepository for MemoryFlowStore {
    fn load(&self) -> Result<Option<BookingDraft>, StoreError> {
        let guard = self
            .draft
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, draft: &BookingDraft) -> Result<(), StoreError> {
        let mut guard = self
            .draft
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(draft.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self
            .draft
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
        Ok(())
    }
}

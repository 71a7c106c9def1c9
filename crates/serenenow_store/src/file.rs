//! JSON-file-backed session store.
//!
//! The durable analogue of the in-memory store: the client session
//! survives process restarts until logout or invalid-token detection.
//! Writes replace the whole file; concurrent writers race last-write-wins,
//! which is acceptable for a single client's identity.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use serenenow_common::models::ClientSession;

use crate::error::StoreError;
use crate::repository::SessionRepository;

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionRepository for FileSessionStore {
    fn get(&self) -> Result<Option<ClientSession>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, session: ClientSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, raw)?;
        debug!("Persisted client session to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenenow_common::models::ClientProfile;
    use uuid::Uuid;

    fn scratch_store() -> FileSessionStore {
        let path = std::env::temp_dir().join(format!("serenenow-session-{}.json", Uuid::new_v4()));
        FileSessionStore::new(path)
    }

    fn session(token: &str) -> ClientSession {
        ClientSession {
            access_token: token.into(),
            profile: ClientProfile {
                id: "client_1".into(),
                name: "Asha".into(),
                email: "asha@example.com".into(),
                setup_complete: true,
            },
        }
    }

    #[test]
    fn missing_file_reads_as_no_session() {
        let store = scratch_store();
        assert!(store.get().unwrap().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn set_get_clear_round_trip() {
        let store = scratch_store();
        store.set(session("tok_file")).unwrap();
        assert_eq!(store.get().unwrap().unwrap().access_token, "tok_file");
        assert!(store.is_authenticated());

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn second_write_overwrites_the_first() {
        let store = scratch_store();
        store.set(session("tok_a")).unwrap();
        store.set(session("tok_b")).unwrap();
        assert_eq!(store.get().unwrap().unwrap().access_token, "tok_b");
        store.clear().unwrap();
    }
}

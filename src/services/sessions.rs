use crate::models::CorrelationId;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use thiserror::Error;

/// Offered options of one request: option index -> description
pub type SessionEntry = BTreeMap<usize, String>;

/// Errors that can occur with session store operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} already exists")]
    DuplicateId(CorrelationId),

    #[error("session store lock poisoned")]
    Poisoned,
}

/// One stored entry together with the time it was written
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub options: SessionEntry,
    pub created_at: DateTime<Utc>,
}

/// Process-wide table from correlation id to the options offered under it
///
/// Entries are written once and never replaced or evicted; they live as long
/// as the store does.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<CorrelationId, StoredSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the options offered under a fresh correlation id
    pub fn put(&self, id: CorrelationId, options: SessionEntry) -> Result<(), SessionError> {
        let mut entries = self.entries.write().map_err(|_| SessionError::Poisoned)?;
        if entries.contains_key(&id) {
            return Err(SessionError::DuplicateId(id));
        }

        tracing::trace!("Session stored: {} ({} options)", id, options.len());
        entries.insert(
            id,
            StoredSession {
                options,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    pub fn get(&self, id: &CorrelationId) -> Result<Option<SessionEntry>, SessionError> {
        let entries = self.entries.read().map_err(|_| SessionError::Poisoned)?;
        Ok(entries.get(id).map(|session| session.options.clone()))
    }

    /// Look up the description of the option a user selected
    pub fn select(&self, id: &CorrelationId, key: usize) -> Result<Option<String>, SessionError> {
        let entries = self.entries.read().map_err(|_| SessionError::Poisoned)?;
        Ok(entries
            .get(id)
            .and_then(|session| session.options.get(&key).cloned()))
    }

    /// Full stored record, including when it was written
    pub fn session(&self, id: &CorrelationId) -> Result<Option<StoredSession>, SessionError> {
        let entries = self.entries.read().map_err(|_| SessionError::Poisoned)?;
        Ok(entries.get(id).cloned())
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        let entries = self.entries.read().map_err(|_| SessionError::Poisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len()? == 0)
    }

    /// Panic while holding the write lock so later calls see it poisoned
    #[cfg(test)]
    pub(crate) fn poison(self: &std::sync::Arc<Self>) {
        let store = std::sync::Arc::clone(self);
        let _ = std::thread::spawn(move || {
            let _guard = store.entries.write();
            panic!("writer died holding the session lock");
        })
        .join();
    }
}

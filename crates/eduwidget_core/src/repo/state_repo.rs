//! State repository: sole owner of the persisted application document.
//!
//! # Responsibility
//! - Expose the four state operations (get/set/update/clear) over the
//!   opaque document store.
//! - Run normalization on every read and every write.
//!
//! # Invariants
//! - `get_state` is total: read and parse failures degrade to the empty
//!   state, never to an error.
//! - Writes persist the normalized form, so malformed writes self-heal.
//! - `update_state` is read-modify-write without a lock; writes are
//!   serialized by this repository being the single owner of the document.

use crate::model::state::AppState;
use crate::repo::normalize::{normalize_document, normalize_state};
use crate::store::{KeyValueStore, StoreError};
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the application-state document. The suffix is the schema
/// generation the original writer used; kept so existing installs migrate.
pub const APP_STATE_KEY: &str = "edu_widget_app_state_v11";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for document persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize state document: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Single owner of the persisted `AppState` document.
pub struct StateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads, parses and normalizes the persisted state.
    ///
    /// Total: a missing key, unreadable store or unparsable document is
    /// recovered by substituting the empty state. Repeated calls without
    /// intervening writes return equal values.
    pub fn get_state(&self) -> AppState {
        let raw = match self.store.get(APP_STATE_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=state_load module=repo status=recovered reason=store_read error={err}"
                );
                None
            }
        };

        let value = raw.and_then(|text| match serde_json::from_str::<Value>(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("event=state_load module=repo status=recovered reason=parse error={err}");
                None
            }
        });

        normalize_document(value)
    }

    /// Normalizes and persists the given state.
    pub fn set_state(&self, next: &AppState) -> RepoResult<()> {
        let normalized = normalize_state(next.clone());
        let text = serde_json::to_string(&normalized)?;
        self.store.put(APP_STATE_KEY, &text)?;
        Ok(())
    }

    /// Reads the current state, applies `updater`, writes the result back.
    ///
    /// Read-modify-write with no compare-and-swap: concurrent callers are
    /// last-writer-wins, acceptable for the single-user usage pattern.
    pub fn update_state(&self, updater: impl FnOnce(AppState) -> AppState) -> RepoResult<()> {
        let next = updater(self.get_state());
        self.set_state(&next)
    }

    /// Deletes the persisted document; the next read returns a fresh
    /// empty state.
    pub fn clear_state(&self) -> RepoResult<()> {
        self.store.remove(APP_STATE_KEY)?;
        Ok(())
    }
}

//! Persistent key-value state
//!
//! All durable state lives in one JSON document: portal credentials, the
//! usage cache, the installed-version marker, and the analytics identity.
//! Components access it through the [`StateStorage`] capability so tests can
//! substitute an in-memory fake. There is no schema versioning; upgrades
//! rely on key presence/absence checks.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    types::{CacheEntry, CombinedUsage, Credentials, SessionData},
};

pub use file::FileStore;
pub use memory::MemoryStore;

/// The persisted state document
///
/// Absent keys are simply `None`; the popup re-reads this document on every
/// invocation rather than holding authoritative state in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateDocument {
    /// Bearer token captured from the portal session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Portal client id header value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Subscriber id in international form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,

    /// Last combined usage result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_data: Option<CombinedUsage>,

    /// Write time of `cached_data`, epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_timestamp: Option<i64>,

    /// Version marker from the last run; survives a reset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    /// Long-lived analytics client identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_client_id: Option<String>,

    /// Rolling analytics session record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_data: Option<SessionData>,
}

impl StateDocument {
    /// The stored credentials, if all three fields are present
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.auth_token, &self.client_id, &self.subscriber_id) {
            (Some(auth_token), Some(client_id), Some(subscriber_id)) => Some(Credentials::new(
                auth_token.clone(),
                client_id.clone(),
                subscriber_id.clone(),
            )),
            _ => None,
        }
    }

    /// Names of the credential fields that are absent
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.auth_token.is_none() {
            missing.push("auth_token");
        }
        if self.client_id.is_none() {
            missing.push("client_id");
        }
        if self.subscriber_id.is_none() {
            missing.push("subscriber_id");
        }
        missing
    }

    /// Store a credential set wholesale
    pub fn set_credentials(&mut self, credentials: &Credentials) {
        self.auth_token = Some(credentials.auth_token.clone());
        self.client_id = Some(credentials.client_id.clone());
        self.subscriber_id = Some(credentials.subscriber_id.clone());
    }

    /// The cache entry, if both the data and its timestamp are present
    pub fn cache_entry(&self) -> Option<CacheEntry> {
        match (&self.cached_data, self.cache_timestamp) {
            (Some(data), Some(timestamp)) => Some(CacheEntry::new(data.clone(), timestamp)),
            _ => None,
        }
    }

    /// Store a fresh cache entry
    pub fn set_cache_entry(&mut self, entry: CacheEntry) {
        self.cached_data = Some(entry.cached_data);
        self.cache_timestamp = Some(entry.cache_timestamp);
    }

    /// Clear session material and the usage cache.
    ///
    /// Removes exactly `auth_token`, `client_id`, `cached_data`,
    /// `cache_timestamp` and `subscriber_id`. The version marker and
    /// analytics identity survive.
    pub fn clear_session_data(&mut self) {
        self.auth_token = None;
        self.client_id = None;
        self.subscriber_id = None;
        self.cached_data = None;
        self.cache_timestamp = None;
    }
}

/// Async storage capability for the state document
///
/// The file-backed implementation is the production path; the in-memory one
/// backs tests and mock runs.
#[async_trait]
pub trait StateStorage: Send + Sync + std::fmt::Debug {
    /// Read the current state document
    async fn load(&self) -> Result<StateDocument>;

    /// Persist the state document
    async fn save(&self, document: &StateDocument) -> Result<()>;
}

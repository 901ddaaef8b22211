//! Cache decision and the usage service
//!
//! The cache decision is a pure function evaluated once per invocation;
//! there is no background revalidation and no stale-while-revalidate
//! behavior. The [`UsageService`] applies the decision against persistent
//! storage and triggers a fresh fetch when needed.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    Result,
    config::Settings,
    storage::StateStorage,
    types::{CacheEntry, CombinedUsage},
    usage::{UsageClient, mock_usage},
};

/// Outcome of the cache freshness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    /// Serve the previously combined result
    ServeCache,
    /// Trigger a fresh fetch
    Refresh,
}

/// Where a returned result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Served from the cache entry
    Cache,
    /// Fetched from the portal API
    Api,
    /// Fixed development dataset
    Mock,
}

impl DataSource {
    /// Label used in analytics parameters
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Cache => "cache",
            DataSource::Api => "api",
            DataSource::Mock => "mock",
        }
    }
}

/// Decide whether to serve the cache or refresh.
///
/// Forced refresh always wins; otherwise the entry is served while strictly
/// younger than the TTL.
pub fn decide(
    entry: Option<&CacheEntry>,
    now_ms: i64,
    ttl_ms: i64,
    force_refresh: bool,
) -> CacheDecision {
    if force_refresh {
        return CacheDecision::Refresh;
    }

    match entry {
        Some(entry) if entry.age_ms(now_ms) < ttl_ms => CacheDecision::ServeCache,
        _ => CacheDecision::Refresh,
    }
}

/// Usage acquisition service combining the API client, the cache decision,
/// and persistent storage
#[derive(Debug)]
pub struct UsageService {
    /// Shared state storage
    storage: Arc<dyn StateStorage>,
    /// Portal API client
    client: UsageClient,
    /// Cache TTL in milliseconds
    ttl_ms: i64,
}

impl UsageService {
    /// Create a service over the given storage
    pub fn new(settings: &Settings, storage: Arc<dyn StateStorage>) -> Result<Self> {
        Ok(Self {
            storage,
            client: UsageClient::new(settings)?,
            ttl_ms: settings.cache_ttl_ms(),
        })
    }

    /// Get combined usage data, serving the cache when it is still fresh.
    ///
    /// On a fresh fetch the combined result and a new timestamp are written
    /// back to storage before returning; a failed fetch leaves the previous
    /// cache entry untouched.
    pub async fn get_usage(&self, force_refresh: bool) -> Result<(CombinedUsage, DataSource)> {
        let mut document = self.storage.load().await?;

        let credentials = document
            .credentials()
            .ok_or_else(|| crate::Error::auth_missing(&document.missing_credentials()))?;

        let now_ms = Utc::now().timestamp_millis();
        let entry = document.cache_entry();

        let decision = decide(entry.as_ref(), now_ms, self.ttl_ms, force_refresh);
        match (decision, entry) {
            (CacheDecision::ServeCache, Some(entry)) => {
                debug!(
                    "Serving cached usage data, age {}s",
                    entry.age_ms(now_ms) / 1000
                );
                Ok((entry.cached_data, DataSource::Cache))
            }
            _ => {
                info!("Cache stale or refresh forced, fetching fresh data");
                let combined = self.client.fetch_all(&credentials).await?;

                document.set_cache_entry(CacheEntry::new(combined.clone(), now_ms));
                self.storage.save(&document).await?;

                Ok((combined, DataSource::Api))
            }
        }
    }

    /// Development mode: cache and return the fixed mock dataset without any
    /// network calls.
    pub async fn get_mock_usage(&self) -> Result<(CombinedUsage, DataSource)> {
        let mut document = self.storage.load().await?;
        let combined = mock_usage();

        document.set_cache_entry(CacheEntry::new(
            combined.clone(),
            Utc::now().timestamp_millis(),
        ));
        if document.subscriber_id.is_none() {
            document.subscriber_id = Some("MockSubscriberId".to_string());
        }
        self.storage.save(&document).await?;

        debug!("Mock dataset cached and returned");
        Ok((combined, DataSource::Mock))
    }
}

//! Anonymous usage telemetry
//!
//! Events are delivered to a GA4-style measurement endpoint. The client
//! identifier is a random UUID created once and persisted alongside the rest
//! of the state; the session identifier rolls over after a period of
//! inactivity. Delivery is strictly fire-and-forget: a failed send is logged
//! and never affects the user-facing flow.
//!
//! ## Examples
//!
//! ```rust
//! use slt_usage_checker::Telemetry;
//! use slt_usage_checker::config::Settings;
//! use slt_usage_checker::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let mut settings = Settings::default();
//! settings.analytics.enabled = false;
//! let telemetry = Telemetry::new(&settings, Arc::new(MemoryStore::new())).unwrap();
//!
//! // Disabled telemetry drops events without touching the network
//! telemetry.track("usage_checked", serde_json::json!({"data_source": "cache"})).await;
//! # });
//! ```

use chrono::Utc;
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    Result,
    config::Settings,
    storage::{StateDocument, StateStorage},
    types::SessionData,
    utils::get_version,
};

/// Fixed engagement duration attached to every event, required by the
/// measurement protocol for the event to count as engaged.
const ENGAGEMENT_TIME_MSEC: u64 = 100;

/// Telemetry client
#[derive(Debug)]
pub struct Telemetry {
    /// Shared state storage holding the client and session identifiers
    storage: Arc<dyn StateStorage>,
    /// HTTP client for event delivery
    http: Client,
    /// Measurement endpoint, including measurement id and API secret
    endpoint: String,
    /// Inactivity window after which a new session starts
    session_expiration_minutes: u64,
    /// Whether events are sent at all
    enabled: bool,
}

impl Telemetry {
    /// Create a telemetry client over the given storage
    pub fn new(settings: &Settings, storage: Arc<dyn StateStorage>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(
                settings.network.request_timeout,
            ))
            .build()?;

        Ok(Self {
            storage,
            http,
            endpoint: settings.analytics.endpoint.clone(),
            session_expiration_minutes: settings.analytics.session_expiration_minutes,
            enabled: settings.analytics.enabled,
        })
    }

    /// Send one named event with additional parameters.
    ///
    /// `params` must be a JSON object; the session id, engagement time, and
    /// app version are merged in on top. Errors are logged and swallowed.
    pub async fn track(&self, name: &str, params: Value) {
        if !self.enabled {
            debug!("Analytics disabled, dropping event {}", name);
            return;
        }

        if let Err(e) = self.send(name, params).await {
            warn!("Failed to send analytics event {}: {}", name, e);
        }
    }

    /// Convenience wrapper for the standard page-view event
    pub async fn page_view(&self, title: &str, location: &str) {
        self.track(
            "page_view",
            json!({
                "page_title": title,
                "page_location": location,
            }),
        )
        .await;
    }

    async fn send(&self, name: &str, params: Value) -> Result<()> {
        let mut document = self.storage.load().await?;
        let now_ms = Utc::now().timestamp_millis();
        let (client_id, session_id) = self.identity_at(&mut document, now_ms);
        self.storage.save(&document).await?;

        let mut event_params = match params {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(crate::Error::analytics(format!(
                    "event params must be an object, got {}",
                    other
                )));
            }
        };
        event_params.insert("session_id".to_string(), json!(session_id));
        event_params.insert(
            "engagement_time_msec".to_string(),
            json!(ENGAGEMENT_TIME_MSEC),
        );
        event_params.insert("app_version".to_string(), json!(get_version()));

        let payload = json!({
            "client_id": client_id,
            "events": [{
                "name": name,
                "params": event_params,
            }],
        });

        debug!("Sending analytics event {}", name);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| crate::Error::analytics(e.to_string()))?;

        if !response.status().is_success() {
            return Err(crate::Error::analytics(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Resolve the client and session identifiers against the document.
    ///
    /// Creates the client id on first use and never overwrites it. The
    /// session id is reused while the last event is inside the expiration
    /// window; either way the last-use timestamp is refreshed.
    fn identity_at(&self, document: &mut StateDocument, now_ms: i64) -> (String, String) {
        let client_id = document
            .analytics_client_id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();

        let session = match document.session_data.take() {
            Some(mut session)
                if session.idle_minutes(now_ms) < self.session_expiration_minutes as f64 =>
            {
                session.timestamp = now_ms;
                session
            }
            _ => SessionData::started_at(now_ms),
        };
        let session_id = session.session_id.clone();
        document.session_data = Some(session);

        (client_id, session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn telemetry() -> Telemetry {
        Telemetry::new(&Settings::default(), Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_client_id_created_once() {
        let telemetry = telemetry();
        let mut doc = StateDocument::default();

        let (first, _) = telemetry.identity_at(&mut doc, 0);
        let (second, _) = telemetry.identity_at(&mut doc, 1_000);
        assert_eq!(first, second);
        assert_eq!(doc.analytics_client_id.as_deref(), Some(first.as_str()));
    }

    #[test]
    fn test_existing_client_id_is_preserved() {
        let telemetry = telemetry();
        let mut doc = StateDocument {
            analytics_client_id: Some("existing".to_string()),
            ..Default::default()
        };

        let (client_id, _) = telemetry.identity_at(&mut doc, 0);
        assert_eq!(client_id, "existing");
    }

    #[test]
    fn test_session_reused_within_window() {
        let telemetry = telemetry();
        let mut doc = StateDocument::default();

        let (_, first) = telemetry.identity_at(&mut doc, 0);
        // 29 minutes idle, inside the default 30 minute window
        let (_, second) = telemetry.identity_at(&mut doc, 29 * 60 * 1000);
        assert_eq!(first, second);
        // Last-use timestamp was refreshed
        assert_eq!(doc.session_data.as_ref().unwrap().timestamp, 29 * 60 * 1000);
    }

    #[test]
    fn test_session_rolls_over_after_expiration() {
        let telemetry = telemetry();
        let mut doc = StateDocument::default();

        let (_, first) = telemetry.identity_at(&mut doc, 0);
        let (_, second) = telemetry.identity_at(&mut doc, 31 * 60 * 1000);
        assert_ne!(first, second);
        assert_eq!(second, (31 * 60 * 1000i64).to_string());
    }

    #[test]
    fn test_session_refresh_extends_window() {
        let telemetry = telemetry();
        let mut doc = StateDocument::default();

        let (_, first) = telemetry.identity_at(&mut doc, 0);
        let (_, second) = telemetry.identity_at(&mut doc, 20 * 60 * 1000);
        // 40 minutes after start but only 20 after last use
        let (_, third) = telemetry.identity_at(&mut doc, 40 * 60 * 1000);
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[tokio::test]
    async fn test_disabled_telemetry_is_silent() {
        let mut settings = Settings::default();
        settings.analytics.enabled = false;
        let storage = Arc::new(MemoryStore::new());
        let telemetry = Telemetry::new(&settings, storage.clone()).unwrap();

        telemetry.track("usage_checked", json!({"data_source": "api"})).await;

        // No identity was created either
        let doc = storage.load().await.unwrap();
        assert!(doc.analytics_client_id.is_none());
        assert!(doc.session_data.is_none());
    }
}

//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use slt_usage_checker::{
    config::Settings,
    storage::{MemoryStore, StateDocument},
    types::Credentials,
};

/// Credentials used by the wiremock-backed tests
pub fn test_credentials() -> Credentials {
    Credentials::new("bearer test-token", "test-client-id", "94712345678")
}

/// A state document holding the test credentials and nothing else
pub fn seeded_document() -> StateDocument {
    let mut document = StateDocument::default();
    document.set_credentials(&test_credentials());
    document
}

/// An in-memory store seeded with the test credentials
pub fn seeded_store() -> MemoryStore {
    MemoryStore::with_document(seeded_document())
}

/// Settings pointing at a mock portal, with analytics disabled so tests
/// never touch the real collection endpoint
pub fn settings_for(portal_uri: &str) -> Settings {
    let mut settings = Settings::default();
    settings.portal.base_url = portal_uri.to_string();
    settings.analytics.enabled = false;
    settings.network.request_timeout = 5;
    settings
}

/// A combined result as it would sit in the cache, used to seed cache
/// entries without going through a fetch
pub fn summary_cached() -> slt_usage_checker::CombinedUsage {
    serde_json::from_value(json!({
        "reported_time": "28-Sep-2024 04:54 PM",
        "speed_status": "NORMAL",
        "usage_data": [
            {
                "name": "Standard",
                "service_name": "Main Pack",
                "used": "110.0",
                "limit": "440.0",
                "volume_unit": "GB",
                "expiry_date": "30-Sep",
                "fetched_from": "/UsageSummary"
            }
        ]
    }))
    .unwrap()
}

/// Payload for the primary `UsageSummary` endpoint: two main-pack bands
pub fn summary_payload() -> serde_json::Value {
    json!({
        "dataBundle": {
            "reported_time": "28-Sep-2024 04:54 PM",
            "status": "NORMAL",
            "my_package_info": {
                "usageDetails": [
                    {
                        "name": "Standard",
                        "used": "110.0",
                        "limit": "440.0",
                        "volume_unit": "GB",
                        "expiry_date": "30-Sep"
                    },
                    {
                        "name": "Total (Standard + Free)",
                        "used": "323.8",
                        "limit": "660.0",
                        "volume_unit": "GB",
                        "expiry_date": "30-Sep"
                    }
                ]
            }
        }
    })
}

/// Payload for an add-on endpoint with a single band
pub fn addon_payload(name: &str, used: &str, limit: &str) -> serde_json::Value {
    json!({
        "dataBundle": {
            "usageDetails": [
                {
                    "name": name,
                    "used": used,
                    "limit": limit,
                    "volume_unit": "GB",
                    "expiry_date": "10-Oct"
                }
            ]
        }
    })
}

/// Payload for an add-on endpoint with nothing subscribed
pub fn empty_addon_payload() -> serde_json::Value {
    json!({"dataBundle": {}})
}

/// Mount one endpoint, matching the credential headers and subscriber query
pub async fn mount_endpoint(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", endpoint)))
        .and(query_param("subscriberID", "94712345678"))
        .and(header("authorization", "bearer test-token"))
        .and(header("x-ibm-client-id", "test-client-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount all five endpoints with healthy responses
pub async fn mount_all_endpoints(server: &MockServer) {
    mount_endpoint(server, "UsageSummary", summary_payload()).await;
    mount_endpoint(server, "ExtraGB", addon_payload("Extra GB - 50 GB", "2.6", "50")).await;
    mount_endpoint(server, "BonusData", addon_payload("Loyalty", "6", "6")).await;
    mount_endpoint(
        server,
        "GetDashboardVASBundles",
        addon_payload("20 GB Add-on", "8", "20"),
    )
    .await;
    mount_endpoint(server, "FreeData", addon_payload("3GB Free Data", "1.5", "3")).await;
}

/// Mount one endpoint with a server-side failure
pub async fn mount_failing_endpoint(server: &MockServer, endpoint: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", endpoint)))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

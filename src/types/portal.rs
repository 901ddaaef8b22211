//! Raw portal response envelopes
//!
//! Every endpoint wraps its payload in a `dataBundle` object carrying a
//! `usageDetails` list. The primary `UsageSummary` endpoint nests its list
//! one level deeper under `my_package_info` and additionally reports the
//! snapshot time and speed status.

use serde::Deserialize;

use super::UsageItem;

/// Envelope for the add-on endpoints (`ExtraGB`, `BonusData`,
/// `GetDashboardVASBundles`, `FreeData`)
#[derive(Debug, Clone, Deserialize)]
pub struct BundleResponse {
    /// Payload wrapper
    #[serde(rename = "dataBundle")]
    pub data_bundle: UsageBundle,
}

/// Payload of an add-on endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UsageBundle {
    /// Quota bands reported by the endpoint
    #[serde(rename = "usageDetails", default)]
    pub usage_details: Vec<UsageItem>,
}

/// Envelope for the primary `UsageSummary` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    /// Payload wrapper
    #[serde(rename = "dataBundle")]
    pub data_bundle: SummaryBundle,
}

/// Payload of the primary endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryBundle {
    /// Portal-reported snapshot time
    #[serde(default)]
    pub reported_time: String,

    /// Connection speed status ("NORMAL", "THROTTLED", ...)
    #[serde(default)]
    pub status: String,

    /// Main package wrapper holding the quota bands
    pub my_package_info: PackageInfo,
}

/// Main package wrapper inside the summary payload
#[derive(Debug, Clone, Deserialize)]
pub struct PackageInfo {
    /// Quota bands of the main package
    #[serde(rename = "usageDetails", default)]
    pub usage_details: Vec<UsageItem>,
}

//! Fixed development dataset
//!
//! Used by `--mock` to exercise the full cache/render pipeline without
//! touching the portal API. Six quota bands across all five service
//! categories, including an exceeded main pack and a fully used bonus band.

use crate::types::{CombinedUsage, UsageItem};

fn band(
    name: &str,
    service_name: &str,
    used: &str,
    limit: &str,
    expiry_date: &str,
    remaining: &str,
    fetched_from: &str,
) -> UsageItem {
    UsageItem {
        name: name.to_string(),
        service_name: service_name.to_string(),
        used: used.to_string(),
        limit: limit.to_string(),
        volume_unit: "GB".to_string(),
        expiry_date: expiry_date.to_string(),
        remaining: Some(remaining.to_string()),
        fetched_from: fetched_from.to_string(),
        extra: serde_json::Map::new(),
    }
}

/// The fixed mock dataset
pub fn mock_usage() -> CombinedUsage {
    CombinedUsage {
        reported_time: "28-Sep-2024 04:54 PM".to_string(),
        speed_status: "NORMAL".to_string(),
        usage_data: vec![
            band(
                "Standard",
                "Main Pack",
                "442.3",
                "440.0",
                "30-Sep",
                "0",
                "/UsageSummary",
            ),
            band(
                "Total (Standard + Free)",
                "Main Pack",
                "323.8",
                "660.0",
                "30-Sep",
                "336.2",
                "/UsageSummary",
            ),
            band("Loyalty", "Bonus Data", "6", "6", "01-Oct", "0", "/BonusData"),
            band(
                "Extra GB - 50 GB",
                "Extra GB",
                "2.6",
                "50",
                "27-Nov",
                "47.4",
                "/ExtraGB",
            ),
            band(
                "20 GB Add-on",
                "Add-Ons Data",
                "8",
                "20",
                "10-Oct",
                "12",
                "/GetDashboardVASBundles",
            ),
            band(
                "3GB Free Data",
                "Free Data",
                "1.5",
                "3",
                "10-Oct",
                "1.5",
                "/FreeData",
            ),
        ],
    }
}

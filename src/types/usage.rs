//! Quota data structures
//!
//! Defines the normalized quota item shape shared by all five endpoints, the
//! combined result, the cache entry wrapper, and the analytics session
//! record.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Accept either a JSON string or a bare number for numeric fields.
///
/// The portal is inconsistent here: the primary endpoint reports quotas as
/// strings ("440.0") while some add-on endpoints report bare numbers.
fn number_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}

fn number_as_string_opt<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        String(String),
        Null,
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n.to_string()),
        Some(Raw::String(s)) => Some(s),
        _ => None,
    })
}

/// One quota band within a service category (e.g. "Standard" within
/// "Main Pack")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageItem {
    /// Quota band name as reported by the portal
    pub name: String,

    /// Service category the band belongs to; attached during normalization,
    /// not present in the raw endpoint payload
    #[serde(default)]
    pub service_name: String,

    /// Consumed volume as a decimal string
    #[serde(deserialize_with = "number_as_string")]
    pub used: String,

    /// Allowance volume as a decimal string
    #[serde(deserialize_with = "number_as_string")]
    pub limit: String,

    /// Unit for `used`/`limit` (typically "GB")
    #[serde(default)]
    pub volume_unit: String,

    /// Band expiry date as reported (e.g. "30-Sep")
    #[serde(default)]
    pub expiry_date: String,

    /// Remaining volume as reported; informational only, the renderer
    /// recomputes it from `used` and `limit`
    #[serde(default, deserialize_with = "number_as_string_opt")]
    pub remaining: Option<String>,

    /// Endpoint path the band came from; attached during normalization
    #[serde(default)]
    pub fetched_from: String,

    /// Passthrough for portal fields this tool does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UsageItem {
    /// Parse the consumed volume
    pub fn used_amount(&self) -> Result<f64> {
        parse_volume("used", &self.used)
    }

    /// Parse the allowance volume
    pub fn limit_amount(&self) -> Result<f64> {
        parse_volume("limit", &self.limit)
    }

    /// Parse the reported remaining volume, if any
    pub fn remaining_amount(&self) -> Option<f64> {
        self.remaining.as_deref().and_then(|r| r.parse().ok())
    }

    /// Attach the normalization tags for the endpoint this item came from
    pub fn tagged(mut self, service_name: &str, fetched_from: &str) -> Self {
        self.service_name = service_name.to_string();
        self.fetched_from = fetched_from.to_string();
        self
    }
}

fn parse_volume(field: &str, value: &str) -> Result<f64> {
    let amount: f64 = value
        .trim()
        .parse()
        .map_err(|_| Error::data_shape(format!("non-numeric {} value: {:?}", field, value)))?;
    if amount < 0.0 {
        return Err(Error::data_shape(format!(
            "negative {} value: {:?}",
            field, value
        )));
    }
    Ok(amount)
}

/// The merged result of the five endpoint calls
///
/// Created fresh on every successful fetch; never partially updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedUsage {
    /// Portal-reported time of the usage snapshot (from the primary endpoint)
    pub reported_time: String,

    /// Connection speed status (from the primary endpoint)
    pub speed_status: String,

    /// All quota bands across the five service categories
    pub usage_data: Vec<UsageItem>,
}

/// A cached combined result with its write timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The combined usage result
    pub cached_data: CombinedUsage,

    /// Write time, epoch milliseconds
    pub cache_timestamp: i64,
}

impl CacheEntry {
    /// Create a cache entry stamped with the given write time
    pub fn new(cached_data: CombinedUsage, cache_timestamp: i64) -> Self {
        Self {
            cached_data,
            cache_timestamp,
        }
    }

    /// Entry age relative to `now_ms`, in milliseconds
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.cache_timestamp
    }
}

/// Analytics session record
///
/// `session_id` is the creation time as a string; `timestamp` is refreshed on
/// every use while the session is still inside the expiration window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Session identifier (creation epoch-ms as a string)
    pub session_id: String,

    /// Last-use time, epoch milliseconds
    pub timestamp: i64,
}

impl SessionData {
    /// Start a new session at `now_ms`
    pub fn started_at(now_ms: i64) -> Self {
        Self {
            session_id: now_ms.to_string(),
            timestamp: now_ms,
        }
    }

    /// Idle duration in minutes relative to `now_ms`
    pub fn idle_minutes(&self, now_ms: i64) -> f64 {
        (now_ms - self.timestamp) as f64 / 60_000.0
    }
}

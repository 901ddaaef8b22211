//! Type definitions for the usage checker
//!
//! This module contains the main data structures for portal credentials,
//! quota data, cached results, and the raw portal response envelopes.

pub mod credentials;
pub mod portal;
pub mod usage;

pub use credentials::Credentials;
pub use portal::{BundleResponse, SummaryResponse};
pub use usage::{CacheEntry, CombinedUsage, SessionData, UsageItem};

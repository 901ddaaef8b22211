//! SLT Broadband Usage Checker
//!
//! A command-line client for the MySLT customer portal's internal usage API.
//! Given session credentials captured from a logged-in portal session, it
//! fetches broadband data-usage figures from five quota endpoints, caches the
//! combined result with a configurable TTL, and renders one paginated group
//! per service category in the terminal.
//!
//! # Features
//!
//! - **Parallel Usage Fetching**: Five quota endpoints queried concurrently
//!   with an all-or-nothing join
//! - **Time-Based Caching**: Combined results are served from a local cache
//!   until the TTL elapses or a refresh is forced
//! - **Credential Store**: Portal session material persisted in a local JSON
//!   state document
//! - **First-Party Analytics**: Measurement-Protocol-style events with
//!   client/session identity bookkeeping; failures never affect the UI
//! - **Cross-Platform**: Native support for Linux, Windows, and macOS
//!
//! # Usage
//!
//! ## Show usage (default mode)
//!
//! ```bash
//! slt-usage
//! slt-usage --refresh --group 2
//! ```
//!
//! ## Store credentials
//!
//! ```bash
//! slt-usage login --auth-token "bearer ..." --client-id "..." --subscriber-id 0712345678
//! ```
//!
//! ## Clear stored data
//!
//! ```bash
//! slt-usage reset
//! ```
//!
//! # Examples
//!
//! ```rust
//! use slt_usage_checker::{Settings, storage::MemoryStore, usage::UsageService};
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let settings = Settings::default();
//! let storage = Arc::new(MemoryStore::new());
//! let service = UsageService::new(&settings, storage)?;
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod popup;
pub mod storage;
pub mod types;
pub mod usage;
pub mod utils;

pub use analytics::Telemetry;
pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use storage::{FileStore, MemoryStore, StateDocument, StateStorage};
pub use types::{CacheEntry, CombinedUsage, Credentials, UsageItem};
pub use usage::{UsageClient, UsageService};

//! Usage data acquisition and caching
//!
//! This module owns the pipeline between the portal API and the popup: the
//! HTTP client that queries the five quota endpoints in parallel, the
//! time-based cache decision, and the service that ties both to persistent
//! storage.
//!
//! ## Fetch strategy
//!
//! The five endpoint calls are issued concurrently and joined
//! all-or-nothing: a single failure aborts the whole operation and nothing
//! is cached. There is no retry policy; a failed fetch surfaces immediately
//! and the user retries explicitly.
//!
//! ## Examples
//!
//! ```rust
//! use slt_usage_checker::usage::UsageService;
//! use slt_usage_checker::config::Settings;
//! use slt_usage_checker::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let settings = Settings::default();
//! let service = UsageService::new(&settings, Arc::new(MemoryStore::new())).unwrap();
//!
//! // Nothing stored yet: fetching is disallowed until a login stores
//! // all three credentials
//! let result = service.get_usage(false).await;
//! assert!(result.is_err());
//! # });
//! ```

pub mod cache;
pub mod client;
pub mod mock;

pub use cache::{CacheDecision, DataSource, UsageService, decide};
pub use client::UsageClient;
pub use mock::mock_usage;

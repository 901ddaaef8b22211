//! Utility functions and helpers
//!
//! This module contains utility functions used throughout the application.

pub mod subscriber;
pub mod version;

pub use subscriber::{format_account_id, normalize_subscriber_id};
pub use version::{VERSION, get_version};

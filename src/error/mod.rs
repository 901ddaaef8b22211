//! Error handling for the usage checker
//!
//! This module defines error types and handling patterns used throughout the
//! application. All component-internal errors are converted to a single
//! user-facing message at the CLI boundary; analytics failures are the one
//! exception and are swallowed after logging.

pub mod types;

pub use types::{Error, Result};

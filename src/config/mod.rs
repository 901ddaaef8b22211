//! Configuration management
//!
//! Settings are layered from defaults, an optional TOML file, and environment
//! variable overrides.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::Settings;

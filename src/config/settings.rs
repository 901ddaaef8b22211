//! Configuration settings
//!
//! Provides configuration loading from environment variables, configuration
//! files, and command-line overrides.

use serde::{Deserialize, Serialize};

// Helper functions for serde defaults
fn default_base_url() -> String {
    "https://omniscapp.slt.lk/mobitelint/slt/api/BBVAS".to_string()
}

fn default_login_url() -> String {
    "https://myslt.slt.lk/".to_string()
}

fn default_ttl_minutes() -> u64 {
    15
}

fn default_analytics_endpoint() -> String {
    "https://www.google-analytics.com/mp/collect?measurement_id=G-TR8RD821G1&api_secret=CYLIhdDsSOmvQ8NDr6n6CQ"
        .to_string()
}

fn default_session_expiration_minutes() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration settings for the usage checker
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Portal API configuration
    #[serde(default)]
    pub portal: PortalSettings,
    /// Usage cache configuration
    #[serde(default)]
    pub cache: CacheSettings,
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    /// Network configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Portal API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSettings {
    /// Base URL of the usage API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Portal login page shown during onboarding
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

/// Usage cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Time-to-live for a cached combined result, in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

/// Analytics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Collection endpoint URL
    #[serde(default = "default_analytics_endpoint")]
    pub endpoint: String,
    /// Idle window after which a new analytics session starts, in minutes
    #[serde(default = "default_session_expiration_minutes")]
    pub session_expiration_minutes: u64,
    /// Disable event delivery entirely when false
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Network and proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// HTTPS proxy URL
    #[serde(default)]
    pub https_proxy: Option<String>,
    /// HTTP proxy URL
    #[serde(default)]
    pub http_proxy: Option<String>,
    /// All protocols proxy URL
    #[serde(default)]
    pub all_proxy: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_url: default_login_url(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            endpoint: default_analytics_endpoint(),
            session_expiration_minutes: default_session_expiration_minutes(),
            enabled: true,
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            https_proxy: None,
            http_proxy: None,
            all_proxy: None,
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache TTL in milliseconds
    pub fn cache_ttl_ms(&self) -> i64 {
        self.cache.ttl_minutes as i64 * 60_000
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut settings = Self::default();

        if let Ok(base_url) = std::env::var("SLT_BASE_URL") {
            settings.portal.base_url = base_url;
        }

        if let Ok(login_url) = std::env::var("SLT_LOGIN_URL") {
            settings.portal.login_url = login_url;
        }

        if let Ok(ttl) = std::env::var("CACHE_TTL_MINUTES") {
            settings.cache.ttl_minutes = ttl.parse().map_err(|e| {
                crate::Error::config("CACHE_TTL_MINUTES", &format!("Invalid TTL: {}", e))
            })?;
        }

        if let Ok(expiration) = std::env::var("SESSION_EXPIRATION_MINUTES") {
            settings.analytics.session_expiration_minutes = expiration.parse().map_err(|e| {
                crate::Error::config(
                    "SESSION_EXPIRATION_MINUTES",
                    &format!("Invalid expiration: {}", e),
                )
            })?;
        }

        if let Ok(enabled) = std::env::var("ANALYTICS_ENABLED") {
            settings.analytics.enabled = enabled.parse().unwrap_or(true);
        }

        // Load network/proxy settings
        settings.network.https_proxy = std::env::var("HTTPS_PROXY").ok();
        settings.network.http_proxy = std::env::var("HTTP_PROXY").ok();
        settings.network.all_proxy = std::env::var("ALL_PROXY").ok();

        // Load logging settings
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Ok(verbose) = std::env::var("VERBOSE") {
            settings.logging.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(settings)
    }

    /// Load settings from a TOML configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Merge settings with environment variable overrides
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        let env_settings = Self::from_env()?;
        let defaults = Self::default();

        if env_settings.portal.base_url != defaults.portal.base_url {
            self.portal.base_url = env_settings.portal.base_url;
        }

        if env_settings.portal.login_url != defaults.portal.login_url {
            self.portal.login_url = env_settings.portal.login_url;
        }

        if env_settings.cache.ttl_minutes != defaults.cache.ttl_minutes {
            self.cache.ttl_minutes = env_settings.cache.ttl_minutes;
        }

        if env_settings.analytics.session_expiration_minutes
            != defaults.analytics.session_expiration_minutes
        {
            self.analytics.session_expiration_minutes =
                env_settings.analytics.session_expiration_minutes;
        }

        // Proxy settings always override if present
        if env_settings.network.https_proxy.is_some() {
            self.network.https_proxy = env_settings.network.https_proxy;
        }
        if env_settings.network.http_proxy.is_some() {
            self.network.http_proxy = env_settings.network.http_proxy;
        }
        if env_settings.network.all_proxy.is_some() {
            self.network.all_proxy = env_settings.network.all_proxy;
        }

        Ok(self)
    }

    /// Get effective proxy URL based on priority
    pub fn get_proxy_url(&self) -> Option<String> {
        self.network
            .https_proxy
            .as_ref()
            .or(self.network.http_proxy.as_ref())
            .or(self.network.all_proxy.as_ref())
            .cloned()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.cache.ttl_minutes == 0 {
            return Err(crate::Error::config(
                "ttl_minutes",
                "Invalid cache TTL: cannot be 0",
            ));
        }

        url::Url::parse(&self.portal.base_url).map_err(|e| {
            crate::Error::config(
                "base_url",
                &format!("Invalid base URL '{}': {}", self.portal.base_url, e),
            )
        })?;

        // Validate log level
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        // Validate proxy URLs if present
        for (name, proxy_url) in [
            ("https_proxy", &self.network.https_proxy),
            ("http_proxy", &self.network.http_proxy),
            ("all_proxy", &self.network.all_proxy),
        ]
        .iter()
        {
            if let Some(url_str) = proxy_url
                && let Err(e) = url::Url::parse(url_str)
            {
                return Err(crate::Error::config(
                    *name,
                    &format!("Invalid proxy URL '{}': {}", url_str, e),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Static mutex to ensure environment variable tests don't interfere with each other
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.portal.base_url.contains("omniscapp.slt.lk"));
        assert_eq!(settings.cache.ttl_minutes, 15);
        assert_eq!(settings.analytics.session_expiration_minutes, 30);
        assert!(settings.analytics.enabled);
        assert_eq!(settings.network.request_timeout, 30);
    }

    #[test]
    fn test_cache_ttl_ms() {
        let settings = Settings::default();
        assert_eq!(settings.cache_ttl_ms(), 15 * 60 * 1000);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[portal]
base_url = "https://example.test/api"

[cache]
ttl_minutes = 60
        "#
        )
        .unwrap();

        let settings = Settings::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.portal.base_url, "https://example.test/api");
        assert_eq!(settings.cache.ttl_minutes, 60);
        // Untouched sections keep their defaults
        assert_eq!(settings.analytics.session_expiration_minutes, 30);
    }

    #[test]
    fn test_env_var_override() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        unsafe {
            std::env::set_var("CACHE_TTL_MINUTES", "45");
            std::env::set_var("SLT_BASE_URL", "https://staging.test/api");
        }

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.cache.ttl_minutes, 45);
        assert_eq!(settings.portal.base_url, "https://staging.test/api");

        unsafe {
            std::env::remove_var("CACHE_TTL_MINUTES");
            std::env::remove_var("SLT_BASE_URL");
        }
    }

    #[test]
    fn test_proxy_priority() {
        let mut settings = Settings::default();
        settings.network.https_proxy = Some("https://proxy1:8080".to_string());
        settings.network.http_proxy = Some("http://proxy2:8080".to_string());
        settings.network.all_proxy = Some("socks5://proxy3:1080".to_string());

        // HTTPS proxy should have highest priority
        assert_eq!(settings.get_proxy_url().unwrap(), "https://proxy1:8080");

        settings.network.https_proxy = None;
        assert_eq!(settings.get_proxy_url().unwrap(), "http://proxy2:8080");

        settings.network.http_proxy = None;
        assert_eq!(settings.get_proxy_url().unwrap(), "socks5://proxy3:1080");
    }

    #[test]
    fn test_validation_success() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_ttl() {
        let mut settings = Settings::default();
        settings.cache.ttl_minutes = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let mut settings = Settings::default();
        settings.portal.base_url = "not a url".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_proxy_url() {
        let mut settings = Settings::default();
        settings.network.https_proxy = Some("invalid-url".to_string());
        assert!(settings.validate().is_err());
    }
}

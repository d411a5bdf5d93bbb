//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to development defaults:
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DEFAULT_STORE` - Store code of last resort (default: DEFAULT)
//! - `STOREFRONT_DEFAULT_TEMPLATE` - Navigation template assigned to stores
//!   without one (default: default)
//! - `STOREFRONT_SHOP_SCHEME` - URL scheme injected into merchant configs
//!   (default: https)
//! - `STOREFRONT_SOCIAL_APP_ID` - Social app ID injected into merchant configs
//! - `STOREFRONT_CACHE_CAPACITY` - General content cache capacity (default: 1000)
//! - `STOREFRONT_CACHE_TTL_SECS` - General content cache eviction (default: 300)
//! - `STOREFRONT_NAV_CACHE_CAPACITY` - Navigation cache capacity (default: 128)
//! - `STOREFRONT_NAV_CACHE_TTL_SECS` - Navigation cache eviction (default: 3600)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Store code used when neither session nor request names one
    pub default_store_code: String,
    /// Navigation template assigned to stores that have none configured
    pub default_template: String,
    /// URL scheme published into every store's configuration map
    pub shop_scheme: String,
    /// Social app ID published into every store's configuration map
    pub social_app_id: Option<String>,
    /// Content cache sizing
    pub cache: CacheSettings,
}

/// Sizing and eviction profiles for the two content caches.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// General-purpose cache capacity (entries)
    pub general_capacity: u64,
    /// General-purpose cache eviction window (seconds)
    pub general_ttl_secs: u64,
    /// Navigation-tree cache capacity (entries)
    pub navigation_capacity: u64,
    /// Navigation-tree cache eviction window (seconds)
    pub navigation_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            general_capacity: 1000,
            general_ttl_secs: 300,
            navigation_capacity: 128,
            navigation_ttl_secs: 3600,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = CacheSettings::default();
        Ok(Self {
            host: parse_env_or("STOREFRONT_HOST", "127.0.0.1".parse::<IpAddr>().ok())?,
            port: parse_env_or("STOREFRONT_PORT", Some(3000))?,
            default_store_code: get_env_or_default("STOREFRONT_DEFAULT_STORE", "DEFAULT"),
            default_template: get_env_or_default("STOREFRONT_DEFAULT_TEMPLATE", "default"),
            shop_scheme: get_env_or_default("STOREFRONT_SHOP_SCHEME", "https"),
            social_app_id: get_optional_env("STOREFRONT_SOCIAL_APP_ID"),
            cache: CacheSettings {
                general_capacity: parse_env_or(
                    "STOREFRONT_CACHE_CAPACITY",
                    Some(defaults.general_capacity),
                )?,
                general_ttl_secs: parse_env_or(
                    "STOREFRONT_CACHE_TTL_SECS",
                    Some(defaults.general_ttl_secs),
                )?,
                navigation_capacity: parse_env_or(
                    "STOREFRONT_NAV_CACHE_CAPACITY",
                    Some(defaults.navigation_capacity),
                )?,
                navigation_ttl_secs: parse_env_or(
                    "STOREFRONT_NAV_CACHE_TTL_SECS",
                    Some(defaults.navigation_ttl_secs),
                )?,
            },
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// A complete development configuration without touching the environment.
    #[must_use]
    pub fn for_development() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            default_store_code: "DEFAULT".to_owned(),
            default_template: "default".to_owned(),
            shop_scheme: "https".to_owned(),
            social_app_id: None,
            cache: CacheSettings::default(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to a default when unset.
fn parse_env_or<T>(key: &str, default: Option<T>) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => default.ok_or_else(|| {
            ConfigError::InvalidEnvVar(key.to_string(), "missing with no default".to_string())
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::for_development();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_cache_settings_profiles_differ() {
        let settings = CacheSettings::default();
        // The navigation cache holds fewer, longer-lived entries
        assert!(settings.navigation_capacity < settings.general_capacity);
        assert!(settings.navigation_ttl_secs > settings.general_ttl_secs);
    }
}

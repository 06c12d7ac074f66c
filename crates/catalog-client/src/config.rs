//! Connection settings for the catalog service.
//!
//! Defaults point at the public TheMealDB v1 API with the transport's own
//! timeout behaviour. Environment variables override the defaults, command
//! line flags override both.

use std::env;

/// Public catalog endpoint used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Env var holding the catalog base URL
pub const BASE_URL_ENV: &str = "RECIPE_CATALOG_URL";

/// Env var holding a request timeout in seconds
pub const TIMEOUT_ENV: &str = "RECIPE_CATALOG_TIMEOUT_SECS";

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    /// `None` leaves timeouts to the HTTP transport
    pub timeout_secs: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl CatalogConfig {
    /// Defaults, overridden by `RECIPE_CATALOG_URL` and
    /// `RECIPE_CATALOG_TIMEOUT_SECS` when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var(BASE_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout_secs: parse_env_opt(TIMEOUT_ENV).or(defaults.timeout_secs),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Full URL of an endpoint such as `filter.php`.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}

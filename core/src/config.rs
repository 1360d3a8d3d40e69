//! Backend base URL resolution.
//!
//! The URL comes from `BACKEND_URL`, read first from the process
//! environment and then from the value baked in at build time. Empty values
//! count as unset. Resolution happens once per process.

use std::env;
use std::sync::OnceLock;

use tracing::debug;

pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

const BUILD_TIME_BASE_URL: Option<&str> = option_env!("BACKEND_URL");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(env::var(BACKEND_URL_VAR).ok().as_deref(), BUILD_TIME_BASE_URL)
    }

    /// First non-empty of `runtime`, `build_time`, then the local default.
    pub fn resolve(runtime: Option<&str>, build_time: Option<&str>) -> Self {
        let base_url = [runtime, build_time]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        debug!(base_url, "resolved backend base url");
        Self::new(base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

static CONFIG: OnceLock<ApiConfig> = OnceLock::new();

/// Process-wide config, resolved from the environment on first use.
pub fn config() -> &'static ApiConfig {
    CONFIG.get_or_init(ApiConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_value_wins() {
        let cfg = ApiConfig::resolve(Some("https://api.example.com"), Some("http://build:1"));
        assert_eq!(cfg.base_url, "https://api.example.com");
    }

    #[test]
    fn build_time_value_is_next() {
        let cfg = ApiConfig::resolve(None, Some("http://build:1"));
        assert_eq!(cfg.base_url, "http://build:1");
    }

    #[test]
    fn empty_values_fall_back_to_default() {
        let cfg = ApiConfig::resolve(Some(""), Some("  "));
        assert_eq!(cfg, ApiConfig::default());
        assert_eq!(ApiConfig::resolve(None, None).base_url, "http://localhost:3001");
    }

    #[test]
    fn global_config_is_stable() {
        assert!(std::ptr::eq(config(), config()));
    }
}

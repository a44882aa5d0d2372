//! Process configuration
//!
//! Read once at startup from the environment, then injected into handlers
//! as immutable state. Nothing here is mutated after load.

use crate::negotiate::DocsPolicy;
use crate::validator::MAX_NUMBER_MAGNITUDE;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub nebius_api_key: Option<String>,
    pub grok_api_key: Option<String>,
    pub max_magnitude: f64,
    pub docs_policy: DocsPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables, with defaults for
    /// everything except the provider API keys (absent keys degrade the
    /// chat endpoints to a provider error, not a startup failure).
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .or_else(|_| env::var("API_PORT"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        let max_magnitude = env::var("MAX_NUMBER_MAGNITUDE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &f64| v.is_finite() && *v > 0.0)
            .unwrap_or(MAX_NUMBER_MAGNITUDE);

        let docs_policy = match env::var("DOCS_POLICY").as_deref() {
            Ok("always") => DocsPolicy::Always,
            _ => DocsPolicy::WhenParamsAbsent,
        };

        Self {
            port,
            nebius_api_key: non_empty(env::var("NEBIUS_API_KEY").ok()),
            grok_api_key: non_empty(env::var("GROK_API_KEY").ok()),
            max_magnitude,
            docs_policy,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            nebius_api_key: None,
            grok_api_key: None,
            max_magnitude: MAX_NUMBER_MAGNITUDE,
            docs_policy: DocsPolicy::default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_contract() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_magnitude, 1e100);
        assert_eq!(config.docs_policy, DocsPolicy::WhenParamsAbsent);
        assert!(config.nebius_api_key.is_none());
    }

    #[test]
    fn blank_api_keys_are_treated_as_absent() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some("key".to_string())), Some("key".to_string()));
    }
}

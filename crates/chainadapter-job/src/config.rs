//! Adapter configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the shasta testnet setup. Environment variables override file
//! values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use chainadapter_http::{Backoff, HttpClientConfig, RetryConfig};

use crate::error::ConfigError;

pub const ENV_ENDPOINT_URL: &str = "CHAINADAPTER_ENDPOINT_URL";
pub const ENV_OWNER_ADDRESS: &str = "CHAINADAPTER_OWNER_ADDRESS";
pub const ENV_CONTRACT_ADDRESS: &str = "CHAINADAPTER_CONTRACT_ADDRESS";
pub const ENV_FUNCTION_SELECTOR: &str = "CHAINADAPTER_FUNCTION_SELECTOR";
pub const ENV_TIMEOUT_MS: &str = "CHAINADAPTER_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "CHAINADAPTER_MAX_RETRIES";

/// Static parameters of the contract call plus HTTP settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// `triggerconstantcontract` endpoint.
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    #[serde(default = "default_owner_address")]
    pub owner_address: String,
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    #[serde(default = "default_function_selector")]
    pub function_selector: String,
    /// Addresses above are base58 (`true`) or hex (`false`).
    #[serde(default = "bool_true")]
    pub visible: bool,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_endpoint_url() -> String {
    "https://api.shasta.trongrid.io/wallet/triggerconstantcontract".into()
}
fn default_owner_address() -> String {
    "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb".into()
}
fn default_contract_address() -> String {
    "TBSo1pthwZJkkXLwfNUC3wzKG2K7wt2Zvg".into()
}
fn default_function_selector() -> String {
    "confirmedTokensForUser(address)".into()
}
fn bool_true() -> bool { true }
fn default_timeout_ms() -> u64 { 30_000 }

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            owner_address: default_owner_address(),
            contract_address: default_contract_address(),
            function_selector: default_function_selector(),
            visible: true,
            request_timeout_ms: default_timeout_ms(),
            retry: RetrySettings::default(),
        }
    }
}

/// Retry settings in config-file units.
///
/// A `multiplier` of 1.0 or less waits `delay_ms` before every retry;
/// above 1.0 the wait grows geometrically up to `max_delay_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub delay_ms: u64,
    pub max_delay_ms: u64,
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay_ms: 1_000,
            max_delay_ms: 10_000,
            multiplier: 1.0,
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        let delay = Duration::from_millis(self.delay_ms);
        let backoff = if self.multiplier > 1.0 {
            Backoff::Exponential {
                initial: delay,
                max: Duration::from_millis(self.max_delay_ms),
                multiplier: self.multiplier,
            }
        } else {
            Backoff::Fixed(delay)
        };
        RetryConfig {
            max_retries: self.max_retries,
            backoff,
        }
    }
}

impl AdapterConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `CHAINADAPTER_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_ENDPOINT_URL) {
            self.endpoint_url = v;
        }
        if let Some(v) = lookup(ENV_OWNER_ADDRESS) {
            self.owner_address = v;
        }
        if let Some(v) = lookup(ENV_CONTRACT_ADDRESS) {
            self.contract_address = v;
        }
        if let Some(v) = lookup(ENV_FUNCTION_SELECTOR) {
            self.function_selector = v;
        }
        if let Some(v) = lookup(ENV_TIMEOUT_MS) {
            self.request_timeout_ms = parse_env(ENV_TIMEOUT_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_RETRIES) {
            self.retry.max_retries = parse_env(ENV_MAX_RETRIES, &v)?;
        }
        Ok(self)
    }

    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            ..Default::default()
        }
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnv {
        key: key.into(),
        value: value.into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg: AdapterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, AdapterConfig::default());
        assert_eq!(cfg.function_selector, "confirmedTokensForUser(address)");
        assert!(cfg.visible);
    }

    #[test]
    fn partial_retry_section() {
        let cfg: AdapterConfig = serde_json::from_str(r#"{"retry": {"max_retries": 7}}"#).unwrap();
        assert_eq!(cfg.retry.max_retries, 7);
        assert_eq!(cfg.retry.delay_ms, 1_000);
    }

    #[test]
    fn overrides_apply() {
        let env: HashMap<&str, &str> = [
            (ENV_ENDPOINT_URL, "http://localhost:8090/wallet/triggerconstantcontract"),
            (ENV_MAX_RETRIES, "0"),
            (ENV_TIMEOUT_MS, " 1500 "),
        ]
        .into_iter()
        .collect();
        let cfg = AdapterConfig::default()
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg.endpoint_url, "http://localhost:8090/wallet/triggerconstantcontract");
        assert_eq!(cfg.retry.max_retries, 0);
        assert_eq!(cfg.request_timeout_ms, 1_500);
        assert_eq!(cfg.http_config().request_timeout, Duration::from_millis(1_500));
    }

    #[test]
    fn bad_override_is_an_error() {
        let err = AdapterConfig::default()
            .apply_overrides(|k| (k == ENV_MAX_RETRIES).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn default_retry_is_fixed_delay() {
        let rc = RetrySettings::default().to_retry_config();
        assert_eq!(rc, RetryConfig::default());
    }

    #[test]
    fn multiplier_above_one_selects_exponential() {
        let settings = RetrySettings {
            multiplier: 3.0,
            ..Default::default()
        };
        assert_eq!(
            settings.to_retry_config().backoff,
            Backoff::Exponential {
                initial: Duration::from_secs(1),
                max: Duration::from_secs(10),
                multiplier: 3.0,
            }
        );
    }
}

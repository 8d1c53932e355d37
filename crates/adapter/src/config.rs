// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Adapter Configuration
//!
//! This module provides the options accepted by the Wherobots adapter.
//!
//! ## Configuration Structure
//!
//! - Connection string: the base domain of the Wherobots stack
//! - Credentials: bearer token or API key (at least one)
//! - Runtime and region selectors for new SQL sessions
//! - Direct SQL session URL, bypassing session provisioning
//! - Catalog fetch tuning (concurrency, request timeout)
//!
//! ## Example
//!
//! ```rust,ignore
//! use harlequin_wherobots_adapter::AdapterOptions;
//!
//! let options = AdapterOptions {
//!     conn_str: vec!["cloud.wherobots.com".to_string()],
//!     api_key: Some("my-key".to_string()),
//!     ..Default::default()
//! };
//! options.validate()?;
//! assert_eq!(options.host(), "api.cloud.wherobots.com");
//! ```

use harlequin_wherobots_catalog::http::DEFAULT_TIMEOUT_SECS;
use harlequin_wherobots_catalog::{
    CatalogResult, Credentials, DEFAULT_MAX_CONCURRENT_FETCHES, MetadataClientConfig,
    WherobotsCatalog,
};
use serde_json::Value;

use crate::driver::ConnectParams;

/// API host used when no connection string is given
pub const DEFAULT_ENDPOINT: &str = "api.cloud.wherobots.com";

/// Options of one adapter profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOptions {
    /// At most one base domain, e.g. `cloud.wherobots.com`
    pub conn_str: Vec<String>,

    /// Bearer token; takes precedence over the API key
    pub token: Option<String>,

    pub api_key: Option<String>,

    /// Runtime to provision, e.g. `TINY`
    pub runtime: Option<String>,

    /// Region to launch into
    pub region: Option<String>,

    /// WebSocket URL of an existing SQL session
    pub ws_url: Option<String>,

    /// Maximum table schema requests in flight during a catalog fetch
    pub max_concurrent_fetches: usize,

    /// Timeout for each metadata request (seconds)
    pub request_timeout_secs: u64,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            conn_str: Vec::new(),
            token: None,
            api_key: None,
            runtime: None,
            region: None,
            ws_url: None,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AdapterOptions {
    /// Validate the options
    ///
    /// Checks that:
    /// - At most one connection string is given
    /// - A token or an API key is present
    /// - Optional selectors are not empty
    /// - Tuning values are positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.conn_str.len() > 1 {
            return Err(ConfigError::TooManyConnectionStrings(self.conn_str.len()));
        }

        if self.conn_str.first().is_some_and(|c| c.trim().is_empty()) {
            return Err(ConfigError::EmptyOption("conn_str"));
        }

        if self.credentials().is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        for (name, value) in [
            ("token", &self.token),
            ("api-key", &self.api_key),
            ("runtime", &self.runtime),
            ("region", &self.region),
            ("ws-url", &self.ws_url),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::EmptyOption(name));
            }
        }

        if self.max_concurrent_fetches == 0 {
            return Err(ConfigError::InvalidTuning {
                reason: "max_concurrent_fetches must be > 0".to_string(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTuning {
                reason: "request_timeout_secs must be > 0".to_string(),
            });
        }

        Ok(())
    }

    /// API host derived from the connection string
    pub fn host(&self) -> String {
        match self.conn_str.first() {
            Some(domain) => format!("api.{}", domain.trim()),
            None => DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.token.clone(), self.api_key.clone())
    }

    /// HTTPS catalog source for the derived host
    pub fn catalog(&self) -> CatalogResult<WherobotsCatalog> {
        let config = MetadataClientConfig::for_host(&self.host())
            .with_credentials(self.credentials())
            .with_timeout(self.request_timeout_secs);
        WherobotsCatalog::with_config(config)?.with_max_concurrent_fetches(self.max_concurrent_fetches)
    }

    /// Driver parameters for host-based session setup
    pub fn connect_params(&self) -> ConnectParams {
        ConnectParams {
            host: self.host(),
            token: self.token.clone(),
            api_key: self.api_key.clone(),
            runtime: self.runtime.as_deref().map(selector_name),
            region: self.region.as_deref().map(selector_name),
        }
    }

    /// Parse options from a host profile payload.
    ///
    /// Expected shape:
    /// {
    ///   "conn_str": ["cloud.wherobots.com"],
    ///   "token" | "api-key": "...",
    ///   "runtime": "...", "region": "...", "ws-url": "...",
    ///   "max-concurrent-fetches": 5, "request-timeout": 30
    /// }
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigError> {
        let object = settings.as_object().ok_or_else(|| ConfigError::InvalidSetting {
            key: "<root>".to_string(),
            reason: "expected an object".to_string(),
        })?;

        let conn_str = match object.get("conn_str") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid("conn_str", "expected strings"))
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(invalid("conn_str", "expected a string or a list")),
        };

        let mut options = Self {
            conn_str,
            token: text_setting(settings, "token")?,
            api_key: text_setting(settings, "api-key")?,
            runtime: text_setting(settings, "runtime")?,
            region: text_setting(settings, "region")?,
            ws_url: text_setting(settings, "ws-url")?,
            ..Default::default()
        };

        if let Some(max) = number_setting(settings, "max-concurrent-fetches")? {
            options.max_concurrent_fetches = usize::try_from(max)
                .map_err(|_| invalid("max-concurrent-fetches", "out of range"))?;
        }
        if let Some(timeout) = number_setting(settings, "request-timeout")? {
            options.request_timeout_secs = timeout;
        }

        Ok(options)
    }
}

/// Driver selector names are upper-case enum member names
fn selector_name(value: &str) -> String {
    value.trim().to_uppercase()
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn text_setting(settings: &Value, key: &str) -> Result<Option<String>, ConfigError> {
    match settings.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(key, "expected a string")),
    }
}

fn number_setting(settings: &Value, key: &str) -> Result<Option<u64>, ConfigError> {
    match settings.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| invalid(key, "expected a non-negative integer")),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// More than one connection string
    #[error("Cannot provide more than one connection string for the Wherobots adapter (got {0})")]
    TooManyConnectionStrings(usize),

    /// Neither token nor API key
    #[error("One of token or api-key must be provided")]
    MissingCredentials,

    /// An option was given but empty
    #[error("Option '{0}' must not be empty")]
    EmptyOption(&'static str),

    /// Invalid tuning value
    #[error("Invalid catalog tuning: {reason}")]
    InvalidTuning { reason: String },

    /// Malformed settings payload
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_key() -> AdapterOptions {
        AdapterOptions {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_host() {
        assert_eq!(with_key().host(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_host_from_conn_str() {
        let options = AdapterOptions {
            conn_str: vec!["staging.wherobots.com".to_string()],
            ..with_key()
        };
        assert_eq!(options.host(), "api.staging.wherobots.com");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_too_many_conn_str() {
        let options = AdapterOptions {
            conn_str: vec!["a.com".to_string(), "b.com".to_string()],
            ..with_key()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::TooManyConnectionStrings(2))
        ));
    }

    #[test]
    fn test_missing_credentials() {
        let options = AdapterOptions::default();
        assert!(matches!(options.validate(), Err(ConfigError::MissingCredentials)));
    }

    #[test]
    fn test_empty_selector_rejected() {
        let options = AdapterOptions {
            region: Some(" ".to_string()),
            ..with_key()
        };
        assert!(matches!(options.validate(), Err(ConfigError::EmptyOption("region"))));
    }

    #[test]
    fn test_zero_tuning_rejected() {
        let options = AdapterOptions {
            max_concurrent_fetches: 0,
            ..with_key()
        };
        assert!(matches!(options.validate(), Err(ConfigError::InvalidTuning { .. })));

        let options = AdapterOptions {
            request_timeout_secs: 0,
            ..with_key()
        };
        assert!(matches!(options.validate(), Err(ConfigError::InvalidTuning { .. })));
    }

    #[test]
    fn test_connect_params_upper_case_selectors() {
        let options = AdapterOptions {
            runtime: Some("tiny".to_string()),
            region: Some("aws_us_west_2".to_string()),
            ..with_key()
        };
        let params = options.connect_params();
        assert_eq!(params.host, DEFAULT_ENDPOINT);
        assert_eq!(params.runtime.as_deref(), Some("TINY"));
        assert_eq!(params.region.as_deref(), Some("AWS_US_WEST_2"));
        assert_eq!(params.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_catalog_uses_tuning() {
        let options = AdapterOptions {
            max_concurrent_fetches: 7,
            ..with_key()
        };
        assert_eq!(options.catalog().unwrap().max_concurrent_fetches(), 7);
    }

    #[test]
    fn test_from_settings() {
        let options = AdapterOptions::from_settings(&json!({
            "conn_str": ["cloud.wherobots.com"],
            "token": "tok",
            "runtime": "SMALL",
            "ws-url": "wss://session.example/sql",
            "max-concurrent-fetches": 8
        }))
        .unwrap();

        assert_eq!(options.conn_str, vec!["cloud.wherobots.com".to_string()]);
        assert_eq!(options.token.as_deref(), Some("tok"));
        assert_eq!(options.runtime.as_deref(), Some("SMALL"));
        assert_eq!(options.ws_url.as_deref(), Some("wss://session.example/sql"));
        assert_eq!(options.max_concurrent_fetches, 8);
        assert_eq!(options.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_settings_single_conn_str() {
        let options =
            AdapterOptions::from_settings(&json!({"conn_str": "cloud.wherobots.com"})).unwrap();
        assert_eq!(options.conn_str.len(), 1);
    }

    #[test]
    fn test_from_settings_rejects_wrong_types() {
        let err = AdapterOptions::from_settings(&json!({"token": 42})).unwrap_err();
        assert!(err.to_string().contains("token"));

        let err = AdapterOptions::from_settings(&json!({"request-timeout": "soon"})).unwrap_err();
        assert!(err.to_string().contains("request-timeout"));

        assert!(AdapterOptions::from_settings(&json!(["not", "an", "object"])).is_err());
    }
}

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # HTTP metadata client
//!
//! reqwest implementation of [`MetadataClient`] for the Wherobots REST API.
//! Authentication headers are resolved once when the client is built and
//! reused, read-only, by every concurrent request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use tracing::debug;

use crate::auth::Credentials;
use crate::error::{CatalogError, CatalogResult};
use crate::r#trait::{MetadataClient, MetadataResponse};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the metadata HTTP client
#[derive(Debug, Clone)]
pub struct MetadataClientConfig {
    /// Service root, e.g. `https://api.cloud.wherobots.com`
    pub base_url: String,
    pub credentials: Credentials,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl MetadataClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: Credentials::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// HTTPS root for an API host such as `api.cloud.wherobots.com`
    pub fn for_host(host: &str) -> Self {
        Self::new(format!("https://{}", host))
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// reqwest-backed metadata client
pub struct HttpMetadataClient {
    base_url: Url,
    client: Client,
}

impl HttpMetadataClient {
    pub fn new(config: MetadataClientConfig) -> CatalogResult<Self> {
        if config.timeout_secs == 0 {
            return Err(CatalogError::ConfigurationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CatalogError::ConfigurationError(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::ConfigurationError(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .default_headers(Self::auth_headers(&config.credentials)?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CatalogError::ConnectionFailed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { base_url, client })
    }

    fn auth_headers(credentials: &Credentials) -> CatalogResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in credentials.headers() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                CatalogError::ConfigurationError(format!("invalid header name '{}': {}", name, e))
            })?;
            let mut value = HeaderValue::from_str(&value).map_err(|e| {
                CatalogError::ConfigurationError(format!("invalid credential value: {}", e))
            })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl MetadataClient for HttpMetadataClient {
    async fn get(&self, segments: &[&str]) -> CatalogResult<MetadataResponse> {
        let url = self.url_for(segments);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::RequestFailed(e.to_string()))?;

        Ok(MetadataResponse { status, body })
    }
}

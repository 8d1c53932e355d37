// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # MetadataClient trait for the catalog REST endpoints
//!
//! The catalog builder only needs authenticated GETs that return a status
//! code and a body. Keeping that behind a trait lets tests and alternative
//! transports stand in for the reqwest client.

use serde::de::DeserializeOwned;

use crate::error::{CatalogError, CatalogResult};

/// Raw answer from a metadata endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataResponse {
    /// HTTP status code
    pub status: u16,
    /// Undecoded response body
    pub body: String,
}

impl MetadataResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> CatalogResult<T> {
        serde_json::from_str(&self.body).map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}

/// Source of catalog metadata responses
///
/// Implementations must be shareable across the fan-out tasks.
#[async_trait::async_trait]
pub trait MetadataClient: Send + Sync {
    /// Issue a GET for the path built from `segments` below the service root
    ///
    /// # Arguments
    ///
    /// * `segments` - Unencoded path segments, e.g. `["catalog", "hierarchy"]`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RequestFailed` when no response was received.
    /// A response with an error status is not an error at this level.
    async fn get(&self, segments: &[&str]) -> CatalogResult<MetadataResponse>;
}

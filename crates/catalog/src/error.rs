// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! Only failures that make the whole catalog meaningless are represented
//! here. Per-table and per-field problems are absorbed by the schema fetcher
//! and never become a `CatalogError`.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during Catalog operations
#[derive(Debug, Error, Clone, Serialize)]
pub enum CatalogError {
    /// Failed to set up the HTTP client
    #[error("Failed to create metadata client: {0}")]
    ConnectionFailed(String),

    /// The request never produced a response (DNS, TLS, timeout, reset)
    #[error("Metadata request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status
    #[error("Unexpected HTTP {status} while reading {resource}")]
    UnexpectedStatus { status: u16, resource: String },

    /// The response body could not be decoded
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    /// Invalid catalog configuration
    #[error("Invalid catalog configuration: {0}")]
    ConfigurationError(String),
}

impl CatalogError {
    /// Whether the error came from an undecodable response rather than transport
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, CatalogError::InvalidResponse(_))
    }
}

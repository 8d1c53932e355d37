// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Adapter error types
//!
//! Errors surfaced to the host application. Each variant corresponds to one
//! failure message in the host UI.

use harlequin_wherobots_catalog::CatalogError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::driver::DriverError;

/// Result type alias for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors reported to the host application
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Invalid adapter options
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The driver could not establish a session
    #[error("Failed to connect to Wherobots: {0}")]
    ConnectionFailed(#[source] DriverError),

    /// The metadata client could not be created
    #[error("Failed to set up the Wherobots catalog client: {0}")]
    CatalogClient(#[source] CatalogError),

    /// The connection was already closed
    #[error("Connection to Wherobots is closed")]
    ConnectionClosed,

    /// A query failed on the remote side
    #[error("Query error: {0}")]
    QueryFailed(#[source] DriverError),

    /// The cursor was closed before its results were fetched
    #[error("Query error: cursor was closed before results were fetched")]
    CursorClosed,

    /// The catalog root could not be read
    #[error("{message}")]
    CatalogUnavailable {
        message: &'static str,
        #[source]
        source: CatalogError,
    },

    /// The log file could not be opened or a subscriber was already installed
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl AdapterError {
    /// Wrap a fatal catalog error with the message shown by the host
    pub fn catalog_unavailable(source: CatalogError) -> Self {
        let message = if source.is_invalid_response() {
            "Invalid catalog data!"
        } else {
            "Error reading catalog information from Wherobots"
        };
        AdapterError::CatalogUnavailable { message, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_catalog_unavailable_messages() {
        let err = AdapterError::catalog_unavailable(CatalogError::UnexpectedStatus {
            status: 503,
            resource: "catalog/hierarchy".to_string(),
        });
        assert_eq!(err.to_string(), "Error reading catalog information from Wherobots");
        assert!(err.source().unwrap().to_string().contains("503"));

        let err = AdapterError::catalog_unavailable(CatalogError::InvalidResponse(
            "missing field `catalogs`".to_string(),
        ));
        assert_eq!(err.to_string(), "Invalid catalog data!");
    }

    #[test]
    fn test_query_failed_keeps_cause() {
        let err = AdapterError::QueryFailed(DriverError::Database("table not found".to_string()));
        assert_eq!(err.to_string(), "Query error: Database error: table not found");
    }
}

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Live Wherobots Catalog implementation
//!
//! Reads the catalog hierarchy from a Wherobots API host and fills in table
//! columns with concurrent schema requests.
//!
//! ## Features
//!
//! - Bounded schema fan-out (default: 5 requests in flight)
//! - Request timeout support (default: 30 seconds)
//! - Failed table schemas degrade to empty tables
//!
//! ## Usage
//!
//! ```rust,ignore
//! use harlequin_wherobots_catalog::{Credentials, WherobotsCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = WherobotsCatalog::connect(
//!         "api.cloud.wherobots.com",
//!         Credentials::bearer("token"),
//!     )?
//!     .with_max_concurrent_fetches(8)?;
//!
//!     let tree = catalog.get_catalog().await?;
//!     println!("{}", tree);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use harlequin_wherobots_ir::Catalog;
use tracing::{debug, info};

use crate::auth::Credentials;
use crate::error::{CatalogError, CatalogResult};
use crate::fanout::{DEFAULT_MAX_CONCURRENT_FETCHES, FanOut};
use crate::hierarchy::build_catalog;
use crate::http::{HttpMetadataClient, MetadataClientConfig};
use crate::r#trait::MetadataClient;
use crate::wire::HierarchyResponse;

const HIERARCHY_PATH: [&str; 2] = ["catalog", "hierarchy"];

/// Catalog source backed by the Wherobots metadata endpoints
pub struct WherobotsCatalog {
    client: Arc<dyn MetadataClient>,
    max_concurrent_fetches: usize,
}

impl WherobotsCatalog {
    /// Create a catalog over an existing metadata client
    pub fn new(client: Arc<dyn MetadataClient>) -> Self {
        Self {
            client,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Create a catalog talking HTTPS to `host` with default settings
    pub fn connect(host: &str, credentials: Credentials) -> CatalogResult<Self> {
        Self::with_config(MetadataClientConfig::for_host(host).with_credentials(credentials))
    }

    /// Create a catalog from a full client configuration
    pub fn with_config(config: MetadataClientConfig) -> CatalogResult<Self> {
        let client = HttpMetadataClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Builder method: set the schema fetch concurrency ceiling
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ConfigurationError` if `max` is 0.
    pub fn with_max_concurrent_fetches(mut self, max: usize) -> CatalogResult<Self> {
        if max == 0 {
            return Err(CatalogError::ConfigurationError(
                "max_concurrent_fetches must be greater than 0".to_string(),
            ));
        }
        self.max_concurrent_fetches = max;
        Ok(self)
    }

    /// Get the concurrency ceiling
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    /// Fetch and decode the catalog hierarchy
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RequestFailed` if no response was received,
    /// `CatalogError::UnexpectedStatus` for a non-2xx status, and
    /// `CatalogError::InvalidResponse` if the body is not a hierarchy.
    pub async fn fetch_hierarchy(&self) -> CatalogResult<HierarchyResponse> {
        let response = self.client.get(&HIERARCHY_PATH).await?;
        if !response.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: response.status,
                resource: HIERARCHY_PATH.join("/"),
            });
        }
        response.json()
    }

    /// Fetch the full catalog tree, columns included
    ///
    /// Fails only when the hierarchy itself cannot be read. Tables whose
    /// schema cannot be read are returned without columns.
    pub async fn get_catalog(&self) -> CatalogResult<Catalog> {
        info!("Reading catalog hierarchy ...");
        let hierarchy = self.fetch_hierarchy().await?;
        debug!(
            "Hierarchy has {} catalogs and {} tables",
            hierarchy.catalogs.len(),
            hierarchy.table_count()
        );

        let fan_out = FanOut::new(self.max_concurrent_fetches)?;
        let items = build_catalog(&hierarchy, Arc::clone(&self.client), fan_out).await;

        let catalog = Catalog::new(items);
        info!("Catalog loaded with {} nodes", catalog.node_count());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_defaults() {
        let catalog =
            WherobotsCatalog::connect("api.cloud.wherobots.com", Credentials::api_key("k")).unwrap();
        assert_eq!(catalog.max_concurrent_fetches(), DEFAULT_MAX_CONCURRENT_FETCHES);
    }

    #[test]
    fn test_with_max_concurrent_fetches() {
        let catalog = WherobotsCatalog::connect("localhost", Credentials::default())
            .unwrap()
            .with_max_concurrent_fetches(2)
            .unwrap();
        assert_eq!(catalog.max_concurrent_fetches(), 2);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = WherobotsCatalog::connect("localhost", Credentials::default())
            .unwrap()
            .with_max_concurrent_fetches(0);
        assert!(matches!(result, Err(CatalogError::ConfigurationError(_))));
    }
}

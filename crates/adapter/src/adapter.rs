// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Wherobots adapter
//!
//! Entry point used by the host: validates the options, opens a driver
//! session and prepares the catalog source for the same stack.

use std::sync::Arc;

use harlequin_wherobots_catalog::{MetadataClient, WherobotsCatalog};
use tracing::{error, info};

use crate::config::AdapterOptions;
use crate::connection::WherobotsConnection;
use crate::driver::Driver;
use crate::error::{AdapterError, AdapterResult};

/// Host-facing adapter for one connection profile
pub struct WherobotsAdapter {
    options: AdapterOptions,
    driver: Arc<dyn Driver>,
    metadata_client: Option<Arc<dyn MetadataClient>>,
}

impl WherobotsAdapter {
    pub fn new(options: AdapterOptions, driver: Arc<dyn Driver>) -> Self {
        Self {
            options,
            driver,
            metadata_client: None,
        }
    }

    /// Builder method: read the catalog through `client` instead of HTTPS
    pub fn with_metadata_client(mut self, client: Arc<dyn MetadataClient>) -> Self {
        self.metadata_client = Some(client);
        self
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Build the catalog source configured by the options
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::CatalogClient` if the HTTP client cannot be
    /// built or the concurrency ceiling is rejected.
    pub fn catalog(&self) -> AdapterResult<WherobotsCatalog> {
        let catalog = match &self.metadata_client {
            Some(client) => WherobotsCatalog::new(Arc::clone(client))
                .with_max_concurrent_fetches(self.options.max_concurrent_fetches),
            None => self.options.catalog(),
        };
        catalog.map_err(AdapterError::CatalogClient)
    }

    /// Open a connection
    ///
    /// With `ws_url` set the driver attaches to that session directly,
    /// otherwise it provisions one through the API host.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Config` for invalid options and
    /// `AdapterError::ConnectionFailed` if the driver cannot connect.
    pub async fn connect(&self) -> AdapterResult<WherobotsConnection> {
        self.options.validate()?;
        let catalog = self.catalog()?;

        let result = match &self.options.ws_url {
            Some(ws_url) => {
                info!("Connecting to Wherobots SQL session at {} ...", ws_url);
                self.driver
                    .connect_direct(ws_url, &self.options.credentials().headers())
                    .await
            }
            None => {
                let params = self.options.connect_params();
                info!("Connecting to Wherobots through {} ...", params.host);
                self.driver.connect(&params).await
            }
        };

        let conn = result.map_err(|e| {
            error!("Failed to connect to Wherobots: {}", e);
            AdapterError::ConnectionFailed(e)
        })?;

        Ok(WherobotsConnection::new(conn, catalog))
    }
}

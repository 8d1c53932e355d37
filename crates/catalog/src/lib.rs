// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Harlequin Wherobots - Catalog Layer
//!
//! This crate fetches the Wherobots catalog hierarchy and turns it into the
//! tree displayed by the host's catalog browser.
//!
//! ## Architecture
//!
//! ```text
//!   WherobotsCatalog::get_catalog
//!          │  GET catalog/hierarchy            (fatal on failure)
//!          ↓
//!   build_catalog ── skeleton catalog → db → table nodes
//!          │
//!          ↓  one task per table, at most N in flight
//!   FanOut ── fetch_table_schema ── GET catalog/<id>/databases/<db>/tables/<t>
//!          │                             (empty on failure)
//!          ↓  join all
//!   Catalog
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use harlequin_wherobots_catalog::{Credentials, WherobotsCatalog};
//!
//! async fn print_catalog() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = WherobotsCatalog::connect(
//!         "api.cloud.wherobots.com",
//!         Credentials::api_key("my-key"),
//!     )?;
//!     println!("{}", catalog.get_catalog().await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Implementing the MetadataClient Trait
//!
//! The HTTP transport sits behind [`MetadataClient`], so the tree builder can
//! run against any source of status + body pairs:
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use harlequin_wherobots_catalog::{CatalogResult, MetadataClient, MetadataResponse};
//!
//! struct MyClient;
//!
//! #[async_trait]
//! impl MetadataClient for MyClient {
//!     async fn get(&self, segments: &[&str]) -> CatalogResult<MetadataResponse> {
//!         // Your implementation here
//!     }
//! }
//! ```

pub mod auth;
pub mod error;
pub mod fanout;
pub mod hierarchy;
pub mod http;
pub mod live_wherobots;
pub mod schema;
pub mod r#trait;
pub mod wire;

// Re-exports
pub use auth::Credentials;
pub use error::{CatalogError, CatalogResult};
pub use fanout::{DEFAULT_MAX_CONCURRENT_FETCHES, FanOut};
pub use hierarchy::{build_catalog, duplicate_identifiers};
pub use http::{HttpMetadataClient, MetadataClientConfig};
pub use live_wherobots::WherobotsCatalog;
pub use schema::{TableLocator, fetch_table_schema, schema_columns};
pub use r#trait::{MetadataClient, MetadataResponse};
pub use wire::{HierarchyCatalog, HierarchyDatabase, HierarchyResponse, HierarchyTable};

pub use harlequin_wherobots_ir::{Catalog, CatalogNode};

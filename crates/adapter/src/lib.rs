// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Harlequin Wherobots - Adapter
//!
//! This crate connects the Harlequin SQL IDE to Wherobots DB.
//!
//! ## Overview
//!
//! The adapter provides:
//! - Option validation and host derivation
//! - Query execution through a pluggable Wherobots driver
//! - Cursor tracking and cancellation
//! - The catalog tree for the host's catalog browser
//! - Opt-in file logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Host (Harlequin)             │
//! └──────────────┬──────────────────────────┘
//!                │ AdapterOptions
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │            WherobotsAdapter             │
//! └──────────────┬──────────────────────────┘
//!                │ connect
//!                ↓
//! ┌─────────────────────────────────────────┐
//! │           WherobotsConnection           │
//! ├─────────────────────────────────────────┤
//! │  • execute / cancel / close             │
//! │  • get_catalog                          │
//! └───────┬─────────────────────┬───────────┘
//!         ↓                     ↓
//! ┌──────────────┐     ┌──────────────────┐
//! │    Driver    │     │ WherobotsCatalog │
//! │ (SQL session)│     │  (metadata API)  │
//! └──────────────┘     └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use harlequin_wherobots_adapter::{AdapterOptions, WherobotsAdapter};
//!
//! async fn run(driver: Arc<dyn harlequin_wherobots_adapter::Driver>) -> anyhow::Result<()> {
//!     let options = AdapterOptions {
//!         api_key: Some("my-key".to_string()),
//!         ..Default::default()
//!     };
//!     let mut conn = WherobotsAdapter::new(options, driver).connect().await?;
//!
//!     let cursor = conn.execute("SELECT 1 AS one").await?;
//!     println!("{:?}", cursor.fetchall().await?);
//!     println!("{}", conn.get_catalog().await?);
//!
//!     conn.close().await?;
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod connection;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod logging;

// Re-exports
pub use adapter::WherobotsAdapter;
pub use cli::CliArgs;
pub use config::{AdapterOptions, ConfigError, DEFAULT_ENDPOINT};
pub use connection::WherobotsConnection;
pub use cursor::{ColumnSchema, ResultSet, WherobotsCursor};
pub use driver::{ConnectParams, Driver, DriverConnection, DriverCursor, DriverError, Row};
pub use error::{AdapterError, AdapterResult};
pub use logging::{LOG_DEBUG_ENV, LOG_FILE_ENV, LogSettings, init_logging};

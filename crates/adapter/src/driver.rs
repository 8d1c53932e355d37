// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Wherobots driver interface
//!
//! The vendor driver owns the session handshake and the query transport.
//! This module only names the calls the adapter makes on it, so any driver
//! binding (or a test double) can be plugged into [`crate::WherobotsAdapter`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// One result row, column name to value, in column order
pub type Row = Map<String, Value>;

/// Errors reported by the driver
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    /// Credentials were rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The session could not be established or was lost
    #[error("Connection error: {0}")]
    Connection(String),

    /// The remote side rejected or failed a query
    #[error("Database error: {0}")]
    Database(String),
}

/// Parameters for host-based session setup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectParams {
    /// API host, e.g. `api.cloud.wherobots.com`
    pub host: String,
    pub token: Option<String>,
    pub api_key: Option<String>,
    /// Runtime name understood by the driver, e.g. `TINY`
    pub runtime: Option<String>,
    /// Region name understood by the driver
    pub region: Option<String>,
}

/// Entry point of the vendor driver
#[async_trait]
pub trait Driver: Send + Sync {
    /// Provision or reuse a SQL session through the API host
    async fn connect(&self, params: &ConnectParams) -> Result<Box<dyn DriverConnection>, DriverError>;

    /// Attach to an existing SQL session by its WebSocket URL
    async fn connect_direct(
        &self,
        uri: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<Box<dyn DriverConnection>, DriverError>;
}

/// An open driver session
#[async_trait]
pub trait DriverConnection: Send + Sync {
    /// Open a new cursor on this session
    fn cursor(&self) -> Box<dyn DriverCursor>;

    /// Tear the session down
    async fn close(&self) -> Result<(), DriverError>;
}

/// A driver cursor executing one query
#[async_trait]
pub trait DriverCursor: Send {
    async fn execute(&mut self, query: &str) -> Result<(), DriverError>;

    /// Wait for and return all rows of the executed query
    async fn fetchall(&mut self) -> Result<Vec<Row>, DriverError>;

    async fn close(&mut self) -> Result<(), DriverError>;
}

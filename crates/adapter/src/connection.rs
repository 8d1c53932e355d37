// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Adapter connection
//!
//! [`WherobotsConnection`] pairs a driver session with the catalog source of
//! the same Wherobots stack. Cursors handed out by [`WherobotsConnection::execute`]
//! are tracked so the host can cancel them.

use std::sync::{Mutex, PoisonError};

use harlequin_wherobots_catalog::WherobotsCatalog;
use harlequin_wherobots_ir::Catalog;
use tracing::{debug, info, warn};

use crate::cursor::WherobotsCursor;
use crate::driver::DriverConnection;
use crate::error::{AdapterError, AdapterResult};

/// An open connection to Wherobots
pub struct WherobotsConnection {
    conn: Option<Box<dyn DriverConnection>>,
    cursors: Mutex<Vec<WherobotsCursor>>,
    catalog: WherobotsCatalog,
}

impl WherobotsConnection {
    pub fn new(conn: Box<dyn DriverConnection>, catalog: WherobotsCatalog) -> Self {
        Self {
            conn: Some(conn),
            cursors: Mutex::new(Vec::new()),
            catalog,
        }
    }

    /// Execute a query on a new cursor
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::ConnectionClosed` after [`Self::close`] and
    /// `AdapterError::QueryFailed` if the driver rejects the query.
    pub async fn execute(&self, query: &str) -> AdapterResult<WherobotsCursor> {
        let conn = self.conn.as_ref().ok_or(AdapterError::ConnectionClosed)?;

        let mut cursor = conn.cursor();
        debug!("Executing query: {}", query);
        if let Err(e) = cursor.execute(query).await {
            if let Err(close_err) = cursor.close().await {
                warn!("Failed to close cursor of failed query: {}", close_err);
            }
            return Err(AdapterError::QueryFailed(e));
        }

        let cursor = WherobotsCursor::new(cursor);
        let mut tracked = self.tracked();
        tracked.retain(|open| !open.is_closed());
        tracked.push(cursor.clone());
        Ok(cursor)
    }

    /// Close every cursor opened by this connection, interrupting running queries
    pub async fn cancel(&self) {
        let cursors = std::mem::take(&mut *self.tracked());
        info!("Cancelling {} cursors", cursors.len());
        for cursor in cursors {
            cursor.close().await;
        }
    }

    /// Number of tracked cursors; fetched ones are dropped on the next execute
    pub fn open_cursors(&self) -> usize {
        self.tracked().len()
    }

    /// Fetch the catalog tree of this Wherobots stack
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::CatalogUnavailable` when the hierarchy cannot be
    /// read. Tables whose schema cannot be read are listed without columns.
    pub async fn get_catalog(&self) -> AdapterResult<Catalog> {
        self.catalog
            .get_catalog()
            .await
            .map_err(AdapterError::catalog_unavailable)
    }

    /// Close the driver session; later calls are no-ops
    pub async fn close(&mut self) -> AdapterResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        info!("Closing connection to Wherobots ...");
        self.cancel().await;
        conn.close().await.map_err(AdapterError::ConnectionFailed)
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    fn tracked(&self) -> std::sync::MutexGuard<'_, Vec<WherobotsCursor>> {
        self.cursors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

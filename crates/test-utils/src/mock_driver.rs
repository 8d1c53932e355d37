// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock Wherobots driver for testing
//!
//! Every connection and cursor shares one [`MockDriverState`], so tests can
//! inspect what the adapter did after handing objects out.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use harlequin_wherobots_adapter::{
    ConnectParams, Driver, DriverConnection, DriverCursor, DriverError, Row,
};

/// One session setup call received by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    Connect(ConnectParams),
    ConnectDirect {
        uri: String,
        headers: BTreeMap<String, String>,
    },
}

/// Everything the mock driver has observed
#[derive(Debug, Default)]
pub struct MockDriverState {
    pub calls: Vec<DriverCall>,
    pub queries: Vec<String>,
    pub fetches: usize,
    pub cursor_closes: usize,
    pub connection_closes: usize,
}

/// Configurable in-memory driver
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    connect_error: Option<DriverError>,
    query_error: Option<DriverError>,
    fetch_delay: Option<Duration>,
    rows: Vec<Row>,
    state: Arc<Mutex<MockDriverState>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every session setup with `error`
    pub fn failing_with(mut self, error: DriverError) -> Self {
        self.connect_error = Some(error);
        self
    }

    /// Fail every query with `error`
    pub fn with_query_error(mut self, error: DriverError) -> Self {
        self.query_error = Some(error);
        self
    }

    /// Hold every fetch for `delay`, or until the cursor is dropped
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Rows returned by every fetch
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn state(&self) -> MutexGuard<'_, MockDriverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open(&self, call: DriverCall) -> Result<Box<dyn DriverConnection>, DriverError> {
        self.state().calls.push(call);
        match &self.connect_error {
            Some(error) => Err(error.clone()),
            None => Ok(Box::new(MockConnection {
                driver: self.clone(),
            })),
        }
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn connect(&self, params: &ConnectParams) -> Result<Box<dyn DriverConnection>, DriverError> {
        self.open(DriverCall::Connect(params.clone()))
    }

    async fn connect_direct(
        &self,
        uri: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<Box<dyn DriverConnection>, DriverError> {
        self.open(DriverCall::ConnectDirect {
            uri: uri.to_string(),
            headers: headers.clone(),
        })
    }
}

struct MockConnection {
    driver: MockDriver,
}

#[async_trait]
impl DriverConnection for MockConnection {
    fn cursor(&self) -> Box<dyn DriverCursor> {
        Box::new(MockCursor {
            driver: self.driver.clone(),
        })
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.driver.state().connection_closes += 1;
        Ok(())
    }
}

struct MockCursor {
    driver: MockDriver,
}

#[async_trait]
impl DriverCursor for MockCursor {
    async fn execute(&mut self, query: &str) -> Result<(), DriverError> {
        self.driver.state().queries.push(query.to_string());
        match &self.driver.query_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn fetchall(&mut self) -> Result<Vec<Row>, DriverError> {
        self.driver.state().fetches += 1;
        if let Some(delay) = self.driver.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.driver.rows.clone())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.driver.state().cursor_closes += 1;
        Ok(())
    }
}

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Query cursors
//!
//! [`WherobotsCursor`] wraps a driver cursor for the host. Results are fetched
//! once, the driver cursor is closed right after, and later calls reuse the
//! cached [`ResultSet`]. Closing never waits for a running fetch: the fetch
//! is woken, drops the pending driver call and closes the cursor itself.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::driver::{DriverCursor, Row};
use crate::error::{AdapterError, AdapterResult};

/// Name and inferred type of a result column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    /// "integer", "number", "boolean", "string", "array", "object" or "any"
    pub data_type: String,
}

/// Materialized query result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<ColumnSchema>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Build a result from driver rows, inferring one type per column
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut names: Vec<String> = Vec::new();
        for row in &rows {
            for name in row.keys() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }

        let columns = names
            .into_iter()
            .map(|name| {
                let data_type = infer_type(rows.iter().filter_map(|row| row.get(&name)));
                ColumnSchema {
                    name,
                    data_type: data_type.to_string(),
                }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Transpose rows into named columns; absent values become null
    pub fn to_columns(&self) -> Vec<(String, Vec<Value>)> {
        self.columns
            .iter()
            .map(|column| {
                let values = self
                    .rows
                    .iter()
                    .map(|row| row.get(&column.name).cloned().unwrap_or(Value::Null))
                    .collect();
                (column.name.clone(), values)
            })
            .collect()
    }
}

fn value_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some("boolean"),
        Value::Number(n) if n.is_f64() => Some("number"),
        Value::Number(_) => Some("integer"),
        Value::String(_) => Some("string"),
        Value::Array(_) => Some("array"),
        Value::Object(_) => Some("object"),
    }
}

fn infer_type<'a>(values: impl Iterator<Item = &'a Value>) -> &'static str {
    let mut inferred: Option<&'static str> = None;
    for kind in values.filter_map(value_type) {
        inferred = Some(match (inferred, kind) {
            (None, current) => current,
            (Some(seen), current) if seen == current => seen,
            (Some("integer"), "number") | (Some("number"), "integer") => "number",
            _ => return "any",
        });
    }
    inferred.unwrap_or("any")
}

enum Phase {
    /// Query executed, results not read yet
    Open(Box<dyn DriverCursor>),
    /// A fetch owns the driver cursor
    Fetching,
    Fetched(ResultSet),
    Closed,
}

struct Shared {
    phase: Mutex<Phase>,
    /// Serializes fetches; never taken by `close`
    fetch: tokio::sync::Mutex<()>,
    /// Wakes an in-flight fetch when the cursor is closed
    cancel: Notify,
}

/// Host-facing cursor; clones share the same underlying driver cursor
#[derive(Clone)]
pub struct WherobotsCursor {
    shared: Arc<Shared>,
}

impl WherobotsCursor {
    /// Wrap a driver cursor that has already executed its query
    pub fn new(cursor: Box<dyn DriverCursor>) -> Self {
        Self {
            shared: Arc::new(Shared {
                phase: Mutex::new(Phase::Open(cursor)),
                fetch: tokio::sync::Mutex::new(()),
                cancel: Notify::new(),
            }),
        }
    }

    fn phase(&self) -> MutexGuard<'_, Phase> {
        self.shared.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Column names and types; empty until results were fetched
    pub fn columns(&self) -> Vec<(String, String)> {
        match &*self.phase() {
            Phase::Fetched(results) => results
                .columns
                .iter()
                .map(|c| (c.name.clone(), c.data_type.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Row limits are applied by the query itself; this is a no-op
    pub fn set_limit(self, _limit: usize) -> Self {
        self
    }

    /// Fetch all rows, closing the driver cursor after the first fetch
    ///
    /// A concurrent [`Self::close`] interrupts the fetch.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::QueryFailed` if the query failed remotely and
    /// `AdapterError::CursorClosed` if the cursor was closed first.
    pub async fn fetchall(&self) -> AdapterResult<ResultSet> {
        let _fetching = self.shared.fetch.lock().await;

        let mut cursor = {
            let mut phase = self.phase();
            match std::mem::replace(&mut *phase, Phase::Fetching) {
                Phase::Open(cursor) => cursor,
                Phase::Fetched(results) => {
                    *phase = Phase::Fetched(results.clone());
                    return Ok(results);
                }
                // A fetch left in Fetching was dropped mid-flight with its cursor.
                Phase::Fetching | Phase::Closed => {
                    *phase = Phase::Closed;
                    return Err(AdapterError::CursorClosed);
                }
            }
        };

        let fetched = tokio::select! {
            rows = cursor.fetchall() => Some(rows),
            _ = self.shared.cancel.notified() => None,
        };

        let closed = matches!(*self.phase(), Phase::Closed);
        let rows = match fetched {
            Some(Ok(rows)) => rows,
            Some(Err(e)) if !closed => {
                *self.phase() = Phase::Open(cursor);
                return Err(AdapterError::QueryFailed(e));
            }
            _ => {
                debug!("Fetch interrupted by cursor close");
                close_driver_cursor(cursor.as_mut()).await;
                return Err(AdapterError::CursorClosed);
            }
        };

        close_driver_cursor(cursor.as_mut()).await;

        let results = ResultSet::from_rows(rows);
        debug!(
            "Fetched {} rows with {} columns",
            results.row_count(),
            results.columns.len()
        );
        let mut phase = self.phase();
        if matches!(*phase, Phase::Fetching) {
            *phase = Phase::Fetched(results.clone());
        }
        Ok(results)
    }

    /// Close the driver cursor, interrupting a fetch in progress
    pub async fn close(&self) {
        let cursor = {
            let mut phase = self.phase();
            match std::mem::replace(&mut *phase, Phase::Closed) {
                Phase::Open(cursor) => Some(cursor),
                Phase::Fetching => {
                    self.shared.cancel.notify_one();
                    None
                }
                Phase::Fetched(results) => {
                    *phase = Phase::Fetched(results);
                    None
                }
                Phase::Closed => None,
            }
        };

        if let Some(mut cursor) = cursor {
            close_driver_cursor(cursor.as_mut()).await;
        }
    }

    /// Whether the driver cursor has been released
    pub fn is_closed(&self) -> bool {
        matches!(*self.phase(), Phase::Fetched(_) | Phase::Closed)
    }
}

async fn close_driver_cursor(cursor: &mut dyn DriverCursor) {
    if let Err(e) = cursor.close().await {
        warn!("Failed to close cursor: {}", e);
    }
}

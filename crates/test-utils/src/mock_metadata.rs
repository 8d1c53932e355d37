// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock metadata client for testing
//!
//! Serves canned replies keyed by request path and records every request,
//! including how many were in flight at once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use harlequin_wherobots_catalog::{CatalogError, CatalogResult, MetadataClient, MetadataResponse};
use serde_json::Value;

/// Canned reply for one request path
#[derive(Debug, Clone)]
pub enum MockReply {
    Status { status: u16, body: String },
    /// The request fails before any response is received
    Unreachable,
}

impl MockReply {
    pub fn json(body: &Value) -> Self {
        MockReply::Status {
            status: 200,
            body: body.to_string(),
        }
    }
}

/// In-memory metadata client; unknown paths answer 404
#[derive(Debug, Default)]
pub struct MockMetadataClient {
    replies: HashMap<String, MockReply>,
    delay: Option<Duration>,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockMetadataClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `path` (segments joined by `/`)
    pub fn with_reply(mut self, path: impl Into<String>, reply: MockReply) -> Self {
        self.replies.insert(path.into(), reply);
        self
    }

    /// Serve `body` as the catalog hierarchy
    pub fn with_hierarchy(self, body: &Value) -> Self {
        self.with_reply("catalog/hierarchy", MockReply::json(body))
    }

    /// Serve `body` as the schema of one table
    pub fn with_table_schema(self, ext_id: &str, db: &str, table: &str, body: &Value) -> Self {
        self.with_reply(table_path(ext_id, db, table), MockReply::json(body))
    }

    /// Answer the schema request of one table with `status` and an empty body
    pub fn with_table_status(self, ext_id: &str, db: &str, table: &str, status: u16) -> Self {
        self.with_reply(
            table_path(ext_id, db, table),
            MockReply::Status {
                status,
                body: String::new(),
            },
        )
    }

    /// Hold every reply for `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Paths requested so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    /// Highest number of requests observed in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

/// Request path of a table schema
pub fn table_path(ext_id: &str, db: &str, table: &str) -> String {
    format!("catalog/{}/databases/{}/tables/{}", ext_id, db, table)
}

#[async_trait]
impl MetadataClient for MockMetadataClient {
    async fn get(&self, segments: &[&str]) -> CatalogResult<MetadataResponse> {
        let path = segments.join("/");
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.clone());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.replies.get(&path) {
            Some(MockReply::Status { status, body }) => Ok(MetadataResponse::new(*status, body.clone())),
            Some(MockReply::Unreachable) => Err(CatalogError::RequestFailed(format!(
                "connection refused: {}",
                path
            ))),
            None => Ok(MetadataResponse::new(404, "")),
        }
    }
}

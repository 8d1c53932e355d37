// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Fan-out coordinator
//!
//! Runs one task per table with a bounded number of requests in flight, then
//! joins every task before handing results back.
//!
//! Each scheduled task gets a slot index. Results come back indexed by slot,
//! so every task writes to exactly one table's children and no lock guards
//! the tree. A task that panics leaves its slot empty; siblings are not
//! affected.

use std::future::Future;
use std::sync::Arc;

use harlequin_wherobots_ir::CatalogNode;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};

/// Default number of schema requests allowed in flight
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 5;

/// Bounded pool of schema fetch tasks for one catalog fetch
pub struct FanOut {
    permits: Arc<Semaphore>,
    tasks: JoinSet<(usize, Vec<CatalogNode>)>,
    scheduled: usize,
}

impl FanOut {
    /// Create a pool allowing `max_concurrent` tasks to run at once
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ConfigurationError` if `max_concurrent` is 0.
    pub fn new(max_concurrent: usize) -> CatalogResult<Self> {
        if max_concurrent == 0 {
            return Err(CatalogError::ConfigurationError(
                "max_concurrent_fetches must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
            tasks: JoinSet::new(),
            scheduled: 0,
        })
    }

    /// Number of tasks scheduled so far
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    /// Schedule a fetch and return the slot its result will occupy
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, fetch: F) -> usize
    where
        F: Future<Output = Vec<CatalogNode>> + Send + 'static,
    {
        let slot = self.scheduled;
        self.scheduled += 1;

        let permits = Arc::clone(&self.permits);
        self.tasks.spawn(async move {
            let children = match permits.acquire_owned().await {
                Ok(_permit) => fetch.await,
                // Semaphore closed by shutdown(): abandon without fetching.
                Err(_) => Vec::new(),
            };
            (slot, children)
        });

        slot
    }

    /// Wait for every scheduled task and return results indexed by slot
    pub async fn run_and_wait(mut self) -> Vec<Vec<CatalogNode>> {
        let mut results = vec![Vec::new(); self.scheduled];
        let mut failed = 0usize;

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((slot, children)) => results[slot] = children,
                Err(e) => {
                    failed += 1;
                    warn!("Schema fetch task failed: {}", e);
                }
            }
        }

        debug!(
            "Fan-out finished: {} tasks, {} failed",
            self.scheduled, failed
        );
        results
    }

    /// Tear the pool down without running tasks that have not started
    ///
    /// Queued tasks are abandoned and running ones aborted; returns once every
    /// task has stopped.
    pub async fn shutdown(mut self) {
        self.permits.close();
        self.tasks.shutdown().await;
    }
}

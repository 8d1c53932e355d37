// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog tree builder
//!
//! Builds catalog → database → table nodes in response order and schedules
//! one schema fetch per table on the [`FanOut`]. Columns are attached only
//! after every fetch has been joined, so the returned tree never has a table
//! with a fetch still pending.

use std::collections::HashSet;
use std::sync::Arc;

use harlequin_wherobots_ir::CatalogNode;
use tracing::debug;

use crate::fanout::FanOut;
use crate::r#trait::MetadataClient;
use crate::schema::{TableLocator, fetch_table_schema};
use crate::wire::HierarchyResponse;

/// Position of a table node inside the tree being built
#[derive(Debug, Clone, Copy)]
struct TablePosition {
    catalog: usize,
    db: usize,
    table: usize,
}

/// Build the displayable tree for a hierarchy response
///
/// Schema fetches run on `fan_out`; a failing fetch leaves its table without
/// columns.
pub async fn build_catalog(
    response: &HierarchyResponse,
    client: Arc<dyn MetadataClient>,
    mut fan_out: FanOut,
) -> Vec<CatalogNode> {
    for identifier in duplicate_identifiers(response) {
        debug!("Duplicate catalog identifier {}; nodes will collide", identifier);
    }

    let mut items = Vec::with_capacity(response.catalogs.len());
    // Indexed by fan-out slot.
    let mut positions = Vec::with_capacity(response.table_count());

    for (catalog_idx, catalog) in response.catalogs.iter().enumerate() {
        let mut dbs = Vec::with_capacity(catalog.databases.len());

        for (db_idx, db) in catalog.databases.iter().enumerate() {
            let mut tables = Vec::with_capacity(db.tables.len());

            for (table_idx, table) in db.tables.iter().enumerate() {
                tables.push(CatalogNode::table(&catalog.name, &db.name, &table.name));

                let locator =
                    TableLocator::new(&catalog.ext_id, &catalog.name, &db.name, &table.name);
                let client = Arc::clone(&client);
                let slot = fan_out.schedule(async move {
                    fetch_table_schema(client.as_ref(), &locator).await
                });
                debug_assert_eq!(slot, positions.len());
                positions.push(TablePosition {
                    catalog: catalog_idx,
                    db: db_idx,
                    table: table_idx,
                });
            }

            dbs.push(CatalogNode::database(&catalog.name, &db.name).with_children(tables));
        }

        items.push(CatalogNode::catalog(&catalog.name).with_children(dbs));
    }

    debug!("Scheduled {} table schema fetches", positions.len());
    let results = fan_out.run_and_wait().await;

    for (position, columns) in positions.into_iter().zip(results) {
        if let Some(table) = items
            .get_mut(position.catalog)
            .and_then(|catalog| catalog.children.get_mut(position.db))
            .and_then(|db| db.children.get_mut(position.table))
        {
            table.children = columns;
        }
    }

    items
}

/// Qualified identifiers that occur more than once, in first-repeat order
///
/// Names come straight from the hierarchy, so nothing else keeps two tables
/// of one database from sharing an identifier.
pub fn duplicate_identifiers(response: &HierarchyResponse) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    let mut record = |identifier: String| {
        if !seen.insert(identifier.clone()) && !duplicates.contains(&identifier) {
            duplicates.push(identifier);
        }
    };

    for catalog in &response.catalogs {
        record(catalog.name.clone());
        for db in &catalog.databases {
            record(format!("{}.{}", catalog.name, db.name));
            for table in &db.tables {
                record(format!("{}.{}.{}", catalog.name, db.name, table.name));
            }
        }
    }

    duplicates
}

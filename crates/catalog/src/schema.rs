// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Table schema fetcher
//!
//! Reads `catalog/<extId>/databases/<db>/tables/<table>` and turns its
//! `schema.fields` into column nodes. Any failure for one table yields zero
//! columns: a missing schema must never take the rest of the catalog down.

use harlequin_wherobots_ir::{CatalogNode, normalize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::r#trait::MetadataClient;

/// Identifies one table for a schema lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLocator {
    /// `extId` of the owning catalog
    pub catalog_id: String,
    pub catalog: String,
    pub db: String,
    pub table: String,
}

impl TableLocator {
    pub fn new(
        catalog_id: impl Into<String>,
        catalog: impl Into<String>,
        db: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            catalog_id: catalog_id.into(),
            catalog: catalog.into(),
            db: db.into(),
            table: table.into(),
        }
    }

    /// `catalog.db.table`
    pub fn qualified_identifier(&self) -> String {
        format!("{}.{}.{}", self.catalog, self.db, self.table)
    }

    fn path(&self) -> [&str; 6] {
        [
            "catalog",
            &self.catalog_id,
            "databases",
            &self.db,
            "tables",
            &self.table,
        ]
    }
}

/// Fetch the column nodes of one table
///
/// Returns an empty vector when the request fails, the status is not 2xx,
/// or the body has no `schema.fields` list.
pub async fn fetch_table_schema(client: &dyn MetadataClient, table: &TableLocator) -> Vec<CatalogNode> {
    let qualified = table.qualified_identifier();
    debug!("Getting schema for {} ...", qualified);

    let response = match client.get(&table.path()).await {
        Ok(response) => response,
        Err(e) => {
            debug!("Skipping schema for {}: {}", qualified, e);
            return Vec::new();
        }
    };

    if !response.is_success() {
        debug!("Skipping schema for {}: HTTP {}", qualified, response.status);
        return Vec::new();
    }

    match response.json::<Value>() {
        Ok(body) => schema_columns(&body, table),
        Err(e) => {
            debug!("Skipping schema for {}: {}", qualified, e);
            Vec::new()
        }
    }
}

/// Convert a decoded table schema body into column nodes, in field order
pub fn schema_columns(body: &Value, table: &TableLocator) -> Vec<CatalogNode> {
    let qualified = table.qualified_identifier();

    let Some(fields) = body
        .get("schema")
        .and_then(|schema| schema.get("fields"))
        .and_then(Value::as_array)
    else {
        debug!("No schema fields in response for {}", qualified);
        return Vec::new();
    };

    fields
        .iter()
        .filter_map(|field| {
            let Some(name) = field.get("name").and_then(Value::as_str) else {
                warn!("Skipping field without a name in {}", qualified);
                return None;
            };

            let column_identifier = format!("{}.{}", qualified, name);
            let normalized = normalize(field.get("type").unwrap_or(&Value::Null), &column_identifier);
            if let Some(warning) = &normalized.warning {
                warn!("{}", warning);
            }

            Some(CatalogNode::column(&qualified, name, normalized.label))
        })
        .collect()
}

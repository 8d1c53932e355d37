// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Serde models for the `catalog/hierarchy` response.
//!
//! The hierarchy is decoded strictly: a missing level or name means the
//! catalog root is unusable. Extra keys are ignored. Table schema responses
//! are read leniently as `serde_json::Value` in [`crate::schema`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyResponse {
    pub catalogs: Vec<HierarchyCatalog>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyCatalog {
    pub name: String,
    /// Identifier used in the table schema endpoint path
    #[serde(rename = "extId")]
    pub ext_id: String,
    pub databases: Vec<HierarchyDatabase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyDatabase {
    pub name: String,
    pub tables: Vec<HierarchyTable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyTable {
    pub name: String,
}

impl HierarchyResponse {
    /// Number of tables across all catalogs and databases
    pub fn table_count(&self) -> usize {
        self.catalogs
            .iter()
            .flat_map(|catalog| &catalog.databases)
            .map(|db| db.tables.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hierarchy() {
        let body = r#"{
            "catalogs": [{
                "name": "wherobots_open_data",
                "extId": "2rk2zjbg7pl6f8lb7xkzv",
                "owner": "ignored",
                "databases": [
                    {"name": "overture_maps_foundation", "tables": [{"name": "places_place"}, {"name": "buildings_building"}]},
                    {"name": "empty_db", "tables": []}
                ]
            }]
        }"#;
        let response: HierarchyResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.catalogs.len(), 1);
        assert_eq!(response.catalogs[0].ext_id, "2rk2zjbg7pl6f8lb7xkzv");
        assert_eq!(response.catalogs[0].databases[0].tables[1].name, "buildings_building");
        assert_eq!(response.table_count(), 2);
    }

    #[test]
    fn test_missing_ext_id_is_rejected() {
        let body = r#"{"catalogs": [{"name": "c1", "databases": []}]}"#;
        assert!(serde_json::from_str::<HierarchyResponse>(body).is_err());
    }

    #[test]
    fn test_missing_catalogs_is_rejected() {
        assert!(serde_json::from_str::<HierarchyResponse>("{}").is_err());
    }
}

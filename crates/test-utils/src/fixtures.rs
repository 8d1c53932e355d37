// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: hierarchy and table schema bodies

use harlequin_wherobots_adapter::Row;
use serde_json::{Value, json};

/// Sample metadata payloads for testing
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// One catalog `c1` (extId `id1`) with database `d1` holding `t1` and `t2`
    pub fn two_table_hierarchy() -> Value {
        json!({
            "catalogs": [{
                "name": "c1",
                "extId": "id1",
                "databases": [{
                    "name": "d1",
                    "tables": [{"name": "t1"}, {"name": "t2"}]
                }]
            }]
        })
    }

    /// `catalogs` catalogs of `databases` databases of `tables` tables each
    ///
    /// Names are `catalog{i}` (extId `ext-{i}`), `db{j}` and `table{k}`.
    pub fn hierarchy(catalogs: usize, databases: usize, tables: usize) -> Value {
        let catalogs: Vec<Value> = (0..catalogs)
            .map(|i| {
                let dbs: Vec<Value> = (0..databases)
                    .map(|j| {
                        let tables: Vec<Value> =
                            (0..tables).map(|k| json!({"name": format!("table{}", k)})).collect();
                        json!({"name": format!("db{}", j), "tables": tables})
                    })
                    .collect();
                json!({
                    "name": format!("catalog{}", i),
                    "extId": format!("ext-{}", i),
                    "databases": dbs
                })
            })
            .collect();
        json!({ "catalogs": catalogs })
    }

    /// Table schema body with the given `(name, type)` fields
    pub fn schema(fields: &[(&str, Value)]) -> Value {
        let fields: Vec<Value> = fields
            .iter()
            .enumerate()
            .map(|(i, (name, data_type))| {
                json!({"id": i + 1, "name": name, "type": data_type, "required": false})
            })
            .collect();
        json!({"schema": {"type": "struct", "fields": fields}})
    }

    /// `id: long`, `geom: geometry`
    pub fn simple_schema() -> Value {
        Self::schema(&[("id", json!("long")), ("geom", json!("geometry"))])
    }

    /// One field of each nested kind plus one malformed field
    pub fn nested_schema() -> Value {
        Self::schema(&[
            (
                "address",
                json!({"type": "struct", "fields": [{"id": 9, "name": "street", "type": "string"}]}),
            ),
            ("tags", json!({"type": "list", "element-id": 10, "element": "string"})),
            (
                "props",
                json!({"type": "map", "key-id": 11, "key": "string", "value-id": 12, "value": "double"}),
            ),
            ("broken", json!({"element": "string"})),
        ])
    }

    /// Convert JSON objects into driver rows; non-objects are skipped
    pub fn rows(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_shape() {
        let hierarchy = CatalogFixtures::hierarchy(2, 3, 4);
        let catalogs = hierarchy["catalogs"].as_array().unwrap();
        assert_eq!(catalogs.len(), 2);
        assert_eq!(catalogs[1]["extId"], "ext-1");
        assert_eq!(catalogs[0]["databases"].as_array().unwrap().len(), 3);
        assert_eq!(catalogs[0]["databases"][2]["tables"][3]["name"], "table3");
    }

    #[test]
    fn test_schema_fields() {
        let schema = CatalogFixtures::simple_schema();
        assert_eq!(schema["schema"]["fields"][1]["name"], "geom");
        assert_eq!(schema["schema"]["fields"][1]["type"], "geometry");
    }
}

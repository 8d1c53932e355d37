// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Column type descriptors
//!
//! Table schema responses describe a column type either as a bare name
//! (`"string"`, `"geometry"`) or as a nested object tagged with its kind:
//!
//! ```json
//! {"type": "list", "element-id": 3, "element": "string", "element-required": false}
//! ```
//!
//! [`TypeDescriptor::classify`] turns the raw JSON value into a tagged variant
//! once, and [`normalize`] reduces that variant to the one-line label shown by
//! the catalog browser. Malformed shapes never fail; they produce an
//! "unknown" label plus a warning for the operator log.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field of a struct type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub data_type: TypeDescriptor,
}

/// Why a type value could not be classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Malformation {
    /// Object without a text `type` tag
    MissingKind,
    /// Not a name or an object; carries the observed shape
    InvalidShape(String),
}

/// Classified column type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    Primitive(String),
    Struct(Vec<StructField>),
    List(Box<TypeDescriptor>),
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// Compound descriptor with a kind tag other than struct/list/map
    Tagged(String),
    Malformed(Malformation),
}

impl TypeDescriptor {
    /// Classify a raw `type` value from a schema response
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::String(name) if name.is_empty() => {
                TypeDescriptor::Malformed(Malformation::InvalidShape("empty string".to_string()))
            }
            Value::String(name) => TypeDescriptor::Primitive(name.clone()),
            Value::Object(object) => Self::classify_compound(object),
            other => TypeDescriptor::Malformed(Malformation::InvalidShape(
                shape_name(other).to_string(),
            )),
        }
    }

    fn classify_compound(object: &Map<String, Value>) -> Self {
        let Some(kind) = object.get("type").and_then(Value::as_str) else {
            return TypeDescriptor::Malformed(Malformation::MissingKind);
        };

        match kind {
            "struct" => {
                let fields = object
                    .get("fields")
                    .and_then(Value::as_array)
                    .map(|fields| {
                        fields
                            .iter()
                            .filter_map(|field| {
                                let name = field.get("name")?.as_str()?;
                                Some(StructField {
                                    name: name.to_string(),
                                    data_type: Self::classify(
                                        field.get("type").unwrap_or(&Value::Null),
                                    ),
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                TypeDescriptor::Struct(fields)
            }
            "list" => TypeDescriptor::List(Box::new(Self::classify_member(object, "element"))),
            "map" => TypeDescriptor::Map {
                key: Box::new(Self::classify_member(object, "key")),
                value: Box::new(Self::classify_member(object, "value")),
            },
            other => TypeDescriptor::Tagged(other.to_string()),
        }
    }

    fn classify_member(object: &Map<String, Value>, member: &str) -> Self {
        Self::classify(object.get(member).unwrap_or(&Value::Null))
    }

    /// Kind name for well-formed descriptors; nested detail is dropped
    pub fn label(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Primitive(name) => Some(name),
            TypeDescriptor::Struct(_) => Some("struct"),
            TypeDescriptor::List(_) => Some("list"),
            TypeDescriptor::Map { .. } => Some("map"),
            TypeDescriptor::Tagged(kind) => Some(kind),
            TypeDescriptor::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, TypeDescriptor::Malformed(_))
    }
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Display label for a column, with the warning to log when the type was unusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedType {
    pub label: String,
    pub warning: Option<String>,
}

/// Reduce a raw `type` value to the label shown for the column `qualified_name`
pub fn normalize(value: &Value, qualified_name: &str) -> NormalizedType {
    match TypeDescriptor::classify(value) {
        TypeDescriptor::Malformed(Malformation::MissingKind) => NormalizedType {
            label: format!("unknown (missing type) for {}", qualified_name),
            warning: Some(format!(
                "Missing 'type' key in complex field type for {}",
                qualified_name
            )),
        },
        TypeDescriptor::Malformed(Malformation::InvalidShape(shape)) => NormalizedType {
            label: format!("unknown (invalid type) for {}", qualified_name),
            warning: Some(format!(
                "Unexpected field_type format for {}: {}",
                qualified_name, shape
            )),
        },
        descriptor => NormalizedType {
            label: descriptor.label().map(str::to_string).unwrap_or_default(),
            warning: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const QN: &str = "test_catalog.test_db.test_table.bad_field";

    #[test]
    fn test_primitive_name_unchanged() {
        for name in ["long", "string", "int", "double", "boolean", "geometry"] {
            let normalized = normalize(&json!(name), QN);
            assert_eq!(normalized.label, name);
            assert!(normalized.warning.is_none());
        }
    }

    #[test]
    fn test_struct_reduces_to_kind() {
        let value = json!({
            "type": "struct",
            "fields": [
                {"id": 3, "name": "street", "type": "string", "required": false},
                {"id": 4, "name": "location", "type": {
                    "type": "struct",
                    "fields": [{"id": 5, "name": "tags", "type": {"type": "list", "element": "string"}}]
                }}
            ]
        });
        let descriptor = TypeDescriptor::classify(&value);
        let TypeDescriptor::Struct(fields) = &descriptor else {
            panic!("expected struct, got {:?}", descriptor);
        };
        assert_eq!(fields.len(), 2);
        assert!(matches!(fields[1].data_type, TypeDescriptor::Struct(_)));
        assert_eq!(normalize(&value, QN).label, "struct");
    }

    #[test]
    fn test_list_reduces_to_kind() {
        let value = json!({"type": "list", "element-id": 3, "element": "string", "element-required": false});
        assert_eq!(
            TypeDescriptor::classify(&value),
            TypeDescriptor::List(Box::new(TypeDescriptor::Primitive("string".to_string())))
        );
        let normalized = normalize(&value, QN);
        assert_eq!(normalized.label, "list");
        assert!(normalized.warning.is_none());
    }

    #[test]
    fn test_map_reduces_to_kind() {
        let value = json!({
            "type": "map",
            "key-id": 3,
            "key": "string",
            "value-id": 4,
            "value": {"type": "list", "element": "double"},
            "value-required": false
        });
        let TypeDescriptor::Map { key, value: inner } = TypeDescriptor::classify(&value) else {
            panic!("expected map");
        };
        assert_eq!(*key, TypeDescriptor::Primitive("string".to_string()));
        assert!(matches!(*inner, TypeDescriptor::List(_)));
        assert_eq!(normalize(&value, QN).label, "map");
    }

    #[test]
    fn test_unrecognized_kind_tag_is_kept() {
        let value = json!({"type": "decimal", "precision": 10, "scale": 2});
        assert_eq!(
            TypeDescriptor::classify(&value),
            TypeDescriptor::Tagged("decimal".to_string())
        );
        assert_eq!(normalize(&value, QN).label, "decimal");
    }

    #[test]
    fn test_missing_kind_tag() {
        let value = json!({"element-id": 3, "element": "string"});
        let normalized = normalize(&value, QN);
        assert!(normalized.label.contains("unknown"));
        assert!(normalized.label.contains("missing type"));
        assert!(normalized.label.contains(QN));
        let warning = normalized.warning.expect("warning for missing kind");
        assert!(warning.contains("Missing 'type'"));
        assert!(warning.contains(QN));
    }

    #[test]
    fn test_non_text_kind_tag_counts_as_missing() {
        let value = json!({"type": 7});
        assert_eq!(
            TypeDescriptor::classify(&value),
            TypeDescriptor::Malformed(Malformation::MissingKind)
        );
    }

    #[test]
    fn test_invalid_shapes() {
        for (value, shape) in [
            (json!(12345), "number"),
            (json!(["list", "of", "strings"]), "array"),
            (json!(true), "boolean"),
            (Value::Null, "null"),
            (json!(""), "empty string"),
        ] {
            let normalized = normalize(&value, QN);
            assert!(normalized.label.contains("unknown"));
            assert!(normalized.label.contains("invalid type"));
            assert!(normalized.label.contains(QN));
            let warning = normalized.warning.expect("warning for invalid shape");
            assert!(warning.contains("Unexpected field_type format"));
            assert!(warning.ends_with(shape));
        }
    }

    #[test]
    fn test_list_without_element_still_labels() {
        let value = json!({"type": "list"});
        assert_eq!(
            TypeDescriptor::classify(&value),
            TypeDescriptor::List(Box::new(TypeDescriptor::Malformed(
                Malformation::InvalidShape("null".to_string())
            )))
        );
        assert_eq!(normalize(&value, QN).label, "list");
    }
}

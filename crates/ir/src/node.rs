// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog tree types
//!
//! A [`Catalog`] is the tree shown in the host's catalog browser. Catalog,
//! database and table nodes are built from the hierarchy response; column
//! nodes are filled in from the per-table schema responses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural level of a non-column node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Catalog,
    Database,
    Table,
}

impl NodeKind {
    /// Type label shown next to nodes of this level
    pub fn type_label(&self) -> &'static str {
        match self {
            NodeKind::Catalog => "catalog",
            NodeKind::Database => "db",
            NodeKind::Table => "table",
        }
    }
}

/// One entry of the displayable catalog hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogNode {
    /// Dot-joined path from the catalog root, unique within the tree
    pub qualified_identifier: String,
    /// Identifier inserted into the query editor
    pub query_name: String,
    /// Short display name
    pub label: String,
    /// "catalog", "db", "table" or a column type description
    pub type_label: String,
    /// Ordered children, empty for columns
    pub children: Vec<CatalogNode>,
}

impl CatalogNode {
    /// Create a node with builder pattern
    pub fn new(
        qualified_identifier: impl Into<String>,
        label: impl Into<String>,
        type_label: impl Into<String>,
    ) -> Self {
        let qualified_identifier = qualified_identifier.into();
        Self {
            query_name: qualified_identifier.clone(),
            qualified_identifier,
            label: label.into(),
            type_label: type_label.into(),
            children: Vec::new(),
        }
    }

    /// Top-level catalog node
    pub fn catalog(name: &str) -> Self {
        Self::new(name, name, NodeKind::Catalog.type_label())
    }

    /// Database node, identified as `catalog.db`
    pub fn database(catalog: &str, db: &str) -> Self {
        Self::new(
            format!("{}.{}", catalog, db),
            db,
            NodeKind::Database.type_label(),
        )
    }

    /// Table node, identified as `catalog.db.table`
    pub fn table(catalog: &str, db: &str, table: &str) -> Self {
        Self::new(
            format!("{}.{}.{}", catalog, db, table),
            table,
            NodeKind::Table.type_label(),
        )
    }

    /// Column leaf; its query name is the bare column name
    pub fn column(table_identifier: &str, name: &str, type_label: impl Into<String>) -> Self {
        Self::new(format!("{}.{}", table_identifier, name), name, type_label).with_query_name(name)
    }

    /// Builder method: set query name
    pub fn with_query_name(mut self, query_name: impl Into<String>) -> Self {
        self.query_name = query_name.into();
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<CatalogNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(CatalogNode::subtree_len).sum::<usize>()
    }

    /// Find a node by qualified identifier within this subtree
    pub fn find(&self, qualified_identifier: &str) -> Option<&CatalogNode> {
        if self.qualified_identifier == qualified_identifier {
            return Some(self);
        }
        // Identifiers are dot-separated paths, so only descend along a matching prefix.
        if !qualified_identifier.starts_with(&self.qualified_identifier) {
            return None;
        }
        self.children
            .iter()
            .find_map(|child| child.find(qualified_identifier))
    }
}

/// Catalog handed to the host: the ordered list of top-level catalog nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<CatalogNode>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogNode>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of nodes across all levels
    pub fn node_count(&self) -> usize {
        self.items.iter().map(CatalogNode::subtree_len).sum()
    }

    /// Find any node by qualified identifier
    pub fn find(&self, qualified_identifier: &str) -> Option<&CatalogNode> {
        self.items
            .iter()
            .find_map(|item| item.find(qualified_identifier))
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(f: &mut fmt::Formatter<'_>, node: &CatalogNode, depth: usize) -> fmt::Result {
            writeln!(
                f,
                "{:indent$}{} [{}]",
                "",
                node.label,
                node.type_label,
                indent = depth * 2
            )?;
            for child in &node.children {
                write_node(f, child, depth + 1)?;
            }
            Ok(())
        }

        for item in &self.items {
            write_node(f, item, 0)?;
        }
        Ok(())
    }
}

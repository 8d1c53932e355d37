// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Harlequin Wherobots - Catalog Representation
//!
//! This crate provides the data types shared by the catalog fetcher and the
//! host-facing adapter:
//! - A displayable catalog tree (catalogs → databases → tables → columns)
//! - A classified column type descriptor and its one-line label

pub mod node;
pub mod type_descriptor;

// Re-export commonly used types
pub use node::{Catalog, CatalogNode, NodeKind};
pub use type_descriptor::{Malformation, NormalizedType, StructField, TypeDescriptor, normalize};

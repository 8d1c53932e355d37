// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for harlequin-wherobots
//!
//! This crate provides common testing components including:
//! - A mock metadata client with canned replies
//! - A mock Wherobots driver recording every call
//! - Hierarchy and table schema fixtures

pub mod fixtures;
pub mod mock_driver;
pub mod mock_metadata;

// Re-exports for convenience
pub use fixtures::CatalogFixtures;
pub use mock_driver::{DriverCall, MockDriver, MockDriverState};
pub use mock_metadata::{MockMetadataClient, MockReply, table_path};

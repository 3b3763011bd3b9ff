// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for sproc-call
//!
//! This crate provides common testing components including:
//! - Mock parameter catalog implementations
//! - Slot assertions for parser and binder tests
//! - Test fixtures: call texts and declared parameter lists

pub mod assertions;
pub mod fixtures;
pub mod mock_catalog;

// Re-exports for convenience
pub use assertions::SlotAssertions;
pub use fixtures::Fixtures;
pub use mock_catalog::{MockCatalog, MockCatalogBuilder};

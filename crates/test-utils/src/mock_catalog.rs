// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock catalog implementation for testing
//!
//! Provides an in-memory parameter catalog with builder pattern for easy
//! test setup. Lookups are counted so tests can check how often the catalog
//! was consulted.

use sproc_call_catalog::{
    CatalogError, CatalogResult, ParameterCatalog, normalize_procedure_name,
};
use sproc_call_ir::ParameterDescriptor;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::fixtures::Fixtures;

/// In-memory mock catalog for testing
#[derive(Debug, Default)]
pub struct MockCatalog {
    procedures: HashMap<String, Vec<ParameterDescriptor>>,
    lookups: AtomicUsize,
}

impl MockCatalog {
    /// Create a new empty mock catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a procedure signature to the catalog
    pub fn add_procedure(mut self, name: &str, parameters: Vec<ParameterDescriptor>) -> Self {
        self.procedures
            .insert(normalize_procedure_name(name), parameters);
        self
    }

    /// Number of `procedure_parameters` calls so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ParameterCatalog for MockCatalog {
    async fn procedure_parameters(
        &self,
        procedure: &str,
    ) -> CatalogResult<Vec<ParameterDescriptor>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.procedures
            .get(&normalize_procedure_name(procedure))
            .cloned()
            .ok_or_else(|| CatalogError::ProcedureNotFound(procedure.to_string()))
    }

    async fn list_procedures(&self) -> CatalogResult<Vec<String>> {
        let mut names: Vec<String> = self.procedures.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Builder for creating mock catalogs with a fluent API
pub struct MockCatalogBuilder {
    catalog: MockCatalog,
}

impl Default for MockCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalogBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            catalog: MockCatalog::new(),
        }
    }

    /// Add the standard fixture procedures
    pub fn with_standard_procedures(mut self) -> Self {
        self.catalog = self
            .catalog
            .add_procedure("dbo.GetUser", Fixtures::get_user_parameters())
            .add_procedure("dbo.Transfer", Fixtures::transfer_parameters())
            .add_procedure("[dbo].[Order Totals]", Fixtures::order_totals_parameters())
            .add_procedure("dbo.TwoInputs", Fixtures::two_inputs_parameters());
        self
    }

    /// Add a custom procedure
    pub fn with_procedure(mut self, name: &str, parameters: Vec<ParameterDescriptor>) -> Self {
        self.catalog = self.catalog.add_procedure(name, parameters);
        self
    }

    /// Build the catalog
    pub fn build(self) -> MockCatalog {
        self.catalog
    }
}

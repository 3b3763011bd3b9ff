// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static Catalog
//!
//! This module provides a catalog backed by predefined procedure signatures,
//! built in code or loaded from a YAML/JSON file.
//!
//! ## File format
//!
//! ```yaml
//! procedures:
//!   dbo.GetUser:
//!     - name: "@RETURN_VALUE"
//!       direction: return_value
//!     - name: "@Id"
//!       position: 1
//!     - name: "@Name"
//!       position: 2
//!       direction: input_output
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sproc_call_catalog::{ParameterCatalog, StaticCatalog};
//!
//! let catalog = StaticCatalog::from_file("procedures.yaml")?;
//! let params = catalog.procedure_parameters("[dbo].[GetUser]").await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sproc_call_ir::ParameterDescriptor;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

use crate::r#trait::normalize_procedure_name;
use crate::{CatalogError, CatalogResult, ParameterCatalog};

/// On-disk shape of a static catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Declared parameters per procedure, in declared order
    #[serde(default)]
    pub procedures: BTreeMap<String, Vec<ParameterDescriptor>>,
}

/// Catalog with predefined procedure signatures
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    /// Keyed by normalized procedure name
    procedures: HashMap<String, Vec<ParameterDescriptor>>,
}

impl StaticCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a procedure signature
    pub fn with_procedure(
        mut self,
        name: impl AsRef<str>,
        parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        self.procedures
            .insert(normalize_procedure_name(name.as_ref()), parameters);
        self
    }

    /// Number of procedures in the catalog
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// Build a catalog from its file representation
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidCatalog` if two procedures normalize to
    /// the same name, a procedure declares a parameter name twice, or more
    /// than one return value.
    pub fn from_catalog_file(file: CatalogFile) -> CatalogResult<Self> {
        let mut procedures = HashMap::with_capacity(file.procedures.len());

        for (name, parameters) in file.procedures {
            validate_signature(&name, &parameters)?;
            let key = normalize_procedure_name(&name);
            if procedures.insert(key, parameters).is_some() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "procedure '{}' is defined more than once",
                    name
                )));
            }
        }

        debug!(procedures = procedures.len(), "Loaded static catalog");
        Ok(Self { procedures })
    }

    /// Parse a catalog from YAML text
    pub fn from_yaml_str(text: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(text)
            .map_err(|e| CatalogError::SerializationError(e.to_string()))?;
        Self::from_catalog_file(file)
    }

    /// Parse a catalog from JSON text
    pub fn from_json_str(text: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(text)
            .map_err(|e| CatalogError::SerializationError(e.to_string()))?;
        Self::from_catalog_file(file)
    }

    /// Load a catalog file, choosing the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text),
            "json" => Self::from_json_str(&text),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn validate_signature(procedure: &str, parameters: &[ParameterDescriptor]) -> CatalogResult<()> {
    let return_values = parameters.iter().filter(|p| p.is_return_value()).count();
    if return_values > 1 {
        return Err(CatalogError::InvalidCatalog(format!(
            "procedure '{}' declares {} return values",
            procedure, return_values
        )));
    }

    for (i, param) in parameters.iter().enumerate() {
        if parameters[..i].iter().any(|other| other.matches_name(&param.name)) {
            return Err(CatalogError::InvalidCatalog(format!(
                "procedure '{}' declares parameter '{}' more than once",
                procedure, param.name
            )));
        }
    }

    Ok(())
}

#[async_trait]
impl ParameterCatalog for StaticCatalog {
    async fn procedure_parameters(
        &self,
        procedure: &str,
    ) -> CatalogResult<Vec<ParameterDescriptor>> {
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

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! This module defines the error types used throughout the catalog layer.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during Catalog operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    /// Requested procedure was not found
    #[error("Procedure '{0}' not found in catalog")]
    ProcedureNotFound(String),

    /// Catalog source could not be read
    #[error("Failed to read catalog '{path}': {message}")]
    ReadFailed { path: String, message: String },

    /// Failed to deserialize catalog data
    #[error("Failed to parse catalog data: {0}")]
    SerializationError(String),

    /// Catalog file format could not be determined
    #[error("Unsupported catalog format '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    /// Catalog content is structurally invalid
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::ProcedureNotFound("dbo.Missing".to_string());
        assert!(err.to_string().contains("dbo.Missing"));

        let err = CatalogError::ReadFailed {
            path: "params.yaml".to_string(),
            message: "No such file".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("params.yaml"));
        assert!(msg.contains("No such file"));
    }
}

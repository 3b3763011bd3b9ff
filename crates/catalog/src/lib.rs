// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Stored-Procedure Call - Catalog Layer
//!
//! This crate provides the source of declared procedure parameters that the
//! binder matches call arguments against. It defines the `ParameterCatalog`
//! trait and a static implementation:
//!
//! - **Static Catalogs**: Procedure signatures built in code or loaded from
//!   YAML/JSON files
//!
//! ## Architecture
//!
//! The catalog layer is responsible for:
//! - Providing the ordered parameter list of a procedure
//! - Normalizing procedure names (`[dbo].[GetUser]` finds `dbo.GetUser`)
//! - Abstracting where signatures come from
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sproc_call_catalog::{ParameterCatalog, StaticCatalog};
//! use sproc_call_ir::ParameterDescriptor;
//!
//! let catalog = StaticCatalog::new().with_procedure(
//!     "dbo.GetUser",
//!     vec![
//!         ParameterDescriptor::return_value("@RETURN_VALUE"),
//!         ParameterDescriptor::input("@Id", 1),
//!     ],
//! );
//! let params = catalog.procedure_parameters("[dbo].[GetUser]").await?;
//! assert_eq!(params.len(), 2);
//! ```
//!
//! ## Implementing the ParameterCatalog Trait
//!
//! ```rust,ignore
//! use sproc_call_catalog::{CatalogResult, ParameterCatalog};
//! use sproc_call_ir::ParameterDescriptor;
//! use async_trait::async_trait;
//!
//! struct MyCatalog;
//!
//! #[async_trait]
//! impl ParameterCatalog for MyCatalog {
//!     async fn procedure_parameters(&self, procedure: &str) -> CatalogResult<Vec<ParameterDescriptor>> {
//!         // Your implementation here
//!     }
//!
//!     async fn list_procedures(&self) -> CatalogResult<Vec<String>> {
//!         // Your implementation here
//!     }
//! }
//! ```

pub mod error;
pub mod r#static;
pub mod r#trait;

// Re-exports
pub use error::{CatalogError, CatalogResult};
pub use r#static::{CatalogFile, StaticCatalog};
pub use r#trait::{ParameterCatalog, normalize_procedure_name};

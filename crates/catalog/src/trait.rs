// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Parameter catalog trait
//!
//! This module defines the async trait used to look up the parameters a
//! stored procedure declares.

use sproc_call_ir::ParameterDescriptor;

use crate::error::CatalogResult;

/// Source of declared procedure parameters
///
/// Implementations can read from static files, in-memory fixtures, or a
/// discovery layer that asks the database. The binder never calls this
/// directly; callers fetch the descriptor list and pass it in.
///
/// # Examples
///
/// ```rust,ignore
/// use sproc_call_catalog::{CatalogError, ParameterCatalog};
///
/// async fn output_parameters(
///     catalog: &impl ParameterCatalog,
///     procedure: &str,
/// ) -> Result<Vec<String>, CatalogError> {
///     let params = catalog.procedure_parameters(procedure).await?;
///     Ok(params
///         .into_iter()
///         .filter(|p| p.direction.carries_output())
///         .map(|p| p.name)
///         .collect())
/// }
/// ```
#[async_trait::async_trait]
pub trait ParameterCatalog: Send + Sync {
    /// Get the declared parameters of a procedure, in declared order
    ///
    /// # Arguments
    ///
    /// * `procedure` - Procedure name as written in the call text; bracket
    ///   quoting and ASCII case are ignored
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProcedureNotFound` if the procedure is unknown.
    async fn procedure_parameters(&self, procedure: &str)
    -> CatalogResult<Vec<ParameterDescriptor>>;

    /// List the procedures this catalog knows, by normalized name
    async fn list_procedures(&self) -> CatalogResult<Vec<String>>;
}

/// Normalize a procedure name for lookup
///
/// `[dbo].[GetUser]`, `dbo.GetUser` and `DBO.GETUSER` all normalize to
/// `dbo.getuser`.
pub fn normalize_procedure_name(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .collect::<String>()
        .to_ascii_lowercase()
}

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for literal evaluation and parameter binding

use serde::Serialize;

/// Result type alias for binding operations
pub type BindResult<T> = Result<T, BindingError>;

/// A raw slot value that is not one of the supported literal kinds
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum EvaluationError {
    /// Not a quoted string, integer, float or NULL
    #[error("Cannot evaluate '{raw_value}' as a string, integer, float or NULL literal")]
    Unrecognized { raw_value: String },

    /// Numeric literal that does not fit a 64-bit value
    #[error("Literal '{raw_value}' is out of range for a 64-bit {type_name}")]
    OutOfRange {
        raw_value: String,
        type_name: String,
    },
}

impl EvaluationError {
    /// The raw value that failed to evaluate
    pub fn raw_value(&self) -> &str {
        match self {
            EvaluationError::Unrecognized { raw_value } => raw_value,
            EvaluationError::OutOfRange { raw_value, .. } => raw_value,
        }
    }
}

/// Errors that reject a whole call during binding
///
/// No binding is returned alongside any of these: the caller must not
/// execute the call with whatever happened to bind before the failure.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum BindingError {
    /// Two named slots refer to the same declared parameter
    #[error("Parameter '@{name}' is supplied more than once (slot {slot_index})")]
    DuplicateNamedSlot { name: String, slot_index: usize },

    /// A named slot refers to a parameter the procedure does not declare
    #[error("Procedure has no parameter named '@{name}' (slot {slot_index})")]
    UnknownNamedParameter { name: String, slot_index: usize },

    /// More positional slots than remaining declared parameters
    #[error(
        "No declared parameter left for positional value '{raw_value}' (slot {slot_index})"
    )]
    InsufficientPositionalParameters { slot_index: usize, raw_value: String },

    /// A literal value could not be evaluated
    #[error("Invalid value for parameter '{parameter}': {source}")]
    Evaluation {
        parameter: String,
        source: EvaluationError,
    },

    /// The call captures a return value the procedure does not declare
    #[error("Return variable '{variable}' given but the procedure declares no return value")]
    ReturnValueNotDeclared { variable: String },
}

impl BindingError {
    /// Index of the slot that caused the error, when one did
    pub fn slot_index(&self) -> Option<usize> {
        match self {
            BindingError::DuplicateNamedSlot { slot_index, .. }
            | BindingError::UnknownNamedParameter { slot_index, .. }
            | BindingError::InsufficientPositionalParameters { slot_index, .. } => {
                Some(*slot_index)
            }
            BindingError::Evaluation { .. } | BindingError::ReturnValueNotDeclared { .. } => None,
        }
    }
}

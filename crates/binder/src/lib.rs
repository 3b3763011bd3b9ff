// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Stored-Procedure Call - Binder
//!
//! This crate matches a parsed call against the parameters its procedure
//! declares and evaluates the literal argument values.
//!
//! ## Overview
//!
//! ```text
//! ParseResult + [ParameterDescriptor] → bind → BindingResult
//!                                         │
//!                                         └─ evaluate (per literal slot)
//! ```
//!
//! The [`BindingResult`] offers three views used by the layer that drives a
//! live command:
//!
//! - `positional_parameters`: parameters fed by positional slots, in order
//! - `named_parameters`: every declared parameter keyed by its name
//! - `variable_parameters`: parameters fed by a variable reference, keyed by
//!   the variable, so output values can be read back after execution
//!
//! ## Usage
//!
//! ```rust
//! use sproc_call_binder::bind;
//! use sproc_call_ir::{ParameterDescriptor, ParameterSlot, ParseResult};
//!
//! let declared = vec![
//!     ParameterDescriptor::return_value("@RETURN_VALUE"),
//!     ParameterDescriptor::input("@A", 1),
//!     ParameterDescriptor::input("@B", 2),
//! ];
//! let call = ParseResult::new("dbo.P").with_slots(vec![
//!     ParameterSlot::named("B", "2", false),
//!     ParameterSlot::positional("1", false),
//! ]);
//!
//! let binding = bind(&call, &declared).unwrap();
//! assert_eq!(binding.slot_bindings[0].parameter.name, "@B");
//! assert_eq!(binding.slot_bindings[1].parameter.name, "@A");
//! ```
//!
//! ## Error Handling
//!
//! Any [`BindingError`] rejects the whole call. Nothing partially bound is
//! ever returned.

pub mod binder;
pub mod error;
pub mod literal;

pub use binder::{BindingResult, BoundValue, SlotBinding, bind};
pub use error::{BindResult, BindingError, EvaluationError};
pub use literal::{evaluate, quote_literal};

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Stored-Procedure Call - Data Model
//!
//! This crate provides the shared data model for turning a raw stored-procedure
//! invocation into bound parameter assignments. The model is designed to:
//! - Carry the lexer output (`Token`) and the parser output (`ParameterSlot`, `ParseResult`)
//! - Describe the parameters a procedure declares (`ParameterDescriptor`)
//! - Represent the evaluated literal kinds (`LiteralValue`)
//!
//! ## Pipeline
//!
//! ```text
//! call text → extract → tokenize → parse_slots → ParseResult
//!                                                    │
//!                       Vec<ParameterDescriptor> ────┴──→ bind → BindingResult
//! ```
//!
//! All types are plain values: they are created once per parse and never
//! mutated afterwards.

pub mod descriptor;
pub mod literal;
pub mod slot;
pub mod token;

// Re-export commonly used types
pub use descriptor::{ParameterDescriptor, ParameterDirection};
pub use literal::LiteralValue;
pub use slot::{ParameterSlot, ParseResult, SlotKind};
pub use token::{END_OF_INPUT_TEXT, Token, TokenKind, is_output_keyword};

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Parameter slots
//!
//! A slot is one comma-delimited argument of a stored-procedure call:
//!
//! ```sql
//! EXEC dbo.GetUser 5, @Name = 'Bob' OUTPUT
//! --               ^  ^^^^^^^^^^^^^^^^^^^^
//! --               |  Named slot, output
//! --               Positional slot
//! ```
//!
//! Slots are immutable once parsed. The association between a slot and the
//! declared parameter it feeds is kept by the binder, keyed by slot index.

use serde::{Deserialize, Serialize};

/// How a slot is matched against the declared parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    /// Matched by order
    Positional,
    /// Matched by declared parameter name
    Named,
}

/// One comma-delimited argument of a call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSlot {
    pub kind: SlotKind,
    /// Parameter name without the leading `@` (named slots only)
    pub name: Option<String>,
    /// Unevaluated value text (quoted literals keep their quotes)
    pub raw_value: String,
    /// Whether the argument carried the `OUTPUT` keyword
    pub is_output: bool,
}

impl ParameterSlot {
    pub fn positional(raw_value: impl Into<String>, is_output: bool) -> Self {
        Self {
            kind: SlotKind::Positional,
            name: None,
            raw_value: raw_value.into(),
            is_output,
        }
    }

    /// Create a named slot; a leading `@` on `name` is dropped
    pub fn named(name: impl Into<String>, raw_value: impl Into<String>, is_output: bool) -> Self {
        let name = name.into();
        let name = match name.strip_prefix('@') {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        Self {
            kind: SlotKind::Named,
            name: Some(name),
            raw_value: raw_value.into(),
            is_output,
        }
    }

    pub fn is_named(&self) -> bool {
        self.kind == SlotKind::Named
    }

    /// Whether the value is a variable reference (`@var`) rather than a literal
    pub fn is_variable_reference(&self) -> bool {
        self.raw_value.starts_with('@')
    }
}

/// Output of the call extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Procedure name as written, e.g. `dbo.GetUser` or `[dbo].[Get User]`
    pub procedure_name: String,
    /// Variable receiving the return value (`EXEC @ret = ...`)
    pub return_variable: Option<String>,
    /// Arguments in call order
    pub slots: Vec<ParameterSlot>,
}

impl ParseResult {
    pub fn new(procedure_name: impl Into<String>) -> Self {
        Self {
            procedure_name: procedure_name.into(),
            return_variable: None,
            slots: Vec::new(),
        }
    }

    pub fn with_return_variable(mut self, variable: impl Into<String>) -> Self {
        self.return_variable = Some(variable.into());
        self
    }

    pub fn with_slots(mut self, slots: Vec<ParameterSlot>) -> Self {
        self.slots = slots;
        self
    }

    /// Iterate over the named slots, in call order
    pub fn named_slots(&self) -> impl Iterator<Item = (usize, &ParameterSlot)> {
        self.slots.iter().enumerate().filter(|(_, slot)| slot.is_named())
    }

    /// Iterate over the positional slots, in call order
    pub fn positional_slots(&self) -> impl Iterator<Item = (usize, &ParameterSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_named())
    }
}

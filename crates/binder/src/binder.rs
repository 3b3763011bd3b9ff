// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Parameter binding
//!
//! Matches parsed slots against the parameters a procedure declares.
//!
//! ## Resolution order
//!
//! 1. Named slots, in call order, each pin the declared parameter with the
//!    same name (ignoring `@` and ASCII case).
//! 2. Positional slots, in call order, take the next declared parameter that
//!    is neither a return value nor already pinned.
//!
//! A caller writing `@Name = value` reserves that parameter wherever it sits
//! in the argument list, so positional values only see what is left:
//!
//! ```text
//! declared:  @RETURN_VALUE  @A  @B
//! call:      @B = 2, 1
//! binding:   slot 0 → @B    slot 1 → @A
//! ```
//!
//! Slots are never modified. The binding is returned as a separate list of
//! [`SlotBinding`]s, one per slot, in slot order.

use serde::Serialize;
use sproc_call_ir::{LiteralValue, ParameterDescriptor, ParameterSlot, ParseResult, SlotKind};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument, warn};

use crate::error::{BindResult, BindingError};
use crate::literal::evaluate;

/// The value a slot supplies to its parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BoundValue {
    /// An evaluated literal
    Literal(LiteralValue),
    /// A caller-side variable (`@total`), kept for output read-back
    Variable(String),
}

impl BoundValue {
    pub fn as_literal(&self) -> Option<&LiteralValue> {
        match self {
            BoundValue::Literal(value) => Some(value),
            BoundValue::Variable(_) => None,
        }
    }
}

/// Association of one slot with the declared parameter it feeds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotBinding<'a> {
    /// Index of the slot in [`ParseResult::slots`]
    pub slot_index: usize,
    pub kind: SlotKind,
    pub parameter: &'a ParameterDescriptor,
    pub value: BoundValue,
    /// Whether the slot carried the `OUTPUT` keyword
    pub is_output: bool,
}

/// Outcome of binding a parsed call to a declared parameter list
///
/// Parameter handles borrow from the declared list passed to [`bind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingResult<'a> {
    /// One binding per slot, in slot order
    pub slot_bindings: Vec<SlotBinding<'a>>,
    /// Parameters fed by positional slots, in positional slot order
    pub positional_parameters: Vec<&'a ParameterDescriptor>,
    /// Every declared parameter, keyed by its declared name
    pub named_parameters: BTreeMap<String, &'a ParameterDescriptor>,
    /// Parameters whose value is a variable reference, keyed by variable
    pub variable_parameters: BTreeMap<String, &'a ParameterDescriptor>,
    /// The declared return value parameter, if any
    pub return_parameter: Option<&'a ParameterDescriptor>,
}

impl<'a> BindingResult<'a> {
    /// Binding of the slot at `slot_index`
    pub fn slot(&self, slot_index: usize) -> Option<&SlotBinding<'a>> {
        self.slot_bindings.get(slot_index)
    }

    /// Look up a declared parameter by name, with or without `@`, any case
    pub fn parameter(&self, name: &str) -> Option<&'a ParameterDescriptor> {
        if let Some(param) = self.named_parameters.get(name) {
            return Some(*param);
        }
        self.named_parameters
            .values()
            .copied()
            .find(|param| param.matches_name(name))
    }

    /// The parameter a variable was passed to
    pub fn variable(&self, variable: &str) -> Option<&'a ParameterDescriptor> {
        self.variable_parameters.get(variable).copied()
    }

    /// Literal values to assign before execution, in slot order
    pub fn input_values(&self) -> impl Iterator<Item = (&'a ParameterDescriptor, &LiteralValue)> {
        self.slot_bindings
            .iter()
            .filter_map(|binding| binding.value.as_literal().map(|v| (binding.parameter, v)))
    }

    /// Variables whose parameter can carry a value back after execution
    pub fn output_variables(&self) -> impl Iterator<Item = (&str, &'a ParameterDescriptor)> {
        self.variable_parameters
            .iter()
            .filter(|(_, param)| param.direction.carries_output())
            .map(|(variable, param)| (variable.as_str(), *param))
    }

    /// Map post-execution parameter values back to the caller's variables
    ///
    /// `values` is keyed by declared parameter name. Variables whose
    /// parameter has no entry in `values` are left out.
    pub fn resolve_outputs(
        &self,
        values: &HashMap<String, LiteralValue>,
    ) -> BTreeMap<String, LiteralValue> {
        let mut resolved = BTreeMap::new();
        for (variable, param) in self.output_variables() {
            let value = values.get(&param.name).or_else(|| {
                values
                    .iter()
                    .find(|(name, _)| param.matches_name(name))
                    .map(|(_, value)| value)
            });
            if let Some(value) = value {
                resolved.insert(variable.to_string(), value.clone());
            }
        }
        resolved
    }
}

/// Bind a parsed call to the declared parameters of its procedure
///
/// # Errors
///
/// - [`BindingError::DuplicateNamedSlot`] when two named slots hit one parameter
/// - [`BindingError::UnknownNamedParameter`] when a name matches nothing
/// - [`BindingError::InsufficientPositionalParameters`] when positional slots
///   outnumber the remaining parameters
/// - [`BindingError::Evaluation`] when a literal cannot be evaluated
/// - [`BindingError::ReturnValueNotDeclared`] when a return variable is given
///   but no return value parameter is declared
#[instrument(skip_all, fields(procedure = %result.procedure_name))]
pub fn bind<'a>(
    result: &ParseResult,
    declared: &'a [ParameterDescriptor],
) -> BindResult<BindingResult<'a>> {
    let assignments = resolve(result, declared)?;

    let mut slot_bindings = Vec::with_capacity(assignments.len());
    let mut positional_parameters = Vec::new();
    let mut variable_parameters = BTreeMap::new();

    for (slot_index, param_index) in assignments {
        let slot = &result.slots[slot_index];
        let parameter = &declared[param_index];

        if slot.is_output && !parameter.direction.carries_output() {
            warn!(
                parameter = %parameter.name,
                slot_index,
                "OUTPUT given for an input-only parameter"
            );
        }

        let value = if slot.is_variable_reference() {
            record_variable(&mut variable_parameters, &slot.raw_value, parameter);
            BoundValue::Variable(slot.raw_value.clone())
        } else {
            let literal =
                evaluate(&slot.raw_value).map_err(|source| BindingError::Evaluation {
                    parameter: parameter.name.clone(),
                    source,
                })?;
            BoundValue::Literal(literal)
        };

        if slot.kind == SlotKind::Positional {
            positional_parameters.push(parameter);
        }

        slot_bindings.push(SlotBinding {
            slot_index,
            kind: slot.kind,
            parameter,
            value,
            is_output: slot.is_output,
        });
    }

    let return_parameter = declared.iter().find(|param| param.is_return_value());
    if let Some(variable) = &result.return_variable {
        let param = return_parameter.ok_or_else(|| BindingError::ReturnValueNotDeclared {
            variable: variable.clone(),
        })?;
        record_variable(&mut variable_parameters, variable, param);
    }

    let named_parameters = declared
        .iter()
        .map(|param| (param.name.clone(), param))
        .collect();

    debug!(
        bound = slot_bindings.len(),
        variables = variable_parameters.len(),
        "Bound call parameters"
    );

    Ok(BindingResult {
        slot_bindings,
        positional_parameters,
        named_parameters,
        variable_parameters,
        return_parameter,
    })
}

/// Pair every slot with a declared parameter index, sorted by slot index
fn resolve(
    result: &ParseResult,
    declared: &[ParameterDescriptor],
) -> BindResult<Vec<(usize, usize)>> {
    let mut used = vec![false; declared.len()];
    let mut assignments = Vec::with_capacity(result.slots.len());

    for (slot_index, slot) in result.named_slots() {
        let name = slot_name(slot);
        let found = declared
            .iter()
            .position(|param| !param.is_return_value() && param.matches_name(name));

        match found {
            Some(index) if used[index] => {
                return Err(BindingError::DuplicateNamedSlot {
                    name: name.to_string(),
                    slot_index,
                });
            }
            Some(index) => {
                used[index] = true;
                assignments.push((slot_index, index));
            }
            None => {
                return Err(BindingError::UnknownNamedParameter {
                    name: name.to_string(),
                    slot_index,
                });
            }
        }
    }

    let mut cursor = 0;
    for (slot_index, slot) in result.positional_slots() {
        while cursor < declared.len() && (used[cursor] || declared[cursor].is_return_value()) {
            cursor += 1;
        }
        if cursor == declared.len() {
            return Err(BindingError::InsufficientPositionalParameters {
                slot_index,
                raw_value: slot.raw_value.clone(),
            });
        }
        used[cursor] = true;
        assignments.push((slot_index, cursor));
        cursor += 1;
    }

    assignments.sort_unstable_by_key(|(slot_index, _)| *slot_index);
    Ok(assignments)
}

/// Map a caller variable to the parameter it feeds; a later binding of the
/// same variable replaces the earlier one
fn record_variable<'a>(
    variables: &mut BTreeMap<String, &'a ParameterDescriptor>,
    variable: &str,
    parameter: &'a ParameterDescriptor,
) {
    if let Some(previous) = variables.insert(variable.to_string(), parameter) {
        warn!(
            variable,
            previous = %previous.name,
            parameter = %parameter.name,
            "Variable bound to more than one parameter; only the last one is read back"
        );
    }
}

fn slot_name(slot: &ParameterSlot) -> &str {
    slot.name.as_deref().unwrap_or_default()
}

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Declared parameters
//!
//! Metadata about the parameters a stored procedure really declares. These
//! descriptors are supplied by whatever layer discovers procedure signatures;
//! the binder only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterDirection {
    Input,
    Output,
    InputOutput,
    /// The procedure return value; never matched by name or position
    ReturnValue,
}

impl ParameterDirection {
    /// Whether a value flows back to the caller after execution
    pub fn carries_output(&self) -> bool {
        !matches!(self, ParameterDirection::Input)
    }
}

impl fmt::Display for ParameterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParameterDirection::Input => "input",
            ParameterDirection::Output => "output",
            ParameterDirection::InputOutput => "input_output",
            ParameterDirection::ReturnValue => "return_value",
        };
        f.write_str(label)
    }
}

/// A parameter declared by a stored procedure
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Declared name, usually with its `@` prefix (`@Id`)
    pub name: String,
    /// Ordinal position as reported by the provider
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_direction")]
    pub direction: ParameterDirection,
}

fn default_direction() -> ParameterDirection {
    ParameterDirection::Input
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, position: i32, direction: ParameterDirection) -> Self {
        Self {
            name: name.into(),
            position,
            direction,
        }
    }

    pub fn input(name: impl Into<String>, position: i32) -> Self {
        Self::new(name, position, ParameterDirection::Input)
    }

    pub fn output(name: impl Into<String>, position: i32) -> Self {
        Self::new(name, position, ParameterDirection::Output)
    }

    pub fn input_output(name: impl Into<String>, position: i32) -> Self {
        Self::new(name, position, ParameterDirection::InputOutput)
    }

    pub fn return_value(name: impl Into<String>) -> Self {
        Self::new(name, 0, ParameterDirection::ReturnValue)
    }

    pub fn is_return_value(&self) -> bool {
        self.direction == ParameterDirection::ReturnValue
    }

    /// Declared name without the `@` prefix
    pub fn bare_name(&self) -> &str {
        self.name.strip_prefix('@').unwrap_or(&self.name)
    }

    /// Whether `name` (with or without `@`) refers to this parameter.
    ///
    /// Parameter names compare case-insensitively, as SQL Server does.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.strip_prefix('@').unwrap_or(name);
        self.bare_name().eq_ignore_ascii_case(name)
    }
}

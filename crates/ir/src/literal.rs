// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Literal values
//!
//! The four value kinds an argument literal can evaluate to:
//!
//! - `String`: `'text'`, with `''` standing for an embedded quote
//! - `Integer`: unsigned decimal digits, stored as 64-bit
//! - `Float`: `digits.digits` or `.digits`, stored as 64-bit
//! - `Null`: the `NULL` keyword in any case

use serde::{Deserialize, Serialize};
use std::fmt;

/// An evaluated argument literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl LiteralValue {
    pub fn is_null(&self) -> bool {
        matches!(self, LiteralValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LiteralValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LiteralValue::Float(v) => Some(*v),
            LiteralValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

/// Renders the value back as SQL literal text
impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            LiteralValue::Integer(v) => write!(f, "{}", v),
            LiteralValue::Float(v) => write!(f, "{}", v),
            LiteralValue::Null => f.write_str("NULL"),
        }
    }
}

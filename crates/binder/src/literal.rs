// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Literal evaluation
//!
//! Converts a slot's raw value into a [`LiteralValue`]. Rules are tried in
//! order and the first match wins:
//!
//! 1. `'...'` → string, with outer quotes removed and `''` collapsed to `'`
//! 2. `^[0-9]+$` → 64-bit integer
//! 3. `^[0-9]*\.[0-9]+$` → 64-bit float
//! 4. `NULL` (any case) → null
//!
//! Anything else, including signed numbers and expressions, is rejected.
//! Values starting with `@` are variable references and are never evaluated.

use regex::Regex;
use sproc_call_ir::LiteralValue;
use std::sync::LazyLock;

use crate::error::EvaluationError;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("integer pattern is valid"));

static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.[0-9]+$").expect("float pattern is valid"));

/// Evaluate a raw literal value
pub fn evaluate(raw_value: &str) -> Result<LiteralValue, EvaluationError> {
    if raw_value.len() >= 2 && raw_value.starts_with('\'') && raw_value.ends_with('\'') {
        let inner = &raw_value[1..raw_value.len() - 1];
        return Ok(LiteralValue::String(inner.replace("''", "'")));
    }

    if INTEGER.is_match(raw_value) {
        return raw_value
            .parse::<i64>()
            .map(LiteralValue::Integer)
            .map_err(|_| out_of_range(raw_value, "integer"));
    }

    if FLOAT.is_match(raw_value) {
        return match raw_value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(LiteralValue::Float(v)),
            _ => Err(out_of_range(raw_value, "float")),
        };
    }

    if raw_value.eq_ignore_ascii_case("NULL") {
        return Ok(LiteralValue::Null);
    }

    Err(EvaluationError::Unrecognized {
        raw_value: raw_value.to_string(),
    })
}

/// Quote a string as a SQL literal, doubling embedded quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn out_of_range(raw_value: &str, type_name: &str) -> EvaluationError {
    EvaluationError::OutOfRange {
        raw_value: raw_value.to_string(),
        type_name: type_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_literal() {
        assert_eq!(
            evaluate("'O''Brien'").unwrap(),
            LiteralValue::String("O'Brien".to_string())
        );
        assert_eq!(evaluate("''").unwrap(), LiteralValue::String(String::new()));
        assert_eq!(
            evaluate("'12'").unwrap(),
            LiteralValue::String("12".to_string())
        );
    }

    #[test]
    fn test_single_quote_is_not_a_string() {
        assert!(matches!(
            evaluate("'"),
            Err(EvaluationError::Unrecognized { .. })
        ));
    }

    #[test]
    fn test_integer_literal() {
        assert_eq!(evaluate("42").unwrap(), LiteralValue::Integer(42));
        assert_eq!(evaluate("007").unwrap(), LiteralValue::Integer(7));
        assert_eq!(
            evaluate("9223372036854775807").unwrap(),
            LiteralValue::Integer(i64::MAX)
        );
    }

    #[test]
    fn test_integer_overflow() {
        let err = evaluate("9223372036854775808").unwrap_err();
        assert!(matches!(err, EvaluationError::OutOfRange { .. }));
        assert_eq!(err.raw_value(), "9223372036854775808");
    }

    #[test]
    fn test_float_literal() {
        assert_eq!(evaluate("10.50").unwrap(), LiteralValue::Float(10.5));
        assert_eq!(evaluate(".25").unwrap(), LiteralValue::Float(0.25));
    }

    #[test]
    fn test_float_requires_fraction_digits() {
        assert!(evaluate("1.").is_err());
        assert!(evaluate("1.2.3").is_err());
    }

    #[test]
    fn test_null_any_case() {
        assert_eq!(evaluate("NULL").unwrap(), LiteralValue::Null);
        assert_eq!(evaluate("null").unwrap(), LiteralValue::Null);
        assert_eq!(evaluate("NuLl").unwrap(), LiteralValue::Null);
    }

    #[test]
    fn test_unsupported_values() {
        for raw in ["-5", "+5", "1e3", "GETDATE()", "DEFAULT", "abc", "٣"] {
            assert!(
                matches!(evaluate(raw), Err(EvaluationError::Unrecognized { .. })),
                "expected '{}' to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_literal(""), "''");
    }
}

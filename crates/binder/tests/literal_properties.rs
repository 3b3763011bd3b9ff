// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Property tests for literal evaluation

use proptest::prelude::*;
use sproc_call_binder::{evaluate, quote_literal};
use sproc_call_ir::LiteralValue;
use sproc_call_parser::parse_arguments;

proptest! {
    #[test]
    fn quoted_strings_round_trip(s in "[^\n]{0,40}") {
        prop_assert_eq!(evaluate(&quote_literal(&s)).unwrap(), LiteralValue::String(s));
    }

    #[test]
    fn quoted_strings_survive_the_parser(s in "[^\n\r]{0,40}") {
        let slots = parse_arguments(&quote_literal(&s)).unwrap();
        prop_assert_eq!(slots.len(), 1);
        prop_assert_eq!(evaluate(&slots[0].raw_value).unwrap(), LiteralValue::String(s));
    }

    #[test]
    fn unsigned_integers_evaluate(n in 0i64..=i64::MAX) {
        prop_assert_eq!(evaluate(&n.to_string()).unwrap(), LiteralValue::Integer(n));
    }

    #[test]
    fn evaluation_is_deterministic(raw in "\\PC{0,16}") {
        prop_assert_eq!(evaluate(&raw), evaluate(&raw));
    }
}

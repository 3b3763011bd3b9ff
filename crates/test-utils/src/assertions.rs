// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Slot-specific test helpers and custom assertions

use sproc_call_ir::{ParameterSlot, SlotKind};

/// Custom assertion helpers for parsed slots
pub struct SlotAssertions;

impl SlotAssertions {
    /// Assert that a slot is named with the given name, raw value and output flag
    pub fn assert_named(slot: &ParameterSlot, name: &str, raw_value: &str, is_output: bool) {
        assert_eq!(
            slot.kind,
            SlotKind::Named,
            "Expected named slot '{}', found {:?}",
            name,
            slot
        );
        assert_eq!(
            slot.name.as_deref(),
            Some(name),
            "Expected slot name '{}', found {:?}",
            name,
            slot.name
        );
        assert_eq!(slot.raw_value, raw_value, "Slot value mismatch");
        assert_eq!(slot.is_output, is_output, "Slot output flag mismatch");
    }

    /// Assert that a slot is positional with the given raw value and output flag
    pub fn assert_positional(slot: &ParameterSlot, raw_value: &str, is_output: bool) {
        assert_eq!(
            slot.kind,
            SlotKind::Positional,
            "Expected positional slot, found {:?}",
            slot
        );
        assert!(slot.name.is_none(), "Positional slot has a name: {:?}", slot);
        assert_eq!(slot.raw_value, raw_value, "Slot value mismatch");
        assert_eq!(slot.is_output, is_output, "Slot output flag mismatch");
    }

    /// Assert the raw values of a slot list, in order
    pub fn assert_values(slots: &[ParameterSlot], expected: &[&str]) {
        let values: Vec<&str> = slots.iter().map(|s| s.raw_value.as_str()).collect();
        assert_eq!(values, expected, "Slot values mismatch");
    }
}

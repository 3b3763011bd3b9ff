// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures: sample call texts and declared parameter lists

use sproc_call_ir::{ParameterDescriptor, ParameterDirection};

/// Sample call texts and procedure signatures for testing
pub struct Fixtures;

impl Fixtures {
    // ===== Call texts =====

    /// Named arguments, a return variable and an OUTPUT argument
    pub const fn get_user_call() -> &'static str {
        "EXEC @ret = dbo.GetUser @Id = 5, @Name = 'Bob' OUTPUT"
    }

    /// Mixed positional and named arguments across several lines
    pub const fn transfer_call() -> &'static str {
        "EXEC dbo.Transfer 1, 2,\n    @Amount = 10.50,\n    @Memo = 'Rent for O''Brien',\n    @Receipt = @receipt OUTPUT"
    }

    /// Bracket-quoted procedure name containing a space
    pub const fn bracketed_call() -> &'static str {
        "exec [dbo].[Order Totals] 2024, NULL"
    }

    // ===== Declared parameters =====

    /// `dbo.GetUser(@Id int, @Name nvarchar OUTPUT)` returning an int
    pub fn get_user_parameters() -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::return_value("@RETURN_VALUE"),
            ParameterDescriptor::input("@Id", 1),
            ParameterDescriptor::input_output("@Name", 2),
        ]
    }

    /// `dbo.Transfer(@From, @To, @Amount, @Memo, @Receipt OUTPUT)`
    pub fn transfer_parameters() -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::return_value("@RETURN_VALUE"),
            ParameterDescriptor::input("@From", 1),
            ParameterDescriptor::input("@To", 2),
            ParameterDescriptor::input("@Amount", 3),
            ParameterDescriptor::input("@Memo", 4),
            ParameterDescriptor::new("@Receipt", 5, ParameterDirection::Output),
        ]
    }

    /// `[dbo].[Order Totals](@Year, @Region)`
    pub fn order_totals_parameters() -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::return_value("@RETURN_VALUE"),
            ParameterDescriptor::input("@Year", 1),
            ParameterDescriptor::input("@Region", 2),
        ]
    }

    /// Minimal `[RETURN_VALUE, @A, @B]` signature
    pub fn two_inputs_parameters() -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::return_value("@RETURN_VALUE"),
            ParameterDescriptor::input("@A", 1),
            ParameterDescriptor::input("@B", 2),
        ]
    }
}

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Stored-Procedure Call - Parser
//!
//! This crate turns the raw text of a stored-procedure invocation, as typed
//! into a database tool, into a structured [`ParseResult`].
//!
//! ## Overview
//!
//! The parser is a small pipeline of explicit state machines:
//!
//! ```text
//! call text → extract → argument text → tokenize → Vec<Token> → parse_slots → Vec<ParameterSlot>
//! ```
//!
//! - [`lexer`]: classifies characters into text, quoted, whitespace, comma,
//!   equals and end-of-input tokens
//! - [`slots`]: groups tokens into positional and named slots and detects the
//!   whitespace-separated `OUTPUT` keyword
//! - [`extract`]: finds the return variable and procedure name and feeds the
//!   remainder to the two stages above
//!
//! Every function is pure: no state survives between calls, so parsing can
//! happen concurrently from any number of threads.
//!
//! ## Usage
//!
//! ```rust
//! use sproc_call_parser::parse_call;
//!
//! let result = parse_call("EXEC @ret = dbo.GetUser @Id = 5, @Name = 'Bob' OUTPUT").unwrap();
//! assert_eq!(result.procedure_name, "dbo.GetUser");
//! assert_eq!(result.return_variable.as_deref(), Some("@ret"));
//! assert_eq!(result.slots.len(), 2);
//! assert!(result.slots[1].is_output);
//! ```
//!
//! ## Error Handling
//!
//! Malformed input is rejected as a whole. Parser errors carry the offending
//! token and can be rendered against the call text for diagnosis:
//!
//! ```rust
//! use sproc_call_parser::parse_call;
//!
//! let text = "EXEC dbo.P 1 2";
//! let err = parse_call(text).unwrap_err();
//! assert!(err.render(text).ends_with("EXEC dbo.P 1 »2«"));
//! ```

pub mod error;
pub mod extract;
pub mod lexer;
pub mod slots;

pub use error::{HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN, LexError, ParseError, ParseOutcome, ParserError};
pub use extract::extract;
pub use lexer::{LexerState, tokenize};
pub use slots::{SlotParserState, parse_slots};

use sproc_call_ir::{ParameterSlot, ParseResult};

/// Parse a full call text such as `EXEC @ret = dbo.Proc @A = 1, 2 OUTPUT`
///
/// Alias of [`extract`].
pub fn parse_call(call_text: &str) -> ParseOutcome<ParseResult> {
    extract(call_text)
}

/// Parse argument text alone (everything after the procedure name)
pub fn parse_arguments(arguments: &str) -> ParseOutcome<Vec<ParameterSlot>> {
    let tokens = tokenize(arguments)?;
    Ok(parse_slots(&tokens)?)
}

// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Slot parser
//!
//! Groups lexer tokens into comma-delimited [`ParameterSlot`]s.
//!
//! ## Grammar
//!
//! ```text
//! arguments := ( slot ( ',' slot )* )?
//! slot      := value [ ws OUTPUT ]
//!            | name '=' value [ ws OUTPUT ]
//! ```
//!
//! Whether a slot is positional or named is only known once an `=` is seen,
//! so the first value is captured as positional and reclassified as the
//! parameter name when `=` follows.
//!
//! ## Transitions
//!
//! | State               | Text/Quoted         | Whitespace | Comma/End             | Equals                | OUTPUT              |
//! |---------------------|---------------------|------------|-----------------------|-----------------------|---------------------|
//! | Start               | capture, Positional | ignore     | end only: finish      | error                 | error               |
//! | Positional          | error               | flag       | emit, Start           | ExpectValueForNamed   | PositionalOutput if flagged |
//! | PositionalOutput    | error               | ignore     | emit output, Start    | error                 | error               |
//! | ExpectValueForNamed | capture, Named      | ignore     | error                 | error                 | error               |
//! | Named               | error               | flag       | emit, Start           | error                 | NamedOutput if flagged |
//! | NamedOutput         | error               | ignore     | emit output, Start    | error                 | error               |
//!
//! The whitespace flag is cleared on every state entry, so `OUTPUT` is only a
//! keyword when at least one whitespace token separates it from the value.
//!
//! A value token with the keyword glued on (`5OUTPUT`) is rejected when its
//! slot closes. The check waits for the close because the same token may
//! still turn into a parameter name (`Timeout = 5`).

use serde::Serialize;
use sproc_call_ir::{ParameterSlot, Token, TokenKind, is_output_keyword};
use std::fmt;
use tracing::trace;

use crate::error::ParserError;

/// States of the slot parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SlotParserState {
    /// Before a slot; the only legal final state
    Start,
    Positional,
    PositionalOutput,
    ExpectValueForNamed,
    Named,
    NamedOutput,
}

impl fmt::Display for SlotParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Parse a token sequence into parameter slots
///
/// The sequence is expected to end with [`TokenKind::EndOfInput`], as
/// produced by [`crate::lexer::tokenize`]. A sequence without one is treated
/// as truncated.
///
/// # Errors
///
/// Returns [`ParserError`] carrying the offending token and the parser state
/// when a token is not allowed in the current state, or when the input ends
/// anywhere other than between slots.
pub fn parse_slots(tokens: &[Token]) -> Result<Vec<ParameterSlot>, ParserError> {
    let mut parser = SlotParser::new();

    for token in tokens {
        if parser.feed(token)? {
            return Ok(parser.slots);
        }
    }

    let end = tokens
        .last()
        .map(|t| Token::end_of_input(t.end()))
        .unwrap_or_else(|| Token::end_of_input(0));
    Err(ParserError::new(
        "Token sequence ended without an end-of-input marker",
        &end,
        parser.state,
    ))
}

struct SlotParser {
    state: SlotParserState,
    /// Whitespace seen since the last state entry
    saw_whitespace: bool,
    name: Option<String>,
    value: String,
    /// Token the current value came from
    value_token: Option<Token>,
    slots: Vec<ParameterSlot>,
}

impl SlotParser {
    fn new() -> Self {
        Self {
            state: SlotParserState::Start,
            saw_whitespace: false,
            name: None,
            value: String::new(),
            value_token: None,
            slots: Vec::new(),
        }
    }

    fn transition(&mut self, state: SlotParserState) {
        trace!(from = %self.state, to = %state, "Slot parser transition");
        self.state = state;
        self.saw_whitespace = false;
    }

    fn error(&self, message: &str, token: &Token) -> ParserError {
        ParserError::new(message, token, self.state)
    }

    /// Capture a value token and move to `next`
    fn capture(&mut self, token: &Token, next: SlotParserState) {
        self.value = token.text.clone();
        self.value_token = Some(token.clone());
        self.transition(next);
    }

    /// Close the current slot
    fn emit(&mut self, is_output: bool) -> Result<(), ParserError> {
        if let Some(token) = self.value_token.take() {
            if token.kind == TokenKind::Text && has_glued_output_keyword(&token.text) {
                return Err(self.error(
                    "OUTPUT must be separated from its value by whitespace",
                    &token,
                ));
            }
        }

        let value = std::mem::take(&mut self.value);
        let slot = match self.name.take() {
            Some(name) => ParameterSlot::named(name, value, is_output),
            None => ParameterSlot::positional(value, is_output),
        };
        trace!(?slot, "Closed slot");
        self.slots.push(slot);
        self.transition(SlotParserState::Start);
        Ok(())
    }

    /// Feed one token; returns `true` once the input is fully consumed
    fn feed(&mut self, token: &Token) -> Result<bool, ParserError> {
        use SlotParserState::*;

        let kind = token.kind;
        let is_end = kind == TokenKind::EndOfInput;

        match self.state {
            Start => match kind {
                TokenKind::Whitespace => {}
                TokenKind::EndOfInput => return Ok(true),
                TokenKind::Text if token.is_output_keyword() => {
                    return Err(self.error("OUTPUT must follow a value", token));
                }
                TokenKind::Text | TokenKind::Quoted => self.capture(token, Positional),
                TokenKind::Comma => return Err(self.error("Expected a value", token)),
                TokenKind::Equals => {
                    return Err(self.error("Expected a parameter name before '='", token));
                }
            },
            Positional | Named => match kind {
                TokenKind::Whitespace => self.saw_whitespace = true,
                TokenKind::Comma | TokenKind::EndOfInput => {
                    self.emit(false)?;
                    return Ok(is_end);
                }
                TokenKind::Equals if self.state == Positional => {
                    self.name = Some(std::mem::take(&mut self.value));
                    self.value_token = None;
                    self.transition(ExpectValueForNamed);
                }
                TokenKind::Equals => {
                    return Err(self.error("Unexpected '=' after a named value", token));
                }
                TokenKind::Text if token.is_output_keyword() => {
                    if !self.saw_whitespace {
                        return Err(self.error(
                            "OUTPUT must be separated from its value by whitespace",
                            token,
                        ));
                    }
                    let next = if self.state == Positional {
                        PositionalOutput
                    } else {
                        NamedOutput
                    };
                    self.transition(next);
                }
                TokenKind::Text | TokenKind::Quoted => {
                    return Err(self.error("Expected ',' or OUTPUT after a value", token));
                }
            },
            PositionalOutput | NamedOutput => match kind {
                TokenKind::Whitespace => {}
                TokenKind::Comma | TokenKind::EndOfInput => {
                    self.emit(true)?;
                    return Ok(is_end);
                }
                _ => return Err(self.error("Expected ',' after OUTPUT", token)),
            },
            ExpectValueForNamed => match kind {
                TokenKind::Whitespace => {}
                TokenKind::Text if token.is_output_keyword() => {
                    return Err(self.error("Expected a value after '='", token));
                }
                TokenKind::Text | TokenKind::Quoted => self.capture(token, Named),
                _ => return Err(self.error("Expected a value after '='", token)),
            },
        }

        Ok(false)
    }
}

/// Whether a literal value has an OUTPUT keyword glued to its end (`5OUTPUT`)
///
/// Variable references are exempt: `@xOUTPUT` names a variable.
fn has_glued_output_keyword(text: &str) -> bool {
    if text.starts_with('@') {
        return false;
    }
    ["OUTPUT", "OUT"].iter().any(|keyword| {
        text.len() > keyword.len()
            && text.is_char_boundary(text.len() - keyword.len())
            && is_output_keyword(&text[text.len() - keyword.len()..])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use sproc_call_ir::SlotKind;

    fn parse(input: &str) -> Result<Vec<ParameterSlot>, ParserError> {
        parse_slots(&tokenize(input).unwrap())
    }

    #[test]
    fn test_empty_arguments() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_positional_and_named() {
        let slots = parse("1, @B = 'x'").unwrap();
        assert_eq!(
            slots,
            vec![
                ParameterSlot::positional("1", false),
                ParameterSlot::named("B", "'x'", false),
            ]
        );
    }

    #[test]
    fn test_named_output() {
        let slots = parse("@Total = @t OUTPUT").unwrap();
        assert_eq!(slots, vec![ParameterSlot::named("Total", "@t", true)]);
    }

    #[test]
    fn test_out_keyword_any_case() {
        let slots = parse("@t out, @u Output").unwrap();
        assert!(slots.iter().all(|s| s.is_output));
        assert!(slots.iter().all(|s| s.kind == SlotKind::Positional));
    }

    #[test]
    fn test_no_space_around_equals() {
        let slots = parse("@A=1,@B='two'").unwrap();
        assert_eq!(slots[0], ParameterSlot::named("A", "1", false));
        assert_eq!(slots[1], ParameterSlot::named("B", "'two'", false));
    }

    #[test]
    fn test_trailing_comma_is_accepted() {
        let slots = parse("1, 2,").unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_empty_slot_is_rejected() {
        let err = parse("1,,2").unwrap_err();
        assert_eq!(err.state, SlotParserState::Start);
        assert_eq!(err.token.kind, TokenKind::Comma);
    }

    #[test]
    fn test_two_values_without_comma() {
        let err = parse("1 2").unwrap_err();
        assert_eq!(err.state, SlotParserState::Positional);
        assert_eq!(err.token.text, "2");
    }

    #[test]
    fn test_missing_named_value() {
        let err = parse("@A =").unwrap_err();
        assert_eq!(err.state, SlotParserState::ExpectValueForNamed);
        assert_eq!(err.token.kind, TokenKind::EndOfInput);

        let err = parse("@A = , 1").unwrap_err();
        assert_eq!(err.token.kind, TokenKind::Comma);
    }

    #[test]
    fn test_double_equals() {
        let err = parse("@A = 1 = 2").unwrap_err();
        assert_eq!(err.state, SlotParserState::Named);
        assert_eq!(err.token.kind, TokenKind::Equals);
    }

    #[test]
    fn test_leading_output_keyword() {
        let err = parse("OUTPUT").unwrap_err();
        assert_eq!(err.state, SlotParserState::Start);
    }

    #[test]
    fn test_output_glued_to_quoted_value() {
        let err = parse("'a'OUTPUT").unwrap_err();
        assert_eq!(err.state, SlotParserState::Positional);
        assert_eq!(err.token.text, "OUTPUT");
    }

    #[test]
    fn test_glued_output_on_literal() {
        let err = parse("@A = 1OUT").unwrap_err();
        assert_eq!(err.state, SlotParserState::Named);
        assert_eq!(err.token.text, "1OUT");
    }

    #[test]
    fn test_name_ending_in_out_keyword() {
        let slots = parse("Timeout = 5, Layout = 1").unwrap();
        assert_eq!(
            slots,
            vec![
                ParameterSlot::named("Timeout", "5", false),
                ParameterSlot::named("Layout", "1", false),
            ]
        );
    }

    #[test]
    fn test_glued_output_positional_reported_on_value() {
        let err = parse("1, 5OUTPUT").unwrap_err();
        assert_eq!(err.state, SlotParserState::Positional);
        assert_eq!(err.token.kind, TokenKind::Text);
        assert_eq!(err.token.text, "5OUTPUT");
        assert_eq!(err.token.start, 3);

        let err = parse("5OUTPUT, 1").unwrap_err();
        assert_eq!(err.token.text, "5OUTPUT");
    }

    #[test]
    fn test_glued_output_before_output_keyword() {
        let err = parse("@A = 1OUT OUTPUT").unwrap_err();
        assert_eq!(err.state, SlotParserState::NamedOutput);
        assert_eq!(err.token.text, "1OUT");
    }

    #[test]
    fn test_equals_at_start() {
        let err = parse("= 5").unwrap_err();
        assert_eq!(err.state, SlotParserState::Start);
        assert_eq!(err.token.kind, TokenKind::Equals);
    }

    #[test]
    fn test_equals_while_expecting_named_value() {
        let err = parse("@A = = 1").unwrap_err();
        assert_eq!(err.state, SlotParserState::ExpectValueForNamed);
        assert_eq!(err.token.kind, TokenKind::Equals);
    }

    #[test]
    fn test_output_while_expecting_named_value() {
        let err = parse("@A = OUTPUT").unwrap_err();
        assert_eq!(err.state, SlotParserState::ExpectValueForNamed);
        assert_eq!(err.token.kind, TokenKind::Text);
        assert_eq!(err.token.text, "OUTPUT");
    }

    #[test]
    fn test_value_after_named_output() {
        let err = parse("@A = @x OUTPUT 5").unwrap_err();
        assert_eq!(err.state, SlotParserState::NamedOutput);
        assert_eq!(err.token.kind, TokenKind::Text);
        assert_eq!(err.token.text, "5");
    }

    #[test]
    fn test_equals_after_named_output() {
        let err = parse("@A = @x OUTPUT = 1").unwrap_err();
        assert_eq!(err.state, SlotParserState::NamedOutput);
        assert_eq!(err.token.kind, TokenKind::Equals);
    }

    #[test]
    fn test_equals_after_positional_output() {
        let err = parse("@x OUTPUT = 1").unwrap_err();
        assert_eq!(err.state, SlotParserState::PositionalOutput);
        assert_eq!(err.token.kind, TokenKind::Equals);
    }

    #[test]
    fn test_glued_output_on_variable_is_a_name() {
        let slots = parse("@xOUTPUT").unwrap();
        assert_eq!(slots, vec![ParameterSlot::positional("@xOUTPUT", false)]);
    }

    #[test]
    fn test_value_after_output() {
        let err = parse("@x OUTPUT 5").unwrap_err();
        assert_eq!(err.state, SlotParserState::PositionalOutput);
    }

    #[test]
    fn test_truncated_token_sequence() {
        let mut tokens = tokenize("@A = 1").unwrap();
        tokens.pop();
        let err = parse_slots(&tokens).unwrap_err();
        assert_eq!(err.state, SlotParserState::Named);
        assert_eq!(err.token.kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_glued_keyword_detection() {
        assert!(has_glued_output_keyword("5OUTPUT"));
        assert!(has_glued_output_keyword("nullout"));
        assert!(!has_glued_output_keyword("OUTPUT"));
        assert!(!has_glued_output_keyword("@LastOutput"));
        assert!(!has_glued_output_keyword("5"));
    }
}

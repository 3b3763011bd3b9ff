// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for call-text parsing
//!
//! Every error aborts the stage it occurs in. There is no partial result and
//! no recovery: a malformed call must be rejected as a whole.

use serde::Serialize;
use sproc_call_ir::Token;

use crate::lexer::LexerState;
use crate::slots::SlotParserState;

/// Result type alias for parsing operations
pub type ParseOutcome<T> = Result<T, ParseError>;

/// Opening marker placed before the offending token by [`ParserError::render`]
pub const HIGHLIGHT_OPEN: char = '»';
/// Closing marker placed after the offending token by [`ParserError::render`]
pub const HIGHLIGHT_CLOSE: char = '«';

/// Errors raised by the lexer
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum LexError {
    /// A quoted literal was still open when the input ended
    #[error("Unterminated quoted literal starting at offset {offset} (lexer state {state})")]
    UnterminatedLiteral { offset: usize, state: LexerState },
}

impl LexError {
    /// Byte offset of the error in the lexer input
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedLiteral { offset, .. } => *offset,
        }
    }

    /// Shift the reported offset by `base` bytes
    pub fn rebase(self, base: usize) -> Self {
        match self {
            LexError::UnterminatedLiteral { offset, state } => LexError::UnterminatedLiteral {
                offset: offset + base,
                state,
            },
        }
    }
}

/// An unexpected token for the current slot parser state
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
#[error(
    "{message}: unexpected {kind} '{text}' at offset {start} (parser state {state})",
    kind = .token.kind,
    text = .token.text,
    start = .token.start
)]
pub struct ParserError {
    pub message: String,
    /// The token that could not be accepted
    pub token: Token,
    /// Parser state when the token was seen
    pub state: SlotParserState,
}

impl ParserError {
    pub fn new(message: impl Into<String>, token: &Token, state: SlotParserState) -> Self {
        Self {
            message: message.into(),
            token: token.clone(),
            state,
        }
    }

    /// Shift the offending token's offset by `base` bytes
    pub fn rebase(mut self, base: usize) -> Self {
        self.token.start += base;
        self
    }

    /// Render `input` with the offending token bracketed as `»token«`
    ///
    /// `input` must be the text the token offsets refer to. If the offsets do
    /// not fit the input, the plain message is returned.
    pub fn render(&self, input: &str) -> String {
        match highlight(input, self.token.start, self.token.end()) {
            Some(marked) => format!("{}\n{}", self, marked),
            None => self.to_string(),
        }
    }
}

/// Errors raised while turning call text into a [`sproc_call_ir::ParseResult`]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parser(#[from] ParserError),

    /// The call text has no word that could be a procedure name
    #[error("No procedure name found in call text")]
    MissingProcedureName,
}

impl ParseError {
    /// Render the error against the full call text it was raised for
    pub fn render(&self, input: &str) -> String {
        match self {
            ParseError::Parser(err) => err.render(input),
            ParseError::Lex(err) => {
                let offset = err.offset();
                match highlight(input, offset, input.len()) {
                    Some(marked) => format!("{}\n{}", self, marked),
                    None => self.to_string(),
                }
            }
            ParseError::MissingProcedureName => self.to_string(),
        }
    }
}

fn highlight(input: &str, start: usize, end: usize) -> Option<String> {
    if start > end || end > input.len() {
        return None;
    }
    if !input.is_char_boundary(start) || !input.is_char_boundary(end) {
        return None;
    }
    Some(format!(
        "{}{}{}{}{}",
        &input[..start],
        HIGHLIGHT_OPEN,
        &input[start..end],
        HIGHLIGHT_CLOSE,
        &input[end..]
    ))
}

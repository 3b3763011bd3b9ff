// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Tokens
//!
//! A token is a classified, contiguous slice of argument text. The lexer
//! produces tokens in a single left-to-right pass and always ends the sequence
//! with exactly one [`TokenKind::EndOfInput`] token.
//!
//! ```text
//! @Id = 'O''Brien', 5
//! ^^^ ^ ^^^^^^^^^^^^ ^
//! |   | |          | |
//! |   | Quoted     | Text
//! |   Equals       Comma
//! Text
//! ```
//!
//! Whitespace runs between the tokens above are emitted as
//! [`TokenKind::Whitespace`] tokens, so concatenating the text of every token
//! reproduces the input exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text carried by the [`TokenKind::EndOfInput`] sentinel token
pub const END_OF_INPUT_TEXT: &str = "";

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Unquoted run of non-delimiter characters (`@Id`, `5`, `NULL`, `OUTPUT`)
    Text,
    /// Single-quoted literal, including the enclosing quotes
    Quoted,
    /// Run of consecutive whitespace characters
    Whitespace,
    /// A single `,`
    Comma,
    /// A single `=`
    Equals,
    /// Zero-length sentinel closing every token sequence
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Text => "text",
            TokenKind::Quoted => "quoted literal",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comma => "comma",
            TokenKind::Equals => "equals sign",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(name)
    }
}

/// A classified slice of the lexer input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Exact source text of the token
    pub text: String,
    /// Byte offset of the first character in the input
    pub start: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
        }
    }

    /// Create the sentinel token for an input of `len` bytes
    pub fn end_of_input(len: usize) -> Self {
        Self::new(TokenKind::EndOfInput, END_OF_INPUT_TEXT, len)
    }

    /// Byte offset one past the last character of the token
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Whether this is a `Text` token spelling `OUT` or `OUTPUT` (any case)
    pub fn is_output_keyword(&self) -> bool {
        self.kind == TokenKind::Text && is_output_keyword(&self.text)
    }
}

/// Whether `text` is the `OUT`/`OUTPUT` keyword, ignoring ASCII case
pub fn is_output_keyword(text: &str) -> bool {
    text.eq_ignore_ascii_case("OUTPUT") || text.eq_ignore_ascii_case("OUT")
}

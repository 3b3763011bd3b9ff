// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Argument lexer
//!
//! Splits argument text into [`Token`]s with a single left-to-right scan
//! driven by an explicit state register.
//!
//! ## States
//!
//! | State                | Leaves on                               | Emits        |
//! |----------------------|-----------------------------------------|--------------|
//! | `Default`            | any character (marks token start)       | -            |
//! | `Text`               | quote, comma, equals, whitespace, end   | `Text`       |
//! | `Quoted`             | `'` (to `QuotedPotentialEnd`)           | -            |
//! | `QuotedPotentialEnd` | anything but a second `'`               | `Quoted`     |
//! | `Whitespace`         | first non-whitespace character          | `Whitespace` |
//! | `Comma` / `Equals`   | immediately                             | `Comma` / `Equals` |
//!
//! The character that ends a `Text`, `Whitespace` or `Quoted` token is not
//! consumed; it is examined again from `Default`.
//!
//! Doubled quotes inside a literal (`'O''Brien'`) are kept verbatim in the
//! token text. Unescaping happens when the literal is evaluated.

use serde::Serialize;
use sproc_call_ir::{Token, TokenKind};
use std::fmt;
use tracing::trace;

use crate::error::LexError;

/// State register of the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LexerState {
    Default,
    Text,
    Quoted,
    QuotedPotentialEnd,
    Whitespace,
    Comma,
    Equals,
}

impl fmt::Display for LexerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Tokenize argument text
///
/// The returned sequence always ends with exactly one
/// [`TokenKind::EndOfInput`] token whose offset is `input.len()`.
///
/// # Errors
///
/// Returns [`LexError::UnterminatedLiteral`] when a quoted literal is still
/// open at the end of the input. No partial token sequence is returned.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character
    pos: usize,
    /// Byte offset where the current token began
    start: usize,
    state: LexerState,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            state: LexerState::Default,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn enter(&mut self, state: LexerState, c: char) {
        self.state = state;
        self.advance(c);
    }

    fn emit(&mut self, kind: TokenKind) {
        let text = &self.input[self.start..self.pos];
        trace!(?kind, start = self.start, text, "Emitting token");
        self.tokens.push(Token::new(kind, text, self.start));
        self.state = LexerState::Default;
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        loop {
            let current = self.peek();
            match self.state {
                LexerState::Default => {
                    self.start = self.pos;
                    match current {
                        None => break,
                        Some(c @ '\'') => self.enter(LexerState::Quoted, c),
                        Some(c @ ',') => self.enter(LexerState::Comma, c),
                        Some(c @ '=') => self.enter(LexerState::Equals, c),
                        Some(c) if c.is_whitespace() => self.enter(LexerState::Whitespace, c),
                        Some(c) => self.enter(LexerState::Text, c),
                    }
                }
                LexerState::Text => match current {
                    Some(c) if !ends_text(c) => self.advance(c),
                    _ => self.emit(TokenKind::Text),
                },
                LexerState::Quoted => match current {
                    None => {
                        return Err(LexError::UnterminatedLiteral {
                            offset: self.start,
                            state: self.state,
                        });
                    }
                    Some(c @ '\'') => self.enter(LexerState::QuotedPotentialEnd, c),
                    Some(c) => self.advance(c),
                },
                LexerState::QuotedPotentialEnd => match current {
                    // Doubled quote: still inside the same literal
                    Some(c @ '\'') => self.enter(LexerState::Quoted, c),
                    _ => self.emit(TokenKind::Quoted),
                },
                LexerState::Whitespace => match current {
                    Some(c) if c.is_whitespace() => self.advance(c),
                    _ => self.emit(TokenKind::Whitespace),
                },
                LexerState::Comma => self.emit(TokenKind::Comma),
                LexerState::Equals => self.emit(TokenKind::Equals),
            }
        }

        self.tokens.push(Token::end_of_input(self.input.len()));
        Ok(self.tokens)
    }
}

fn ends_text(c: char) -> bool {
    matches!(c, '\'' | ',' | '=') || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens, vec![Token::end_of_input(0)]);
    }

    #[test]
    fn test_named_argument() {
        let tokens = tokenize("@Id = 5").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["@Id", " ", "=", " ", "5", ""]);
        assert_eq!(
            kinds("@Id = 5"),
            vec![
                TokenKind::Text,
                TokenKind::Whitespace,
                TokenKind::Equals,
                TokenKind::Whitespace,
                TokenKind::Text,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(tokens[4].start, 6);
        assert_eq!(tokens[5].start, 7);
    }

    #[test]
    fn test_delimiters_end_text_without_consuming() {
        assert_eq!(
            kinds("a,b=c'd'"),
            vec![
                TokenKind::Text,
                TokenKind::Comma,
                TokenKind::Text,
                TokenKind::Equals,
                TokenKind::Text,
                TokenKind::Quoted,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_escaped_quote_stays_in_token() {
        let tokens = tokenize("'O''Brien'").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Quoted);
        assert_eq!(tokens[0].text, "'O''Brien'");
    }

    #[test]
    fn test_adjacent_quoted_literals_split_on_non_quote() {
        let tokens = tokenize("'a' 'b'").unwrap();
        assert_eq!(tokens[0].text, "'a'");
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[2].text, "'b'");
    }

    #[test]
    fn test_empty_quoted_literal() {
        let tokens = tokenize("''").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Quoted);
        assert_eq!(tokens[0].text, "''");

        // Four quotes: an escaped quote inside a literal
        let tokens = tokenize("''''").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "''''");
    }

    #[test]
    fn test_consecutive_commas_are_separate_tokens() {
        assert_eq!(
            kinds(",,"),
            vec![TokenKind::Comma, TokenKind::Comma, TokenKind::EndOfInput]
        );
    }

    #[test]
    fn test_whitespace_run_is_one_token() {
        let tokens = tokenize("1 \t\n 2").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].text, " \t\n ");
    }

    #[test]
    fn test_unterminated_literal() {
        let err = tokenize("5, 'abc").unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedLiteral {
                offset: 3,
                state: LexerState::Quoted,
            }
        );
    }

    #[test]
    fn test_unterminated_after_escaped_quote() {
        assert!(tokenize("'it''s").is_err());
    }

    #[test]
    fn test_multibyte_offsets() {
        let tokens = tokenize("'é', x").unwrap();
        assert_eq!(tokens[0].text, "'é'");
        assert_eq!(tokens[1].start, "'é'".len());
        assert_eq!(tokens.last().unwrap().start, "'é', x".len());
    }
}

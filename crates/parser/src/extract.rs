// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Call extractor
//!
//! Splits a full call text into its return variable, procedure name and
//! argument text, then hands the argument text to the lexer and slot parser.
//!
//! ```text
//! EXEC @ret = [dbo].[Get User] @Id = 5, 'x'
//!      ^^^^   ^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^
//!      return procedure name   argument text
//!      variable
//! ```
//!
//! ## Procedure name
//!
//! The name starts at the first word that is neither the `EXEC` keyword, a
//! bare `=`, nor the return variable. It normally is that single word; when
//! it contains a `[`, words keep being appended (space-joined) until a `]`
//! follows the last `[`, so bracket-quoted names may contain spaces.
//!
//! ## Argument text
//!
//! The arguments are whatever follows the first occurrence of the assembled
//! name in the call text. This is a plain substring search: if the name also
//! appears earlier in the text (inside the return variable, say) the split
//! point moves with it.

use sproc_call_ir::ParseResult;
use tracing::{debug, instrument};

use crate::error::{ParseError, ParseOutcome};
use crate::lexer::tokenize;
use crate::slots::parse_slots;

/// Parse a full stored-procedure call text
///
/// # Errors
///
/// - [`ParseError::MissingProcedureName`] when no procedure name is present
/// - [`ParseError::Lex`] / [`ParseError::Parser`] for malformed arguments;
///   offsets in these errors refer to `call_text`, so
///   [`ParseError::render`] can be called with it directly
#[instrument(skip_all, fields(len = call_text.len()))]
pub fn extract(call_text: &str) -> ParseOutcome<ParseResult> {
    let header = split_header(call_text)?;
    let arguments = &call_text[header.arguments_offset..];

    debug!(
        procedure = %header.procedure_name,
        return_variable = ?header.return_variable,
        arguments,
        "Extracted call header"
    );

    let tokens = tokenize(arguments).map_err(|e| e.rebase(header.arguments_offset))?;
    let slots = parse_slots(&tokens).map_err(|e| e.rebase(header.arguments_offset))?;

    debug!(slots = slots.len(), "Parsed call arguments");

    let mut result = ParseResult::new(header.procedure_name).with_slots(slots);
    result.return_variable = header.return_variable;
    Ok(result)
}

/// Return variable, procedure name and where the arguments begin
#[derive(Debug, Clone, PartialEq, Eq)]
struct CallHeader {
    return_variable: Option<String>,
    procedure_name: String,
    arguments_offset: usize,
}

fn split_header(call_text: &str) -> ParseOutcome<CallHeader> {
    let mut return_variable: Option<String> = None;
    let mut name_parts: Vec<&str> = Vec::new();
    // Byte offset just past the last word taken into the name
    let mut name_end = 0;

    for (index, (offset, word)) in words(call_text).enumerate() {
        if name_parts.is_empty() {
            if index == 0 && is_exec_keyword(word) {
                continue;
            }
            if word == "=" {
                continue;
            }

            let mut word = word;
            let mut offset = offset;
            if return_variable.is_none() && (word.starts_with('@') || word.starts_with("{@")) {
                let variable = word.trim_start_matches('{');
                match variable.split_once('=') {
                    Some((variable, rest)) => {
                        return_variable = Some(variable.to_string());
                        if rest.is_empty() {
                            continue;
                        }
                        // `@ret=dbo.Proc`: the name is glued to the variable
                        offset += word.len() - rest.len();
                        word = rest;
                    }
                    None => {
                        return_variable = Some(variable.to_string());
                        continue;
                    }
                }
            } else if return_variable.is_some() {
                if let Some(rest) = word.strip_prefix('=') {
                    offset += 1;
                    word = rest;
                }
            }

            name_parts.push(word);
            name_end = offset + word.len();
        } else {
            name_parts.push(word);
            name_end = offset + word.len();
        }

        if is_name_complete(&name_parts.join(" ")) {
            break;
        }
    }

    if name_parts.is_empty() {
        return Err(ParseError::MissingProcedureName);
    }

    let procedure_name = name_parts.join(" ");
    let arguments_offset = match call_text.find(&procedure_name) {
        Some(found) => found + procedure_name.len(),
        None => {
            debug!(
                procedure = %procedure_name,
                "Procedure name not found verbatim; splitting after its last word"
            );
            name_end
        }
    };

    Ok(CallHeader {
        return_variable,
        procedure_name,
        arguments_offset,
    })
}

/// Whitespace-separated words with their byte offsets
fn words(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text;
    let mut base = 0;
    std::iter::from_fn(move || {
        let skipped = rest.len() - rest.trim_start().len();
        base += skipped;
        rest = &rest[skipped..];
        if rest.is_empty() {
            return None;
        }
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..len];
        let offset = base;
        base += len;
        rest = &rest[len..];
        Some((offset, word))
    })
}

fn is_exec_keyword(word: &str) -> bool {
    word.eq_ignore_ascii_case("exec") || word.eq_ignore_ascii_case("execute")
}

/// A name is complete unless its last `[` is still unclosed
fn is_name_complete(name: &str) -> bool {
    match name.rfind('[') {
        Some(open) => name[open..].contains(']'),
        None => true,
    }
}

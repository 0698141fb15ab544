//! Query Tokenizer
//!
//! Splits a raw query string into a flat token sequence. Tokens are
//! whitespace-delimited except inside double-quoted spans; a `-` glued to
//! the front of a token marks it for exclusion; `field:value` words whose
//! prefix is a recognized field keyword become field-clause tokens.

use super::types::{FieldName, SearchError, Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// Tokenizes one raw query string.
///
/// Fails with a syntax error on an unterminated quote or an empty field
/// value; everything else is accepted, including unrecognized `word:rest`
/// text (kept as a literal word for forward compatibility).
pub fn tokenize(raw: &str) -> Result<Vec<Token>, SearchError> {
    let mut chars = raw.char_indices().peekable();
    let mut tokens = Vec::new();

    while let Some(&(position, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == '-' {
            let mut ahead = chars.clone();
            ahead.next();
            match ahead.peek() {
                // Glued to the next token: exclusion marker.
                Some(&(_, next)) if !next.is_whitespace() => {
                    chars.next();
                    tokens.push(Token {
                        kind: TokenKind::Exclude,
                        position,
                    });
                }
                // Standalone dash is a literal word.
                _ => {
                    chars.next();
                    tokens.push(Token {
                        kind: TokenKind::Word("-".to_string()),
                        position,
                    });
                }
            }
            continue;
        }

        if ch == '"' {
            tokens.push(read_phrase(&mut chars, position)?);
            continue;
        }

        tokens.push(read_word(&mut chars, position)?);
    }

    Ok(tokens)
}

/// Reads a double-quoted span starting at `position`. Interior whitespace
/// and punctuation are preserved verbatim.
fn read_phrase(
    chars: &mut Peekable<CharIndices>,
    position: usize,
) -> Result<Token, SearchError> {
    chars.next(); // opening quote
    let mut text = String::new();

    for (_, ch) in chars.by_ref() {
        if ch == '"' {
            return Ok(Token {
                kind: TokenKind::Phrase(text),
                position,
            });
        }
        text.push(ch);
    }

    Err(SearchError::UnterminatedQuote { position })
}

/// Reads a whitespace-delimited word and classifies it as a field clause or
/// a plain word.
fn read_word(
    chars: &mut Peekable<CharIndices>,
    position: usize,
) -> Result<Token, SearchError> {
    let mut text = String::new();

    while let Some(&(_, ch)) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        text.push(ch);
        chars.next();
    }

    if let Some((prefix, value)) = text.split_once(':')
        && let Some(name) = FieldName::lookup(prefix)
    {
        if value.is_empty() {
            return Err(SearchError::EmptyFieldValue {
                field: name.as_str().to_string(),
                position,
            });
        }
        return Ok(Token {
            kind: TokenKind::Field {
                name,
                value: value.to_string(),
            },
            position,
        });
    }

    Ok(Token {
        kind: TokenKind::Word(text),
        position,
    })
}

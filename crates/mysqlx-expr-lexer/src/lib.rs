//! Expression lexer - tokenization using logos
//!
//! Handles the parts of the expression language that a plain regular
//! token set cannot:
//! - string literals decode `''` and backslash escapes
//! - backtick identifiers become ordinary `Ident` tokens
//! - a quoted document path after `->`/`->>` is split into
//!   `Quote`, path tokens, `Quote` instead of a string literal

mod token;

pub use token::*;

use logos::Logos;
use mysqlx_expr_ast::{Diagnostic, Span};
use thiserror::Error;

/// A token with its span and text.
///
/// `text` is the source slice, except for string literals and backtick
/// identifiers where it holds the decoded value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn offset(&self) -> usize {
        self.span.start
    }
}

/// Malformed raw text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl Diagnostic for LexError {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn span(&self) -> Span {
        self.span
    }
}

/// Tokenize an expression into a vector of tokens ending with `Eof`
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    lex_into(source, 0, &mut tokens)?;

    let end = source.len();
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        span: Span::at(end),
    });

    Ok(tokens)
}

/// Lex `source`, which starts at byte `base` of the full input
fn lex_into(source: &str, base: usize, tokens: &mut Vec<Token>) -> Result<(), LexError> {
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start, range.end).offset_by(base);
        let slice = lexer.slice();

        let kind = match result {
            Ok(kind) => kind,
            Err(()) => return Err(unexpected_input(source, range.start, base)),
        };

        match kind {
            TokenKind::MalformedNumber => {
                return Err(LexError::new(
                    format!("malformed numeric literal '{}': missing exponent digits", slice),
                    span,
                ));
            }
            TokenKind::LString => tokens.push(Token {
                kind,
                text: decode_string(slice),
                span,
            }),
            TokenKind::QuotedIdent => tokens.push(Token {
                kind: TokenKind::Ident,
                text: slice[1..slice.len() - 1].replace("``", "`"),
                span,
            }),
            TokenKind::Arrow | TokenKind::TwoHeadArrow => {
                tokens.push(Token {
                    kind,
                    text: slice.to_string(),
                    span,
                });
                if let Some(consumed) = lex_arrow_path(source, range.end, base, tokens)? {
                    lexer.bump(consumed);
                }
            }
            _ => tokens.push(Token {
                kind,
                text: slice.to_string(),
                span,
            }),
        }
    }

    Ok(())
}

/// After `->`, a quoted region holds a document path. Emits the quotes as
/// `Quote` tokens around the path tokens and returns how many bytes after
/// the arrow were consumed, or `None` when no quote follows.
fn lex_arrow_path(
    source: &str,
    from: usize,
    base: usize,
    tokens: &mut Vec<Token>,
) -> Result<Option<usize>, LexError> {
    let rest = &source[from..];
    let open = from + (rest.len() - rest.trim_start_matches([' ', '\t', '\r', '\n', '\x0c']).len());

    let quote = match source.as_bytes().get(open) {
        Some(&q @ (b'\'' | b'"')) => q,
        _ => return Ok(None),
    };

    let close = find_closing_quote(source, open + 1, quote).ok_or_else(|| {
        LexError::new(
            "unterminated quoted document path",
            Span::new(open, source.len()).offset_by(base),
        )
    })?;

    let quote_text = (quote as char).to_string();
    tokens.push(Token {
        kind: TokenKind::Quote,
        text: quote_text.clone(),
        span: Span::new(open, open + 1).offset_by(base),
    });
    lex_into(&source[open + 1..close], base + open + 1, tokens)?;
    tokens.push(Token {
        kind: TokenKind::Quote,
        text: quote_text,
        span: Span::new(close, close + 1).offset_by(base),
    });

    Ok(Some(close + 1 - from))
}

/// Position of the quote closing a document path, skipping over
/// backtick-quoted members
fn find_closing_quote(source: &str, start: usize, quote: u8) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = start;
    let mut in_backticks = false;

    while i < bytes.len() {
        let b = bytes[i];
        if in_backticks {
            if b == b'`' {
                if bytes.get(i + 1) == Some(&b'`') {
                    i += 1;
                } else {
                    in_backticks = false;
                }
            }
        } else if b == b'`' {
            in_backticks = true;
        } else if b == quote {
            return Some(i);
        }
        i += 1;
    }
    None
}

fn unexpected_input(source: &str, at: usize, base: usize) -> LexError {
    let c = source[at..].chars().next().unwrap_or(' ');
    match c {
        '\'' | '"' => LexError::new(
            "unterminated quoted string",
            Span::new(at, source.len()).offset_by(base),
        ),
        '`' => LexError::new(
            "unterminated quoted identifier",
            Span::new(at, source.len()).offset_by(base),
        ),
        _ => LexError::new(
            format!("unexpected character '{}'", c),
            Span::new(at, at + c.len_utf8()).offset_by(base),
        ),
    }
}

/// Decode a quoted string literal, quotes included
fn decode_string(slice: &str) -> String {
    let quote = slice.chars().next().unwrap_or('\'');
    let body = &slice[1..slice.len() - 1];
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('0') => result.push('\0'),
                Some('b') => result.push('\x08'),
                Some('Z') => result.push('\x1a'),
                Some(other) => result.push(other),
                None => {}
            },
            // the token pattern only admits the quote character doubled
            c if c == quote => {
                chars.next();
                result.push(quote);
            }
            c => result.push(c),
        }
    }

    result
}

//! Parser error types

use mysqlx_expr_ast::{Diagnostic, Span};
use mysqlx_expr_lexer::{LexError, Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        text: String,
        span: Span,
    },

    #[error("too many parts in identifier, at most schema.table.column is allowed")]
    TooManyIdentifierParts { text: String, span: Span },

    #[error("expected a time unit after the INTERVAL value, found {found}")]
    InvalidTimeUnit {
        found: String,
        text: String,
        span: Span,
    },

    #[error("document path may not end in '**'")]
    TrailingDoubleWildcard { text: String, span: Span },

    #[error("array index cannot be negative")]
    NegativeArrayIndex { text: String, span: Span },

    #[error("unexpected {found} after the end of the expression")]
    TrailingTokens {
        found: String,
        text: String,
        span: Span,
    },

    #[error("numeric literal '{text}' is out of range")]
    NumberOutOfRange { text: String, span: Span },

    #[error("alias is not allowed here")]
    AliasNotAllowed { text: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span,
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::TooManyIdentifierParts { span, .. } => *span,
            ParseError::InvalidTimeUnit { span, .. } => *span,
            ParseError::TrailingDoubleWildcard { span, .. } => *span,
            ParseError::NegativeArrayIndex { span, .. } => *span,
            ParseError::TrailingTokens { span, .. } => *span,
            ParseError::NumberOutOfRange { span, .. } => *span,
            ParseError::AliasNotAllowed { span, .. } => *span,
        }
    }

    /// Text of the offending token; empty for lexer failures and end of input
    pub fn token_text(&self) -> &str {
        match self {
            ParseError::Lex(_) => "",
            ParseError::UnexpectedToken { text, .. }
            | ParseError::TooManyIdentifierParts { text, .. }
            | ParseError::InvalidTimeUnit { text, .. }
            | ParseError::TrailingDoubleWildcard { text, .. }
            | ParseError::NegativeArrayIndex { text, .. }
            | ParseError::TrailingTokens { text, .. }
            | ParseError::NumberOutOfRange { text, .. }
            | ParseError::AliasNotAllowed { text, .. } => text,
        }
    }

    pub fn unexpected(expected: impl Into<String>, token: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: describe_token(token),
            text: token.text.clone(),
            span: token.span,
        }
    }
}

impl Diagnostic for ParseError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn span(&self) -> Span {
        ParseError::span(self)
    }
}

/// Token description for messages: kind plus text for value-carrying tokens
pub(crate) fn describe_token(token: &Token) -> String {
    match token.kind {
        TokenKind::Ident
        | TokenKind::LInt
        | TokenKind::LFloat
        | TokenKind::LString => format!("{} '{}'", token.kind.describe(), token.text),
        TokenKind::And | TokenKind::Or if token.text.starts_with(['&', '|']) => {
            format!("'{}'", token.text)
        }
        kind => kind.describe().to_string(),
    }
}

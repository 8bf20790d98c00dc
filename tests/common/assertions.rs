use mysqlx_expr::ast::{unparse, Expr};
use mysqlx_expr::parser::{parse_expression, ParseError, ParseMode};

/// Assert that parsing succeeds
pub fn assert_parses(source: &str, mode: ParseMode) -> Expr {
    parse_expression(source, mode)
        .unwrap_or_else(|e| panic!("Expected {:?} to parse, got: {}", source, e))
}

/// Assert that parsing fails
pub fn assert_parse_fails(source: &str, mode: ParseMode) -> ParseError {
    match parse_expression(source, mode) {
        Ok(expr) => panic!("Expected {:?} to fail parsing, got {:?}", source, expr),
        Err(e) => e,
    }
}

/// Assert the canonical text of a parsed expression
pub fn assert_canonical(source: &str, mode: ParseMode, expected: &str) {
    let expr = assert_parses(source, mode);
    let text = unparse(&expr).unwrap_or_else(|e| panic!("Failed to unparse {:?}: {}", source, e));
    assert_eq!(text, expected, "canonical form of {:?}", source);
}

//! Expression parser - recursive descent over the token stream
//!
//! Parses filter, projection and sort expressions into an `Expr` tree.
//! Key parsing challenges:
//! - Two identifier dialects: document paths (`a.b[0]`) and table columns
//!   (`schema.table.column->'$.path'`)
//! - `NOT` binds a whole predicate while `!` binds an atom
//! - Named and positional placeholders share one registry

mod error;
mod parser;
mod placeholders;

pub use error::*;
pub use parser::*;
pub use placeholders::*;

use mysqlx_expr_ast::{ColumnIdentifier, Expr, Order, Projection};
use mysqlx_expr_lexer::tokenize;

/// Parse a complete expression with a fresh placeholder registry
pub fn parse_expression(source: &str, mode: ParseMode) -> Result<Expr, ParseError> {
    let mut registry = PlaceholderRegistry::new();
    parse_expression_with(source, ParseOptions::new(mode), &mut registry)
}

/// Parse a complete expression, resolving placeholders against `registry`
pub fn parse_expression_with(
    source: &str,
    options: ParseOptions,
    registry: &mut PlaceholderRegistry,
) -> Result<Expr, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens, options, registry);
    parser.expr()
}

/// Parse `expr [AS alias], ...`
pub fn parse_projection(
    source: &str,
    mode: ParseMode,
    registry: &mut PlaceholderRegistry,
) -> Result<Vec<Projection>, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens, ParseOptions::new(mode).with_alias(), registry);
    parser.projection_list()
}

/// Parse `expr [ASC|DESC], ...`
pub fn parse_order_by(
    source: &str,
    mode: ParseMode,
    registry: &mut PlaceholderRegistry,
) -> Result<Vec<Order>, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens, ParseOptions::new(mode), registry);
    parser.order_by_list()
}

/// Parse a bare document field such as `$.a[0].b` or `a.b`
pub fn parse_document_field(source: &str) -> Result<ColumnIdentifier, ParseError> {
    let mut registry = PlaceholderRegistry::new();
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens, ParseOptions::default(), &mut registry);
    let field = parser.document_field()?;
    parser.expect_end()?;
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mysqlx_expr_ast::{Diagnostic, Direction, DocumentPathItem, Scalar};

    fn doc(source: &str) -> Expr {
        match parse_expression(source, ParseMode::Document) {
            Ok(expr) => expr,
            Err(e) => panic!("Failed to parse {:?}: {}", source, e),
        }
    }

    fn table(source: &str) -> Expr {
        match parse_expression(source, ParseMode::Table) {
            Ok(expr) => expr,
            Err(e) => panic!("Failed to parse {:?}: {}", source, e),
        }
    }

    fn doc_err(source: &str) -> ParseError {
        parse_expression(source, ParseMode::Document).expect_err("expected a parse error")
    }

    fn table_err(source: &str) -> ParseError {
        parse_expression(source, ParseMode::Table).expect_err("expected a parse error")
    }

    fn field(name: &str) -> Expr {
        Expr::member_path(&[name])
    }

    // === Precedence ===

    #[test]
    fn test_mul_binds_tighter_than_add() {
        assert_eq!(
            doc("1 + 2 * 3"),
            Expr::binary(
                "+",
                Expr::uint(1),
                Expr::binary("*", Expr::uint(2), Expr::uint(3))
            )
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(
            doc("a AND b OR c"),
            Expr::binary(
                "||",
                Expr::binary("&&", field("a"), field("b")),
                field("c")
            )
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        assert_eq!(
            doc("10 - 4 - 3"),
            Expr::binary(
                "-",
                Expr::binary("-", Expr::uint(10), Expr::uint(4)),
                Expr::uint(3)
            )
        );
    }

    #[test]
    fn test_operator_spellings() {
        assert_eq!(doc("a && b"), doc("a AND b"));
        assert_eq!(doc("a || b"), doc("a or b"));
        assert_eq!(doc("a = 1"), doc("a == 1"));
        assert_eq!(doc("a <> 1"), doc("a != 1"));
        assert_eq!(doc("a = 1").operator_name(), Some("=="));
    }

    #[test]
    fn test_div_and_modulo() {
        assert_eq!(
            doc("a DIV 2 % 3"),
            Expr::binary(
                "%",
                Expr::binary("div", field("a"), Expr::uint(2)),
                Expr::uint(3)
            )
        );
    }

    #[test]
    fn test_comparison_below_bitwise() {
        assert_eq!(
            doc("a & 1 = 0"),
            Expr::binary(
                "==",
                Expr::binary("&", field("a"), Expr::uint(1)),
                Expr::uint(0)
            )
        );
    }

    // === NOT folding ===

    #[test]
    fn test_not_in_list_both_spellings() {
        let expected = Expr::unary(
            "not",
            Expr::operator("in", vec![field("a"), Expr::uint(1), Expr::uint(2)]),
        );
        assert_eq!(doc("NOT a IN (1, 2)"), expected);
        assert_eq!(doc("a NOT IN (1, 2)"), expected);
    }

    #[test]
    fn test_not_like_between_regexp() {
        assert_eq!(
            doc("a NOT LIKE 'x%'"),
            Expr::unary(
                "not",
                Expr::operator("like", vec![field("a"), Expr::string("x%")])
            )
        );
        assert_eq!(
            doc("a NOT BETWEEN 1 AND 5"),
            Expr::unary(
                "not",
                Expr::operator("between", vec![field("a"), Expr::uint(1), Expr::uint(5)])
            )
        );
        assert_eq!(
            doc("a NOT REGEXP 'b'").operator_name(),
            Some("not")
        );
    }

    #[test]
    fn test_is_not() {
        assert_eq!(
            doc("a IS NOT NULL"),
            Expr::binary("is_not", field("a"), Expr::null())
        );
        assert_eq!(doc("a IS TRUE"), Expr::binary("is", field("a"), Expr::bool(true)));
    }

    #[test]
    fn test_not_spans_comparison_but_not_and() {
        assert_eq!(
            doc("NOT a = 1 AND b"),
            Expr::binary(
                "&&",
                Expr::unary("not", Expr::binary("==", field("a"), Expr::uint(1))),
                field("b")
            )
        );
    }

    #[test]
    fn test_not_spans_arithmetic() {
        assert_eq!(
            doc("NOT a + 1"),
            Expr::unary("not", Expr::binary("+", field("a"), Expr::uint(1)))
        );
        assert_eq!(
            doc("NOT a + 1 = 2"),
            Expr::unary(
                "not",
                Expr::binary(
                    "==",
                    Expr::binary("+", field("a"), Expr::uint(1)),
                    Expr::uint(2)
                )
            )
        );
    }

    #[test]
    fn test_between_bounds_need_and_keyword() {
        assert_eq!(
            doc("a BETWEEN 1 and 5"),
            Expr::operator("between", vec![field("a"), Expr::uint(1), Expr::uint(5)])
        );
        let err = doc_err("a BETWEEN 1 && 5");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(err.to_string(), "expected AND, found '&&'");
        assert_eq!(err.offset(), 12);
    }

    #[test]
    fn test_bang_binds_atom() {
        assert_eq!(
            doc("!a = 1"),
            Expr::binary("==", Expr::unary("!", field("a")), Expr::uint(1))
        );
    }

    #[test]
    fn test_bare_in_is_containment() {
        assert_eq!(
            doc("'x' IN tags"),
            Expr::binary("cont_in", Expr::string("x"), field("tags"))
        );
        assert_eq!(
            doc("'x' NOT IN tags"),
            Expr::binary("not_cont_in", Expr::string("x"), field("tags"))
        );
    }

    #[test]
    fn test_bare_in_operand_may_start_with_parenthesis() {
        let sum = Expr::binary("+", field("b"), Expr::uint(1));
        assert_eq!(
            doc("a IN b + 1"),
            Expr::binary("cont_in", field("a"), sum.clone())
        );
        assert_eq!(
            doc("a IN (b + 1) * 2"),
            Expr::binary("cont_in", field("a"), Expr::binary("*", sum.clone(), Expr::uint(2)))
        );
        // a lone group is still a one-element list
        assert_eq!(doc("a IN (b + 1)"), Expr::operator("in", vec![field("a"), sum]));
        assert_eq!(
            doc("a IN (1, 2)"),
            Expr::operator("in", vec![field("a"), Expr::uint(1), Expr::uint(2)])
        );
    }

    #[test]
    fn test_like_escape() {
        assert_eq!(
            doc("name LIKE 'a|%' ESCAPE '|'"),
            Expr::operator(
                "like",
                vec![field("name"), Expr::string("a|%"), Expr::string("|")]
            )
        );
    }

    // === Literals and signs ===

    #[test]
    fn test_sign_folds_into_numeric_literal() {
        assert_eq!(doc("-5"), Expr::sint(-5));
        assert_eq!(doc("+5"), Expr::uint(5));
        assert_eq!(doc("-1.5"), Expr::double(-1.5));
        assert_eq!(doc("5"), Expr::uint(5));
        assert_eq!(
            doc("1 - -2"),
            Expr::binary("-", Expr::uint(1), Expr::sint(-2))
        );
    }

    #[test]
    fn test_sign_on_non_literal() {
        assert_eq!(doc("-a"), Expr::unary("sign_minus", field("a")));
        assert_eq!(doc("+a"), Expr::unary("sign_plus", field("a")));
        assert_eq!(doc("~a"), Expr::unary("~", field("a")));
    }

    #[test]
    fn test_integer_limits() {
        assert_eq!(doc("-9223372036854775808"), Expr::sint(i64::MIN));
        assert_eq!(doc("18446744073709551615"), Expr::uint(u64::MAX));
        assert!(matches!(
            doc_err("-9223372036854775809"),
            ParseError::NumberOutOfRange { .. }
        ));
        assert!(matches!(
            doc_err("18446744073709551616"),
            ParseError::NumberOutOfRange { .. }
        ));
    }

    #[test]
    fn test_keyword_literals() {
        assert_eq!(doc("TRUE"), Expr::Literal(Scalar::Bool(true)));
        assert_eq!(doc("false"), Expr::Literal(Scalar::Bool(false)));
        assert_eq!(doc("Null"), Expr::Literal(Scalar::Null));
    }

    // === Placeholders ===

    #[test]
    fn test_placeholder_numbering() {
        let mut registry = PlaceholderRegistry::new();
        let expr = parse_expression_with(
            ":a = :a AND :b = ?",
            ParseOptions::new(ParseMode::Document),
            &mut registry,
        )
        .unwrap();

        assert_eq!(
            expr,
            Expr::binary(
                "&&",
                Expr::binary("==", Expr::Placeholder(0), Expr::Placeholder(0)),
                Expr::binary("==", Expr::Placeholder(1), Expr::Placeholder(2))
            )
        );
        assert_eq!(registry.names(), &["a", "b", "2"]);
    }

    #[test]
    fn test_registry_shared_across_calls() {
        let mut registry = PlaceholderRegistry::new();
        let options = ParseOptions::new(ParseMode::Document);
        parse_expression_with("a = :x", options, &mut registry).unwrap();
        let expr = parse_expression_with("b = :y OR c = :x", options, &mut registry).unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                "||",
                Expr::binary("==", field("b"), Expr::Placeholder(1)),
                Expr::binary("==", field("c"), Expr::Placeholder(0))
            )
        );
    }

    // === Document paths ===

    #[test]
    fn test_document_path_items() {
        assert_eq!(
            doc("$.a[0].*[*].b**.c"),
            Expr::document_field(vec![
                DocumentPathItem::Member("a".into()),
                DocumentPathItem::ArrayIndex(0),
                DocumentPathItem::MemberWildcard,
                DocumentPathItem::ArrayIndexWildcard,
                DocumentPathItem::Member("b".into()),
                DocumentPathItem::DoubleWildcard,
                DocumentPathItem::Member("c".into()),
            ])
        );
    }

    #[test]
    fn test_document_path_quoted_member_and_keyword_member() {
        assert_eq!(
            doc("$.'first name'.year"),
            Expr::document_field(vec![
                DocumentPathItem::Member("first name".into()),
                DocumentPathItem::Member("year".into()),
            ])
        );
    }

    #[test]
    fn test_trailing_double_wildcard_rejected() {
        let err = doc_err("$.a.**");
        assert!(matches!(err, ParseError::TrailingDoubleWildcard { .. }));
        assert_eq!(err.span().start, 4);
    }

    #[test]
    fn test_negative_array_index_rejected() {
        assert!(matches!(
            doc_err("a[-1]"),
            ParseError::NegativeArrayIndex { .. }
        ));
    }

    #[test]
    fn test_parse_document_field() {
        let id = parse_document_field("a.b[1]").unwrap();
        assert_eq!(
            id.document_path,
            vec![
                DocumentPathItem::Member("a".into()),
                DocumentPathItem::Member("b".into()),
                DocumentPathItem::ArrayIndex(1),
            ]
        );
        assert!(parse_document_field("a + 1").is_err());
    }

    #[test]
    fn test_document_field_stops_before_operator() {
        let mut registry = PlaceholderRegistry::new();
        let tokens = tokenize("a.b = 1").unwrap();
        let mut parser = Parser::new(tokens, ParseOptions::default(), &mut registry);
        let id = parser.document_field().unwrap();
        assert_eq!(id.document_path.len(), 2);
        assert!(parser.expect_end().is_err());
    }

    // === Column identifiers ===

    #[test]
    fn test_column_parts_assigned_right_to_left() {
        match table("a.b.c") {
            Expr::Identifier(id) => {
                assert_eq!(id.name.as_deref(), Some("c"));
                assert_eq!(id.table_name.as_deref(), Some("b"));
                assert_eq!(id.schema_name.as_deref(), Some("a"));
            }
            other => panic!("expected identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_four_part_column_rejected() {
        let err = table_err("a.b.c.d");
        assert!(matches!(err, ParseError::TooManyIdentifierParts { .. }));
        assert_eq!(err.token_text(), "d");
        assert_eq!(err.span().start, 6);
    }

    #[test]
    fn test_column_with_json_path() {
        match table("doc->'$.name[0]'") {
            Expr::Identifier(id) => {
                assert_eq!(id.name.as_deref(), Some("doc"));
                assert_eq!(
                    id.document_path,
                    vec![
                        DocumentPathItem::Member("name".into()),
                        DocumentPathItem::ArrayIndex(0),
                    ]
                );
            }
            other => panic!("expected identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_two_head_arrow_unquotes() {
        match table("t.doc->>'$.a'") {
            Expr::FunctionCall(call) => {
                assert_eq!(call.name.name, "JSON_UNQUOTE");
                assert_eq!(call.args.len(), 1);
            }
            other => panic!("expected JSON_UNQUOTE call, got {:?}", other),
        }
    }

    #[test]
    fn test_backtick_column() {
        assert_eq!(table("`select`"), Expr::column("select"));
    }

    // === Calls, casts, intervals ===

    #[test]
    fn test_function_calls() {
        assert_eq!(
            doc("concat(a, 'x')"),
            Expr::call("concat", vec![field("a"), Expr::string("x")])
        );
        match doc("mysql.now()") {
            Expr::FunctionCall(call) => {
                assert_eq!(call.name.schema_name.as_deref(), Some("mysql"));
                assert_eq!(call.name.name, "now");
                assert!(call.args.is_empty());
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_soft_keyword_as_function_and_field() {
        assert_eq!(doc("year(d)"), Expr::call("year", vec![field("d")]));
        assert_eq!(doc("date > 1"), Expr::binary(">", field("date"), Expr::uint(1)));
    }

    #[test]
    fn test_cast_types() {
        let cast = |source: &str| match doc(source) {
            Expr::Operator(op) if op.name == "cast" => op.args[1].clone(),
            other => panic!("expected cast, got {:?}", other),
        };
        assert_eq!(cast("CAST(a AS DECIMAL(10,2))"), Expr::string("DECIMAL(10,2)"));
        assert_eq!(cast("cast(a as signed int)"), Expr::string("SIGNED INTEGER"));
        assert_eq!(
            cast("CAST(a AS CHAR(5) CHARACTER SET utf8mb4)"),
            Expr::string("CHAR(5) CHARSET utf8mb4")
        );
        assert_eq!(cast("CAST(a AS json)"), Expr::string("JSON"));
        assert_eq!(cast("BINARY a"), Expr::string("BINARY"));
    }

    #[test]
    fn test_interval_arithmetic() {
        assert_eq!(
            doc("d + INTERVAL 2 DAY"),
            Expr::operator("date_add", vec![field("d"), Expr::uint(2), Expr::string("DAY")])
        );
        assert_eq!(
            doc("d - interval 1 year_month"),
            Expr::operator(
                "date_sub",
                vec![field("d"), Expr::uint(1), Expr::string("YEAR_MONTH")]
            )
        );
        assert_eq!(
            doc("INTERVAL 3 HOUR + d"),
            Expr::binary(
                "+",
                Expr::operator("interval", vec![Expr::uint(3), Expr::string("HOUR")]),
                field("d")
            )
        );
    }

    #[test]
    fn test_standalone_interval() {
        assert_eq!(
            doc("INTERVAL 1 DAY"),
            Expr::operator("interval", vec![Expr::uint(1), Expr::string("DAY")])
        );
        assert_eq!(
            doc("date_add(d, INTERVAL n * 2 minute)"),
            Expr::call(
                "date_add",
                vec![
                    field("d"),
                    Expr::operator(
                        "interval",
                        vec![
                            Expr::binary("*", field("n"), Expr::uint(2)),
                            Expr::string("MINUTE")
                        ]
                    ),
                ]
            )
        );
        assert_eq!(
            doc("d + (INTERVAL 1 DAY)"),
            Expr::binary(
                "+",
                field("d"),
                Expr::operator("interval", vec![Expr::uint(1), Expr::string("DAY")])
            )
        );
    }

    #[test]
    fn test_interval_requires_unit() {
        assert!(matches!(
            doc_err("d + INTERVAL 2 fortnight"),
            ParseError::InvalidTimeUnit { .. }
        ));
    }

    // === Arrays and objects ===

    #[test]
    fn test_array_and_object() {
        assert_eq!(
            doc("[1, 'a', []]"),
            Expr::Array(vec![Expr::uint(1), Expr::string("a"), Expr::Array(vec![])])
        );
        match doc("{'k': 1, name: [2]}") {
            Expr::Object(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].key, "k");
                assert_eq!(fields[1].key, "name");
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    // === Errors ===

    #[test]
    fn test_unexpected_end_offset() {
        let err = doc_err("1 +");
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(err.offset(), 3);
        assert_eq!(err.token_length(), 0);
        assert_eq!(err.token_text(), "");
    }

    #[test]
    fn test_malformed_float_is_lex_error() {
        assert!(matches!(doc_err("1.5E"), ParseError::Lex(_)));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = doc_err("a b");
        assert!(matches!(err, ParseError::TrailingTokens { .. }));
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_format_has_caret() {
        let err = doc_err("a = = 1");
        assert_eq!(
            err.format("a = = 1"),
            "expected expression, found '=', at position 4,\nin: a = = 1\n        ^  "
        );
    }

    // === Projection and order ===

    #[test]
    fn test_projection_aliases() {
        let mut registry = PlaceholderRegistry::new();
        let items = parse_projection("a AS x, b + 1", ParseMode::Document, &mut registry).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].alias.as_deref(), Some("x"));
        assert_eq!(items[1].alias, None);
    }

    #[test]
    fn test_alias_rejected_without_option() {
        let mut registry = PlaceholderRegistry::new();
        let tokens = tokenize("a AS x").unwrap();
        let mut parser = Parser::new(tokens, ParseOptions::default(), &mut registry);
        assert!(matches!(
            parser.aliased_expr(),
            Err(ParseError::AliasNotAllowed { .. })
        ));
        assert!(matches!(
            doc_err("a AS x"),
            ParseError::TrailingTokens { .. }
        ));
    }

    #[test]
    fn test_order_by_directions() {
        let mut registry = PlaceholderRegistry::new();
        let items =
            parse_order_by("a DESC, b asc, c", ParseMode::Table, &mut registry).unwrap();
        let directions: Vec<_> = items.iter().map(|o| o.direction).collect();
        assert_eq!(
            directions,
            vec![Some(Direction::Desc), Some(Direction::Asc), None]
        );
    }
}

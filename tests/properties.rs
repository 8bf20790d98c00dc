//! Parser behaviour observed through the public entry points

mod common;

use common::assertions::{assert_canonical, assert_parse_fails, assert_parses};
use mysqlx_expr::ast::{Expr, Unparse};
use mysqlx_expr::parser::{
    parse_document_field, parse_expression_with, parse_order_by, parse_projection, ParseError,
    ParseMode, ParseOptions, PlaceholderRegistry,
};
use serde_json::json;

use ParseMode::{Document, Table};

#[test]
fn test_precedence() {
    assert_canonical("1 + 2 * 3", Table, "(1 + (2 * 3))");
    assert_canonical("a AND b OR c", Table, "((a AND b) OR c)");
    assert_canonical("a AND b OR c", Document, "(($.a AND $.b) OR $.c)");
    assert_canonical("a | b & c", Table, "((a | b) & c)");
    assert_canonical("a + b << 1 = 4", Table, "(((a + b) << 1) = 4)");
}

#[test]
fn test_not_folding() {
    assert_canonical("NOT a IN (1, 2)", Table, "(NOT (a IN (1, 2)))");
    assert_canonical("a NOT IN (1, 2)", Table, "(NOT (a IN (1, 2)))");
    assert_canonical("a NOT LIKE 'x'", Table, r#"(NOT (a LIKE "x"))"#);
    assert_canonical("a IS NOT NULL", Table, "(a IS NOT NULL)");
    assert_canonical("'x' NOT IN tags", Table, r#"("x" NOT IN tags)"#);
    assert_canonical("NOT a + 1", Table, "(NOT (a + 1))");
}

#[test]
fn test_bare_in_with_computed_collection() {
    assert_canonical("a IN b + 1", Table, "(a IN b + 1)");
    assert_canonical("'x' NOT IN b = c", Table, r#"("x" NOT IN b = c)"#);
    assert_canonical("a IN (b + 1) * 2", Table, "(a IN (b + 1) * 2)");
    assert_canonical("a IN (b + 1)", Table, "(a IN ((b + 1)))");
}

#[test]
fn test_standalone_interval() {
    assert_canonical(
        "date_add(d, INTERVAL 1 day)",
        Table,
        "date_add(d, (INTERVAL 1 DAY))",
    );
    assert_canonical("INTERVAL 3 WEEK + d", Table, "((INTERVAL 3 WEEK) + d)");
    assert_canonical("d + (INTERVAL 3 WEEK)", Table, "(d + (INTERVAL 3 WEEK))");
}

#[test]
fn test_between_rejects_symbolic_and() {
    let err = assert_parse_fails("a BETWEEN 1 && 5", Table);
    assert!(matches!(err, ParseError::UnexpectedToken { .. }), "{:?}", err);
    assert_eq!(err.token_text(), "&&");
}

#[test]
fn test_special_forms() {
    assert_canonical(
        "CAST(a AS char(5) charset latin1)",
        Table,
        "CAST(a AS CHAR(5) CHARSET latin1)",
    );
    assert_canonical("a - INTERVAL 1 day", Table, "(a - INTERVAL 1 DAY)");
    assert_canonical("-(5)", Table, "-(5)");
    assert_canonical("doc->>'$.name'", Table, "JSON_UNQUOTE(doc->'$.name')");
    assert_canonical("{a: [1, 'b']}", Document, r#"{"a": [1, "b"]}"#);
    assert_canonical("`my col` + 1", Table, "(`my col` + 1)");
}

#[test]
fn test_placeholder_positions() {
    let mut registry = PlaceholderRegistry::new();
    let expr = parse_expression_with(
        ":a = :a AND :b = ?",
        ParseOptions::new(Document),
        &mut registry,
    )
    .unwrap();

    let mut positions = Vec::new();
    collect_placeholders(&expr, &mut positions);
    assert_eq!(positions, vec![0, 0, 1, 2]);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.name(2), Some("2"));
}

fn collect_placeholders(expr: &Expr, out: &mut Vec<u32>) {
    match expr {
        Expr::Placeholder(position) => out.push(*position),
        Expr::Operator(op) => op.args.iter().for_each(|a| collect_placeholders(a, out)),
        Expr::FunctionCall(call) => call.args.iter().for_each(|a| collect_placeholders(a, out)),
        Expr::Array(items) => items.iter().for_each(|a| collect_placeholders(a, out)),
        Expr::Object(fields) => fields
            .iter()
            .for_each(|f| collect_placeholders(&f.value, out)),
        Expr::Literal(_) | Expr::Identifier(_) => {}
    }
}

#[test]
fn test_identifier_rules() {
    match assert_parses("a.b.c", Table) {
        Expr::Identifier(id) => {
            assert_eq!(id.name.as_deref(), Some("c"));
            assert_eq!(id.table_name.as_deref(), Some("b"));
            assert_eq!(id.schema_name.as_deref(), Some("a"));
            assert!(id.document_path.is_empty());
        }
        other => panic!("expected identifier, got {:?}", other),
    }

    assert!(matches!(
        assert_parse_fails("a.b.c.d", Table),
        ParseError::TooManyIdentifierParts { .. }
    ));
    assert!(matches!(
        assert_parse_fails("$.a.**", Document),
        ParseError::TrailingDoubleWildcard { .. }
    ));
    assert!(matches!(
        assert_parse_fails("col->'$.a**'", Table),
        ParseError::TrailingDoubleWildcard { .. }
    ));
}

#[test]
fn test_document_field_entry_point() {
    let id = parse_document_field("$.a.*[2]").unwrap();
    assert_eq!(id.document_path.len(), 3);
    assert_eq!(id.unparse().unwrap(), "$.a.*[2]");
}

#[test]
fn test_projection_and_order_lists() {
    let mut registry = PlaceholderRegistry::new();
    let items = parse_projection("a AS x, b + :p AS total", Table, &mut registry).unwrap();
    assert_eq!(items.as_slice().unparse().unwrap(), "a AS x, (b + :0) AS total");

    let orders = parse_order_by("a DESC, b asc, c + :q", Table, &mut registry).unwrap();
    assert_eq!(orders.as_slice().unparse().unwrap(), "a DESC, b ASC, (c + :1)");
    assert_eq!(registry.names(), &["p", "q"]);
}

#[test]
fn test_tree_json_shape() {
    let expr = assert_parses("a > ?", Table);
    assert_eq!(
        serde_json::to_value(&expr).unwrap(),
        json!({
            "Operator": {
                "name": ">",
                "args": [
                    {
                        "Identifier": {
                            "name": "a",
                            "table_name": null,
                            "schema_name": null,
                            "document_path": []
                        }
                    },
                    { "Placeholder": 0 }
                ]
            }
        })
    );

    let back: Expr = serde_json::from_value(serde_json::to_value(&expr).unwrap()).unwrap();
    assert_eq!(back, expr);
}

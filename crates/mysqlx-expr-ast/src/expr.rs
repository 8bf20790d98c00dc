//! Expression tree nodes

use serde::{Deserialize, Serialize};

/// An expression
///
/// Every node owns its children. Placeholders refer to the session's
/// placeholder registry by position only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Scalar literal: `1`, `-2.5`, `'text'`, `true`, `null`
    Literal(Scalar),

    /// Column reference or document field: `t.col`, `$.a[0]`, `col->'$.a'`
    Identifier(ColumnIdentifier),

    /// Function call: `concat(a, b)`, `schema.fn()`
    FunctionCall(FunctionCall),

    /// Operator application: `a + b`, `not x`, `a in (1, 2)`
    Operator(Operator),

    /// Parameter marker: `:name`, `:1`, `?`
    Placeholder(u32),

    /// Array literal: `[1, 2, 3]`
    Array(Vec<Expr>),

    /// JSON object literal: `{"a": 1}`
    Object(Vec<ObjectField>),
}

/// A scalar value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    SInt(i64),
    UInt(u64),
    Double(f64),
    String(String),
}

/// A column identifier with an optional document path.
///
/// In document mode `name` is `None` and only the path is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnIdentifier {
    pub name: Option<String>,
    pub table_name: Option<String>,
    pub schema_name: Option<String>,
    pub document_path: Vec<DocumentPathItem>,
}

/// One segment of a JSON document path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentPathItem {
    /// `.name`
    Member(String),
    /// `.*`
    MemberWildcard,
    /// `[3]`
    ArrayIndex(u32),
    /// `[*]`
    ArrayIndexWildcard,
    /// `**`, never the last item of a path
    DoubleWildcard,
}

/// A possibly schema-qualified function name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub schema_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: Identifier,
    pub args: Vec<Expr>,
}

/// Operator application. `name` uses the X Protocol operator names
/// (`&&`, `==`, `sign_minus`, `cont_in`, `date_add`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectField {
    pub key: String,
    pub value: Expr,
}

impl Expr {
    pub fn operator(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Operator(Operator {
            name: name.into(),
            args,
        })
    }

    pub fn unary(name: impl Into<String>, operand: Expr) -> Expr {
        Expr::operator(name, vec![operand])
    }

    pub fn binary(name: impl Into<String>, lhs: Expr, rhs: Expr) -> Expr {
        Expr::operator(name, vec![lhs, rhs])
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::FunctionCall(FunctionCall {
            name: Identifier {
                name: name.into(),
                schema_name: None,
            },
            args,
        })
    }

    /// Plain column reference without table or schema
    pub fn column(name: impl Into<String>) -> Expr {
        Expr::Identifier(ColumnIdentifier {
            name: Some(name.into()),
            ..ColumnIdentifier::default()
        })
    }

    /// Document field reference from its path items
    pub fn document_field(path: Vec<DocumentPathItem>) -> Expr {
        Expr::Identifier(ColumnIdentifier {
            document_path: path,
            ..ColumnIdentifier::default()
        })
    }

    /// Document field made of plain member names: `a.b.c`
    pub fn member_path(members: &[&str]) -> Expr {
        Expr::document_field(
            members
                .iter()
                .map(|m| DocumentPathItem::Member((*m).to_string()))
                .collect(),
        )
    }

    pub fn null() -> Expr {
        Expr::Literal(Scalar::Null)
    }

    pub fn uint(value: u64) -> Expr {
        Expr::Literal(Scalar::UInt(value))
    }

    pub fn sint(value: i64) -> Expr {
        Expr::Literal(Scalar::SInt(value))
    }

    pub fn double(value: f64) -> Expr {
        Expr::Literal(Scalar::Double(value))
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::Literal(Scalar::String(value.into()))
    }

    pub fn bool(value: bool) -> Expr {
        Expr::Literal(Scalar::Bool(value))
    }

    /// Operator name when this node is an operator application
    pub fn operator_name(&self) -> Option<&str> {
        match self {
            Expr::Operator(op) => Some(op.name.as_str()),
            _ => None,
        }
    }
}

impl ColumnIdentifier {
    /// True when the path ends in `**`, which no valid path may do
    pub fn has_trailing_double_wildcard(&self) -> bool {
        matches!(self.document_path.last(), Some(DocumentPathItem::DoubleWildcard))
    }
}

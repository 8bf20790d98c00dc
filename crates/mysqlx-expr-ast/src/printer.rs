//! Canonical text printer for expression trees
//!
//! Binary operators are always fully parenthesized, so the output parses
//! back to the same tree regardless of precedence.

use thiserror::Error;

use crate::{
    ColumnIdentifier, DocumentPathItem, Expr, FunctionCall, Identifier, Operator, Order,
    Projection, Scalar,
};

/// Words that can never be used as a bare identifier and must be quoted.
pub const RESERVED_WORDS: &[&str] = &[
    "and", "or", "not", "is", "in", "like", "escape", "between", "regexp", "overlaps",
    "interval", "div", "true", "false", "null", "as", "asc", "desc", "cast", "binary",
];

/// Units accepted after `INTERVAL <expr>`.
pub const TIME_UNITS: &[&str] = &[
    "MICROSECOND", "SECOND", "MINUTE", "HOUR", "DAY", "WEEK", "MONTH", "QUARTER", "YEAR",
    "SECOND_MICROSECOND", "MINUTE_MICROSECOND", "MINUTE_SECOND", "HOUR_MICROSECOND",
    "HOUR_SECOND", "HOUR_MINUTE", "DAY_MICROSECOND", "DAY_SECOND", "DAY_MINUTE", "DAY_HOUR",
    "YEAR_MONTH",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnparseError {
    #[error("operator '{name}' expects {expected} arguments, got {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("operator '{name}' requires {what}")]
    MalformedOperand { name: String, what: &'static str },

    #[error("double value {0} has no literal form")]
    NonFiniteDouble(f64),

    #[error("document path may not end in '**'")]
    TrailingDoubleWildcard,

    #[error("table or schema given without a column name")]
    MissingColumnName,
}

impl UnparseError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Trees carry no source text, so unparse errors sit at position 0
    pub fn offset(&self) -> usize {
        0
    }

    pub fn token_length(&self) -> usize {
        0
    }
}

/// Conversion of tree nodes to canonical expression text.
pub trait Unparse {
    fn unparse(&self) -> Result<String, UnparseError>;
}

/// Render an expression as canonical text
pub fn unparse(expr: &Expr) -> Result<String, UnparseError> {
    expr.unparse()
}

pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}

/// Backtick-quote `name` unless it is a plain, unreserved word.
pub fn quote_identifier(name: &str) -> String {
    let mut chars = name.chars();
    let plain = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if plain && !is_reserved_word(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Double-quote a string literal
pub fn quote_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for c in value.chars() {
        match c {
            '"' => result.push_str("\"\""),
            '\\' => result.push_str("\\\\"),
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}

fn unparse_list(items: &[Expr]) -> Result<String, UnparseError> {
    let parts = items
        .iter()
        .map(Unparse::unparse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(", "))
}

// ===== Expressions =====

impl Unparse for Expr {
    fn unparse(&self) -> Result<String, UnparseError> {
        match self {
            Expr::Literal(scalar) => scalar.unparse(),
            Expr::Identifier(id) => id.unparse(),
            Expr::FunctionCall(call) => call.unparse(),
            Expr::Operator(op) => op.unparse(),
            Expr::Placeholder(position) => Ok(format!(":{}", position)),
            Expr::Array(items) => Ok(format!("[{}]", unparse_list(items)?)),
            Expr::Object(fields) => {
                let fields = fields
                    .iter()
                    .map(|f| Ok(format!("{}: {}", quote_string(&f.key), f.value.unparse()?)))
                    .collect::<Result<Vec<_>, UnparseError>>()?;
                Ok(format!("{{{}}}", fields.join(", ")))
            }
        }
    }
}

impl Unparse for Scalar {
    fn unparse(&self) -> Result<String, UnparseError> {
        Ok(match self {
            Scalar::Null => "NULL".to_string(),
            Scalar::Bool(true) => "TRUE".to_string(),
            Scalar::Bool(false) => "FALSE".to_string(),
            // `-0` is the only spelling that parses back to a signed zero
            Scalar::SInt(0) => "-0".to_string(),
            Scalar::SInt(v) => v.to_string(),
            Scalar::UInt(v) => v.to_string(),
            Scalar::Double(v) => {
                if !v.is_finite() {
                    return Err(UnparseError::NonFiniteDouble(*v));
                }
                // Debug keeps a fraction or exponent, so the text lexes as a float again
                let text = format!("{:?}", v);
                if text.contains(['.', 'e', 'E']) {
                    text
                } else {
                    format!("{}.0", text)
                }
            }
            Scalar::String(s) => quote_string(s),
        })
    }
}

impl Unparse for ColumnIdentifier {
    fn unparse(&self) -> Result<String, UnparseError> {
        if self.has_trailing_double_wildcard() {
            return Err(UnparseError::TrailingDoubleWildcard);
        }
        let path = document_path_to_string(&self.document_path);

        let Some(name) = &self.name else {
            if self.table_name.is_some() || self.schema_name.is_some() {
                return Err(UnparseError::MissingColumnName);
            }
            return Ok(path);
        };

        let mut text = String::new();
        if let Some(schema) = &self.schema_name {
            text.push_str(&quote_identifier(schema));
            text.push('.');
        }
        if let Some(table) = &self.table_name {
            text.push_str(&quote_identifier(table));
            text.push('.');
        }
        text.push_str(&quote_identifier(name));

        if !self.document_path.is_empty() {
            text.push_str("->'");
            text.push_str(&path);
            text.push('\'');
        }
        Ok(text)
    }
}

fn document_path_to_string(path: &[DocumentPathItem]) -> String {
    let mut text = String::from("$");
    for item in path {
        match item {
            DocumentPathItem::Member(name) => {
                text.push('.');
                text.push_str(&quote_identifier(name));
            }
            DocumentPathItem::MemberWildcard => text.push_str(".*"),
            DocumentPathItem::ArrayIndex(index) => text.push_str(&format!("[{}]", index)),
            DocumentPathItem::ArrayIndexWildcard => text.push_str("[*]"),
            DocumentPathItem::DoubleWildcard => text.push_str("**"),
        }
    }
    text
}

impl Unparse for Identifier {
    fn unparse(&self) -> Result<String, UnparseError> {
        Ok(match &self.schema_name {
            Some(schema) => format!("{}.{}", quote_identifier(schema), quote_identifier(&self.name)),
            None => quote_identifier(&self.name),
        })
    }
}

impl Unparse for FunctionCall {
    fn unparse(&self) -> Result<String, UnparseError> {
        Ok(format!("{}({})", self.name.unparse()?, unparse_list(&self.args)?))
    }
}

// ===== Operators =====

/// Infix spelling of binary operators
fn binary_keyword(name: &str) -> Option<&'static str> {
    Some(match name {
        "||" => "OR",
        "&&" => "AND",
        "==" => "=",
        "!=" => "!=",
        ">" => ">",
        ">=" => ">=",
        "<" => "<",
        "<=" => "<=",
        "&" => "&",
        "|" => "|",
        "^" => "^",
        "<<" => "<<",
        ">>" => ">>",
        "+" => "+",
        "-" => "-",
        "*" => "*",
        "/" => "/",
        "div" => "DIV",
        "%" => "%",
        "is" => "IS",
        "is_not" => "IS NOT",
        "regexp" => "REGEXP",
        "not_regexp" => "NOT REGEXP",
        "overlaps" => "OVERLAPS",
        "not_overlaps" => "NOT OVERLAPS",
        _ => return None,
    })
}

/// Right side of a bare `IN`. A lone parenthesized operand reads back as an
/// IN list, so operators the comparison level parses on its own lose their
/// outer parentheses.
fn unparse_collection(expr: &Expr) -> Result<String, UnparseError> {
    let text = expr.unparse()?;
    let bare = match expr {
        Expr::Operator(op) => {
            matches!(op.name.as_str(), "date_add" | "date_sub" | "interval" | "not")
                || is_comparison_level(&op.name)
        }
        _ => false,
    };
    if bare {
        if let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
            return Ok(inner.to_string());
        }
    }
    Ok(text)
}

/// Binary operators parsed at or below the comparison level
fn is_comparison_level(name: &str) -> bool {
    matches!(
        name,
        "==" | "!=" | ">" | ">=" | "<" | "<=" | "&" | "|" | "^" | "<<" | ">>" | "+" | "-" | "*"
            | "/" | "div" | "%"
    )
}

fn is_numeric_literal(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Literal(Scalar::SInt(_) | Scalar::UInt(_) | Scalar::Double(_))
    )
}

fn string_operand<'a>(
    op: &'a Operator,
    index: usize,
    what: &'static str,
) -> Result<&'a str, UnparseError> {
    match op.args.get(index) {
        Some(Expr::Literal(Scalar::String(s))) => Ok(s.as_str()),
        _ => Err(UnparseError::MalformedOperand {
            name: op.name.clone(),
            what,
        }),
    }
}

impl Operator {
    /// Upper-cased time unit operand at `index`
    fn time_unit(&self, index: usize) -> Result<String, UnparseError> {
        let unit = string_operand(self, index, "a time unit string literal")?;
        if !TIME_UNITS.iter().any(|u| u.eq_ignore_ascii_case(unit)) {
            return Err(UnparseError::MalformedOperand {
                name: self.name.clone(),
                what: "a known time unit",
            });
        }
        Ok(unit.to_ascii_uppercase())
    }

    fn expect_arity(&self, expected: &'static str, ok: bool) -> Result<(), UnparseError> {
        if ok {
            Ok(())
        } else {
            Err(UnparseError::Arity {
                name: self.name.clone(),
                expected,
                found: self.args.len(),
            })
        }
    }
}

impl Unparse for Operator {
    fn unparse(&self) -> Result<String, UnparseError> {
        let args = &self.args;
        let name = self.name.as_str();

        match name {
            "in" | "not_in" => {
                self.expect_arity("at least 2", args.len() >= 2)?;
                let keyword = if name == "in" { "IN" } else { "NOT IN" };
                Ok(format!(
                    "({} {} ({}))",
                    args[0].unparse()?,
                    keyword,
                    unparse_list(&args[1..])?
                ))
            }
            "like" | "not_like" => {
                self.expect_arity("2 or 3", matches!(args.len(), 2 | 3))?;
                let keyword = if name == "like" { "LIKE" } else { "NOT LIKE" };
                let mut text = format!("({} {} {}", args[0].unparse()?, keyword, args[1].unparse()?);
                if let Some(escape) = args.get(2) {
                    text.push_str(" ESCAPE ");
                    text.push_str(&escape.unparse()?);
                }
                text.push(')');
                Ok(text)
            }
            "between" | "not_between" => {
                self.expect_arity("3", args.len() == 3)?;
                let keyword = if name == "between" { "BETWEEN" } else { "NOT BETWEEN" };
                Ok(format!(
                    "({} {} {} AND {})",
                    args[0].unparse()?,
                    keyword,
                    args[1].unparse()?,
                    args[2].unparse()?
                ))
            }
            "cast" => {
                self.expect_arity("2", args.len() == 2)?;
                let ty = string_operand(self, 1, "a string literal type")?;
                Ok(format!("CAST({} AS {})", args[0].unparse()?, ty))
            }
            "date_add" | "date_sub" => {
                self.expect_arity("3", args.len() == 3)?;
                let unit = self.time_unit(2)?;
                let sign = if name == "date_add" { "+" } else { "-" };
                Ok(format!(
                    "({} {} INTERVAL {} {})",
                    args[0].unparse()?,
                    sign,
                    args[1].unparse()?,
                    unit
                ))
            }
            "interval" => {
                self.expect_arity("2", args.len() == 2)?;
                let unit = self.time_unit(1)?;
                // parenthesized so `d + (INTERVAL n UNIT)` does not fold into date_add
                Ok(format!("(INTERVAL {} {})", args[0].unparse()?, unit))
            }
            "not" => {
                self.expect_arity("1", args.len() == 1)?;
                Ok(format!("(NOT {})", args[0].unparse()?))
            }
            "!" | "~" => {
                self.expect_arity("1", args.len() == 1)?;
                Ok(format!("{}{}", name, args[0].unparse()?))
            }
            "sign_plus" | "sign_minus" => {
                self.expect_arity("1", args.len() == 1)?;
                let sign = if name == "sign_plus" { "+" } else { "-" };
                let operand = args[0].unparse()?;
                // a bare number after a sign would fold into a signed literal
                if is_numeric_literal(&args[0]) {
                    Ok(format!("{}({})", sign, operand))
                } else {
                    Ok(format!("{}{}", sign, operand))
                }
            }
            "cont_in" | "not_cont_in" => {
                self.expect_arity("2", args.len() == 2)?;
                let keyword = if name == "cont_in" { "IN" } else { "NOT IN" };
                Ok(format!(
                    "({} {} {})",
                    args[0].unparse()?,
                    keyword,
                    unparse_collection(&args[1])?
                ))
            }
            _ => {
                let keyword = binary_keyword(name)
                    .ok_or_else(|| UnparseError::UnknownOperator(self.name.clone()))?;
                self.expect_arity("2", args.len() == 2)?;
                Ok(format!(
                    "({} {} {})",
                    args[0].unparse()?,
                    keyword,
                    args[1].unparse()?
                ))
            }
        }
    }
}

// ===== Clauses =====

impl Unparse for Projection {
    fn unparse(&self) -> Result<String, UnparseError> {
        let source = self.source.unparse()?;
        Ok(match &self.alias {
            Some(alias) => format!("{} AS {}", source, quote_identifier(alias)),
            None => source,
        })
    }
}

impl Unparse for Order {
    fn unparse(&self) -> Result<String, UnparseError> {
        let expr = self.expr.unparse()?;
        Ok(match self.direction {
            Some(direction) => format!("{} {}", expr, direction.keyword()),
            None => expr,
        })
    }
}

impl<T: Unparse> Unparse for [T] {
    fn unparse(&self) -> Result<String, UnparseError> {
        let parts = self
            .iter()
            .map(Unparse::unparse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(", "))
    }
}

//! Recursive descent parser implementation

use mysqlx_expr_ast::*;
use mysqlx_expr_lexer::{Token, TokenKind};

use crate::{ParseError, PlaceholderRegistry};

/// How bare identifiers are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Identifiers are JSON document paths: `a.b[0]`
    #[default]
    Document,
    /// Identifiers are `schema.table.column`, optionally with `->'$.path'`
    Table,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub mode: ParseMode,
    /// Accept `expr AS alias` in projection items
    pub allow_alias: bool,
}

impl ParseOptions {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            allow_alias: false,
        }
    }

    pub fn with_alias(mut self) -> Self {
        self.allow_alias = true;
        self
    }
}

type ParseFn<'r> = fn(&mut Parser<'r>) -> Result<Expr, ParseError>;

pub struct Parser<'r> {
    tokens: Vec<Token>,
    pos: usize,
    options: ParseOptions,
    placeholders: &'r mut PlaceholderRegistry,
}

/// Token kinds usable as a bare identifier
fn is_identifier(kind: TokenKind) -> bool {
    kind == TokenKind::Ident || kind.is_soft_keyword()
}

impl<'r> Parser<'r> {
    pub fn new(
        mut tokens: Vec<Token>,
        options: ParseOptions,
        placeholders: &'r mut PlaceholderRegistry,
    ) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                span: Span::at(end),
            });
        }
        Self {
            tokens,
            pos: 0,
            options,
            placeholders,
        }
    }

    // === Utilities ===

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_ahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
            &self.tokens[self.pos - 1]
        } else {
            self.current()
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn consume(&mut self, kind: TokenKind) -> Result<&Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, self.current())
    }

    /// Bare identifier, including soft keywords such as `year` or `date`
    fn identifier(&mut self, expected: &str) -> Result<String, ParseError> {
        if is_identifier(self.peek()) {
            Ok(self.advance().text.clone())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Any word, keywords included
    fn word(&mut self, expected: &str) -> Result<String, ParseError> {
        if self.peek().is_word() {
            Ok(self.advance().text.clone())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(crate) fn expect_end(&self) -> Result<(), ParseError> {
        if self.at(TokenKind::Eof) {
            return Ok(());
        }
        let token = self.current();
        Err(ParseError::TrailingTokens {
            found: crate::error::describe_token(token),
            text: token.text.clone(),
            span: token.span,
        })
    }

    fn comma_list<T>(
        &mut self,
        item: fn(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![item(self)?];
        while self.at(TokenKind::Comma) {
            self.advance();
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Left-associative layer: `operand (op operand)*`
    fn binary_layer(
        &mut self,
        operators: &[(TokenKind, &'static str)],
        operand: ParseFn<'r>,
    ) -> Result<Expr, ParseError> {
        let mut lhs = operand(self)?;
        while let Some(&(_, name)) = operators.iter().find(|(kind, _)| self.at(*kind)) {
            self.advance();
            let rhs = operand(self)?;
            lhs = Expr::binary(name, lhs, rhs);
        }
        Ok(lhs)
    }

    // === Entry points ===

    /// A complete expression; the whole input must be consumed
    pub fn expr(&mut self) -> Result<Expr, ParseError> {
        let expr = self.or_expr()?;
        self.expect_end()?;
        Ok(expr)
    }

    /// A complete expression with an optional `AS alias`
    pub fn aliased_expr(&mut self) -> Result<Projection, ParseError> {
        let projection = self.projection_item()?;
        self.expect_end()?;
        Ok(projection)
    }

    /// `expr [AS alias] (, expr [AS alias])*`
    pub fn projection_list(&mut self) -> Result<Vec<Projection>, ParseError> {
        let items = self.comma_list(Self::projection_item)?;
        self.expect_end()?;
        Ok(items)
    }

    /// `expr [ASC|DESC] (, expr [ASC|DESC])*`
    pub fn order_by_list(&mut self) -> Result<Vec<Order>, ParseError> {
        let items = self.comma_list(Self::order_item)?;
        self.expect_end()?;
        Ok(items)
    }

    fn projection_item(&mut self) -> Result<Projection, ParseError> {
        let source = self.or_expr()?;
        let alias = if self.at(TokenKind::As) {
            if !self.options.allow_alias {
                let token = self.current();
                return Err(ParseError::AliasNotAllowed {
                    text: token.text.clone(),
                    span: token.span,
                });
            }
            self.advance();
            Some(self.word("alias")?)
        } else {
            None
        };
        Ok(Projection { source, alias })
    }

    fn order_item(&mut self) -> Result<Order, ParseError> {
        let expr = self.or_expr()?;
        let direction = match self.peek() {
            TokenKind::Asc => Some(Direction::Asc),
            TokenKind::Desc => Some(Direction::Desc),
            _ => None,
        };
        if direction.is_some() {
            self.advance();
        }
        Ok(Order { expr, direction })
    }

    // === Operator layers ===

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        self.binary_layer(&[(TokenKind::Or, "||")], Self::and_expr)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        self.binary_layer(&[(TokenKind::And, "&&")], Self::ilri_expr)
    }

    /// IS / IN / LIKE / BETWEEN / REGEXP / OVERLAPS
    fn ilri_expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.comp_expr()?;

        let negated = self.at(TokenKind::Not)
            && matches!(
                self.peek_ahead(1),
                TokenKind::In
                    | TokenKind::Like
                    | TokenKind::Between
                    | TokenKind::Regexp
                    | TokenKind::Overlaps
            );
        if negated {
            self.advance();
        }

        let expr = match self.peek() {
            TokenKind::Is => {
                self.advance();
                let name = if self.at(TokenKind::Not) {
                    self.advance();
                    "is_not"
                } else {
                    "is"
                };
                Expr::binary(name, lhs, self.comp_expr()?)
            }
            TokenKind::In => {
                self.advance();
                if !self.at(TokenKind::LParen) || self.group_starts_operand() {
                    // membership in a computed collection carries its own negation
                    let name = if negated { "not_cont_in" } else { "cont_in" };
                    return Ok(Expr::binary(name, lhs, self.comp_expr()?));
                }
                self.advance();
                let mut args = vec![lhs];
                args.extend(self.comma_list(Self::or_expr)?);
                self.consume(TokenKind::RParen)?;
                Expr::operator("in", args)
            }
            TokenKind::Like => {
                self.advance();
                let mut args = vec![lhs, self.comp_expr()?];
                if self.at(TokenKind::Escape) {
                    self.advance();
                    args.push(self.comp_expr()?);
                }
                Expr::operator("like", args)
            }
            TokenKind::Between => {
                self.advance();
                let low = self.comp_expr()?;
                // `&&` lexes as And but only the keyword separates the bounds
                if !(self.at(TokenKind::And) && self.current().text.eq_ignore_ascii_case("and")) {
                    return Err(self.unexpected("AND"));
                }
                self.advance();
                let high = self.comp_expr()?;
                Expr::operator("between", vec![lhs, low, high])
            }
            TokenKind::Regexp => {
                self.advance();
                Expr::binary("regexp", lhs, self.comp_expr()?)
            }
            TokenKind::Overlaps => {
                self.advance();
                Expr::binary("overlaps", lhs, self.comp_expr()?)
            }
            _ => return Ok(lhs),
        };

        Ok(if negated {
            Expr::unary("not", expr)
        } else {
            expr
        })
    }

    /// Whether the `(` at the cursor opens a single operand that a binary
    /// operator continues, as in `a IN (b + 1) * 2`, rather than an IN list
    fn group_starts_operand(&self) -> bool {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(self.pos) {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let next = self.tokens.get(i + 1).map(|t| t.kind);
                        return matches!(
                            next,
                            Some(
                                TokenKind::Ge
                                    | TokenKind::Gt
                                    | TokenKind::Le
                                    | TokenKind::Lt
                                    | TokenKind::Eq
                                    | TokenKind::Ne
                                    | TokenKind::BitAnd
                                    | TokenKind::BitOr
                                    | TokenKind::BitXor
                                    | TokenKind::LShift
                                    | TokenKind::RShift
                                    | TokenKind::Plus
                                    | TokenKind::Minus
                                    | TokenKind::Star
                                    | TokenKind::Slash
                                    | TokenKind::Div
                                    | TokenKind::Percent
                            )
                        );
                    }
                }
                TokenKind::Comma if depth == 1 => return false,
                TokenKind::Eof => return false,
                _ => {}
            }
        }
        false
    }

    fn comp_expr(&mut self) -> Result<Expr, ParseError> {
        self.binary_layer(
            &[
                (TokenKind::Ge, ">="),
                (TokenKind::Gt, ">"),
                (TokenKind::Le, "<="),
                (TokenKind::Lt, "<"),
                (TokenKind::Eq, "=="),
                (TokenKind::Ne, "!="),
            ],
            Self::bit_expr,
        )
    }

    fn bit_expr(&mut self) -> Result<Expr, ParseError> {
        self.binary_layer(
            &[
                (TokenKind::BitAnd, "&"),
                (TokenKind::BitOr, "|"),
                (TokenKind::BitXor, "^"),
            ],
            Self::shift_expr,
        )
    }

    fn shift_expr(&mut self) -> Result<Expr, ParseError> {
        self.binary_layer(
            &[(TokenKind::LShift, "<<"), (TokenKind::RShift, ">>")],
            Self::add_sub_expr,
        )
    }

    /// `+`/`-`, where `+ INTERVAL n UNIT` becomes `date_add`/`date_sub`
    fn add_sub_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.mul_div_expr()?;
        loop {
            let name = match self.peek() {
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                _ => break,
            };
            self.advance();

            lhs = if self.at(TokenKind::Interval) {
                self.advance();
                let (amount, unit) = self.interval_tail()?;
                let op = if name == "+" { "date_add" } else { "date_sub" };
                Expr::operator(op, vec![lhs, amount, unit])
            } else {
                Expr::binary(name, lhs, self.mul_div_expr()?)
            };
        }
        Ok(lhs)
    }

    fn mul_div_expr(&mut self) -> Result<Expr, ParseError> {
        self.binary_layer(
            &[
                (TokenKind::Star, "*"),
                (TokenKind::Slash, "/"),
                (TokenKind::Div, "div"),
                (TokenKind::Percent, "%"),
            ],
            Self::atomic_expr,
        )
    }

    /// Amount and unit following `INTERVAL`
    fn interval_tail(&mut self) -> Result<(Expr, Expr), ParseError> {
        let amount = self.bit_expr()?;
        let token = self.current();
        match token.kind.time_unit() {
            Some(unit) => {
                self.advance();
                Ok((amount, Expr::string(unit)))
            }
            None => Err(ParseError::InvalidTimeUnit {
                found: crate::error::describe_token(token),
                text: token.text.clone(),
                span: token.span,
            }),
        }
    }

    // === Atoms ===

    fn atomic_expr(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Question => {
                self.advance();
                Ok(Expr::Placeholder(self.placeholders.next_positional()))
            }
            TokenKind::Colon => {
                self.advance();
                let name = match self.peek() {
                    TokenKind::LInt => self.advance().text.clone(),
                    _ => self.word("placeholder name")?,
                };
                Ok(Expr::Placeholder(self.placeholders.position(&name)))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.or_expr()?;
                self.consume(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LInt
            | TokenKind::LFloat
            | TokenKind::LString
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => {
                self.advance();
                literal(&token, false).map(Expr::Literal)
            }
            TokenKind::Plus | TokenKind::Minus => {
                self.advance();
                let negative = token.kind == TokenKind::Minus;
                if matches!(self.peek(), TokenKind::LInt | TokenKind::LFloat) {
                    let number = self.advance().clone();
                    return literal(&number, negative).map(Expr::Literal);
                }
                let name = if negative { "sign_minus" } else { "sign_plus" };
                Ok(Expr::unary(name, self.atomic_expr()?))
            }
            TokenKind::Not => {
                // NOT spans a whole predicate: `NOT a IN (1, 2)` is not(a in (1, 2))
                self.advance();
                Ok(Expr::unary("not", self.ilri_expr()?))
            }
            TokenKind::Bang | TokenKind::Tilde => {
                self.advance();
                let name = if token.kind == TokenKind::Bang { "!" } else { "~" };
                Ok(Expr::unary(name, self.atomic_expr()?))
            }
            TokenKind::Interval => {
                self.advance();
                let (amount, unit) = self.interval_tail()?;
                Ok(Expr::operator("interval", vec![amount, unit]))
            }
            TokenKind::Cast => self.cast_expr(),
            TokenKind::Binary => {
                self.advance();
                let operand = self.atomic_expr()?;
                Ok(Expr::operator("cast", vec![operand, Expr::string("BINARY")]))
            }
            TokenKind::LBracket => self.array(),
            TokenKind::LBrace => self.object(),
            TokenKind::Dollar => Ok(Expr::Identifier(self.document_field()?)),
            kind if is_identifier(kind) => self.identifier_expr(),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn array(&mut self) -> Result<Expr, ParseError> {
        self.consume(TokenKind::LBracket)?;
        let items = if self.at(TokenKind::RBracket) {
            Vec::new()
        } else {
            self.comma_list(Self::or_expr)?
        };
        self.consume(TokenKind::RBracket)?;
        Ok(Expr::Array(items))
    }

    fn object(&mut self) -> Result<Expr, ParseError> {
        self.consume(TokenKind::LBrace)?;
        let fields = if self.at(TokenKind::RBrace) {
            Vec::new()
        } else {
            self.comma_list(Self::object_field)?
        };
        self.consume(TokenKind::RBrace)?;
        Ok(Expr::Object(fields))
    }

    fn object_field(&mut self) -> Result<ObjectField, ParseError> {
        let key = match self.peek() {
            TokenKind::LString => self.advance().text.clone(),
            _ => self.word("object key")?,
        };
        self.consume(TokenKind::Colon)?;
        let value = self.or_expr()?;
        Ok(ObjectField { key, value })
    }

    /// `CAST(expr AS type)`
    fn cast_expr(&mut self) -> Result<Expr, ParseError> {
        self.consume(TokenKind::Cast)?;
        self.consume(TokenKind::LParen)?;
        let operand = self.or_expr()?;
        self.consume(TokenKind::As)?;
        let ty = self.cast_type()?;
        self.consume(TokenKind::RParen)?;
        Ok(Expr::operator("cast", vec![operand, Expr::string(ty)]))
    }

    /// Cast target, normalized to upper case: `DECIMAL(10,2)`, `CHAR(5) CHARSET utf8mb4`
    fn cast_type(&mut self) -> Result<String, ParseError> {
        let kind = self.peek();
        let keyword = kind.keyword().unwrap_or_default();

        let mut ty = match kind {
            TokenKind::Binary | TokenKind::Char | TokenKind::Decimal => {
                self.advance();
                let mut ty = keyword.to_string();
                if self.at(TokenKind::LParen) {
                    self.advance();
                    let mut dims = self.consume(TokenKind::LInt)?.text.clone();
                    if kind == TokenKind::Decimal && self.at(TokenKind::Comma) {
                        self.advance();
                        dims.push(',');
                        dims.push_str(&self.consume(TokenKind::LInt)?.text);
                    }
                    self.consume(TokenKind::RParen)?;
                    ty = format!("{}({})", ty, dims);
                }
                ty
            }
            TokenKind::Date | TokenKind::Datetime | TokenKind::Time | TokenKind::Json => {
                self.advance();
                keyword.to_string()
            }
            TokenKind::Signed | TokenKind::Unsigned => {
                self.advance();
                if self.at(TokenKind::Integer) {
                    self.advance();
                    format!("{} INTEGER", keyword)
                } else {
                    keyword.to_string()
                }
            }
            _ => return Err(self.unexpected("cast type")),
        };

        if kind == TokenKind::Char {
            let has_charset = if self.at(TokenKind::Charset) {
                self.advance();
                true
            } else if self.at(TokenKind::Character) && self.peek_ahead(1) == TokenKind::Set {
                self.advance();
                self.advance();
                true
            } else {
                false
            };
            if has_charset {
                let charset = self.word("character set name")?;
                ty.push_str(" CHARSET ");
                ty.push_str(&charset);
            }
        }

        Ok(ty)
    }

    // === Identifiers ===

    fn identifier_expr(&mut self) -> Result<Expr, ParseError> {
        let is_call = self.peek_ahead(1) == TokenKind::LParen
            || (self.peek_ahead(1) == TokenKind::Dot
                && is_identifier(self.peek_ahead(2))
                && self.peek_ahead(3) == TokenKind::LParen);
        if is_call {
            return self.function_call();
        }

        match self.options.mode {
            ParseMode::Document => Ok(Expr::Identifier(self.document_field()?)),
            ParseMode::Table => self.column_identifier(),
        }
    }

    fn function_call(&mut self) -> Result<Expr, ParseError> {
        let first = self.identifier("function name")?;
        let name = if self.at(TokenKind::Dot) {
            self.advance();
            Identifier {
                name: self.identifier("function name")?,
                schema_name: Some(first),
            }
        } else {
            Identifier {
                name: first,
                schema_name: None,
            }
        };

        self.consume(TokenKind::LParen)?;
        let args = if self.at(TokenKind::RParen) {
            Vec::new()
        } else {
            self.comma_list(Self::or_expr)?
        };
        self.consume(TokenKind::RParen)?;

        Ok(Expr::FunctionCall(FunctionCall { name, args }))
    }

    /// `schema.table.column`, then an optional `->'$path'` or `->>'$path'`
    fn column_identifier(&mut self) -> Result<Expr, ParseError> {
        let mut parts = vec![self.identifier("column name")?];
        while self.at(TokenKind::Dot) && self.peek_ahead(1).is_word() {
            self.advance();
            if parts.len() == 3 {
                let token = self.current();
                return Err(ParseError::TooManyIdentifierParts {
                    text: token.text.clone(),
                    span: token.span,
                });
            }
            parts.push(self.advance().text.clone());
        }

        let mut parts = parts.into_iter().rev();
        let mut id = ColumnIdentifier {
            name: parts.next(),
            table_name: parts.next(),
            schema_name: parts.next(),
            document_path: Vec::new(),
        };

        let unquote = match self.peek() {
            TokenKind::Arrow => false,
            TokenKind::TwoHeadArrow => true,
            _ => return Ok(Expr::Identifier(id)),
        };
        self.advance();
        self.consume(TokenKind::Quote)?;
        self.consume(TokenKind::Dollar)?;
        self.document_path(&mut id.document_path)?;
        self.consume(TokenKind::Quote)?;

        let expr = Expr::Identifier(id);
        Ok(if unquote {
            Expr::call("JSON_UNQUOTE", vec![expr])
        } else {
            expr
        })
    }

    /// `[$] member path*`; does not require the input to end afterwards
    pub fn document_field(&mut self) -> Result<ColumnIdentifier, ParseError> {
        let mut path = Vec::new();
        if self.at(TokenKind::Dollar) {
            self.advance();
        } else if is_identifier(self.peek()) {
            path.push(DocumentPathItem::Member(self.advance().text.clone()));
        } else {
            return Err(self.unexpected("document path"));
        }

        self.document_path(&mut path)?;

        Ok(ColumnIdentifier {
            document_path: path,
            ..ColumnIdentifier::default()
        })
    }

    /// `( .member | .'member' | .* | [n] | [*] | ** )*`
    fn document_path(&mut self, path: &mut Vec<DocumentPathItem>) -> Result<(), ParseError> {
        let mut last_double_wildcard = None;

        loop {
            match self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    let token = self.current().clone();
                    let item = match token.kind {
                        TokenKind::Star => DocumentPathItem::MemberWildcard,
                        TokenKind::DoubleStar => DocumentPathItem::DoubleWildcard,
                        TokenKind::LString => DocumentPathItem::Member(token.text.clone()),
                        kind if kind.is_word() => DocumentPathItem::Member(token.text.clone()),
                        _ => return Err(self.unexpected("member name after '.'")),
                    };
                    self.advance();
                    path.push(item);
                }
                TokenKind::LBracket => {
                    self.advance();
                    let token = self.current().clone();
                    let item = match token.kind {
                        TokenKind::Star => DocumentPathItem::ArrayIndexWildcard,
                        TokenKind::Minus => {
                            return Err(ParseError::NegativeArrayIndex {
                                text: token.text,
                                span: token.span,
                            })
                        }
                        TokenKind::LInt => {
                            let index = token.text.parse::<u32>().map_err(|_| {
                                ParseError::NumberOutOfRange {
                                    text: token.text.clone(),
                                    span: token.span,
                                }
                            })?;
                            DocumentPathItem::ArrayIndex(index)
                        }
                        _ => return Err(self.unexpected("array index or '*'")),
                    };
                    self.advance();
                    self.consume(TokenKind::RBracket)?;
                    path.push(item);
                }
                TokenKind::DoubleStar => {
                    self.advance();
                    path.push(DocumentPathItem::DoubleWildcard);
                }
                _ => break,
            }

            last_double_wildcard = match path.last() {
                Some(DocumentPathItem::DoubleWildcard) => {
                    Some(self.tokens[self.pos.saturating_sub(1)].clone())
                }
                _ => None,
            };
        }

        match last_double_wildcard {
            Some(token) => Err(ParseError::TrailingDoubleWildcard {
                text: token.text,
                span: token.span,
            }),
            None => Ok(()),
        }
    }
}

/// Scalar for a literal token, with an optional leading minus folded in
fn literal(token: &Token, negative: bool) -> Result<Scalar, ParseError> {
    let out_of_range = || ParseError::NumberOutOfRange {
        text: token.text.clone(),
        span: token.span,
    };

    Ok(match token.kind {
        TokenKind::LInt => {
            let value = token.text.parse::<u64>().map_err(|_| out_of_range())?;
            if negative {
                Scalar::SInt(i64::try_from(-i128::from(value)).map_err(|_| out_of_range())?)
            } else {
                Scalar::UInt(value)
            }
        }
        TokenKind::LFloat => {
            let value = token.text.parse::<f64>().map_err(|_| out_of_range())?;
            if !value.is_finite() {
                return Err(out_of_range());
            }
            Scalar::Double(if negative { -value } else { value })
        }
        TokenKind::LString => Scalar::String(token.text.clone()),
        TokenKind::True => Scalar::Bool(true),
        TokenKind::False => Scalar::Bool(false),
        TokenKind::Null => Scalar::Null,
        _ => return Err(ParseError::unexpected("literal", token)),
    })
}

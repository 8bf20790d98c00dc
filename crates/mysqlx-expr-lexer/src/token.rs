//! Token definitions for the expression language

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // === Operator keywords ===
    #[token("and", ignore(ascii_case))]
    #[token("&&")]
    And,
    #[token("or", ignore(ascii_case))]
    #[token("||")]
    Or,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("in", ignore(ascii_case))]
    In,
    #[token("like", ignore(ascii_case))]
    Like,
    #[token("escape", ignore(ascii_case))]
    Escape,
    #[token("between", ignore(ascii_case))]
    Between,
    #[token("regexp", ignore(ascii_case))]
    Regexp,
    #[token("overlaps", ignore(ascii_case))]
    Overlaps,
    #[token("interval", ignore(ascii_case))]
    Interval,
    #[token("div", ignore(ascii_case))]
    Div,
    #[token("cast", ignore(ascii_case))]
    Cast,
    #[token("binary", ignore(ascii_case))]
    Binary,

    // Clause keywords
    #[token("as", ignore(ascii_case))]
    As,
    #[token("asc", ignore(ascii_case))]
    Asc,
    #[token("desc", ignore(ascii_case))]
    Desc,

    // Literal keywords
    #[token("true", ignore(ascii_case))]
    True,
    #[token("false", ignore(ascii_case))]
    False,
    #[token("null", ignore(ascii_case))]
    Null,

    // Cast target words
    #[token("char", ignore(ascii_case))]
    Char,
    #[token("character", ignore(ascii_case))]
    Character,
    #[token("charset", ignore(ascii_case))]
    Charset,
    #[token("set", ignore(ascii_case))]
    Set,
    #[token("date", ignore(ascii_case))]
    Date,
    #[token("datetime", ignore(ascii_case))]
    Datetime,
    #[token("time", ignore(ascii_case))]
    Time,
    #[token("decimal", ignore(ascii_case))]
    Decimal,
    #[token("signed", ignore(ascii_case))]
    Signed,
    #[token("unsigned", ignore(ascii_case))]
    Unsigned,
    #[token("integer", ignore(ascii_case))]
    #[token("int", ignore(ascii_case))]
    Integer,
    #[token("json", ignore(ascii_case))]
    Json,

    // Interval units
    #[token("microsecond", ignore(ascii_case))]
    Microsecond,
    #[token("second", ignore(ascii_case))]
    Second,
    #[token("minute", ignore(ascii_case))]
    Minute,
    #[token("hour", ignore(ascii_case))]
    Hour,
    #[token("day", ignore(ascii_case))]
    Day,
    #[token("week", ignore(ascii_case))]
    Week,
    #[token("month", ignore(ascii_case))]
    Month,
    #[token("quarter", ignore(ascii_case))]
    Quarter,
    #[token("year", ignore(ascii_case))]
    Year,
    #[token("second_microsecond", ignore(ascii_case))]
    SecondMicrosecond,
    #[token("minute_microsecond", ignore(ascii_case))]
    MinuteMicrosecond,
    #[token("minute_second", ignore(ascii_case))]
    MinuteSecond,
    #[token("hour_microsecond", ignore(ascii_case))]
    HourMicrosecond,
    #[token("hour_second", ignore(ascii_case))]
    HourSecond,
    #[token("hour_minute", ignore(ascii_case))]
    HourMinute,
    #[token("day_microsecond", ignore(ascii_case))]
    DayMicrosecond,
    #[token("day_second", ignore(ascii_case))]
    DaySecond,
    #[token("day_minute", ignore(ascii_case))]
    DayMinute,
    #[token("day_hour", ignore(ascii_case))]
    DayHour,
    #[token("year_month", ignore(ascii_case))]
    YearMonth,

    // === Operators ===
    #[token("=")]
    #[token("==")]
    Eq,
    #[token("!=")]
    #[token("<>")]
    Ne,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("<<")]
    LShift,
    #[token(">>")]
    RShift,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    DoubleStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("&")]
    BitAnd,
    #[token("|")]
    BitOr,
    #[token("^")]
    BitXor,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,

    #[token("->")]
    Arrow,
    #[token("->>")]
    TwoHeadArrow,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // === Punctuation ===
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("$")]
    Dollar,
    #[token("?")]
    Question,

    // === Literals ===
    #[regex(r"[0-9]+")]
    LInt,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    LFloat,

    /// Exponent marker without digits: `1.5E`, `2e+`
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)[eE][+-]?")]
    MalformedNumber,

    #[regex(r"'([^'\\]|\\(.|\n)|'')*'")]
    #[regex(r#""([^"\\]|\\(.|\n)|"")*""#)]
    LString,

    // === Identifiers ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    /// Backtick-quoted identifier; surfaced to the parser as `Ident`
    #[regex(r"`([^`]|``)*`")]
    QuotedIdent,

    // === Special ===
    /// Opening or closing quote around a document path after `->`
    Quote,
    Eof,
}

impl TokenKind {
    /// Keywords that may also stand as identifiers: cast target words and
    /// interval units. They only act as keywords in the slots that expect them.
    pub fn is_soft_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Char
                | TokenKind::Character
                | TokenKind::Charset
                | TokenKind::Set
                | TokenKind::Date
                | TokenKind::Datetime
                | TokenKind::Time
                | TokenKind::Decimal
                | TokenKind::Signed
                | TokenKind::Unsigned
                | TokenKind::Integer
                | TokenKind::Json
        ) || self.time_unit().is_some()
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword().is_some()
    }

    /// Any word token: identifier or keyword. Used where a member name is
    /// expected after `.` in a document path, which accepts every word.
    pub fn is_word(&self) -> bool {
        *self == TokenKind::Ident || self.is_keyword()
    }

    /// Canonical unit name when this token is an interval unit
    pub fn time_unit(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Microsecond => "MICROSECOND",
            TokenKind::Second => "SECOND",
            TokenKind::Minute => "MINUTE",
            TokenKind::Hour => "HOUR",
            TokenKind::Day => "DAY",
            TokenKind::Week => "WEEK",
            TokenKind::Month => "MONTH",
            TokenKind::Quarter => "QUARTER",
            TokenKind::Year => "YEAR",
            TokenKind::SecondMicrosecond => "SECOND_MICROSECOND",
            TokenKind::MinuteMicrosecond => "MINUTE_MICROSECOND",
            TokenKind::MinuteSecond => "MINUTE_SECOND",
            TokenKind::HourMicrosecond => "HOUR_MICROSECOND",
            TokenKind::HourSecond => "HOUR_SECOND",
            TokenKind::HourMinute => "HOUR_MINUTE",
            TokenKind::DayMicrosecond => "DAY_MICROSECOND",
            TokenKind::DaySecond => "DAY_SECOND",
            TokenKind::DayMinute => "DAY_MINUTE",
            TokenKind::DayHour => "DAY_HOUR",
            TokenKind::YearMonth => "YEAR_MONTH",
            _ => return None,
        })
    }

    /// Canonical upper-case spelling of keyword tokens
    pub fn keyword(&self) -> Option<&'static str> {
        if let Some(unit) = self.time_unit() {
            return Some(unit);
        }
        Some(match self {
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Is => "IS",
            TokenKind::In => "IN",
            TokenKind::Like => "LIKE",
            TokenKind::Escape => "ESCAPE",
            TokenKind::Between => "BETWEEN",
            TokenKind::Regexp => "REGEXP",
            TokenKind::Overlaps => "OVERLAPS",
            TokenKind::Interval => "INTERVAL",
            TokenKind::Div => "DIV",
            TokenKind::Cast => "CAST",
            TokenKind::Binary => "BINARY",
            TokenKind::As => "AS",
            TokenKind::Asc => "ASC",
            TokenKind::Desc => "DESC",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::Char => "CHAR",
            TokenKind::Character => "CHARACTER",
            TokenKind::Charset => "CHARSET",
            TokenKind::Set => "SET",
            TokenKind::Date => "DATE",
            TokenKind::Datetime => "DATETIME",
            TokenKind::Time => "TIME",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::Signed => "SIGNED",
            TokenKind::Unsigned => "UNSIGNED",
            TokenKind::Integer => "INTEGER",
            TokenKind::Json => "JSON",
            _ => return None,
        })
    }

    pub fn describe(&self) -> &'static str {
        if let Some(keyword) = self.keyword() {
            return keyword;
        }
        match self {
            TokenKind::Eq => "'='",
            TokenKind::Ne => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::LShift => "'<<'",
            TokenKind::RShift => "'>>'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::DoubleStar => "'**'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::BitAnd => "'&'",
            TokenKind::BitOr => "'|'",
            TokenKind::BitXor => "'^'",
            TokenKind::Tilde => "'~'",
            TokenKind::Bang => "'!'",
            TokenKind::Arrow => "'->'",
            TokenKind::TwoHeadArrow => "'->>'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::Dollar => "'$'",
            TokenKind::Question => "'?'",
            TokenKind::Quote => "quote",
            TokenKind::LInt => "integer",
            TokenKind::LFloat => "float",
            TokenKind::MalformedNumber => "malformed number",
            TokenKind::LString => "string",
            TokenKind::Ident | TokenKind::QuotedIdent => "identifier",
            TokenKind::Eof => "end of input",
            _ => "keyword",
        }
    }
}

//! Token types for expression-span code.
//!
//! Defines [`TokenKind`] covering every lexeme of the embedded expression
//! language and [`Token`], which pairs a kind with a [`Span`].

use restprobe_types::Span;
use std::fmt;

/// Reserved words of the expression language.
///
/// These cannot resolve as free identifiers; the lexer emits a specific
/// keyword token instead of [`TokenKind::Identifier`].
pub const ALL_KEYWORDS: &[&str] = &["true", "false", "null", "and", "or", "not", "in"];

/// A single token produced by the expression lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Byte range within the span's code.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every token kind in the expression language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────
    /// Numeric literal (integer or decimal): `42`, `3.14`
    NumberLit(f64),
    /// Quoted string literal: `"hello"` or `'hello'`
    StringLit(String),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    // ── Identifiers ──────────────────────────────────────────
    /// Free identifier: `base_url`, `response`
    Identifier(String),

    // ── Keyword operators ────────────────────────────────────
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `in`
    In,

    // ── Operators ────────────────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,

    // ── Punctuation ──────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `.`
    Dot,
    /// `,`
    Comma,

    /// End of the expression code.
    Eof,
}

impl TokenKind {
    /// Map a reserved word to its keyword token, if it is one.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        match s {
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "null" => Some(TokenKind::Null),
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            "not" => Some(TokenKind::Not),
            "in" => Some(TokenKind::In),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NumberLit(n) => write!(f, "{n}"),
            TokenKind::StringLit(s) => write!(f, "'{s}'"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Null => write!(f, "null"),
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::And => write!(f, "and"),
            TokenKind::Or => write!(f, "or"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::In => write!(f, "in"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::EqEq => write!(f, "=="),
            TokenKind::BangEq => write!(f, "!="),
            TokenKind::Less => write!(f, "<"),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::LessEq => write!(f, "<="),
            TokenKind::GreaterEq => write!(f, ">="),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Eof => write!(f, "end of expression"),
        }
    }
}

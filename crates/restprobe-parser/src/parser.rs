//! The parser core: token-stream cursor and entry point.

use restprobe_lexer::token::{Token, TokenKind};
use restprobe_lexer::Lexer;
use restprobe_types::ast::Expr;
use restprobe_types::{CodeError, Span};

/// Maximum expression nesting depth before parsing bails out.
pub const MAX_EXPR_DEPTH: u32 = 32;

/// Recursive-descent parser over the token stream of one expression span.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Current expression nesting depth (bounded by [`MAX_EXPR_DEPTH`]).
    pub(crate) expr_depth: u32,
}

/// Parse one expression span's code into an AST.
///
/// The code must contain exactly one expression; trailing tokens are a
/// syntax error. Lex and parse failures both surface as [`CodeError`].
pub fn parse(code: &str) -> Result<Expr, CodeError> {
    let tokens = Lexer::new(code).lex()?;
    Parser::new(tokens).parse()
}

impl Parser {
    /// Create a parser for a lexed token stream (must end with Eof).
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            expr_depth: 0,
        }
    }

    /// Parse the whole stream as a single expression.
    pub fn parse(mut self) -> Result<Expr, CodeError> {
        if self.check(&TokenKind::Eof) {
            return Err(self.error_here("empty expression"));
        }
        let expr = self.parse_expression()?;
        if !self.check(&TokenKind::Eof) {
            return Err(self.error_here(format!(
                "unexpected '{}' after expression",
                self.peek_kind()
            )));
        }
        Ok(expr)
    }

    // ─────────────────────────────────────────────────────────────
    // Cursor helpers
    // ─────────────────────────────────────────────────────────────

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or_else(|| Span::point(0))
    }

    pub(crate) fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or_else(|| Span::point(0))
    }

    /// Consume the current token and return it. The final Eof token is
    /// never consumed, so the cursor can't run off the stream.
    pub(crate) fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    /// True when the current token matches `kind` exactly.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consume the current token if it matches `kind`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it matches `kind`, error otherwise.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<(), CodeError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_here(format!("expected '{kind}', got '{}'", self.peek_kind())))
        }
    }

    pub(crate) fn error_here(&self, message: impl Into<String>) -> CodeError {
        CodeError::Syntax {
            message: message.into(),
            span: self.current_span(),
        }
    }
}

//! Expression parsing with full operator precedence.
//!
//! Precedence (lowest → highest):
//! 6. `or`
//! 5. `and`
//! 4. `==`, `!=`, `<`, `>`, `<=`, `>=`, `in`, `not in` (no chaining)
//! 3. `+`, `-`
//! 2. `*`, `/`, `%`
//! 1. unary `-`, `not`
//! 0. `.` (field access), `[...]` (index), `()` (grouping)

use restprobe_lexer::token::TokenKind;
use restprobe_types::ast::*;
use restprobe_types::CodeError;

use crate::parser::{Parser, MAX_EXPR_DEPTH};

impl Parser {
    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, CodeError> {
        self.enter_nesting()?;
        let result = self.parse_or();
        self.exit_nesting();
        result
    }

    /// Bump the nesting depth, failing once [`MAX_EXPR_DEPTH`] is reached.
    ///
    /// Every recursion point charges the counter here — grouping and index
    /// brackets via [`Self::parse_expression`], prefix operators directly in
    /// [`Self::parse_unary`] — so no input can recurse unboundedly.
    fn enter_nesting(&mut self) -> Result<(), CodeError> {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            return Err(self.error_here(format!(
                "maximum expression nesting depth is {MAX_EXPR_DEPTH}"
            )));
        }
        self.expr_depth += 1;
        Ok(())
    }

    fn exit_nesting(&mut self) {
        self.expr_depth -= 1;
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `OrExpr = AndExpr { "or" AndExpr }`
    fn parse_or(&mut self) -> Result<Expr, CodeError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op: BinOp::Or,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    /// `AndExpr = CompExpr { "and" CompExpr }`
    fn parse_and(&mut self) -> Result<Expr, CodeError> {
        let mut left = self.parse_comparison()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_comparison()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op: BinOp::And,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    /// `CompExpr = AddExpr [ CompOp AddExpr ]`
    ///
    /// Comparison operators do NOT chain: `a < b < c` is a parse error.
    fn parse_comparison(&mut self) -> Result<Expr, CodeError> {
        let mut left = self.parse_add()?;
        if let Some(op) = self.match_comparison_op() {
            self.consume_comparison_op(op)?;
            let right = self.parse_add()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
            // Reject chaining
            if self.match_comparison_op().is_some() {
                return Err(self.error_here(
                    "comparison operators cannot be chained; use 'and' to combine: a < b and b < c",
                ));
            }
        }
        Ok(left)
    }

    /// Check if the cursor sits on a comparison operator (including the
    /// two-token `not in`), returning the corresponding BinOp.
    fn match_comparison_op(&self) -> Option<BinOp> {
        match self.peek_kind() {
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::BangEq => Some(BinOp::NotEq),
            TokenKind::Less => Some(BinOp::Less),
            TokenKind::Greater => Some(BinOp::Greater),
            TokenKind::LessEq => Some(BinOp::LessEq),
            TokenKind::GreaterEq => Some(BinOp::GreaterEq),
            TokenKind::In => Some(BinOp::In),
            TokenKind::Not => Some(BinOp::NotIn),
            _ => None,
        }
    }

    /// Consume the token(s) of a matched comparison operator.
    /// `not` after an operand only reads as the start of `not in`.
    fn consume_comparison_op(&mut self, op: BinOp) -> Result<(), CodeError> {
        self.advance();
        if op == BinOp::NotIn {
            self.expect(&TokenKind::In)?;
        }
        Ok(())
    }

    /// `AddExpr = MulExpr { ("+" | "-") MulExpr }`
    fn parse_add(&mut self) -> Result<Expr, CodeError> {
        let mut left = self.parse_mul()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_mul()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    /// `MulExpr = UnaryExpr { ("*" | "/" | "%") UnaryExpr }`
    fn parse_mul(&mut self) -> Result<Expr, CodeError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    /// `UnaryExpr = [ "not" | "-" ] UnaryExpr | PostfixExpr`
    fn parse_unary(&mut self) -> Result<Expr, CodeError> {
        let start = self.current_span();
        let op = match self.peek_kind() {
            TokenKind::Not => {
                self.advance();
                Some(UnaryOp::Not)
            }
            TokenKind::Minus => {
                self.advance();
                Some(UnaryOp::Neg)
            }
            _ => None,
        };
        if let Some(op) = op {
            // Prefix chains recurse without reaching parse_expression, so
            // they charge the nesting counter themselves.
            self.enter_nesting()?;
            let operand = self.parse_unary();
            self.exit_nesting();
            let operand = operand?;
            let span = start.merge(operand.span);
            Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ))
        } else {
            self.parse_postfix()
        }
    }

    /// `PostfixExpr = PrimaryExpr { "." Identifier | "[" Expr "]" }`
    fn parse_postfix(&mut self) -> Result<Expr, CodeError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let field = self.expect_field_name()?;
                    let span = expr.span.merge(field.span);
                    expr = Expr::new(
                        ExprKind::FieldAccess {
                            object: Box::new(expr),
                            field,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(&TokenKind::RBracket)?;
                    let span = expr.span.merge(self.previous_span());
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Primary Expressions
    // ══════════════════════════════════════════════════════════════════════════

    fn parse_primary(&mut self) -> Result<Expr, CodeError> {
        let start = self.current_span();
        match self.peek_kind().clone() {
            TokenKind::NumberLit(n) => {
                self.advance();
                Ok(Expr::new(ExprKind::NumberLit(n), start))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Ok(Expr::new(ExprKind::StringLit(s), start))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::BoolLit(true), start))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::BoolLit(false), start))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::new(ExprKind::NullLit, start))
            }

            TokenKind::LBracket => self.parse_sequence_literal(),

            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen)?;
                let span = start.merge(self.previous_span());
                Ok(Expr::new(ExprKind::Paren(Box::new(inner)), span))
            }

            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expr::new(ExprKind::Identifier(name), start))
            }

            other => Err(self.error_here(format!("expected expression, got '{other}'"))),
        }
    }

    /// Parse `[expr, ...]` with optional trailing comma.
    fn parse_sequence_literal(&mut self) -> Result<Expr, CodeError> {
        let start = self.current_span();
        self.advance(); // eat `[`
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expression()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
                // Trailing comma
                if self.check(&TokenKind::RBracket) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBracket)?;
        let span = start.merge(self.previous_span());
        Ok(Expr::new(ExprKind::SequenceLit(elements), span))
    }

    /// Expect a field name after `.` — a plain identifier.
    fn expect_field_name(&mut self) -> Result<Ident, CodeError> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                let span = self.current_span();
                self.advance();
                Ok(Ident::new(name, span))
            }
            other => Err(self.error_here(format!("expected field name, got '{other}'"))),
        }
    }
}

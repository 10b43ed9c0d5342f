//! Expression-code lexer — converts a span's code into a token stream.
//!
//! The code of one expression span is short and single-line, so unlike a
//! whole-file lexer this one fails fast: the first bad character aborts with
//! a [`CodeError::Syntax`] and no recovery is attempted.

use restprobe_types::{CodeError, Span};

use crate::token::{Token, TokenKind};

/// The expression lexer.
pub struct Lexer<'src> {
    /// The span code as bytes.
    source: &'src [u8],
    /// Current byte offset into `source`.
    pos: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given expression code.
    pub fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
        }
    }

    /// Lex the entire code into a token stream ending with [`TokenKind::Eof`].
    pub fn lex(mut self) -> Result<Vec<Token>, CodeError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.peek() {
            self.advance();
        }
    }

    fn error(&self, message: impl Into<String>, span: Span) -> CodeError {
        CodeError::Syntax {
            message: message.into(),
            span,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token.
    fn scan_token(&mut self) -> Result<Token, CodeError> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, Span::point(start)));
        };

        let kind = match ch {
            b'0'..=b'9' => return self.scan_number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => return self.scan_identifier(start),
            b'"' | b'\'' => return self.scan_string(start, ch),

            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,

            b'=' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    return Err(self.error(
                        "unexpected '='; use '==' for equality",
                        Span::new(start, self.pos),
                    ));
                }
            }
            b'!' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::BangEq
                } else {
                    return Err(self.error(
                        "unexpected '!'; use 'not' for negation or '!=' for inequality",
                        Span::new(start, self.pos),
                    ));
                }
            }
            b'<' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            b'>' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }

            _ => {
                return Err(self.error(
                    format!("unexpected character '{}'", ch as char),
                    Span::new(start, self.pos),
                ));
            }
        };

        Ok(Token::new(kind, Span::new(start, self.pos)))
    }

    fn scan_number(&mut self, start: usize) -> Result<Token, CodeError> {
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
        }
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            self.advance();
            while let Some(b'0'..=b'9') = self.peek() {
                self.advance();
            }
        }

        let span = Span::new(start, self.pos);
        let text = std::str::from_utf8(&self.source[start..self.pos])
            .map_err(|_| self.error("number literal is not valid UTF-8", span))?;
        let value: f64 = text
            .parse()
            .map_err(|_| self.error(format!("invalid number literal '{text}'"), span))?;

        Ok(Token::new(TokenKind::NumberLit(value), span))
    }

    fn scan_identifier(&mut self, start: usize) -> Result<Token, CodeError> {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.advance();
            } else {
                break;
            }
        }

        let span = Span::new(start, self.pos);
        let text = std::str::from_utf8(&self.source[start..self.pos])
            .map_err(|_| self.error("identifier is not valid UTF-8", span))?;
        let kind = TokenKind::from_keyword(text)
            .unwrap_or_else(|| TokenKind::Identifier(text.to_string()));

        Ok(Token::new(kind, span))
    }

    /// Scan a quoted string after consuming the opening quote.
    /// Both `'` and `"` open a string; the closing quote must match.
    fn scan_string(&mut self, start: usize, quote: u8) -> Result<Token, CodeError> {
        // Bytes are collected raw and decoded once at the closing quote, so
        // multi-byte characters pass through intact.
        let mut buf = Vec::new();
        loop {
            match self.advance() {
                None => {
                    return Err(self.error(
                        "unterminated string literal",
                        Span::new(start, self.pos),
                    ));
                }
                Some(ch) if ch == quote => {
                    let span = Span::new(start, self.pos);
                    let text = String::from_utf8(buf)
                        .map_err(|_| self.error("string literal is not valid UTF-8", span))?;
                    return Ok(Token::new(TokenKind::StringLit(text), span));
                }
                // Escape results are all ASCII.
                Some(b'\\') => buf.push(self.scan_escape_sequence(start)? as u8),
                Some(ch) => buf.push(ch),
            }
        }
    }

    /// Scan an escape sequence after consuming the `\`.
    fn scan_escape_sequence(&mut self, start: usize) -> Result<char, CodeError> {
        match self.advance() {
            Some(b'"') => Ok('"'),
            Some(b'\'') => Ok('\''),
            Some(b'\\') => Ok('\\'),
            Some(b'n') => Ok('\n'),
            Some(b't') => Ok('\t'),
            Some(b'r') => Ok('\r'),
            Some(ch) => Err(self.error(
                format!("invalid escape sequence '\\{}'", ch as char),
                Span::new(self.pos - 2, self.pos),
            )),
            None => Err(self.error(
                "unterminated string literal",
                Span::new(start, self.pos),
            )),
        }
    }
}

//! Lexer tests for the expression language.
//!
//! Covers: keywords, operators, number and string literals (both quote
//! styles, escapes), identifiers, whitespace handling, and syntax errors.

use restprobe_lexer::{Lexer, TokenKind};
use restprobe_types::CodeError;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Lex code and return just the token kinds (excluding final Eof).
fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source)
        .lex()
        .expect("lexing should succeed")
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.kind)
        .collect()
}

/// Lex and return the syntax error message.
fn lex_error(source: &str) -> String {
    match Lexer::new(source).lex() {
        Ok(_) => panic!("expected a lex error for {source:?}"),
        Err(CodeError::Syntax { message, .. }) => message,
        Err(other) => panic!("expected a syntax error, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Keywords & identifiers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn keywords() {
    let pairs = [
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("null", TokenKind::Null),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("not", TokenKind::Not),
        ("in", TokenKind::In),
    ];
    for (src, expected) in &pairs {
        assert_eq!(kinds(src), vec![expected.clone()], "keyword '{src}'");
    }
}

#[test]
fn keywords_are_case_sensitive() {
    assert_eq!(kinds("True"), vec![TokenKind::Identifier("True".into())]);
    assert_eq!(kinds("AND"), vec![TokenKind::Identifier("AND".into())]);
}

#[test]
fn identifiers_with_underscores_and_digits() {
    assert_eq!(
        kinds("base_url2"),
        vec![TokenKind::Identifier("base_url2".into())]
    );
    assert_eq!(
        kinds("_private"),
        vec![TokenKind::Identifier("_private".into())]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Literals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn integer_and_decimal_numbers() {
    assert_eq!(kinds("42"), vec![TokenKind::NumberLit(42.0)]);
    assert_eq!(kinds("3.14"), vec![TokenKind::NumberLit(3.14)]);
    assert_eq!(kinds("0"), vec![TokenKind::NumberLit(0.0)]);
}

#[test]
fn dot_after_number_without_digit_is_field_access() {
    assert_eq!(
        kinds("1.x"),
        vec![
            TokenKind::NumberLit(1.0),
            TokenKind::Dot,
            TokenKind::Identifier("x".into()),
        ]
    );
}

#[test]
fn double_and_single_quoted_strings() {
    assert_eq!(kinds("\"hello\""), vec![TokenKind::StringLit("hello".into())]);
    assert_eq!(kinds("'hello'"), vec![TokenKind::StringLit("hello".into())]);
}

#[test]
fn quote_styles_do_not_terminate_each_other() {
    assert_eq!(
        kinds("'say \"hi\"'"),
        vec![TokenKind::StringLit("say \"hi\"".into())]
    );
}

#[test]
fn string_escapes() {
    assert_eq!(
        kinds(r#""a\nb\t\\\"""#),
        vec![TokenKind::StringLit("a\nb\t\\\"".into())]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Operators & punctuation
// ─────────────────────────────────────────────────────────────────────

#[test]
fn all_operators() {
    assert_eq!(
        kinds("+ - * / % == != < > <= >="),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::EqEq,
            TokenKind::BangEq,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEq,
            TokenKind::GreaterEq,
        ]
    );
}

#[test]
fn punctuation() {
    assert_eq!(
        kinds("( ) [ ] . ,"),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Dot,
            TokenKind::Comma,
        ]
    );
}

#[test]
fn whole_assertion_expression() {
    assert_eq!(
        kinds("response.status == 200"),
        vec![
            TokenKind::Identifier("response".into()),
            TokenKind::Dot,
            TokenKind::Identifier("status".into()),
            TokenKind::EqEq,
            TokenKind::NumberLit(200.0),
        ]
    );
}

#[test]
fn ends_with_eof() {
    let tokens = Lexer::new("1").lex().unwrap();
    assert_eq!(tokens.last().map(|t| t.kind.clone()), Some(TokenKind::Eof));
}

#[test]
fn empty_code_is_just_eof() {
    let tokens = Lexer::new("   ").lex().unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn bare_equals_is_rejected() {
    assert!(lex_error("a = 1").contains("=="));
}

#[test]
fn bare_bang_is_rejected() {
    assert!(lex_error("!a").contains("not"));
}

#[test]
fn unterminated_string() {
    assert!(lex_error("'open").contains("unterminated"));
}

#[test]
fn invalid_escape_sequence() {
    assert!(lex_error(r#""\q""#).contains("escape"));
}

#[test]
fn unexpected_character() {
    assert!(lex_error("1 @ 2").contains('@'));
}

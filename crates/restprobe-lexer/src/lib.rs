//! restprobe lexer: template span scanning and expression-code tokenizing.

pub mod lexer;
pub mod template;
pub mod token;

pub use lexer::Lexer;
pub use template::{Template, TemplatePart, SPAN_CLOSE, SPAN_OPEN};
pub use token::{Token, TokenKind, ALL_KEYWORDS};

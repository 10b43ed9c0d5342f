//! restprobe parser: converts an expression span's code into an AST.

mod parse_expr;
mod parser;

pub use parser::{parse, Parser, MAX_EXPR_DEPTH};

//! Shared types for the restprobe evaluation engine.
//!
//! This crate defines the `Value` tree, the expression AST, source spans,
//! and the two-kind error taxonomy used across all evaluation stages.

pub mod ast;
mod error;
mod span;
mod value;

pub use error::{CodeError, ConfigError, EvalError, EvalResult};
pub use span::Span;
pub use value::Value;

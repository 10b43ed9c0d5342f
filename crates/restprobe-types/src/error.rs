//! The two-kind error taxonomy for spec evaluation.
//!
//! Callers react differently to the kinds: a [`ConfigError`] means the spec
//! document itself is wrong (bad shape, malformed span sigils), while a
//! [`CodeError`] means the document is structurally fine but the embedded
//! expression is broken (won't parse, or traps at runtime). Both abort the
//! current evaluation call entirely; no partial result is ever returned.

use thiserror::Error;

use crate::span::Span;

/// Structural configuration error: the spec document's shape is invalid
/// for evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A traversal leaf is not a scalar, string, sequence, or mapping.
    #[error("cannot evaluate value of type '{type_name}'")]
    UnsupportedShape { type_name: &'static str },

    /// An opening `${{` sigil with no matching `}}`.
    #[error("unterminated expression span starting at byte {position}")]
    UnterminatedSpan { position: usize },

    /// A closing `}}` sigil with no preceding opening sigil.
    #[error("closing sigil at byte {position} has no matching opening sigil")]
    UnmatchedSpanClose { position: usize },
}

/// Invalid-expression-code error: the span's code is syntactically invalid
/// or raised during execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodeError {
    /// The code failed to lex or parse.
    #[error("syntax error at {span}: {message}")]
    Syntax { message: String, span: Span },

    /// A free identifier resolved nowhere in the lookup chain
    /// (raw spec, scope chain, responses, environment).
    #[error("undefined name '{0}'")]
    UndefinedName(String),

    /// An operator or access was applied to the wrong type of operand.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Division or modulo by zero, or an operation producing NaN/Infinity.
    #[error("arithmetic trap: {0}")]
    ArithmeticTrap(String),

    /// Attribute access on a mapping that has no such field.
    #[error("{type_name} has no field '{field}'")]
    NoSuchField {
        field: String,
        type_name: &'static str,
    },

    /// Sequence index outside `0..len`.
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    /// Mapping index with a key that is not present.
    #[error("mapping has no key '{0}'")]
    NoSuchKey(String),
}

/// Any error produced while evaluating a spec value or assertion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("bad configuration: {0}")]
    BadConfiguration(#[from] ConfigError),

    #[error("invalid expression code: {0}")]
    InvalidCode(#[from] CodeError),
}

impl EvalError {
    /// True for the structural-configuration kind.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EvalError::BadConfiguration(_))
    }

    /// True for the invalid-expression-code kind.
    pub fn is_code(&self) -> bool {
        matches!(self, EvalError::InvalidCode(_))
    }
}

/// Result alias used throughout the evaluation engine.
pub type EvalResult<T> = Result<T, EvalError>;

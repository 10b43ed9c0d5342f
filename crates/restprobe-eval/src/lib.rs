//! restprobe evaluation engine.
//!
//! Walks raw API-test configuration values, detects embedded `${{ ... }}`
//! expression spans, resolves names through the scope chain and runtime
//! namespace, and reassembles either interpolated text or typed values.
//! Pure computation: no I/O, no locks held across evaluation, safe to call
//! from concurrent runners.

mod interpreter;
mod namespace;
mod scope;
mod spec_evaluator;
mod string_evaluator;

pub use interpreter::{Interpreter, Resolve};
pub use namespace::{DuplicateResponse, ResponseRecord, RuntimeNamespace};
pub use scope::ScopeNode;
pub use spec_evaluator::SpecEvaluator;
pub use string_evaluator::{Evaluated, StringEvaluator};

// The shared error taxonomy and value tree, re-exported so runners only
// need this crate.
pub use restprobe_types::{CodeError, ConfigError, EvalError, EvalResult, Value};

//! String evaluation: span detection, the two output modes, and the
//! interpolation fast paths.

use restprobe_lexer::{Template, TemplatePart};
use restprobe_types::{EvalError, EvalResult, Value};

use crate::interpreter::{Interpreter, Resolve};
use crate::spec_evaluator::SpecEvaluator;

/// The tagged result of evaluating one string.
///
/// Callers branch on the kind instead of re-parsing a stringified value:
/// assertion checkers read `Typed`, interpolated fields read `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated {
    /// Interpolation mode: literal text with span results substituted in.
    Text(String),
    /// Whole-span mode: the raw typed result of the single expression.
    Typed(Value),
}

impl Evaluated {
    /// Collapse into a plain value (`Text` becomes a string value).
    pub fn into_value(self) -> Value {
        match self {
            Evaluated::Text(s) => Value::String(s),
            Evaluated::Typed(v) => v,
        }
    }
}

/// Stateless evaluator for strings that may contain expression spans.
pub struct StringEvaluator;

impl StringEvaluator {
    /// Evaluate `text` against the given context.
    ///
    /// - Zero spans: the string is returned unchanged, byte for byte.
    /// - Exactly one span covering the whole string: the span's code is
    ///   evaluated and its typed result returned without string coercion.
    /// - Anything else: every span is evaluated, coerced to display text,
    ///   and substituted in place (interpolation mode).
    ///
    /// With `is_assertion` the result is always `Typed`, so assertion
    /// callers never re-parse: an interpolation-mode assertion comes back
    /// as a typed string value and the checker applies truthiness.
    pub fn evaluate(
        text: &str,
        context: &SpecEvaluator,
        is_assertion: bool,
    ) -> EvalResult<Evaluated> {
        let evaluated = Self::evaluate_template(text, context)?;
        if is_assertion {
            Ok(Evaluated::Typed(evaluated.into_value()))
        } else {
            Ok(evaluated)
        }
    }

    fn evaluate_template(text: &str, context: &SpecEvaluator) -> EvalResult<Evaluated> {
        let template = Template::parse(text)?;

        // No-op fast path: plain literals are preserved exactly.
        if !template.has_spans() {
            return Ok(Evaluated::Text(text.to_string()));
        }

        if let Some(code) = template.as_whole_span() {
            return Ok(Evaluated::Typed(Self::eval_code(code, context)?));
        }

        let mut rendered = String::new();
        for part in template.parts() {
            match part {
                TemplatePart::Literal(s) => rendered.push_str(s),
                TemplatePart::Expr(code) => {
                    rendered.push_str(&Self::eval_code(code, context)?.display_string());
                }
            }
        }
        Ok(Evaluated::Text(rendered))
    }

    /// Parse and run one span's code; all failures here are the
    /// invalid-expression-code kind.
    fn eval_code(code: &str, context: &dyn Resolve) -> EvalResult<Value> {
        let expr = restprobe_parser::parse(code).map_err(EvalError::InvalidCode)?;
        Interpreter::new(context)
            .eval(&expr)
            .map_err(EvalError::InvalidCode)
    }
}

//! Spec evaluation: recursive traversal of raw configuration values.

use indexmap::IndexMap;
use restprobe_types::{ConfigError, EvalResult, Value};
use std::sync::Arc;

use crate::interpreter::Resolve;
use crate::namespace::RuntimeNamespace;
use crate::scope::ScopeNode;
use crate::string_evaluator::{Evaluated, StringEvaluator};

/// Renders one raw request spec against a scope node and the runtime
/// namespace.
///
/// Created per evaluation and discarded after; holds no state beyond its
/// bindings. The first error aborts the whole call — a half-rendered
/// request must never be sent, so no partial mapping or sequence is ever
/// returned.
pub struct SpecEvaluator {
    scope: Arc<ScopeNode>,
    raw_spec: IndexMap<String, Value>,
    namespace: Arc<RuntimeNamespace>,
}

impl SpecEvaluator {
    pub fn new(
        scope: Arc<ScopeNode>,
        raw_spec: IndexMap<String, Value>,
        namespace: Arc<RuntimeNamespace>,
    ) -> Self {
        Self {
            scope,
            raw_spec,
            namespace,
        }
    }

    /// The scope node providing variable resolution context.
    pub fn scope(&self) -> &ScopeNode {
        &self.scope
    }

    /// Look up `key` in the literal spec mapping bound at construction.
    ///
    /// The value comes back unevaluated: this is how expression spans
    /// reference sibling fields without recursive re-evaluation.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw_spec.get(key)
    }

    /// Recursively evaluate a configuration value.
    pub fn evaluate(&self, value: &Value) -> EvalResult<Value> {
        match value {
            Value::Mapping(fields) => {
                let mut rendered = IndexMap::with_capacity(fields.len());
                for (key, field) in fields {
                    // Keys are never evaluated; insertion order is kept.
                    rendered.insert(key.clone(), self.evaluate(field)?);
                }
                Ok(Value::Mapping(rendered))
            }
            Value::Sequence(items) => {
                let mut rendered = Vec::with_capacity(items.len());
                for item in items {
                    rendered.push(self.evaluate(item)?);
                }
                Ok(Value::Sequence(rendered))
            }
            Value::String(text) => {
                Ok(StringEvaluator::evaluate(text, self, false)?.into_value())
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.clone()),
            Value::Binary(_) => Err(ConfigError::UnsupportedShape {
                type_name: value.type_name(),
            }
            .into()),
        }
    }

    /// Evaluate an assertion string to a typed value interpretable as a
    /// truth value by the external checker.
    pub fn evaluate_assertion(&self, text: &str) -> EvalResult<Value> {
        match StringEvaluator::evaluate(text, self, true)? {
            Evaluated::Typed(value) => Ok(value),
            // Unreachable with is_assertion=true, but harmless to honor.
            Evaluated::Text(rendered) => Ok(Value::String(rendered)),
        }
    }
}

impl Resolve for SpecEvaluator {
    /// The name-resolution chain, first match wins:
    /// sibling raw-spec field (literal, unevaluated) → scope chain →
    /// captured responses → environment variables → the reserved `env`
    /// mapping of the whole environment.
    fn resolve(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.raw_spec.get(name) {
            return Some(value.clone());
        }
        if let Some(value) = self.scope.lookup(name) {
            return Some(value.clone());
        }
        if let Some(record) = self.namespace.response(name) {
            return Some(record.to_value());
        }
        if let Some(text) = self.namespace.env_var(name) {
            return Some(Value::String(text.to_string()));
        }
        if name == "env" {
            return Some(self.namespace.environment_value());
        }
        None
    }
}

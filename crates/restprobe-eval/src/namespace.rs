//! The runtime namespace: process environment plus captured responses.

use indexmap::IndexMap;
use restprobe_types::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use thiserror::Error;

/// The outcome of one executed request, published by the external runner.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub status: u16,
    pub headers: IndexMap<String, String>,
    pub body: Value,
    pub elapsed: Duration,
}

impl ResponseRecord {
    /// The record as a mapping, so expression code can reach into it with
    /// attribute access: `.status`, `.headers`, `.body`, `.elapsed`.
    pub fn to_value(&self) -> Value {
        let mut fields = IndexMap::new();
        fields.insert("status".to_string(), Value::Number(f64::from(self.status)));
        fields.insert(
            "headers".to_string(),
            Value::Mapping(
                self.headers
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        );
        fields.insert("body".to_string(), self.body.clone());
        fields.insert(
            "elapsed".to_string(),
            Value::Number(self.elapsed.as_secs_f64()),
        );
        Value::Mapping(fields)
    }
}

/// A response name was published twice in one run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a response named '{0}' was already published")]
pub struct DuplicateResponse(pub String);

/// Per-run store of environment variables and previously captured responses.
///
/// The environment is captured once and read-only afterwards. Responses are
/// append-only: each name is written at most once, and the `Arc` swap inside
/// the lock is the atomic publish — a concurrent reader observes either
/// absence or the complete record, never a partial one.
#[derive(Debug, Default)]
pub struct RuntimeNamespace {
    environment: HashMap<String, String>,
    responses: RwLock<HashMap<String, Arc<ResponseRecord>>>,
}

impl RuntimeNamespace {
    /// Capture the process environment.
    pub fn from_process_env() -> Self {
        Self::with_environment(std::env::vars())
    }

    /// Build with an explicit environment (primarily for tests).
    pub fn with_environment(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            environment: vars.into_iter().collect(),
            responses: RwLock::new(HashMap::new()),
        }
    }

    /// Read one environment variable.
    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.environment.get(name).map(String::as_str)
    }

    /// The whole environment as a mapping value, backing the reserved `env`
    /// identifier in expression code.
    pub fn environment_value(&self) -> Value {
        Value::Mapping(
            self.environment
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }

    /// Publish the response for `name`. Fails if `name` was already
    /// published; the existing record is never replaced.
    pub fn publish(
        &self,
        name: impl Into<String>,
        record: ResponseRecord,
    ) -> Result<(), DuplicateResponse> {
        let name = name.into();
        let mut responses = self
            .responses
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if responses.contains_key(&name) {
            return Err(DuplicateResponse(name));
        }
        responses.insert(name, Arc::new(record));
        Ok(())
    }

    /// Read the response published under `name`, if any. Never blocks
    /// waiting for a publish: absence is the answer.
    pub fn response(&self, name: &str) -> Option<Arc<ResponseRecord>> {
        self.responses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(Arc::clone)
    }
}

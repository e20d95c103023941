//! Module result reporting

use serde_json::{Map, Value};

pub const STATUS_SUCCESS: &str = "SUCCESS";

/// What a module reports back after a successful invocation.
///
/// Failures never produce an outcome; they surface as errors and terminate
/// the invocation.
#[derive(Debug, Clone)]
pub struct ModuleOutcome {
    /// Whether the invocation caused an observable state mutation.
    pub changed: bool,

    /// Status string, always `SUCCESS` for a completed invocation.
    pub status: String,

    /// Canonical post-operation resource state.
    pub resource: Value,

    /// Key under which the resource state is reported.
    pub result_key: &'static str,
}

impl ModuleOutcome {
    pub fn new(changed: bool, resource: Value, result_key: &'static str) -> Self {
        Self {
            changed,
            status: STATUS_SUCCESS.to_string(),
            resource,
            result_key,
        }
    }

    /// Render the runtime-facing result document.
    pub fn to_json(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("changed".to_string(), Value::Bool(self.changed));
        doc.insert("status".to_string(), Value::String(self.status.clone()));
        doc.insert(self.result_key.to_string(), self.resource.clone());
        Value::Object(doc)
    }
}

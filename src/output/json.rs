// JSON output schema assembly

use serde::Serialize;
use serde_json::Value;

pub const SCHEMA_VERSION: &str = "nmask.v0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Rendered,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Canonicalize,
    Format,
    Reconcile,
    Clamp,
    Replay,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    pub version: &'static str,
    pub outcome: Outcome,
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl JsonOutput {
    pub fn rendered(operation: Operation, result: Value) -> Self {
        Self {
            version: SCHEMA_VERSION,
            outcome: Outcome::Rendered,
            operation,
            step: None,
            result: Some(result),
            error: None,
        }
    }

    pub fn invalid(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            outcome: Outcome::Invalid,
            operation,
            step: None,
            result: None,
            error: Some(message.into()),
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: u64) -> Self {
        self.step = Some(step);
        self
    }
}

pub fn render_json(output: &JsonOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string(output)
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NerError, Result};

/// A unit of work handed to us by the annotation host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Task {
    /// Source text of the task: the first of "text", "Text" holding a
    /// non-empty value. If that value is not a string the task is invalid;
    /// "Text" is not consulted in that case.
    pub fn input_text(&self) -> Result<&str> {
        let value = ["text", "Text"]
            .iter()
            .filter_map(|key| self.data.get(*key))
            .find(|value| is_present(value))
            .ok_or(NerError::MissingInput)?;

        match value {
            Value::String(text) => Ok(text.as_str()),
            other => Err(NerError::InvalidInput(other.to_string())),
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One `{label, text}` pair as returned by the model. Both fields are
/// optional here; the mapper decides what to do with incomplete entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEntity {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Character-offset span inside the task text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub labels: Vec<String>,
}

/// Host envelope around a span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelResult {
    pub from_name: String,
    pub to_name: String,
    #[serde(rename = "type")]
    pub result_type: String,
    pub value: AnnotationSpan,
}

impl From<AnnotationSpan> for LabelResult {
    fn from(value: AnnotationSpan) -> Self {
        Self {
            from_name: "label".to_string(),
            to_name: "text".to_string(),
            result_type: "labels".to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub result: Vec<LabelResult>,
    pub score: f64,
}

impl PredictionRecord {
    pub fn success(spans: Vec<AnnotationSpan>) -> Self {
        Self {
            result: spans.into_iter().map(LabelResult::from).collect(),
            score: 1.0,
        }
    }

    /// Zero-score record used for empty input and for every failure.
    pub fn empty() -> Self {
        Self {
            result: Vec::new(),
            score: 0.0,
        }
    }
}

//! Wire payloads exchanged with the tutor API.
//!
//! Every response type tolerates missing fields: the tutor backend is a thin
//! wrapper around a language model and its evaluation output is only loosely
//! structured. Display defaults are applied later, in
//! [`crate::core::evaluation`].

use serde::{Deserialize, Serialize};

pub mod client;

pub use client::{ApiError, HttpTutorApi, TutorApi};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    pub language: String,
}

/// Body of a `/chat` reply. The backend answers either `{response}` or
/// `{error}`, sometimes with a 200 status for the latter.
#[derive(Debug, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluateRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Mistake {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub correction: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    /// grammar / vocabulary / pronunciation / style
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Evaluation as produced by the tutor's language model.
///
/// The model output is passed through by the backend almost untouched, so
/// decoding is lenient: a score may arrive as a number or a numeric string,
/// list entries that are null or of the wrong shape are skipped, and a field
/// of an unexpected type reads as absent rather than failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Evaluation {
    #[serde(default, deserialize_with = "lenient::score")]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub strengths: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub mistakes: Option<Vec<Mistake>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub areas_for_improvement: Option<Vec<String>>,
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|score| score.is_finite()))
    }

    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(text)) => Some(text),
            _ => None,
        })
    }

    pub(super) fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .filter(|item| !item.is_null())
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        })
    }
}

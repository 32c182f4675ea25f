//! JSON payload extraction with required-field validation.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{ExtractionError, ExtractionResult, fence::select_payload};

/// Confidence assigned to every extracted payload.
///
/// Model-reported confidence is overwritten with this constant.
pub const CONFIDENCE: f64 = 0.9;

const JSON_TAGS: &[&str] = &["json"];
const SOURCE_TAGS: &[&str] = &["tsx", "typescript", "ts", "jsx", "javascript", "js"];

/// Set of top-level fields that must be present and non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields(&'static [&'static str]);

impl RequiredFields {
    /// Fields required of an ability orchestration reply.
    pub const ORCHESTRATION: Self = Self(&["intent", "abilities"]);

    /// Fields required of a classic intent-classification reply.
    pub const INTENT: Self = Self(&["type", "name"]);

    /// Returns the field names.
    #[must_use]
    pub const fn names(&self) -> &'static [&'static str] {
        self.0
    }
}

/// Recovers validated JSON objects from raw model replies.
///
/// The extractor never retries; callers decide whether to re-prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseExtractor;

impl ResponseExtractor {
    /// Creates an extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extracts a JSON object from `raw`, checks `required`, and injects
    /// [`CONFIDENCE`].
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::MalformedResponse`] when the payload is not
    /// a JSON object and [`ExtractionError::IncompleteResponse`] when a
    /// required field is absent or empty.
    pub fn extract_value(&self, raw: &str, required: RequiredFields) -> ExtractionResult<Value> {
        let payload = select_payload(raw, JSON_TAGS);
        let parsed: Value = serde_json::from_str(payload)
            .map_err(|err| ExtractionError::malformed(err.to_string()))?;

        let Value::Object(mut object) = parsed else {
            return Err(ExtractionError::malformed(format!(
                "expected a JSON object, found {}",
                json_kind(&parsed)
            )));
        };

        ensure_required(&object, required)?;
        object.insert("confidence".to_owned(), Value::from(CONFIDENCE));
        Ok(Value::Object(object))
    }

    /// Extracts and deserializes a typed payload.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::extract_value`], and
    /// [`ExtractionError::MalformedResponse`] when the object does not match
    /// the shape of `T`.
    pub fn extract<T>(&self, raw: &str, required: RequiredFields) -> ExtractionResult<T>
    where
        T: DeserializeOwned,
    {
        let value = self.extract_value(raw, required)?;
        serde_json::from_value(value)
            .map_err(|err| ExtractionError::malformed(format!("unexpected payload shape: {err}")))
    }
}

/// Extracts source code from a reply using the same fence rule as JSON
/// extraction, preferring TypeScript and JavaScript tags.
#[must_use]
pub fn extract_source(raw: &str) -> String {
    select_payload(raw, SOURCE_TAGS).to_owned()
}

fn ensure_required(object: &Map<String, Value>, required: RequiredFields) -> ExtractionResult<()> {
    match required
        .names()
        .iter()
        .find(|field| object.get(**field).is_none_or(is_empty))
    {
        Some(field) => Err(ExtractionError::IncompleteResponse {
            field: (*field).to_owned(),
        }),
        None => Ok(()),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

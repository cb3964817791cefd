//! Structural validation of dataset payloads.
//!
//! The structural check runs on the untyped JSON first so a rejected payload
//! reports which rule failed. Passing payloads are then decoded into the
//! typed [`Dataset`], and a decode failure rejects the whole payload as well.

use crate::error::{GuideError, Result};
use crate::models::{Dataset, StatName};
use serde_json::Value;

const REQUIRED_FIELDS: [&str; 4] = ["id", "name", "stats", "skills"];

/// Check the shape rules every accepted payload must satisfy.
///
/// - the top level is an object with a `characters` array
/// - a non-empty array's first element has `id`, `name`, `stats`, `skills`
/// - that element's `stats` maps all five stat names to numbers
pub fn validate_structure(value: &Value) -> Result<()> {
    let root = value
        .as_object()
        .ok_or_else(|| GuideError::validation("top-level value is not an object"))?;

    let characters = root
        .get("characters")
        .and_then(Value::as_array)
        .ok_or_else(|| GuideError::validation("`characters` is missing or not an array"))?;

    let Some(first) = characters.first() else {
        return Ok(());
    };
    let first = first
        .as_object()
        .ok_or_else(|| GuideError::validation("first character is not an object"))?;

    for field in REQUIRED_FIELDS {
        if !first.contains_key(field) {
            return Err(GuideError::validation(format!(
                "missing required field: {}",
                field
            )));
        }
    }

    let stats = first
        .get("stats")
        .and_then(Value::as_object)
        .ok_or_else(|| GuideError::validation("`stats` is not an object"))?;

    for stat in StatName::ALL {
        if !stats.get(stat.as_str()).is_some_and(Value::is_number) {
            return Err(GuideError::validation(format!(
                "invalid stat field: {}",
                stat
            )));
        }
    }

    Ok(())
}

/// Validate and decode a payload into a [`Dataset`].
pub fn parse_dataset(value: Value) -> Result<Dataset> {
    validate_structure(&value)?;

    let dataset: Dataset = serde_json::from_value(value)
        .map_err(|e| GuideError::validation(format!("payload does not decode: {}", e)))?;
    dataset.check_invariants()?;
    Ok(dataset)
}

/// Parse a raw response body. Malformed JSON counts as a validation failure.
pub fn parse_dataset_str(body: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| GuideError::validation(format!("response is not JSON: {}", e)))?;
    parse_dataset(value)
}

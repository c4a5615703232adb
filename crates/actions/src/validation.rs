//! Required-field extraction from incoming message bodies.
//!
//! Every accessor fails with an error naming the offending field, so
//! actions can reject bad input before any network call is made.

use serde_json::Value;

use filestore_protocol::types::Access;

use crate::ActionError;

/// Extracts a required, non-empty string field.
pub(crate) fn require_str<'a>(body: &'a Value, field: &'static str) -> Result<&'a str, ActionError> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        other => Err(ActionError::Input {
            field,
            expected: "a string",
            received: describe(other),
        }),
    }
}

/// Extracts an optional string field; a present non-string is an error.
pub(crate) fn optional_str<'a>(
    body: &'a Value,
    field: &'static str,
) -> Result<Option<&'a str>, ActionError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        other => Err(ActionError::Input {
            field,
            expected: "a string",
            received: describe(other),
        }),
    }
}

/// Parses the `access` field into one of the recognized values.
pub(crate) fn require_access(body: &Value) -> Result<Access, ActionError> {
    let raw = require_str(body, "access")?;
    raw.parse().map_err(|_| ActionError::Input {
        field: "access",
        expected: r#"one of "private", "public""#,
        received: format!(r#""{raw}""#),
    })
}

/// Extracts the optional `customHeaders` object as name/value pairs.
pub(crate) fn optional_headers(
    body: &Value,
    field: &'static str,
) -> Result<Vec<(String, String)>, ActionError> {
    let Some(value) = body.get(field) else {
        return Ok(Vec::new());
    };
    if value.is_null() {
        return Ok(Vec::new());
    }

    let invalid = || ActionError::Input {
        field,
        expected: "an object of string values",
        received: value.to_string(),
    };

    let object = value.as_object().ok_or_else(invalid)?;
    let mut headers = Vec::with_capacity(object.len());
    for (name, v) in object {
        let v = v.as_str().ok_or_else(invalid)?;
        headers.push((name.clone(), v.to_string()));
    }
    Ok(headers)
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "undefined".into(),
        Some(v) => v.to_string(),
    }
}

//! Request payload validation.
//!
//! Payloads are checked field by field on the raw JSON value so that every
//! problem is reported in one response instead of failing on the first one.

use serde_json::{Map, Value};

use crate::error::{FieldError, ValidationError};

use super::types::{ItemUpdate, NewItem};

const MSG_MISSING: &str = "Field required";
const MSG_STRING_TYPE: &str = "Input should be a valid string";
const MSG_TOO_SHORT: &str = "String should have at least 1 character";
const MSG_FLOAT_PARSING: &str = "Input should be a valid number, unable to parse string as a number";
const MSG_FLOAT_TYPE: &str = "Input should be a valid number";
const MSG_FINITE: &str = "Input should be a finite number";
const MSG_OBJECT: &str = "Input should be a valid dictionary or object to extract fields from";
const MSG_INT_PARSING: &str = "Input should be a valid integer, unable to parse string as an integer";

/// Parse a request body into JSON, reporting a body-level error on failure.
pub fn parse_body(bytes: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(bytes).map_err(|e| {
        ValidationError::single(FieldError::body(
            None,
            "json_invalid",
            &format!("JSON decode error: {e}"),
        ))
    })
}

/// Parse an item id path segment.
pub fn parse_item_id(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>().map_err(|_| invalid_item_id())
}

/// The error reported for an item id segment that is not an integer.
pub fn invalid_item_id() -> ValidationError {
    ValidationError::single(FieldError::path("item_id", "int_parsing", MSG_INT_PARSING))
}

/// Validate a create payload.
///
/// `name`, `price` and `category` are required; `description` may be absent
/// or null. A client-supplied `id` is ignored.
pub fn validate_new_item(body: &Value) -> Result<NewItem, ValidationError> {
    let fields = as_object(body)?;
    let mut errors = Vec::new();

    let name = required(fields, "name", &mut errors, |v, e| non_empty_string("name", v, e));
    let description = optional(fields, "description", &mut errors, |v, e| string("description", v, e));
    let price = required(fields, "price", &mut errors, |v, e| number("price", v, e));
    let category = required(fields, "category", &mut errors, |v, e| {
        non_empty_string("category", v, e)
    });

    match (name, price, category) {
        (Some(name), Some(price), Some(category)) if errors.is_empty() => Ok(NewItem {
            name,
            description,
            price,
            category,
        }),
        _ => Err(ValidationError { errors }),
    }
}

/// Validate a partial update payload. Every field is optional; null means absent.
pub fn validate_update(body: &Value) -> Result<ItemUpdate, ValidationError> {
    let fields = as_object(body)?;
    let mut errors = Vec::new();

    let update = ItemUpdate {
        name: optional(fields, "name", &mut errors, |v, e| string("name", v, e)),
        description: optional(fields, "description", &mut errors, |v, e| string("description", v, e)),
        price: optional(fields, "price", &mut errors, |v, e| number("price", v, e)),
        category: optional(fields, "category", &mut errors, |v, e| string("category", v, e)),
    };

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(ValidationError { errors })
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or_else(|| {
        ValidationError::single(FieldError::body(None, "model_attributes_type", MSG_OBJECT))
    })
}

fn required<T>(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
    check: impl FnOnce(&Value, &mut Vec<FieldError>) -> Option<T>,
) -> Option<T> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::body(Some(field), "missing", MSG_MISSING));
            None
        }
        Some(value) => check(value, errors),
    }
}

fn optional<T>(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
    check: impl FnOnce(&Value, &mut Vec<FieldError>) -> Option<T>,
) -> Option<T> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => check(value, errors),
    }
}

fn string(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            errors.push(FieldError::body(Some(field), "string_type", MSG_STRING_TYPE));
            None
        }
    }
}

fn non_empty_string(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    let s = string(field, value, errors)?;
    if s.is_empty() {
        errors.push(FieldError::body(Some(field), "string_too_short", MSG_TOO_SHORT));
        return None;
    }
    Some(s)
}

fn number(field: &str, value: &Value, errors: &mut Vec<FieldError>) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => Some(n),
            Err(_) => {
                errors.push(FieldError::body(Some(field), "float_parsing", MSG_FLOAT_PARSING));
                return None;
            }
        },
        _ => {
            errors.push(FieldError::body(Some(field), "float_type", MSG_FLOAT_TYPE));
            return None;
        }
    };

    match parsed {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(FieldError::body(Some(field), "finite_number", MSG_FINITE));
            None
        }
    }
}

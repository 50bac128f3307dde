//! Non-cryptographic string hashing for short, stable table keys

use serde_json::Value;

use crate::error::InteractionError;

/// Fold a string into a 32-bit signed accumulator and return it in decimal
///
/// Each UTF-16 code unit `c` updates the accumulator as
/// `hash = (hash << 5) - hash + c`, wrapping at 32 bits.
///
/// ```
/// use interactable_core::hash::simple_hash;
///
/// assert_eq!(simple_hash(""), "0");
/// assert_eq!(simple_hash("a"), "97");
/// assert_eq!(simple_hash("hello world"), simple_hash("hello world"));
/// ```
pub fn simple_hash(s: &str) -> String {
    let hash = s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.to_string()
}

/// Hash a dynamically typed value, rejecting anything that is not a string
pub fn try_simple_hash(value: &Value) -> Result<String, InteractionError> {
    match value {
        Value::String(s) => Ok(simple_hash(s)),
        other => Err(InteractionError::InvalidArgument(format!(
            "input must be of type string, got {}",
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

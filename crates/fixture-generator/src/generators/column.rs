//! Index-keyed generators: unique, cyclic and constant values.
//!
//! These are pure functions of the record index and the field
//! configuration; they never draw from the random source.

use crate::generator::GeneratorError;
use fixture_core::Value;

/// `"{field}_{index:06}"`, injective in `index` for a fixed field name.
pub fn unique_value(index: u64, field: &str) -> String {
    format!("{field}_{index:06}")
}

/// `candidates[index % len]`.
pub fn cyclic_value(field: &str, index: u64, candidates: &[Value]) -> Result<Value, GeneratorError> {
    if candidates.is_empty() {
        return Err(GeneratorError::EmptyCandidates(field.to_string()));
    }
    let position = (index % candidates.len() as u64) as usize;
    Ok(candidates[position].clone())
}

/// The configured constant, or `"{field}_constant"` when none is set.
pub fn constant_value(field: &str, value: Option<&Value>) -> Value {
    match value {
        Some(v) => v.clone(),
        None => Value::String(format!("{field}_constant")),
    }
}

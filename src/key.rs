//! Canonical grouping keys for emitted ids.
//!
//! Emitted ids are compared structurally: two objects with the same fields and
//! recursively equal values group together no matter the order their fields
//! were written in. [`canonicalize`] rebuilds a value with object fields
//! sorted by name at every level, and [`CanonicalKey`] serializes that form to
//! a stable JSON string usable as a map key.
//!
//! Arrays keep their element order; only their elements are canonicalized.
//! Integral floats collapse to integers (`42.0` groups with `42`), the way the
//! database shell prints numbers.

use std::fmt;

use serde_json::{Map as JsonMap, Number, Value};

use crate::error::{Error, Result};

/// Stable string form of an emitted id, used to decide group membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Compute the canonical key of `id`, rejecting nesting deeper than `max_depth`.
    pub fn of(id: &Value, max_depth: usize) -> Result<Self> {
        if exceeds_depth(id, max_depth) {
            return Err(Error::KeyTooDeep { max_depth });
        }
        Ok(Self(serde_json::to_string(&canonicalize(id))?))
    }

    /// The serialized canonical form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rebuild `id` with every object's fields in lexicographic order.
///
/// Primitives come back unchanged, except integral floats which become
/// integers.
pub fn canonicalize(id: &Value) -> Value {
    match id {
        Value::Object(fields) => {
            let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(name, value)| (name.clone(), canonicalize(value)))
                    .collect::<JsonMap<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Number(n) => Value::Number(normalize_number(n)),
        other => other.clone(),
    }
}

/// Whether `value` nests more than `max_depth` composite levels.
///
/// Primitives are depth 0. The walk stops descending once the limit is
/// crossed, so the recursion is bounded by `max_depth` however deep `value` is.
pub fn exceeds_depth(value: &Value, max_depth: usize) -> bool {
    let remaining = match max_depth.checked_sub(1) {
        Some(remaining) => remaining,
        None => return matches!(value, Value::Object(_) | Value::Array(_)),
    };
    match value {
        Value::Object(fields) => fields.values().any(|v| exceeds_depth(v, remaining)),
        Value::Array(items) => items.iter().any(|v| exceeds_depth(v, remaining)),
        _ => false,
    }
}

/// Integral floats inside the `i64` or `u64` range become integers.
fn normalize_number(n: &Number) -> Number {
    const I64_LOWER: f64 = i64::MIN as f64;
    const I64_UPPER: f64 = i64::MAX as f64;
    const U64_UPPER: f64 = u64::MAX as f64;

    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 => {
            if (I64_LOWER..I64_UPPER).contains(&f) {
                Number::from(f as i64)
            } else if (0.0..U64_UPPER).contains(&f) {
                Number::from(f as u64)
            } else {
                n.clone()
            }
        }
        _ => n.clone(),
    }
}

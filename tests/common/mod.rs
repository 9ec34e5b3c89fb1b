//! Common test utilities and fixtures.
//!
//! This module provides shared data sets and map/reduce functions to reduce
//! duplication across the test suite.

#![allow(dead_code)]

use mock_reduce::{MapContext, Value, json};

// =============================================================================
// Data Sets
// =============================================================================

/// Three records carrying a `value` field.
pub fn value_records() -> Vec<Value> {
    vec![
        json!({"value": "Cornballer"}),
        json!({"value": "Uncle Father Oscar"}),
        json!({"value": "Dead Dove DO NOT EAT"}),
    ]
}

/// Records whose `_id` objects repeat with different field orders.
pub fn nested_id_records() -> Vec<Value> {
    vec![
        json!({"_id": {"x": 3, "y": {"a": 4, "b": 2}}, "value": "Cornballer"}),
        json!({"_id": {"x": 2}, "value": "Uncle Father Oscar"}),
        json!({"_id": {"y": {"b": 2, "a": 4}, "x": 3}, "value": "Dead Dove DO NOT EAT"}),
    ]
}

// =============================================================================
// Map Functions
// =============================================================================

/// `emit(42, this.value)`
pub fn emit_constant_key(ctx: &MapContext<'_>) -> anyhow::Result<()> {
    ctx.emit(42, ctx.get("value").clone())?;
    Ok(())
}

/// `emit(this._id, this.value)`
pub fn emit_record_id(ctx: &MapContext<'_>) -> anyhow::Result<()> {
    ctx.emit(ctx.get("_id").clone(), ctx.get("value").clone())?;
    Ok(())
}

// =============================================================================
// Reduce Functions
// =============================================================================

/// Join string values with `-`.
pub fn join_with_dash(_id: &Value, values: &[Value]) -> anyhow::Result<Value> {
    let parts = values
        .iter()
        .map(|v| {
            v.as_str()
                .ok_or_else(|| anyhow::anyhow!("expected a string, got {v}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Value::from(parts.join("-")))
}

/// Sum numeric values.
pub fn sum(_id: &Value, values: &[Value]) -> anyhow::Result<Value> {
    Ok(Value::from(values.iter().filter_map(Value::as_i64).sum::<i64>()))
}

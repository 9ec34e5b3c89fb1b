//! Reduce phase emulation.
//!
//! Each group's value list is folded into one value. A group with a single
//! value is passed through untouched and never reaches the reduce function,
//! as the document database itself does.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{EmptyGroupPolicy, ReduceConfig};
use crate::error::{Error, Result};
use crate::input;
use crate::logging::{debug, trace, warn};
use crate::map::Group;

/// The reduced value of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedRecord {
    #[serde(rename = "_id")]
    pub id: Value,
    pub value: Value,
}

impl ReducedRecord {
    pub fn new(id: Value, value: Value) -> Self {
        Self { id, value }
    }
}

/// Runs reduce functions over grouped records.
#[derive(Debug, Default)]
pub struct Reduce {
    reduced: Vec<ReducedRecord>,
    config: ReduceConfig,
}

impl Reduce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReduceConfig) -> Self {
        Self {
            reduced: Vec::new(),
            config,
        }
    }

    /// Reduce every group, in order, into one [`ReducedRecord`] each.
    ///
    /// `reduce_fn(id, values)` is called once per group holding two or more
    /// values. Groups without values follow [`ReduceConfig::empty_group`].
    /// On failure the records reduced so far stay readable through
    /// [`reduced_data`](Reduce::reduced_data).
    pub fn run<I, F>(&mut self, groups: I, mut reduce_fn: F) -> Result<Vec<ReducedRecord>>
    where
        I: IntoIterator,
        I::Item: Borrow<Group>,
        F: FnMut(&Value, &[Value]) -> anyhow::Result<Value>,
    {
        self.reduced.clear();
        debug!("starting reduce pass");

        for (index, item) in groups.into_iter().enumerate() {
            let group = item.borrow();
            let value = match group.values.as_slice() {
                [] => self.empty_group(&group.id)?,
                [single] => single.clone(),
                values => {
                    trace!(index, values = values.len(), "calling reduce function");
                    reduce_fn(&group.id, values).map_err(|source| {
                        warn!(index, error = %source, "reduce function failed");
                        Error::ReduceFunction { index, source }
                    })?
                }
            };
            self.reduced.push(ReducedRecord::new(group.id.clone(), value));
        }

        debug!(records = self.reduced.len(), "reduce pass completed");
        Ok(self.reduced.clone())
    }

    /// Like [`run`](Reduce::run), over raw JSON: an array (or object) of
    /// `{"_id": .., "value": [..]}` documents.
    pub fn run_value<F>(&mut self, data: &Value, reduce_fn: F) -> Result<Vec<ReducedRecord>>
    where
        F: FnMut(&Value, &[Value]) -> anyhow::Result<Value>,
    {
        let groups = input::records(data)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Group::deserialize(item).map_err(|e| {
                    Error::invalid_input(format!(
                        "group {index} is not an {{_id, value: [..]}} document ({}): {e}",
                        input::kind(item)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.run(groups, reduce_fn)
    }

    /// Records of the latest reduce pass.
    pub fn reduced_data(&self) -> &[ReducedRecord] {
        &self.reduced
    }

    fn empty_group(&self, id: &Value) -> Result<Value> {
        match self.config.empty_group {
            EmptyGroupPolicy::Null => {
                warn!(id = %id, "reducing empty group to null");
                Ok(Value::Null)
            }
            EmptyGroupPolicy::Error => Err(Error::EmptyGroup { id: id.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn join(_id: &Value, values: &[Value]) -> anyhow::Result<Value> {
        let parts: Vec<&str> = values.iter().filter_map(Value::as_str).collect();
        Ok(json!(parts.join("-")))
    }

    #[test]
    fn test_single_value_skips_reduce_function() {
        let mut reduce = Reduce::new();
        let out = reduce
            .run(vec![Group::new(json!(1), vec![json!("a")])], |_, _| {
                anyhow::bail!("must not be called")
            })
            .unwrap();
        assert_eq!(out, vec![ReducedRecord::new(json!(1), json!("a"))]);
    }

    #[test]
    fn test_reduce_function_receives_id_and_values() {
        let mut reduce = Reduce::new();
        let mut calls = Vec::new();
        reduce
            .run(vec![Group::new(json!("k"), vec![json!(1), json!(2)])], |id, values| {
                calls.push((id.clone(), values.to_vec()));
                Ok(json!(3))
            })
            .unwrap();
        assert_eq!(calls, vec![(json!("k"), vec![json!(1), json!(2)])]);
    }

    #[test]
    fn test_empty_group_policies() {
        let groups = vec![Group::new(json!("empty"), Vec::new())];

        let mut lenient = Reduce::new();
        let out = lenient.run(&groups, join).unwrap();
        assert_eq!(out, vec![ReducedRecord::new(json!("empty"), Value::Null)]);

        let mut strict = Reduce::with_config(ReduceConfig {
            empty_group: EmptyGroupPolicy::Error,
        });
        let err = strict.run(&groups, join).unwrap_err();
        assert!(matches!(err, Error::EmptyGroup { ref id } if id == "\"empty\""));
    }

    #[test]
    fn test_run_value_rejects_bad_groups() {
        let mut reduce = Reduce::new();
        assert!(reduce.run_value(&json!(7), join).unwrap_err().is_invalid_input());
        assert!(
            reduce
                .run_value(&json!([{"_id": 1, "value": "abc"}]), join)
                .unwrap_err()
                .is_invalid_input()
        );
        assert!(
            reduce
                .run_value(&json!([{"value": ["a"]}]), join)
                .unwrap_err()
                .is_invalid_input()
        );
    }
}

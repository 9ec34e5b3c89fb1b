//! The mock collection handed out in place of a real database connection.
//!
//! [`MockReduce`] pairs a [`Map`] and a [`Reduce`] runner with the test data
//! the next `map_reduce` call should run over, so code that calls
//! `collection.map_reduce(map, reduce)` can be exercised without a server.

use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input;
use crate::logging::debug;
use crate::map::{Emission, Group, Map, MapContext};
use crate::reduce::{Reduce, ReducedRecord};

/// An in-memory stand-in for a collection's map/reduce entry point.
///
/// # Example
///
/// ```ignore
/// use mock_reduce::{json, MockReduce, Value};
///
/// let mut mock = MockReduce::new();
/// mock.set_next_test_data(vec![json!({"tag": "a"}), json!({"tag": "a"})]);
///
/// let out = mock.map_reduce(
///     |ctx| {
///         ctx.emit(ctx.get("tag").clone(), 1)?;
///         Ok(())
///     },
///     |_id, values| Ok(Value::from(values.len())),
/// )?;
/// assert_eq!(out[0].value, json!(2));
/// ```
#[derive(Debug, Default)]
pub struct MockReduce {
    map: Map,
    reduce: Reduce,
    next_test_data: Option<Vec<Value>>,
}

impl MockReduce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            map: Map::new().with_config(config.map),
            reduce: Reduce::with_config(config.reduce),
            next_test_data: None,
        }
    }

    /// Set the records the next [`map_reduce`](MockReduce::map_reduce) runs over.
    pub fn set_next_test_data(&mut self, records: impl IntoIterator<Item = Value>) {
        self.next_test_data = Some(records.into_iter().collect());
    }

    /// Set the next test data from a raw JSON array or object of records.
    pub fn set_next_test_data_value(&mut self, data: &Value) -> Result<()> {
        let records = input::records(data)?.into_iter().cloned().collect();
        self.next_test_data = Some(records);
        Ok(())
    }

    /// Whether test data is waiting for the next run.
    pub fn has_test_data(&self) -> bool {
        self.next_test_data.is_some()
    }

    /// Map the pending test data, then reduce the groups.
    ///
    /// The test data is consumed by this call, whether or not it succeeds.
    pub fn map_reduce<M, R>(&mut self, map_fn: M, reduce_fn: R) -> Result<Vec<ReducedRecord>>
    where
        M: FnMut(&MapContext<'_>) -> anyhow::Result<()>,
        R: FnMut(&Value, &[Value]) -> anyhow::Result<Value>,
    {
        let records = self.next_test_data.take().ok_or(Error::NoTestData)?;
        debug!(records = records.len(), "running map/reduce over test data");

        let groups = self.map.run(&records, map_fn)?;
        self.reduce.run(&groups, reduce_fn)
    }

    /// Emissions of the latest map pass.
    pub fn emits(&self) -> Vec<Emission> {
        self.map.emits()
    }

    /// Groups of the latest map pass.
    pub fn mapped_data(&self) -> Vec<Group> {
        self.map.mapped_data()
    }

    /// Records of the latest reduce pass.
    pub fn reduced_data(&self) -> &[ReducedRecord] {
        self.reduce.reduced_data()
    }

    pub fn reduce(&mut self) -> &mut Reduce {
        &mut self.reduce
    }
}

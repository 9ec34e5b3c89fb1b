//! The map pass runner.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::config::MapConfig;
use crate::error::{Error, Result};
use crate::input;
use crate::logging::{debug, warn};

use super::emit::{ActivePass, Emission, MapState};
use super::group::Group;
use super::scope::{Bindings, ExposedScope, LocalScope, Scope};

static UNDEFINED: Value = Value::Null;

/// What a map function sees while it runs: the current record and `emit`.
pub struct MapContext<'a> {
    this: &'a Value,
    scope: &'a dyn Scope,
}

impl<'a> MapContext<'a> {
    /// The record the map function is being applied to.
    pub fn this(&self) -> &'a Value {
        self.this
    }

    /// A field of the current record; `null` when the record has no such
    /// field or is not an object.
    pub fn get(&self, field: &str) -> &'a Value {
        self.this.get(field).unwrap_or(&UNDEFINED)
    }

    /// Emit `value` under `key` through the ambient scope.
    pub fn emit(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<Emission> {
        self.scope
            .emitter()
            .ok_or(Error::EmitUnavailable)?
            .emit(key.into(), value.into())
    }
}

/// Runs map functions over in-memory records and groups what they emit.
///
/// A runner is meant to be reused: every [`run`](Map::run) discards the
/// emissions and groups of the previous one. Passes on one runner never
/// interleave, since `run` takes `&mut self`.
///
/// # Example
///
/// ```ignore
/// use mock_reduce::{json, Map};
///
/// let mut map = Map::new();
/// let groups = map.run(vec![json!({"value": "x"}), json!({"value": "y"})], |ctx| {
///     ctx.emit(42, ctx.get("value").clone())?;
///     Ok(())
/// })?;
/// assert_eq!(groups[0].values, vec![json!("x"), json!("y")]);
/// ```
#[derive(Debug)]
pub struct Map<S: Scope = LocalScope> {
    scope: S,
    state: Rc<RefCell<MapState>>,
    config: MapConfig,
}

impl Map<LocalScope> {
    pub fn new() -> Self {
        Self::with_scope(LocalScope::default())
    }
}

impl Default for Map<LocalScope> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scope> Map<S> {
    /// Create a runner that exposes `emit` through `scope`.
    pub fn with_scope(scope: S) -> Self {
        let config = MapConfig::default();
        Self {
            scope,
            state: Rc::new(RefCell::new(MapState::new(config.max_key_depth))),
            config,
        }
    }

    /// Replace the configuration; clears any previous results.
    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.state = Rc::new(RefCell::new(MapState::new(config.max_key_depth)));
        self.config = config;
        self
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    /// Apply `map_fn` to every record, in order, and return the groups.
    ///
    /// If `map_fn` fails the pass stops with [`Error::MapFunction`]; the
    /// emissions and groups of the records processed before it stay readable
    /// through [`emits`](Map::emits) and [`mapped_data`](Map::mapped_data).
    pub fn run<I, F>(&mut self, records: I, mut map_fn: F) -> Result<Vec<Group>>
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<Value>,
        F: FnMut(&MapContext<'_>) -> anyhow::Result<()>,
    {
        self.state.borrow_mut().reset();
        debug!("starting map pass");

        let pass = ActivePass::new(Rc::clone(&self.state));
        let bindings = Bindings::new().with_emit(pass.emitter());
        let exposed = ExposedScope::new(&mut self.scope, bindings);

        for (index, record) in records.into_iter().enumerate() {
            let ctx = MapContext {
                this: std::borrow::Borrow::borrow(&record),
                scope: exposed.scope(),
            };
            map_fn(&ctx).map_err(|source| {
                warn!(index, error = %source, "map function failed");
                Error::MapFunction { index, source }
            })?;
        }
        drop(exposed);
        drop(pass);

        debug!(
            emits = self.state.borrow().emits().len(),
            groups = self.state.borrow().groups().len(),
            "map pass completed"
        );
        Ok(self.mapped_data())
    }

    /// Like [`run`](Map::run), over a raw JSON data set: an array of records
    /// or an object whose property values are the records.
    pub fn run_value<F>(&mut self, data: &Value, map_fn: F) -> Result<Vec<Group>>
    where
        F: FnMut(&MapContext<'_>) -> anyhow::Result<()>,
    {
        let records = input::records(data)?;
        self.run(records, map_fn)
    }

    /// Emit directly into the current results, outside any map function.
    pub fn emit(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<Emission> {
        self.state.borrow_mut().record(key.into(), value.into())
    }

    /// Emissions of the latest pass, in call order.
    pub fn emits(&self) -> Vec<Emission> {
        self.state.borrow().emits().to_vec()
    }

    /// Groups of the latest pass, in first-seen order.
    pub fn mapped_data(&self) -> Vec<Group> {
        self.state.borrow().groups().to_vec()
    }
}

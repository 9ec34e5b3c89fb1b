//! Emissions and the shared state they are recorded into.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::logging::trace;

use super::group::{Group, Grouper};

/// One `emit(key, value)` call made during a map pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emission {
    #[serde(rename = "_id")]
    pub id: Value,
    pub value: Value,
}

impl Emission {
    pub fn new(id: Value, value: Value) -> Self {
        Self { id, value }
    }
}

/// Emission log and groups of the latest map pass.
#[derive(Debug)]
pub(crate) struct MapState {
    emits: Vec<Emission>,
    grouper: Grouper,
    passes: u64,
    /// The pass that currently has `emit` exposed, if any.
    active: Option<u64>,
}

impl MapState {
    pub(crate) fn new(max_key_depth: usize) -> Self {
        Self {
            emits: Vec::new(),
            grouper: Grouper::new(max_key_depth),
            passes: 0,
            active: None,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.emits.clear();
        self.grouper.clear();
    }

    /// Group first, so an id that cannot be keyed leaves no trace in the log.
    pub(crate) fn record(&mut self, id: Value, value: Value) -> Result<Emission> {
        let emission = Emission::new(id, value);
        self.grouper.add(&emission)?;
        self.emits.push(emission.clone());
        trace!(emits = self.emits.len(), "recorded emission");
        Ok(emission)
    }

    pub(crate) fn emits(&self) -> &[Emission] {
        &self.emits
    }

    pub(crate) fn groups(&self) -> &[Group] {
        self.grouper.groups()
    }
}

/// Keeps one map pass open; emitters it hands out only work while it lives.
pub(crate) struct ActivePass {
    state: Rc<RefCell<MapState>>,
    pass: u64,
}

impl ActivePass {
    pub(crate) fn new(state: Rc<RefCell<MapState>>) -> Self {
        let pass = {
            let mut guard = state.borrow_mut();
            guard.passes = guard.passes.wrapping_add(1);
            guard.active = Some(guard.passes);
            guard.passes
        };
        Self { state, pass }
    }

    pub(crate) fn emitter(&self) -> Emitter {
        Emitter {
            state: Rc::clone(&self.state),
            pass: self.pass,
        }
    }
}

impl Drop for ActivePass {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.active = None;
        }
    }
}

/// The `emit` callable a map pass exposes to its map function.
///
/// Cloning yields another handle onto the same pass. Every handle stops
/// working once that pass ends, including during later passes.
#[derive(Debug, Clone)]
pub struct Emitter {
    state: Rc<RefCell<MapState>>,
    pass: u64,
}

impl Emitter {
    /// Record an emission and add its value to the group of its id.
    ///
    /// Fails with [`Error::EmitUnavailable`] outside the pass that exposed it.
    pub fn emit(&self, key: Value, value: Value) -> Result<Emission> {
        let mut state = self.state.borrow_mut();
        if state.active != Some(self.pass) {
            return Err(Error::EmitUnavailable);
        }
        state.record(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emission_serializes_with_id_field() {
        let emission = Emission::new(json!(1337), json!({"Banana": "Stand"}));
        assert_eq!(
            serde_json::to_value(&emission).unwrap(),
            json!({"_id": 1337, "value": {"Banana": "Stand"}})
        );
    }

    #[test]
    fn test_emitter_handles_share_state() {
        let state = Rc::new(RefCell::new(MapState::new(128)));
        let pass = ActivePass::new(Rc::clone(&state));
        let first = pass.emitter();
        let second = first.clone();

        first.emit(json!("k"), json!(1)).unwrap();
        second.emit(json!("k"), json!(2)).unwrap();

        let state = state.borrow();
        assert_eq!(state.emits().len(), 2);
        assert_eq!(state.groups().len(), 1);
        assert_eq!(state.groups().first().unwrap().values, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_rejected_key_is_not_logged() {
        let state = Rc::new(RefCell::new(MapState::new(1)));
        let pass = ActivePass::new(Rc::clone(&state));
        let emitter = pass.emitter();

        assert!(emitter.emit(json!({"a": {"b": 1}}), json!(1)).is_err());
        assert!(state.borrow().emits().is_empty());
        assert!(state.borrow().groups().is_empty());
    }

    #[test]
    fn test_emitter_dead_outside_its_pass() {
        let state = Rc::new(RefCell::new(MapState::new(128)));
        let first = ActivePass::new(Rc::clone(&state));
        let emitter = first.emitter();
        assert!(emitter.emit(json!(1), json!(1)).is_ok());
        drop(first);

        assert!(matches!(
            emitter.emit(json!(1), json!(2)),
            Err(Error::EmitUnavailable)
        ));

        let second = ActivePass::new(Rc::clone(&state));
        assert!(matches!(
            emitter.emit(json!(1), json!(3)),
            Err(Error::EmitUnavailable)
        ));
        assert!(second.emitter().emit(json!(1), json!(4)).is_ok());

        assert_eq!(
            state.borrow().emits(),
            &[Emission::new(json!(1), json!(1)), Emission::new(json!(1), json!(4))]
        );
    }
}

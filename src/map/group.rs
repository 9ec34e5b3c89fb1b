//! Grouping of emitted values by canonical id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::key::CanonicalKey;
use crate::logging::trace;

use super::emit::Emission;

/// All values emitted under ids that are structurally equal.
///
/// `id` is the first id seen for the group, exactly as it was emitted, so an
/// object id keeps its original field order. `values` keeps emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: Value,
    #[serde(rename = "value")]
    pub values: Vec<Value>,
}

impl Group {
    pub fn new(id: Value, values: Vec<Value>) -> Self {
        Self { id, values }
    }
}

/// Accumulates emissions into groups, in the order ids are first seen.
#[derive(Debug)]
pub struct Grouper {
    groups: Vec<Group>,
    index: HashMap<CanonicalKey, usize>,
    max_key_depth: usize,
}

impl Grouper {
    pub fn new(max_key_depth: usize) -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
            max_key_depth,
        }
    }

    /// Append the emission's value to the group of its id, creating the
    /// group on first sight.
    pub fn add(&mut self, emission: &Emission) -> Result<()> {
        let key = CanonicalKey::of(&emission.id, self.max_key_depth)?;

        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                trace!(key = %key, "created group");
                self.groups.push(Group::new(emission.id.clone(), Vec::new()));
                let slot = self.groups.len() - 1;
                self.index.insert(key, slot);
                slot
            }
        };

        if let Some(group) = self.groups.get_mut(slot) {
            group.values.push(emission.value.clone());
        }
        Ok(())
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
        self.index.clear();
    }
}

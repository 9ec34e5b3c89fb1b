//! Map phase emulation.
//!
//! A [`Map`] runs a user map function once per input record. The function
//! reads the current record from its [`MapContext`] and calls `emit` zero or
//! more times; every emission is logged and grouped by the structural value
//! of its id (see [`crate::key`]).
//!
//! `emit` reaches the map function through a [`Scope`]: the runner exposes
//! it before the first record and conceals it again when the pass ends,
//! including when the map function fails.

mod emit;
mod group;
mod runner;
mod scope;

pub use emit::{Emission, Emitter};
pub use group::{Group, Grouper};
pub use runner::{Map, MapContext};
pub use scope::{Bindings, ExposedScope, LocalScope, Scope};

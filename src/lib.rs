//! An in-memory test double for document database map/reduce jobs.
//!
//! mock-reduce runs the map and reduce phases of a map/reduce job over
//! fully materialized in-memory records, so code built around a database's
//! `mapReduce` can be tested without a running server.
//!
//! # Quick Start
//!
//! ```ignore
//! use mock_reduce::prelude::*;
//!
//! let mut map = Map::new();
//! let groups = map.run(vec![json!({"value": "x"}), json!({"value": "y"})], |ctx| {
//!     ctx.emit(42, ctx.get("value").clone())?;
//!     Ok(())
//! })?;
//!
//! let mut reduce = Reduce::new();
//! let reduced = reduce.run(&groups, |_id, values| Ok(Value::from(values.len())))?;
//! ```
//!
//! # Modules
//!
//! - [`map`] - Map phase runner, emissions, grouping and the `emit` scope
//! - [`reduce`] - Reduce phase runner
//! - [`key`] - Canonical, field-order independent grouping keys
//! - [`mock`] - The collection stand-in combining both phases
//! - [`config`] - TOML configuration
//! - [`logging`] - Conditional tracing macros and subscriber setup
//!
//! # Feature Flags
//!
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `subscriber` - Enable `logging::init`, which installs a `tracing-subscriber` stack

pub mod logging;
pub mod config;
mod error;
mod input;
pub mod key;
pub mod map;
pub mod mock;
pub mod prelude;
pub mod reduce;

// Re-export the unified error type
pub use error::{Error, Result};

pub use config::{Config, EmptyGroupPolicy, LogFormat, LoggingConfig, MapConfig, ReduceConfig};
pub use key::{CanonicalKey, canonicalize};
pub use map::{Bindings, Emission, Emitter, ExposedScope, Group, LocalScope, Map, MapContext, Scope};
pub use mock::MockReduce;
pub use reduce::{Reduce, ReducedRecord};

// Keys, values and records are JSON values
pub use serde_json::{Value, json};

//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```ignore
//! use mock_reduce::prelude::*;
//!
//! let mut mock = MockReduce::new();
//! mock.set_next_test_data(vec![json!({"value": 1})]);
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Runners and their records
pub use crate::map::{Emission, Group, Map, MapContext, Scope};
pub use crate::mock::MockReduce;
pub use crate::reduce::{Reduce, ReducedRecord};

// Configuration
pub use crate::config::{Config, EmptyGroupPolicy};

// Dependency re-exports
pub use crate::{Value, json};

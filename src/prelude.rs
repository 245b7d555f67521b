//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use avlbox::prelude::*;
//! ```

pub use crate::{AugmentedTree, Bounds, Error, Query};
pub use crate::{load_file, load_points, run_queries};

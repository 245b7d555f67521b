//! # avlbox - Augmented AVL Tree for Circle Range Counting
//!
//! A Rust library that indexes 2D integer points in an AVL tree keyed on x and counts the
//! points lying within a radius of a query center.
//!
//! ## Features
//!
//! - **Incremental Build**: Points are inserted one by one; the tree stays balanced after each insert
//! - **Augmented Nodes**: Every node caches subtree height, point count and a tight bounding box
//! - **Pruned Queries**: Whole subtrees are skipped or counted in O(1) from their bounding box
//! - **Exact Integer Math**: Squared distances are computed without overflow for any i32 input
//!
//! ## Quick Start
//!
//! ```rust
//! use avlbox::prelude::*;
//!
//! // Create a new index
//! let mut tree = AugmentedTree::new();
//!
//! // Add some points (x, y)
//! tree.insert(0, 0);     // Point 0
//! tree.insert(3, 4);     // Point 1: distance 5 from origin
//! tree.insert(10, 10);   // Point 2: distance ~14.1 from origin
//!
//! // Count points within radius 5 of the origin (boundary included)
//! assert_eq!(tree.count_in_circle(0, 0, 5), 2);
//!
//! // Or collect their ids
//! let mut results = Vec::new();
//! tree.query_circle(0, 0, 5, &mut results);
//! results.sort();
//! assert_eq!(results, vec![0, 1]);
//! ```
//!
//! ## How It Works
//!
//! The tree is an ordinary AVL tree on the x coordinate, with insertion order breaking
//! ties so that equal x always sorts after existing points. What makes it
//! useful for 2D queries is the per-node bounding box: when the box lies entirely outside the
//! query circle the subtree is skipped, and when the box lies entirely inside the circle its
//! cached point count is added without visiting it. Only subtrees straddling the circle
//! boundary are explored.
//!
//! The [`loader`] and [`query_stream`] modules provide the text formats used by the `avlbox`
//! binary: a point file of `x y` pairs and a stream of `cx cy r` query lines.

pub mod avl_tree;
pub mod error;
pub mod loader;
pub mod node;
pub mod prelude;
pub mod queries;
pub mod query_stream;


pub use avl_tree::{AugmentedTree, Iter};
pub use error::{Error, QueryError, Result};
pub use loader::{load_file, load_points};
pub use node::{Bounds, Node, NodeId};
pub use query_stream::{Query, QueryStream, parse_query_line, run_queries};

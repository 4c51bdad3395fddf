//! Node pool.
//!
//! In-memory slab that owns every node of a tree.

mod arena;

pub use arena::NodePool;

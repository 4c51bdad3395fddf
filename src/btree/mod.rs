//! B-tree implementation.
//!
//! This module provides an in-memory B-tree that supports:
//! - Point lookups (get)
//! - Insertions with upward split propagation (put)
//! - Deletions with borrow/merge rebalancing (remove)
//! - Ordered traversal (cursor, iter) and nearest-key queries
//! - JSON encoding and decoding

mod cursor;
mod delete;
mod insert;
mod inspect;
mod serialization;
mod tree;

pub use cursor::{Cursor, Iter};
pub use tree::BTree;

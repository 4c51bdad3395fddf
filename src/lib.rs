//! # BTree Map
//!
//! An in-memory, ordered key-value B-tree of configurable order.
//!
//! ## Architecture
//!
//! - **Node Layer** (`node`): entries and child handles with in-node binary search
//! - **Pool Layer** (`pool`): slab that owns every node; nodes refer to each other by [`NodeId`]
//! - **B-Tree Layer** (`btree`): insertion with split propagation, deletion with
//!   borrow/merge rebalancing, cursors, nearest-key queries and JSON encoding
//! - **Map Contract** (`map`): the surface adapter containers build on
//!
//! ## Usage
//!
//! ```rust
//! use btree_map::BTree;
//!
//! let mut tree = BTree::new(3)?;
//!
//! // Put key-value pairs
//! tree.put(10, "ten");
//! tree.put(5, "five");
//! tree.put(20, "twenty");
//!
//! // Get a value
//! assert_eq!(tree.get(&10), Some(&"ten"));
//!
//! // Nearest-key queries
//! assert_eq!(tree.floor(&12), Some((&10, &"ten")));
//! assert_eq!(tree.ceiling(&12), Some((&20, &"twenty")));
//!
//! // Remove a key
//! assert_eq!(tree.remove(&10), Some("ten"));
//!
//! // Ordered traversal
//! let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, vec![5, 20]);
//! # Ok::<(), btree_map::BTreeError>(())
//! ```
//!
//! The tree is single-threaded: it performs no locking, and callers that share
//! one must serialize access themselves.

pub mod btree;
pub mod comparator;
pub mod error;
pub mod map;
pub mod node;
pub mod pool;
pub mod types;

pub use btree::{BTree, Cursor, Iter};
pub use comparator::{Comparator, NaturalOrder};
pub use error::{BTreeError, Result};
pub use map::Map;
pub use node::Entry;
pub use types::{NodeId, TreeConfig, DEFAULT_ORDER, MIN_ORDER};

use serde::{Deserialize, Serialize};

/// Node snapshot for visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in this node
    pub keys: Vec<String>,
    /// Values in this node, aligned with `keys`
    pub values: Vec<String>,
    /// Child nodes (only for internal nodes)
    pub children: Vec<TreeNode>,
}

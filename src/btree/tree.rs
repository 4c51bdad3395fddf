//! B-tree core implementation.
//!
//! This module provides the main BTree struct with operations for:
//! - construction and configuration
//! - search: in-node binary search and root-to-leaf descent
//! - get: point lookups
//! - min/max/floor/ceiling: nearest-key queries
//!
//! Insertion lives in `insert.rs`, deletion in `delete.rs`.

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::Result;
use crate::node::{Entry, Node};
use crate::pool::NodePool;
use crate::types::{NodeId, TreeConfig};
use std::fmt;

/// An in-memory B-tree map of configurable order
///
/// Keys are ordered by the comparator `C`. The tree exclusively owns its
/// nodes through a [`NodePool`]; nodes refer to their children and parent by
/// [`NodeId`].
#[derive(Clone)]
pub struct BTree<K, V, C = NaturalOrder> {
    /// Owner of every node
    pub(super) pool: NodePool<K, V>,
    /// Root node (None means empty tree)
    pub(super) root: Option<NodeId>,
    /// Key ordering
    pub(super) comparator: C,
    /// Order and derived node limits
    pub(super) config: TreeConfig,
    /// Number of entries in the tree
    pub(super) len: usize,
}

impl<K: Ord, V> BTree<K, V> {
    /// Create an empty tree of the given order, ordering keys by `Ord`
    pub fn new(order: usize) -> Result<Self> {
        Self::with_comparator(order, NaturalOrder)
    }
}

impl<K: Ord, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self {
            pool: NodePool::new(),
            root: None,
            comparator: NaturalOrder,
            config: TreeConfig::default(),
            len: 0,
        }
    }
}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Create an empty tree of the given order with a custom comparator
    pub fn with_comparator(order: usize, comparator: C) -> Result<Self> {
        Self::with_config(TreeConfig::new(order), comparator)
    }

    /// Create an empty tree from a configuration
    pub fn with_config(config: TreeConfig, comparator: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pool: NodePool::new(),
            root: None,
            comparator,
            config,
            len: 0,
        })
    }

    /// Get the order (maximum children per node)
    pub fn order(&self) -> usize {
        self.config.order
    }

    /// Get the tree configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Get the comparator
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Number of entries in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry, returning the tree to its empty state
    pub fn clear(&mut self) {
        self.pool.clear();
        self.root = None;
        self.len = 0;
    }

    /// Look up a key and return its value
    pub fn get(&self, key: &K) -> Option<&V> {
        let (id, index) = self.search_recursively(key)?;
        Some(&self.pool.get(id).entries[index].value)
    }

    /// Look up a key and return a mutable reference to its value
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (id, index) = self.search_recursively(key)?;
        Some(&mut self.pool.get_mut(id).entries[index].value)
    }

    /// Look up a key and return the stored key and value
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let (id, index) = self.search_recursively(key)?;
        Some(self.pool.get(id).entries[index].as_pair())
    }

    /// Check if a key exists
    pub fn contains_key(&self, key: &K) -> bool {
        self.search_recursively(key).is_some()
    }

    /// Smallest entry, if any
    pub fn min(&self) -> Option<(&K, &V)> {
        let leaf = self.leftmost_leaf(self.root?);
        self.pool.get(leaf).entries.first().map(Entry::as_pair)
    }

    /// Largest entry, if any
    pub fn max(&self) -> Option<(&K, &V)> {
        let leaf = self.rightmost_leaf(self.root?);
        self.pool.get(leaf).entries.last().map(Entry::as_pair)
    }

    /// Smallest key, if any
    pub fn min_key(&self) -> Option<&K> {
        self.min().map(|(key, _)| key)
    }

    /// Value of the smallest key, if any
    pub fn min_value(&self) -> Option<&V> {
        self.min().map(|(_, value)| value)
    }

    /// Largest key, if any
    pub fn max_key(&self) -> Option<&K> {
        self.max().map(|(key, _)| key)
    }

    /// Value of the largest key, if any
    pub fn max_value(&self) -> Option<&V> {
        self.max().map(|(_, value)| value)
    }

    /// Entry with the largest key less than or equal to `key`
    ///
    /// Returns `None` if the tree is empty or every key is greater than `key`.
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        let mut current = self.root?;
        let mut best = None;

        loop {
            let node = self.pool.get(current);
            match node.search(key, &self.comparator) {
                Ok(index) => return Some(node.entries[index].as_pair()),
                Err(index) => {
                    // Anything found deeper lies between entries[index - 1]
                    // and entries[index], so it is a closer match.
                    if index > 0 {
                        best = Some(node.entries[index - 1].as_pair());
                    }
                    if node.is_leaf() {
                        return best;
                    }
                    current = node.children[index];
                }
            }
        }
    }

    /// Entry with the smallest key greater than or equal to `key`
    ///
    /// Returns `None` if the tree is empty or every key is less than `key`.
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        let mut current = self.root?;
        let mut best = None;

        loop {
            let node = self.pool.get(current);
            match node.search(key, &self.comparator) {
                Ok(index) => return Some(node.entries[index].as_pair()),
                Err(index) => {
                    if let Some(entry) = node.entries.get(index) {
                        best = Some(entry.as_pair());
                    }
                    if node.is_leaf() {
                        return best;
                    }
                    current = node.children[index];
                }
            }
        }
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// All values in ascending key order
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Binary search for `key` within a single node
    pub(super) fn search_node(&self, id: NodeId, key: &K) -> std::result::Result<usize, usize> {
        self.pool.get(id).search(key, &self.comparator)
    }

    /// Descend from the root looking for `key`
    ///
    /// Returns the node holding the key and the entry index within it.
    pub(super) fn search_recursively(&self, key: &K) -> Option<(NodeId, usize)> {
        let mut current = self.root?;

        loop {
            let node = self.pool.get(current);
            match node.search(key, &self.comparator) {
                Ok(index) => return Some((current, index)),
                Err(_) if node.is_leaf() => return None,
                Err(index) => current = node.children[index],
            }
        }
    }

    /// Leftmost leaf of the subtree rooted at `id`
    pub(super) fn leftmost_leaf(&self, mut id: NodeId) -> NodeId {
        loop {
            let node = self.pool.get(id);
            if node.is_leaf() {
                return id;
            }
            id = node.children[0];
        }
    }

    /// Rightmost leaf of the subtree rooted at `id`
    pub(super) fn rightmost_leaf(&self, mut id: NodeId) -> NodeId {
        loop {
            let node = self.pool.get(id);
            if node.is_leaf() {
                return id;
            }
            id = node.children[node.children.len() - 1];
        }
    }

    /// Borrow a node by id
    pub(super) fn node(&self, id: NodeId) -> &Node<K, V> {
        self.pool.get(id)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for BTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C: Comparator<K>> PartialEq for BTree<K, V, C> {
    /// Trees are equal when they hold the same entries in the same order,
    /// regardless of order `m` or node shape.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for BTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

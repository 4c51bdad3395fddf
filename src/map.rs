//! Map contract.
//!
//! The operations adapter containers (tree-backed maps, bidirectional maps
//! and the like) rely on. Implemented by [`BTree`].

use crate::btree::BTree;
use crate::comparator::Comparator;

/// A key-value container with unique keys
pub trait Map<K, V> {
    /// Insert or update a pair, returning the previous value
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Look up a key
    fn get(&self, key: &K) -> Option<&V>;

    /// Remove a key, returning its value
    fn remove(&mut self, key: &K) -> Option<V>;

    /// All keys, in the container's iteration order
    fn keys(&self) -> Vec<&K>;

    /// All values, in the container's iteration order
    fn values(&self) -> Vec<&V>;

    /// Number of pairs
    fn len(&self) -> usize;

    /// Remove every pair
    fn clear(&mut self);

    /// Check if the container holds no pairs
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, C: Comparator<K>> Map<K, V> for BTree<K, V, C> {
    fn put(&mut self, key: K, value: V) -> Option<V> {
        BTree::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BTree::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTree::remove(self, key)
    }

    fn keys(&self) -> Vec<&K> {
        BTree::keys(self)
    }

    fn values(&self) -> Vec<&V> {
        BTree::values(self)
    }

    fn len(&self) -> usize {
        BTree::len(self)
    }

    fn clear(&mut self) {
        BTree::clear(self);
    }

    fn is_empty(&self) -> bool {
        BTree::is_empty(self)
    }
}

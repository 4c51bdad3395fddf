//! Node layer: ordered entries plus child handles.
//!
//! A node holds its entries sorted by key. An internal node holds exactly one
//! more child than it has entries; a leaf holds none. Every node records the
//! id of its parent (absent for the root) so that split and rebalance can walk
//! upward without recursion.

mod entry;

pub use entry::Entry;

use crate::comparator::Comparator;
use crate::types::NodeId;

/// A single B-tree node
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    /// Parent node (None for the root)
    pub(crate) parent: Option<NodeId>,
    /// Entries sorted by key
    pub(crate) entries: Vec<Entry<K, V>>,
    /// Child ids; empty for leaves, `entries.len() + 1` otherwise
    pub(crate) children: Vec<NodeId>,
}

impl<K, V> Node<K, V> {
    /// Create a leaf holding the given entries
    pub fn new_leaf(parent: Option<NodeId>, entries: Vec<Entry<K, V>>) -> Self {
        Self {
            parent,
            entries,
            children: Vec::new(),
        }
    }

    /// Create an internal node
    pub fn new_internal(
        parent: Option<NodeId>,
        entries: Vec<Entry<K, V>>,
        children: Vec<NodeId>,
    ) -> Self {
        debug_assert_eq!(children.len(), entries.len() + 1);
        Self {
            parent,
            entries,
            children,
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of entries in this node
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the node holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parent node id
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Entries in key order
    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// Child ids in key order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Binary search for `key` among this node's entries.
    ///
    /// Returns `Ok(index)` on a match. Otherwise returns `Err(index)`, which
    /// is both the sorted insertion position and the child to descend into.
    pub fn search<C: Comparator<K>>(&self, key: &K, comparator: &C) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| comparator.compare(&entry.key, key))
    }

    /// Remove the last entry and, for internal nodes, the last child
    pub(crate) fn pop_back(&mut self) -> (Entry<K, V>, Option<NodeId>) {
        let entry = self.entries.remove(self.entries.len() - 1);
        (entry, self.children.pop())
    }

    /// Remove the first entry and, for internal nodes, the first child
    pub(crate) fn pop_front(&mut self) -> (Entry<K, V>, Option<NodeId>) {
        let entry = self.entries.remove(0);
        let child = if self.is_leaf() {
            None
        } else {
            Some(self.children.remove(0))
        };
        (entry, child)
    }

    /// Prepend an entry and optional child
    pub(crate) fn push_front(&mut self, entry: Entry<K, V>, child: Option<NodeId>) {
        self.entries.insert(0, entry);
        if let Some(child) = child {
            self.children.insert(0, child);
        }
    }

    /// Append an entry and optional child
    pub(crate) fn push_back(&mut self, entry: Entry<K, V>, child: Option<NodeId>) {
        self.entries.push(entry);
        if let Some(child) = child {
            self.children.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;

    fn leaf(keys: &[i32]) -> Node<i32, i32> {
        Node::new_leaf(None, keys.iter().map(|&k| Entry::new(k, k * 10)).collect())
    }

    #[test]
    fn test_node_search() {
        let node = leaf(&[10, 20, 30]);
        assert_eq!(node.search(&20, &NaturalOrder), Ok(1));
        assert_eq!(node.search(&5, &NaturalOrder), Err(0));
        assert_eq!(node.search(&25, &NaturalOrder), Err(2));
        assert_eq!(node.search(&35, &NaturalOrder), Err(3));
    }

    #[test]
    fn test_node_search_empty() {
        let node = leaf(&[]);
        assert!(node.is_empty());
        assert_eq!(node.search(&1, &NaturalOrder), Err(0));
    }

    #[test]
    fn test_node_search_custom_comparator() {
        let node = leaf(&[30, 20, 10]);
        let reverse = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(node.search(&20, &reverse), Ok(1));
        assert_eq!(node.search(&25, &reverse), Err(1));
    }

    #[test]
    fn test_node_shift_entries() {
        let mut node = leaf(&[2, 3]);
        node.push_front(Entry::new(1, 10), None);
        node.push_back(Entry::new(4, 40), None);
        assert_eq!(node.len(), 4);
        assert!(node.is_leaf());

        let (first, child) = node.pop_front();
        assert_eq!(first.key, 1);
        assert_eq!(child, None);

        let (last, child) = node.pop_back();
        assert_eq!(last.key, 4);
        assert_eq!(child, None);

        let keys: Vec<_> = node.entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![2, 3]);
    }

    #[test]
    fn test_internal_node_shift_children() {
        let a = NodeId::from_index(1);
        let b = NodeId::from_index(2);
        let c = NodeId::from_index(3);
        let mut node: Node<i32, i32> =
            Node::new_internal(None, vec![Entry::new(5, 50)], vec![a, b]);
        assert!(!node.is_leaf());

        node.push_back(Entry::new(9, 90), Some(c));
        assert_eq!(node.children(), &[a, b, c]);

        let (entry, child) = node.pop_front();
        assert_eq!(entry.key, 5);
        assert_eq!(child, Some(a));
        assert_eq!(node.children(), &[b, c]);
    }
}

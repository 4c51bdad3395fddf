//! Insertion and node splitting.

use super::BTree;
use crate::comparator::Comparator;
use crate::node::{Entry, Node};
use crate::types::NodeId;
use std::mem;
use tracing::{debug, trace};

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Insert or update a key-value pair
    ///
    /// Returns the previous value if the key was already present. Updating
    /// an existing key changes neither the size nor the shape of the tree.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            let id = self
                .pool
                .alloc(Node::new_leaf(None, vec![Entry::new(key, value)]));
            self.root = Some(id);
            self.len = 1;
            return None;
        };

        let mut current = root;
        loop {
            let node = self.pool.get(current);
            match node.search(&key, &self.comparator) {
                Ok(index) => {
                    let entry = &mut self.pool.get_mut(current).entries[index];
                    return Some(mem::replace(&mut entry.value, value));
                }
                Err(index) if node.is_leaf() => {
                    self.pool
                        .get_mut(current)
                        .entries
                        .insert(index, Entry::new(key, value));
                    self.len += 1;
                    self.split(current);
                    return None;
                }
                Err(index) => current = node.children[index],
            }
        }
    }

    /// Split `id` if it overflows, propagating upward while parents overflow
    fn split(&mut self, mut id: NodeId) {
        let max_entries = self.config.max_entries();
        let middle = self.config.split_index();

        while self.pool.get(id).len() > max_entries {
            // The overflowing node keeps the left half; a new sibling takes
            // everything right of the promoted entry.
            let node = self.pool.get_mut(id);
            let right_entries = node.entries.split_off(middle + 1);
            let promoted = node.entries.remove(middle);
            let parent = node.parent;
            let right = if node.is_leaf() {
                self.pool.alloc(Node::new_leaf(parent, right_entries))
            } else {
                let right_children = node.children.split_off(middle + 1);
                let right = self
                    .pool
                    .alloc(Node::new_internal(parent, right_entries, right_children));
                self.adopt_children(right);
                right
            };

            let Some(parent) = parent else {
                self.split_root(id, promoted, right);
                return;
            };

            let position = self
                .search_node(parent, &promoted.key)
                .unwrap_or_else(|index| index);
            let parent_node = self.pool.get_mut(parent);
            parent_node.entries.insert(position, promoted);
            parent_node.children.insert(position + 1, right);
            trace!(node = %id, sibling = %right, parent = %parent, "btree.split");

            id = parent;
        }
    }

    /// Grow the tree by one level above a root that was just split
    fn split_root(&mut self, left: NodeId, promoted: Entry<K, V>, right: NodeId) {
        let root = self
            .pool
            .alloc(Node::new_internal(None, vec![promoted], vec![left, right]));
        self.pool.get_mut(left).parent = Some(root);
        self.pool.get_mut(right).parent = Some(root);
        self.root = Some(root);
        debug!(root = %root, height = self.height(), "btree.split_root");
    }

    /// Point every child of `id` back at `id`
    pub(super) fn adopt_children(&mut self, id: NodeId) {
        let children = mem::take(&mut self.pool.get_mut(id).children);
        for &child in &children {
            self.pool.get_mut(child).parent = Some(id);
        }
        self.pool.get_mut(id).children = children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn test_put_single() -> Result<()> {
        let mut tree = BTree::new(3)?;
        assert_eq!(tree.put("hello", "world"), None);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.get(&"hello"), Some(&"world"));
        assert_eq!(tree.get(&"other"), None);
        Ok(())
    }

    #[test]
    fn test_put_update() -> Result<()> {
        let mut tree = BTree::new(3)?;
        for key in 0..20 {
            tree.put(key, "v1");
        }
        let height = tree.height();

        // Updates hit both leaf and internal entries without reshaping
        for key in 0..20 {
            assert_eq!(tree.put(key, "v2"), Some("v1"));
        }
        assert_eq!(tree.len(), 20);
        assert_eq!(tree.height(), height);
        assert!(tree.values().iter().all(|v| **v == "v2"));
        tree.check_invariants()?;
        Ok(())
    }

    #[test]
    fn test_put_splits_root() -> Result<()> {
        let mut tree = BTree::new(3)?;
        tree.put(1, ());
        tree.put(2, ());
        assert_eq!(tree.height(), 1);

        // Third entry overflows an order-3 leaf
        tree.put(3, ());
        assert_eq!(tree.height(), 2);
        let root = tree.node(tree.root.unwrap());
        assert_eq!(root.entries()[0].key, 2);
        assert_eq!(root.children().len(), 2);
        tree.check_invariants()?;
        Ok(())
    }

    #[test]
    fn test_put_split_favors_right() -> Result<()> {
        let mut tree = BTree::new(4)?;
        for key in [1, 2, 3, 4] {
            tree.put(key, ());
        }
        // Split index is (4 - 1) / 2 = 1: left keeps [1], right takes [3, 4]
        let root = tree.node(tree.root.unwrap());
        assert_eq!(root.entries()[0].key, 2);
        let left = tree.node(root.children()[0]);
        let right = tree.node(root.children()[1]);
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 2);
        Ok(())
    }

    #[test]
    fn test_put_scenario_order_three() -> Result<()> {
        let mut tree = BTree::new(3)?;
        for key in [10, 20, 5, 6, 12, 30, 7, 17] {
            tree.put(key, key);
            tree.check_invariants()?;
        }
        assert_eq!(tree.keys(), vec![&5, &6, &7, &10, &12, &17, &20, &30]);
        assert_eq!(tree.len(), 8);
        Ok(())
    }

    #[test]
    fn test_put_many_sequential() -> Result<()> {
        for order in [3, 4, 5, 8, 33] {
            let mut tree = BTree::new(order)?;
            for i in 0..500 {
                tree.put(format!("key{i:03}"), i);
            }
            tree.check_invariants()?;
            assert_eq!(tree.len(), 500);
            for i in 0..500 {
                let key = format!("key{i:03}");
                assert_eq!(tree.get(&key), Some(&i), "Failed for key {key}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_put_descending_keeps_parent_links() -> Result<()> {
        let mut tree = BTree::new(3)?;
        for key in (0..300).rev() {
            tree.put(key, ());
        }
        tree.check_invariants()?;
        assert_eq!(tree.min_key(), Some(&0));
        assert_eq!(tree.max_key(), Some(&299));
        Ok(())
    }
}

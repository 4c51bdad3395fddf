//! Deletion and rebalancing.
//!
//! Removing an entry can leave a node below the minimum of ⌈m/2⌉ - 1
//! entries. Rebalancing then runs bottom-up from the leaf that lost the entry:
//!
//! 1. borrow from the left sibling through the parent (rotate right),
//! 2. else borrow from the right sibling (rotate left),
//! 3. else merge with a sibling and the separator between them, which removes
//!    one entry from the parent and continues at the parent.
//!
//! A merge that empties the root makes the merged node the new root.

use super::BTree;
use crate::comparator::Comparator;
use crate::types::NodeId;
use std::mem;
use tracing::{debug, trace};

/// Position of a node among its parent's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    parent: NodeId,
    index: usize,
}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Delete a key from the tree
    ///
    /// Returns the removed value, or `None` if the key was not present (in
    /// which case the tree is left untouched).
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let (id, index) = self.search_recursively(key)?;

        let value = if self.pool.get(id).is_leaf() {
            let entry = self.pool.get_mut(id).entries.remove(index);
            let slot = self.locate(id, &entry.key);
            self.rebalance(id, slot);
            entry.value
        } else {
            self.remove_internal(id, index)
        };

        self.len -= 1;
        self.release_empty_root();
        Some(value)
    }

    /// Remove entry `index` of internal node `id` by pulling up its in-order
    /// predecessor from the rightmost leaf of the left subtree
    fn remove_internal(&mut self, id: NodeId, index: usize) -> V {
        let leaf = self.rightmost_leaf(self.pool.get(id).children[index]);
        let (predecessor, _) = self.pool.get_mut(leaf).pop_back();
        let removed = mem::replace(&mut self.pool.get_mut(id).entries[index], predecessor);

        // The predecessor key now sits in `id`; it still routes to `leaf`.
        let slot = self.locate(leaf, &self.pool.get(id).entries[index].key);
        self.rebalance(leaf, slot);
        removed.value
    }

    /// Find the slot of `id` under its parent
    ///
    /// `key` is any key that lies (or lay, before a deletion) within the
    /// key range of `id`. Returns `None` for the root.
    fn locate(&self, id: NodeId, key: &K) -> Option<Slot> {
        let parent = self.pool.get(id).parent?;
        let index = self.search_node(parent, key).unwrap_or_else(|index| index);
        Some(Slot { parent, index })
    }

    /// Left sibling of the node at `slot`
    fn left_sibling(&self, slot: Slot) -> Option<NodeId> {
        let index = slot.index.checked_sub(1)?;
        self.pool.get(slot.parent).children.get(index).copied()
    }

    /// Right sibling of the node at `slot`
    fn right_sibling(&self, slot: Slot) -> Option<NodeId> {
        self.pool.get(slot.parent).children.get(slot.index + 1).copied()
    }

    /// Restore the minimum-occupancy invariant from `id` upward
    fn rebalance(&mut self, mut id: NodeId, mut slot: Option<Slot>) {
        let min_entries = self.config.min_entries();

        loop {
            if self.pool.get(id).len() >= min_entries {
                return;
            }
            // The root is exempt from the minimum
            let Some(at) = slot else {
                return;
            };

            let left = self.left_sibling(at);
            if let Some(left) = left {
                if self.pool.get(left).len() > min_entries {
                    self.rotate_right(left, id, at.parent, at.index - 1);
                    return;
                }
            }

            let right = self.right_sibling(at);
            if let Some(right) = right {
                if self.pool.get(right).len() > min_entries {
                    self.rotate_left(id, right, at.parent, at.index);
                    return;
                }
            }

            let (survivor, separator_at) = match (left, right) {
                (_, Some(right)) => (id, self.merge(id, right, at.parent, at.index)),
                (Some(left), None) => (left, self.merge(left, id, at.parent, at.index - 1)),
                (None, None) => unreachable!("non-root node {id} has no siblings"),
            };

            if Some(at.parent) == self.root && self.pool.get(at.parent).is_empty() {
                self.collapse_root(survivor);
                return;
            }

            // The separator pulled down into `survivor` routes to it from the
            // parent's own parent.
            let separator = &self.pool.get(survivor).entries[separator_at].key;
            slot = self.locate(at.parent, separator);
            id = at.parent;
        }
    }

    /// Move the last entry of `left` up into the parent and the parent's
    /// separator down to the front of `node`
    fn rotate_right(&mut self, left: NodeId, node: NodeId, parent: NodeId, separator: usize) {
        let (entry, child) = self.pool.get_mut(left).pop_back();
        let down = mem::replace(&mut self.pool.get_mut(parent).entries[separator], entry);
        self.pool.get_mut(node).push_front(down, child);
        if let Some(child) = child {
            self.pool.get_mut(child).parent = Some(node);
        }
        trace!(node = %node, from = %left, "btree.borrow_left");
    }

    /// Move the first entry of `right` up into the parent and the parent's
    /// separator down to the back of `node`
    fn rotate_left(&mut self, node: NodeId, right: NodeId, parent: NodeId, separator: usize) {
        let (entry, child) = self.pool.get_mut(right).pop_front();
        let down = mem::replace(&mut self.pool.get_mut(parent).entries[separator], entry);
        self.pool.get_mut(node).push_back(down, child);
        if let Some(child) = child {
            self.pool.get_mut(child).parent = Some(node);
        }
        trace!(node = %node, from = %right, "btree.borrow_right");
    }

    /// Merge `right` and the parent's separator into `left`
    ///
    /// Removes the separator and the `right` child slot from the parent and
    /// releases `right`. Returns the separator's index within `left`.
    fn merge(&mut self, left: NodeId, right: NodeId, parent: NodeId, separator: usize) -> usize {
        let parent_node = self.pool.get_mut(parent);
        let down = parent_node.entries.remove(separator);
        parent_node.children.remove(separator + 1);

        let right_node = self.pool.take(right);
        for &child in &right_node.children {
            self.pool.get_mut(child).parent = Some(left);
        }

        let left_node = self.pool.get_mut(left);
        let separator_at = left_node.entries.len();
        left_node.entries.push(down);
        left_node.entries.extend(right_node.entries);
        left_node.children.extend(right_node.children);
        trace!(node = %left, absorbed = %right, "btree.merge");
        separator_at
    }

    /// Replace an empty root by its only child
    fn collapse_root(&mut self, child: NodeId) {
        if let Some(old) = self.root.replace(child) {
            self.pool.release(old);
        }
        self.pool.get_mut(child).parent = None;
        debug!(root = %child, height = self.height(), "btree.collapse_root");
    }

    /// Drop a leaf root that lost its last entry
    fn release_empty_root(&mut self) {
        if let Some(root) = self.root {
            if self.pool.get(root).is_empty() {
                self.pool.release(root);
                self.root = None;
            }
        }
    }
}

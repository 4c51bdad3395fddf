//! B-tree cursor for iteration.
//!
//! The cursor walks the in-order entry sequence of a tree, which interleaves
//! the entries of every level: the entries of child `i` come before entry `i`
//! of their parent, and the entries of child `i + 1` after it. It can sit
//! before the first entry, on an entry, or after the last entry, and can move
//! in both directions from any of those positions.

use super::BTree;
use crate::comparator::Comparator;
use crate::node::Entry;
use crate::types::NodeId;
use std::iter::FusedIterator;

/// Where a cursor currently points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// One before the first entry
    Begin,
    /// On entry `index` of `node`
    At { node: NodeId, index: usize },
    /// One past the last entry
    End,
}

/// A stateful, bidirectional cursor over a tree's entries in key order
///
/// The cursor borrows the tree, so the tree cannot be modified while a
/// cursor over it is alive.
pub struct Cursor<'a, K, V, C> {
    tree: &'a BTree<K, V, C>,
    position: Position,
}

impl<'a, K, V, C: Comparator<K>> Cursor<'a, K, V, C> {
    /// Create a cursor positioned before the first entry
    pub fn new(tree: &'a BTree<K, V, C>) -> Self {
        Self {
            tree,
            position: Position::Begin,
        }
    }

    /// Move to the next entry
    ///
    /// From before-first this moves to the first entry. Returns false, and
    /// leaves the cursor after the last entry, if there is no next entry.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        self.position = match self.position {
            Position::Begin => self.first_position(),
            Position::At { node, index } => self.successor(node, index),
            Position::End => Position::End,
        };
        matches!(self.position, Position::At { .. })
    }

    /// Move to the previous entry
    ///
    /// From after-last this moves to the last entry. Returns false, and
    /// leaves the cursor before the first entry, if there is no previous entry.
    pub fn prev(&mut self) -> bool {
        self.position = match self.position {
            Position::End => self.last_position(),
            Position::At { node, index } => self.predecessor(node, index),
            Position::Begin => Position::Begin,
        };
        matches!(self.position, Position::At { .. })
    }

    /// Reset the cursor to before the first entry
    pub fn begin(&mut self) {
        self.position = Position::Begin;
    }

    /// Move the cursor past the last entry
    pub fn end(&mut self) {
        self.position = Position::End;
    }

    /// Move to the first entry; returns false if the tree is empty
    pub fn first(&mut self) -> bool {
        self.begin();
        self.next()
    }

    /// Move to the last entry; returns false if the tree is empty
    pub fn last(&mut self) -> bool {
        self.end();
        self.prev()
    }

    /// Advance until an entry satisfies `predicate`
    ///
    /// Returns false if the cursor ran off the end without a match.
    pub fn next_to<F>(&mut self, mut predicate: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        while self.next() {
            if let Some((key, value)) = self.entry() {
                if predicate(key, value) {
                    return true;
                }
            }
        }
        false
    }

    /// Step back until an entry satisfies `predicate`
    ///
    /// Returns false if the cursor ran off the front without a match.
    pub fn prev_to<F>(&mut self, mut predicate: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        while self.prev() {
            if let Some((key, value)) = self.entry() {
                if predicate(key, value) {
                    return true;
                }
            }
        }
        false
    }

    /// Check if the cursor is positioned on an entry
    pub fn is_valid(&self) -> bool {
        matches!(self.position, Position::At { .. })
    }

    /// Current key and value
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.current().map(Entry::as_pair)
    }

    /// Current key
    pub fn key(&self) -> Option<&'a K> {
        self.current().map(|entry| &entry.key)
    }

    /// Current value
    pub fn value(&self) -> Option<&'a V> {
        self.current().map(|entry| &entry.value)
    }

    fn current(&self) -> Option<&'a Entry<K, V>> {
        match self.position {
            Position::At { node, index } => Some(&self.tree.node(node).entries()[index]),
            _ => None,
        }
    }

    fn first_position(&self) -> Position {
        match self.tree.root {
            Some(root) => Position::At {
                node: self.tree.leftmost_leaf(root),
                index: 0,
            },
            None => Position::End,
        }
    }

    fn last_position(&self) -> Position {
        match self.tree.root {
            Some(root) => {
                let node = self.tree.rightmost_leaf(root);
                Position::At {
                    node,
                    index: self.tree.node(node).len() - 1,
                }
            }
            None => Position::Begin,
        }
    }

    /// In-order successor of entry `index` in `node`
    fn successor(&self, node: NodeId, index: usize) -> Position {
        let current = self.tree.node(node);

        if !current.is_leaf() {
            // Smallest entry of the subtree right of this entry
            return Position::At {
                node: self.tree.leftmost_leaf(current.children()[index + 1]),
                index: 0,
            };
        }
        if index + 1 < current.len() {
            return Position::At {
                node,
                index: index + 1,
            };
        }

        // Climb until we leave a subtree through a child that has a
        // separator to its right.
        let key = &current.entries()[index].key;
        let mut child = node;
        while let Some(parent) = self.tree.node(child).parent() {
            let slot = self.tree.search_node(parent, key).unwrap_or_else(|slot| slot);
            if slot < self.tree.node(parent).len() {
                return Position::At {
                    node: parent,
                    index: slot,
                };
            }
            child = parent;
        }
        Position::End
    }

    /// In-order predecessor of entry `index` in `node`
    fn predecessor(&self, node: NodeId, index: usize) -> Position {
        let current = self.tree.node(node);

        if !current.is_leaf() {
            // Largest entry of the subtree left of this entry
            let leaf = self.tree.rightmost_leaf(current.children()[index]);
            return Position::At {
                node: leaf,
                index: self.tree.node(leaf).len() - 1,
            };
        }
        if index > 0 {
            return Position::At {
                node,
                index: index - 1,
            };
        }

        let key = &current.entries()[index].key;
        let mut child = node;
        while let Some(parent) = self.tree.node(child).parent() {
            let slot = self.tree.search_node(parent, key).unwrap_or_else(|slot| slot);
            if slot > 0 {
                return Position::At {
                    node: parent,
                    index: slot - 1,
                };
            }
            child = parent;
        }
        Position::Begin
    }
}

/// Borrowing iterator over a tree's entries in key order
///
/// Created by [`BTree::iter`].
pub struct Iter<'a, K, V, C> {
    front: Cursor<'a, K, V, C>,
    back: Cursor<'a, K, V, C>,
    remaining: usize,
}

impl<'a, K, V, C: Comparator<K>> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || !self.front.next() {
            return None;
        }
        self.remaining -= 1;
        self.front.entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C: Comparator<K>> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || !self.back.prev() {
            return None;
        }
        self.remaining -= 1;
        self.back.entry()
    }
}

impl<K, V, C: Comparator<K>> ExactSizeIterator for Iter<'_, K, V, C> {}

impl<K, V, C: Comparator<K>> FusedIterator for Iter<'_, K, V, C> {}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Create a cursor positioned before the first entry
    pub fn cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self)
    }

    /// Iterate over all entries in ascending key order
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        let mut back = Cursor::new(self);
        back.end();
        Iter {
            front: Cursor::new(self),
            back,
            remaining: self.len,
        }
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a BTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Diagnostics: height, invariant checking, textual dump and export.

use super::BTree;
use crate::comparator::Comparator;
use crate::error::{BTreeError, Result};
use crate::types::NodeId;
use crate::TreeNode;
use std::cmp::Ordering;
use std::fmt;

/// Running state of an invariant walk
struct Walk {
    leaf_depth: Option<usize>,
    entries: usize,
    nodes: usize,
}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Get the height of the tree
    ///
    /// An empty tree has height 0 and a tree whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        let Some(mut current) = self.root else {
            return 0;
        };
        let mut height = 1;
        while let Some(&child) = self.pool.get(current).children.first() {
            current = child;
            height += 1;
        }
        height
    }

    /// Verify every structural invariant of the tree
    ///
    /// Checks ordering within and across nodes, node occupancy bounds,
    /// uniform leaf depth, parent links, the entry count and that no node
    /// slot is leaked.
    pub fn check_invariants(&self) -> Result<()> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(BTreeError::corruption(format!(
                    "empty tree reports {} entries",
                    self.len
                )));
            }
            if !self.pool.is_empty() {
                return Err(BTreeError::corruption(format!(
                    "empty tree holds {} nodes",
                    self.pool.len()
                )));
            }
            return Ok(());
        };

        let mut walk = Walk {
            leaf_depth: None,
            entries: 0,
            nodes: 0,
        };
        self.check_node(root, None, None, None, 1, &mut walk)?;

        if walk.entries != self.len {
            return Err(BTreeError::corruption(format!(
                "tree reports {} entries but holds {}",
                self.len, walk.entries
            )));
        }
        if walk.nodes != self.pool.len() {
            return Err(BTreeError::corruption(format!(
                "{} nodes reachable but {} allocated",
                walk.nodes,
                self.pool.len()
            )));
        }
        Ok(())
    }

    fn check_node(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = self.pool.get(id);
        walk.nodes += 1;
        walk.entries += node.len();

        if node.parent() != parent {
            return Err(BTreeError::corruption(format!(
                "node {id} points at parent {:?}, expected {:?}",
                node.parent(),
                parent
            )));
        }

        let is_root = parent.is_none();
        if node.len() > self.config.max_entries() {
            return Err(BTreeError::corruption(format!(
                "node {id} holds {} entries, max is {}",
                node.len(),
                self.config.max_entries()
            )));
        }
        if is_root && node.is_empty() {
            return Err(BTreeError::corruption(format!("root {id} holds no entries")));
        }
        if !is_root && node.len() < self.config.min_entries() {
            return Err(BTreeError::corruption(format!(
                "node {id} holds {} entries, min is {}",
                node.len(),
                self.config.min_entries()
            )));
        }

        let entries = node.entries();
        for pair in entries.windows(2) {
            if self.comparator.compare(&pair[0].key, &pair[1].key) != Ordering::Less {
                return Err(BTreeError::corruption(format!(
                    "entries of node {id} are not strictly increasing"
                )));
            }
        }
        if let (Some(lower), Some(first)) = (lower, entries.first()) {
            if self.comparator.compare(lower, &first.key) != Ordering::Less {
                return Err(BTreeError::corruption(format!(
                    "node {id} holds a key not above its left separator"
                )));
            }
        }
        if let (Some(upper), Some(last)) = (upper, entries.last()) {
            if self.comparator.compare(&last.key, upper) != Ordering::Less {
                return Err(BTreeError::corruption(format!(
                    "node {id} holds a key not below its right separator"
                )));
            }
        }

        if node.is_leaf() {
            match walk.leaf_depth {
                None => walk.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(BTreeError::corruption(format!(
                        "leaf {id} at depth {depth}, expected {expected}"
                    )));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        let children = node.children();
        if children.len() != entries.len() + 1 {
            return Err(BTreeError::corruption(format!(
                "node {id} has {} entries but {} children",
                entries.len(),
                children.len()
            )));
        }
        if !is_root && children.len() < self.config.order.div_ceil(2) {
            return Err(BTreeError::corruption(format!(
                "node {id} has {} children, fewer than ⌈m/2⌉",
                children.len()
            )));
        }

        for (i, &child) in children.iter().enumerate() {
            let child_lower = if i == 0 { lower } else { Some(&entries[i - 1].key) };
            let child_upper = entries.get(i).map(|entry| &entry.key).or(upper);
            self.check_node(child, Some(id), child_lower, child_upper, depth + 1, walk)?;
        }
        Ok(())
    }

    /// Export the tree structure for visualization
    pub fn export(&self) -> Option<TreeNode>
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.root.map(|root| self.export_node(root))
    }

    fn export_node(&self, id: NodeId) -> TreeNode
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let node = self.pool.get(id);
        TreeNode {
            is_leaf: node.is_leaf(),
            keys: node.entries().iter().map(|e| e.key.to_string()).collect(),
            values: node.entries().iter().map(|e| e.value.to_string()).collect(),
            children: node
                .children()
                .iter()
                .map(|&child| self.export_node(child))
                .collect(),
        }
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, level: usize) -> fmt::Result
    where
        K: fmt::Display,
    {
        let node = self.pool.get(id);
        for i in 0..=node.len() {
            if let Some(&child) = node.children().get(i) {
                self.write_node(f, child, level + 1)?;
            }
            if let Some(entry) = node.entries().get(i) {
                writeln!(f, "{}{}", "    ".repeat(level), entry.key)?;
            }
        }
        Ok(())
    }
}

impl<K: fmt::Display, V, C: Comparator<K>> fmt::Display for BTree<K, V, C> {
    /// Render keys in order, one per line, indented four spaces per level
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BTree")?;
        match self.root {
            Some(root) => self.write_node(f, root, 0),
            None => Ok(()),
        }
    }
}

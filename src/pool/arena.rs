//! Node pool implementation.
//!
//! The pool owns every node of a tree in a slab of slots. Nodes refer to one
//! another by [`NodeId`], which keeps parent links non-owning. Released slots
//! are recycled through a free list before the slab grows.

use crate::node::Node;
use crate::types::NodeId;

/// Slab of node slots addressed by [`NodeId`]
#[derive(Debug, Clone)]
pub struct NodePool<K, V> {
    /// Node slots; `None` marks a released slot
    slots: Vec<Option<Node<K, V>>>,
    /// Released slot ids available for reuse
    free_slots: Vec<NodeId>,
}

impl<K, V> NodePool<K, V> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_slots: Vec::new(),
        }
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_slots.len()
    }

    /// Check if the pool holds no live nodes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots allocated so far, live or released
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Store a node and return its id
    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(id) = self.free_slots.pop() {
            self.slots[id.index()] = Some(node);
            return id;
        }

        let id = NodeId::from_index(self.slots.len());
        self.slots.push(Some(node));
        id
    }

    /// Borrow a live node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a live node. Ids only come from `alloc`,
    /// so this indicates a broken parent or child link.
    pub fn get(&self, id: NodeId) -> &Node<K, V> {
        match self.slots.get(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("node {id} is not live"),
        }
    }

    /// Mutably borrow a live node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a live node.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.slots.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("node {id} is not live"),
        }
    }

    /// Remove a node from the pool and hand it back to the caller
    pub fn take(&mut self, id: NodeId) -> Node<K, V> {
        match self.slots.get_mut(id.index()).and_then(Option::take) {
            Some(node) => {
                self.free_slots.push(id);
                node
            }
            None => panic!("node {id} is not live"),
        }
    }

    /// Release a node's slot for reuse
    pub fn release(&mut self, id: NodeId) {
        drop(self.take(id));
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_slots.clear();
    }
}

impl<K, V> Default for NodePool<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Entry;

    fn leaf(key: i32) -> Node<i32, ()> {
        Node::new_leaf(None, vec![Entry::new(key, ())])
    }

    #[test]
    fn test_pool_alloc_get() {
        let mut pool = NodePool::new();
        let a = pool.alloc(leaf(1));
        let b = pool.alloc(leaf(2));

        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(a).entries()[0].key, 1);
        assert_eq!(pool.get(b).entries()[0].key, 2);

        pool.get_mut(a).entries[0].key = 10;
        assert_eq!(pool.get(a).entries()[0].key, 10);
    }

    #[test]
    fn test_pool_reuses_released_slots() {
        let mut pool = NodePool::new();
        let a = pool.alloc(leaf(1));
        let _b = pool.alloc(leaf(2));

        pool.release(a);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.capacity(), 2);

        let c = pool.alloc(leaf(3));
        assert_eq!(c, a);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.get(c).entries()[0].key, 3);
    }

    #[test]
    fn test_pool_take_and_clear() {
        let mut pool = NodePool::new();
        let a = pool.alloc(leaf(1));
        let node = pool.take(a);
        assert_eq!(node.entries()[0].key, 1);
        assert!(pool.is_empty());

        pool.alloc(leaf(2));
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 0);
    }

    #[test]
    #[should_panic(expected = "is not live")]
    fn test_pool_get_released_panics() {
        let mut pool = NodePool::new();
        let a = pool.alloc(leaf(1));
        pool.release(a);
        let _ = pool.get(a);
    }
}

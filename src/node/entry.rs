//! Key-value entries.
//!
//! Entries are the records stored within tree nodes. In a leaf every entry
//! is a plain record; in an internal node each entry also acts as the
//! separator between the two child subtrees on either side of it.

/// A key-value pair within a tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// The key
    pub key: K,
    /// The value
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Create a new entry
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Borrow the key and value as a pair
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Split the entry into its key and value
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

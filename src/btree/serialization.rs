//! JSON encoding and decoding.
//!
//! A tree encodes as a JSON object mapping each key's string form to its
//! value, members in ascending key order. String keys are written as-is and
//! integer keys as decimal strings, following serde_json's map-key rules.
//!
//! Decoding reads the whole input before touching the tree, so malformed
//! input leaves the target unmodified. Only the key/value set survives a round
//! trip; the node layout after decoding may differ.

use super::BTree;
use crate::comparator::Comparator;
use crate::error::{BTreeError, Result};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Key/value pairs in encounter order
struct Pairs<K, V>(Vec<(K, V)>);

impl<'de, K: Deserialize<'de>, V: Deserialize<'de>> Deserialize<'de> for Pairs<K, V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K: Deserialize<'de>, V: Deserialize<'de>> Visitor<'de> for PairsVisitor<K, V> {
            type Value = Pairs<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of keys to values")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry()? {
                    pairs.push(pair);
                }
                Ok(Pairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Encode every entry as a JSON object
    pub fn to_json(&self) -> Result<Vec<u8>>
    where
        K: Serialize,
        V: Serialize,
    {
        serde_json::to_vec(self).map_err(BTreeError::Encode)
    }

    /// Replace the tree's contents with the entries of a JSON object
    ///
    /// On error the tree is left exactly as it was.
    pub fn from_json(&mut self, data: &[u8]) -> Result<()>
    where
        K: DeserializeOwned,
        V: DeserializeOwned,
    {
        let Pairs(pairs) = serde_json::from_slice(data).map_err(BTreeError::Decode)?;
        self.clear();
        self.extend(pairs);
        debug!(entries = self.len, height = self.height(), "btree.decode");
        Ok(())
    }
}

impl<K: Serialize, V: Serialize, C: Comparator<K>> Serialize for BTree<K, V, C> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

/// Deserializes into a natural-order tree of the default order
impl<'de, K, V> Deserialize<'de> for BTree<K, V>
where
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Pairs(pairs) = Pairs::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

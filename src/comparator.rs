//! Key ordering.
//!
//! Every search, split and rebalance decision goes through a [`Comparator`].
//! It must be a consistent total order over every key ever inserted; a
//! comparator that is not transitive leaves the tree in an unspecified state.

use std::cmp::Ordering;

/// A total order over keys of type `K`
pub trait Comparator<K: ?Sized> {
    /// Compare two keys
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
        assert_eq!(NaturalOrder.compare(&7u8, &7u8), Ordering::Equal);
    }

    #[test]
    fn test_closure_comparator() {
        let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
        assert_eq!(
            by_len.compare(&"abc".to_string(), &"z".to_string()),
            Ordering::Greater
        );
    }
}

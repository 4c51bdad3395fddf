//! Common types used throughout the tree.

mod node_id;

pub use node_id::NodeId;

use crate::error::{BTreeError, Result};
use serde::{Deserialize, Serialize};

/// Smallest order (maximum children per node) a B-tree can have
pub const MIN_ORDER: usize = 3;

/// Order used when none is configured
pub const DEFAULT_ORDER: usize = 32;

/// Tree configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeConfig {
    /// Maximum number of children per node
    pub order: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
        }
    }
}

impl TreeConfig {
    /// Create a new config with the given order
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Set the order
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Check that the configuration describes a valid tree
    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(BTreeError::InvalidOrder {
                order: self.order,
                min: MIN_ORDER,
            });
        }
        Ok(())
    }

    /// Maximum entries a node may hold between operations
    pub fn max_entries(&self) -> usize {
        self.order - 1
    }

    /// Minimum entries a non-root node must hold: ⌈m/2⌉ - 1
    pub fn min_entries(&self) -> usize {
        self.order.div_ceil(2) - 1
    }

    /// Index of the entry promoted when a node splits.
    ///
    /// Biased low so the right half receives the extra entry on even orders.
    pub fn split_index(&self) -> usize {
        (self.order - 1) / 2
    }
}

//! Ordering policies: which field a tree is keyed on and how it rebalances

use super::balance::{Avl, Rebalance, Unbalanced};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of tree, reported in statistics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    Bst,
    Avl,
}

impl TreeKind {
    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Bst => "Binary Search Tree (unbalanced)",
            Self::Avl => "AVL Tree (Self-balancing)",
        }
    }

    /// Route segment for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bst => "bst",
            Self::Avl => "avl",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering discipline of a [`TreeEngine`](super::TreeEngine)
pub trait TreePolicy: Send + Sync + 'static {
    /// Reported tree kind
    const KIND: TreeKind;

    /// Set when the ordering key is the record id, so lookups by id can
    /// prune. Otherwise every lookup by id visits the whole tree.
    const KEYED_BY_ID: bool;

    /// Repair applied after structural mutations
    type Balance: Rebalance;

    /// Ordering key of a record
    fn key(record: &Record) -> u64;
}

/// Keyed on `age`, never rebalanced
#[derive(Debug, Clone, Copy, Default)]
pub struct ByAge;

impl TreePolicy for ByAge {
    const KIND: TreeKind = TreeKind::Bst;
    const KEYED_BY_ID: bool = false;
    type Balance = Unbalanced;

    fn key(record: &Record) -> u64 {
        u64::from(record.age())
    }
}

/// Keyed on `id`, AVL balanced
#[derive(Debug, Clone, Copy, Default)]
pub struct ById;

impl TreePolicy for ById {
    const KIND: TreeKind = TreeKind::Avl;
    const KEYED_BY_ID: bool = true;
    type Balance = Avl;

    fn key(record: &Record) -> u64 {
        record.id()
    }
}

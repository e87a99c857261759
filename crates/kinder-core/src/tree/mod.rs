//! Ordered binary trees of child records
//!
//! One engine, two policies:
//! - [`OrderedTree`]: plain BST keyed on `age`; lookups by id scan the whole
//!   tree and ascending input degenerates into a chain
//! - [`BalancedOrderedTree`]: AVL tree keyed on `id`; every structural change
//!   is repaired with LL/RR/LR/RL rotations, keeping all operations O(log n)

mod balance;
mod engine;
mod node;
mod policy;
mod traversal;

pub use balance::{balance, rotate_left, rotate_right, Avl, Rebalance, Unbalanced};
pub use engine::{DuplicatePolicy, TreeConfig, TreeEngine, TreeStats};
pub use node::{height, Link, Node};
pub use policy::{ById, ByAge, TreeKind, TreePolicy};
pub use traversal::{Records, Traversal, TraversalOrder};

/// Binary search tree ordered by age, never rebalanced
pub type OrderedTree = TreeEngine<ByAge>;

/// AVL tree ordered by id
pub type BalancedOrderedTree = TreeEngine<ById>;

//! # Kinder Core
//!
//! In-memory registry of child records kept in ordered binary trees.
//!
//! This crate provides:
//! - **Records**: validated child records and partial updates
//! - **Ordered trees**: one engine with two policies, a BST keyed on age and
//!   an AVL tree keyed on id
//! - **Traversals**: in-order, pre-order and post-order
//! - **Shared trees**: mutex-guarded handles for multi-threaded callers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           REST gateway (cli)            │
//! ├─────────────────────────────────────────┤
//! │        SharedTree (one lock/tree)       │
//! ├─────────────────────────────────────────┤
//! │   TreeEngine<ByAge>  │ TreeEngine<ById> │
//! │   (BST, unbalanced)  │ (AVL rotations)  │
//! ├─────────────────────────────────────────┤
//! │        Node / Record / Traversal        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use kinder_core::{BalancedOrderedTree, Gender, Record, TraversalOrder};
//!
//! let mut tree = BalancedOrderedTree::new();
//! for id in [5000, 2000, 3000] {
//!     tree.insert(Record::new(id, "Ana", 7, Gender::Female)?)?;
//! }
//! // The LR rotation promoted 3000
//! assert_eq!(tree.root().map(|n| n.record().id()), Some(3000));
//! assert_eq!(tree.traverse(TraversalOrder::InOrder).len(), 3);
//! # Ok::<(), kinder_core::CoreError>(())
//! ```

pub mod error;
pub mod record;
pub mod shared;
pub mod tree;

pub use error::{CoreError, Result};
pub use record::{Gender, Record, RecordUpdate};
pub use shared::SharedTree;
pub use tree::{
    BalancedOrderedTree, ByAge, ById, DuplicatePolicy, OrderedTree, TraversalOrder, TreeConfig,
    TreeEngine, TreeKind, TreePolicy, TreeStats,
};

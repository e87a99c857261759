//! Ordered tree engine shared by the BST and AVL variants

use super::balance::Rebalance;
use super::node::{self, Link, Node};
use super::policy::{TreeKind, TreePolicy};
use super::traversal::{Records, Traversal, TraversalOrder};
use crate::record::{Record, RecordUpdate};
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::mem;
use tracing::{debug, instrument};

/// What `insert` does when the identifier is already stored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with [`CoreError::DuplicateIdentifier`]
    #[default]
    Reject,
    /// Succeed without touching the tree
    Ignore,
}

/// Configuration for tree behavior
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Handling of duplicate identifiers on insert
    pub duplicates: DuplicatePolicy,
}

impl TreeConfig {
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

/// Tree statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub kind: TreeKind,
    pub height: usize,
    pub count: usize,
    pub is_balanced: bool,
}

/// An in-memory tree of records ordered by the key of `P`.
///
/// Every mutating helper consumes a subtree and returns the root that
/// replaces it, so ownership stays with the parent and no node ever points
/// back up. Failed operations leave the tree untouched.
pub struct TreeEngine<P: TreePolicy> {
    root: Link,
    config: TreeConfig,
    _policy: PhantomData<P>,
}

impl<P: TreePolicy> Default for TreeEngine<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TreePolicy> TreeEngine<P> {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            root: None,
            config,
            _policy: PhantomData,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn kind(&self) -> TreeKind {
        P::KIND
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Insert a record, returning the stored copy
    #[instrument(skip(self, record), fields(tree = %P::KIND, id = record.id()))]
    pub fn insert(&mut self, record: Record) -> Result<Record> {
        if let Some(existing) = self.find(record.id()) {
            return match self.config.duplicates {
                DuplicatePolicy::Reject => Err(CoreError::DuplicateIdentifier(record.id())),
                DuplicatePolicy::Ignore => {
                    debug!("duplicate id ignored");
                    Ok(existing.record.clone())
                }
            };
        }

        let stored = record.clone();
        self.root = Some(Self::insert_at(self.root.take(), record));
        Ok(stored)
    }

    /// Get a record by id
    #[instrument(skip(self), fields(tree = %P::KIND))]
    pub fn search(&self, id: u64) -> Result<&Record> {
        self.find(id)
            .map(Node::record)
            .ok_or(CoreError::NotFound(id))
    }

    /// Check whether a record with `id` is stored
    pub fn contains(&self, id: u64) -> bool {
        self.find(id).is_some()
    }

    /// Overwrite the fields present in `changes`.
    ///
    /// When the ordering key changes (`age` on the BST) the node is moved so
    /// the tree stays ordered. Invalid changes are rejected before the lookup,
    /// so they report `InvalidRecord` even when `id` is absent.
    #[instrument(skip(self, changes), fields(tree = %P::KIND))]
    pub fn update(&mut self, id: u64, changes: &RecordUpdate) -> Result<Record> {
        changes.validate()?;

        let node = self.find_mut(id).ok_or(CoreError::NotFound(id))?;
        let updated = changes.applied_to(&node.record);
        if P::key(&updated) == P::key(&node.record) {
            node.record = updated.clone();
            return Ok(updated);
        }

        debug!(
            from = P::key(&node.record),
            to = P::key(&updated),
            "ordering key changed, relocating node"
        );
        let (root, _) = Self::remove_at(self.root.take(), id);
        self.root = Some(Self::insert_at(root, updated.clone()));
        Ok(updated)
    }

    /// Remove a record by id, returning it
    #[instrument(skip(self), fields(tree = %P::KIND))]
    pub fn delete(&mut self, id: u64) -> Result<Record> {
        let (root, removed) = Self::remove_at(self.root.take(), id);
        self.root = root;
        removed.ok_or(CoreError::NotFound(id))
    }

    /// Iterate over the records in the given order
    pub fn iter(&self, order: TraversalOrder) -> Records<'_> {
        Records(self.nodes(order))
    }

    /// Collect all records in the given order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<Record> {
        self.iter(order).cloned().collect()
    }

    /// Height of the whole tree, 0 when empty
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Count nodes by walking the tree
    pub fn count(&self) -> usize {
        self.nodes(TraversalOrder::PreOrder).count()
    }

    /// Check that every balance factor lies in {-1, 0, 1}
    pub fn is_balanced(&self) -> bool {
        self.nodes(TraversalOrder::PreOrder)
            .all(|node| node.balance_factor().abs() <= 1)
    }

    /// Check that the in-order sequence never decreases on the ordering key
    pub fn is_ordered(&self) -> bool {
        let mut keys = self.iter(TraversalOrder::InOrder).map(P::key);
        let Some(mut previous) = keys.next() else {
            return true;
        };
        keys.all(|key| {
            let ordered = previous <= key;
            previous = key;
            ordered
        })
    }

    /// Get statistics about the tree
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            kind: P::KIND,
            height: self.height(),
            count: self.count(),
            is_balanced: self.is_balanced(),
        }
    }

    fn nodes(&self, order: TraversalOrder) -> Traversal<'_> {
        Traversal::new(self.root.as_deref(), order)
    }

    fn repair(node: Box<Node>) -> Box<Node> {
        <P::Balance as Rebalance>::rebalance(node)
    }

    fn find(&self, id: u64) -> Option<&Node> {
        if !P::KEYED_BY_ID {
            return self.nodes(TraversalOrder::PreOrder)
                .find(|node| node.record.id() == id);
        }

        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let key = node.record.id();
            if id == key {
                return Some(node);
            }
            current = if id < key { node.left() } else { node.right() };
        }
        None
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut Node> {
        if !P::KEYED_BY_ID {
            let mut stack: Vec<&mut Node> = self.root.as_deref_mut().into_iter().collect();
            while let Some(node) = stack.pop() {
                if node.record.id() == id {
                    return Some(node);
                }
                let Node { left, right, .. } = node;
                stack.extend(right.as_deref_mut());
                stack.extend(left.as_deref_mut());
            }
            return None;
        }

        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            let key = node.record.id();
            if id == key {
                return Some(node);
            }
            current = if id < key {
                node.left.as_deref_mut()
            } else {
                node.right.as_deref_mut()
            };
        }
        None
    }

    fn insert_at(link: Link, record: Record) -> Box<Node> {
        let Some(mut node) = link else {
            return Box::new(Node::leaf(record));
        };

        if P::key(&record) < P::key(&node.record) {
            node.left = Some(Self::insert_at(node.left.take(), record));
        } else {
            node.right = Some(Self::insert_at(node.right.take(), record));
        }
        Self::repair(node)
    }

    fn remove_at(link: Link, id: u64) -> (Link, Option<Record>) {
        let Some(mut node) = link else {
            return (None, None);
        };

        if node.record.id() == id {
            let (replacement, removed) = Self::unlink(node);
            return (replacement, Some(removed));
        }

        let removed = if P::KEYED_BY_ID {
            if id < node.record.id() {
                let (left, removed) = Self::remove_at(node.left.take(), id);
                node.left = left;
                removed
            } else {
                let (right, removed) = Self::remove_at(node.right.take(), id);
                node.right = right;
                removed
            }
        } else {
            // Not keyed on id: search both sides
            let (left, removed) = Self::remove_at(node.left.take(), id);
            node.left = left;
            match removed {
                Some(record) => Some(record),
                None => {
                    let (right, removed) = Self::remove_at(node.right.take(), id);
                    node.right = right;
                    removed
                }
            }
        };

        match removed {
            Some(record) => (Some(Self::repair(node)), Some(record)),
            None => (Some(node), None),
        }
    }

    /// Detach `node` from its position, returning the subtree that takes its
    /// place and the record it held
    fn unlink(mut node: Box<Node>) -> (Link, Record) {
        match (node.left.take(), node.right.take()) {
            (None, None) => (None, node.record),
            (Some(child), None) | (None, Some(child)) => (Some(child), node.record),
            (Some(left), Some(right)) => {
                let (rest, successor) = Self::take_min(right);
                node.left = Some(left);
                node.right = rest;
                let removed = mem::replace(&mut node.record, successor);
                (Some(Self::repair(node)), removed)
            }
        }
    }

    /// Remove the leftmost node of a subtree
    fn take_min(mut node: Box<Node>) -> (Link, Record) {
        match node.left.take() {
            None => (node.right.take(), node.record),
            Some(left) => {
                let (rest, min) = Self::take_min(left);
                node.left = rest;
                (Some(Self::repair(node)), min)
            }
        }
    }
}

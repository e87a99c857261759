//! Tree node types

use crate::record::Record;

/// An owned, possibly empty subtree
pub type Link = Option<Box<Node>>;

/// A node in an ordered tree
#[derive(Clone, Debug)]
pub struct Node {
    /// The record held by this node
    pub(crate) record: Record,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// Nodes on the longest path down to a leaf, counting this one
    pub(crate) height: usize,
}

impl Node {
    /// Create a detached leaf
    pub fn leaf(record: Record) -> Self {
        Self {
            record,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Recompute the height from the children
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(right) - height(left)`
    pub fn balance_factor(&self) -> isize {
        height(&self.right) as isize - height(&self.left) as isize
    }
}

/// Height of a subtree, 0 when empty
pub fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

//! Depth-first traversals

use super::node::Node;
use crate::record::Record;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Depth-first visiting order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraversalOrder {
    /// Left, node, right (ascending by key)
    #[default]
    #[serde(rename = "in")]
    InOrder,
    /// Node, left, right
    #[serde(rename = "pre")]
    PreOrder,
    /// Left, right, node
    #[serde(rename = "post")]
    PostOrder,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 3] = [Self::InOrder, Self::PreOrder, Self::PostOrder];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InOrder => "in",
            Self::PreOrder => "pre",
            Self::PostOrder => "post",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraversalOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(Self::InOrder),
            "pre" => Ok(Self::PreOrder),
            "post" => Ok(Self::PostOrder),
            other => Err(CoreError::InvalidOrder(format!(
                "expected one of in, pre, post (got {other:?})"
            ))),
        }
    }
}

enum Step<'a> {
    Expand(&'a Node),
    Emit(&'a Node),
}

/// Lazy depth-first iterator over the nodes of a tree.
///
/// Uses an explicit stack, so a degenerate chain does not grow the call stack.
pub struct Traversal<'a> {
    order: TraversalOrder,
    stack: Vec<Step<'a>>,
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(root: Option<&'a Node>, order: TraversalOrder) -> Self {
        Self {
            order,
            stack: root.map(Step::Expand).into_iter().collect(),
        }
    }

    fn push_child(&mut self, child: Option<&'a Node>) {
        if let Some(child) = child {
            self.stack.push(Step::Expand(child));
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Step::Emit(node) => return Some(node),
                Step::Expand(node) => {
                    // Pushed in reverse of the visiting order
                    match self.order {
                        TraversalOrder::InOrder => {
                            self.push_child(node.right());
                            self.stack.push(Step::Emit(node));
                            self.push_child(node.left());
                        }
                        TraversalOrder::PreOrder => {
                            self.push_child(node.right());
                            self.push_child(node.left());
                            return Some(node);
                        }
                        TraversalOrder::PostOrder => {
                            self.stack.push(Step::Emit(node));
                            self.push_child(node.right());
                            self.push_child(node.left());
                        }
                    }
                }
            }
        }
    }
}

/// Iterator over the records of a tree, see [`Traversal`]
pub struct Records<'a>(pub(crate) Traversal<'a>);

impl<'a> Iterator for Records<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Node::record)
    }
}

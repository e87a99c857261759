//! Rebalancing strategies and AVL rotations
//!
//! Every helper consumes a subtree root and hands back the root that must be
//! reattached in its place.

use super::node::Node;

/// Repair applied to each ancestor on the way back up a mutation
pub trait Rebalance {
    fn rebalance(node: Box<Node>) -> Box<Node>;
}

/// Plain BST: keep heights current, never restructure
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbalanced;

impl Rebalance for Unbalanced {
    fn rebalance(mut node: Box<Node>) -> Box<Node> {
        node.update_height();
        node
    }
}

/// AVL: rotate whenever a balance factor leaves {-1, 0, 1}
#[derive(Debug, Clone, Copy, Default)]
pub struct Avl;

impl Rebalance for Avl {
    fn rebalance(node: Box<Node>) -> Box<Node> {
        balance(node)
    }
}

fn child_balance(child: &Option<Box<Node>>) -> isize {
    child.as_ref().map_or(0, |node| node.balance_factor())
}

/// Restore the AVL condition at `node`, assuming both subtrees satisfy it
pub fn balance(mut node: Box<Node>) -> Box<Node> {
    node.update_height();
    let bf = node.balance_factor();

    if bf < -1 {
        if child_balance(&node.left) > 0 {
            // LR
            node.left = node.left.take().map(rotate_left);
        }
        // LL
        return rotate_right(node);
    }

    if bf > 1 {
        if child_balance(&node.right) < 0 {
            // RL
            node.right = node.right.take().map(rotate_right);
        }
        // RR
        return rotate_left(node);
    }

    node
}

/// Right rotation of `z` around its left child
///
/// ```text
///         z                y
///        / \             /   \
///       y   T4          x     z
///      / \      ->     / \   / \
///     x   T3          T1 T2 T3 T4
/// ```
pub fn rotate_right(mut z: Box<Node>) -> Box<Node> {
    let Some(mut y) = z.left.take() else {
        return z;
    };
    z.left = y.right.take();
    z.update_height();
    y.right = Some(z);
    y.update_height();
    y
}

/// Left rotation of `z` around its right child, mirror of [`rotate_right`]
pub fn rotate_left(mut z: Box<Node>) -> Box<Node> {
    let Some(mut y) = z.right.take() else {
        return z;
    };
    z.right = y.left.take();
    z.update_height();
    y.left = Some(z);
    y.update_height();
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Gender, Record};

    fn leaf(id: u64) -> Box<Node> {
        Box::new(Node::leaf(Record::new(id, "n", 5, Gender::Female).unwrap()))
    }

    fn with_children(id: u64, left: Option<Box<Node>>, right: Option<Box<Node>>) -> Box<Node> {
        let mut node = leaf(id);
        node.left = left;
        node.right = right;
        node.update_height();
        node
    }

    fn ids_preorder(node: &Node, out: &mut Vec<u64>) {
        out.push(node.record.id());
        if let Some(left) = node.left() {
            ids_preorder(left, out);
        }
        if let Some(right) = node.right() {
            ids_preorder(right, out);
        }
    }

    #[test]
    fn test_rotate_right_moves_inner_subtree() {
        // 4(2(1,3),5)
        let z = with_children(4, Some(with_children(2, Some(leaf(1)), Some(leaf(3)))), Some(leaf(5)));
        let root = rotate_right(z);

        let mut ids = Vec::new();
        ids_preorder(&root, &mut ids);
        assert_eq!(ids, vec![2, 1, 4, 3, 5]);
        assert_eq!(root.height(), 3);
        assert_eq!(root.right().unwrap().height(), 2);
    }

    #[test]
    fn test_rotate_left_mirrors_right() {
        let z = with_children(2, Some(leaf(1)), Some(with_children(4, Some(leaf(3)), Some(leaf(5)))));
        let root = rotate_left(z);

        let mut ids = Vec::new();
        ids_preorder(&root, &mut ids);
        assert_eq!(ids, vec![4, 2, 1, 3, 5]);
    }

    #[test]
    fn test_rotation_without_child_is_noop() {
        let root = rotate_right(leaf(1));
        assert_eq!(root.record.id(), 1);
        let root = rotate_left(root);
        assert_eq!(root.record.id(), 1);
    }

    #[test]
    fn test_balance_left_right_case() {
        // 3(1(_,2),_) -> 2(1,3)
        let z = with_children(3, Some(with_children(1, None, Some(leaf(2)))), None);
        let root = balance(z);

        let mut ids = Vec::new();
        ids_preorder(&root, &mut ids);
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(root.balance_factor(), 0);
    }

    #[test]
    fn test_balance_right_left_case() {
        let z = with_children(1, None, Some(with_children(3, Some(leaf(2)), None)));
        let root = balance(z);

        let mut ids = Vec::new();
        ids_preorder(&root, &mut ids);
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_unbalanced_only_fixes_height() {
        let mut chain = with_children(1, None, Some(with_children(2, None, Some(leaf(3)))));
        chain.height = 0;
        let root = Unbalanced::rebalance(chain);
        assert_eq!(root.record.id(), 1);
        assert_eq!(root.height(), 3);
    }
}

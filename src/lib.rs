//! This crate exposes an unbalanced Binary Search Tree (BST) in two flavors of node ownership.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The trees in this crate keep these
//! invariants:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than or equal to its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that this means duplicate values are allowed. A value equal to one
//! > already in the tree always ends up in that node's left subtree.
//!
//! No balancing is done so the shape of a tree depends entirely on the
//! order values were inserted in. Inserting sorted values gives a tree
//! shaped like a linked list.
//!
//! ## Deletion
//!
//! Deleting a node with no children simply removes it. Deleting a node with
//! one child promotes that child into its place. Deleting a node with two
//! children moves its in-order successor's value (the smallest value in its
//! right subtree) into the node and removes the successor's node instead.
//!
//! ## Flavors
//!
//! - [`boxed::Tree`]: each node is exclusively owned by its parent's child
//!   slot (or the tree's root) through a `Box`.
//! - [`arena::Tree`]: nodes live in an arena owned by the tree and refer to
//!   their children by index. Released slots are reused by later insertions.
//!
//! Both have the same API and produce the same structure for the same
//! operations.
//!
//! ```
//! use ordered_bst::{arena, boxed};
//!
//! let mut boxed = boxed::Tree::new();
//! let mut arena = arena::Tree::new();
//! for value in [0, 0, 1, 7, 2, 4, 3, 5, 6, 69] {
//!     boxed.insert(value);
//!     arena.insert(value);
//! }
//!
//! assert_eq!(boxed.delete(&7), Some(7));
//! assert_eq!(arena.delete(&7), Some(7));
//! assert_eq!(boxed.to_string(), arena.to_string());
//! ```

#![deny(missing_docs)]

pub mod arena;
pub mod boxed;
mod util;

#[cfg(test)]
mod test;

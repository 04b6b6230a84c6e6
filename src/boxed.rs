//! A BST where every node is exclusively owned by a single slot - either its parent's `left` or
//! `right` child or the tree's root. Removing a node from its slot is the same thing as taking
//! ownership of it so nodes can never be reachable after they've been released.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::boxed::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.insert(1);
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // Equal values are kept - the second `1` goes to the left of the first.
//! tree.insert(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Deleting a value returns it.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), None);
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};
use std::mem;

use log::trace;

use crate::util;

/// An owning child slot. `None` marks the empty pointer at the bottom of a subtree.
type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree. This can be used for inserting, finding, and deleting
/// values. Duplicate values are allowed and are stored to the left of equal values.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// TODO stack based Clone
impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

/// Renders the tree structure for a human to read. See [`Tree::print`].
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root.as_deref() {
            Some(root) => util::render(f, root, |node| {
                (&node.value, node.left.as_deref(), node.right.as_deref())
            }),
            None => Ok(()),
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of values stored in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every value from the tree.
    ///
    /// Nodes are released from a work list rather than recursively so that clearing a tree shaped
    /// like a linked list can't overflow the stack.
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Inserts the value into the tree. The value is placed in the left subtree of any node whose
    /// value is greater than or equal to it and in the right subtree otherwise. No rebalancing
    /// is done.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::boxed::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        let mut depth = 0;
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if value <= node.value {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }

        *slot = Some(Node::new_boxed(value));
        self.len += 1;
        trace!("inserted node at depth {}", depth);
    }

    /// Potentially finds a value equal to the given one in this tree. If no node holds an equal
    /// value, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::boxed::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.value == *value {
                return Some(&node.value);
            }

            current = if node.value < *value {
                node.right.as_deref()
            } else {
                node.left.as_deref()
            };
        }

        None
    }

    /// Like [`Tree::find`] but the found value can be modified.
    ///
    /// **Note** The tree isn't re-sorted after the value is modified. Changing how the value
    /// compares to its neighbours breaks later searches.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::boxed::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert((1, "one"));
    ///
    /// if let Some(entry) = tree.find_mut(&(1, "one")) {
    ///     entry.1 = "uno";
    /// }
    /// assert_eq!(tree.find(&(1, "uno")), Some(&(1, "uno")));
    /// ```
    pub fn find_mut(&mut self, value: &T) -> Option<&mut T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            if node.value == *value {
                return Some(&mut node.value);
            }

            current = if node.value < *value {
                node.right.as_deref_mut()
            } else {
                node.left.as_deref_mut()
            };
        }

        None
    }

    /// Finds the first value matching the predicate. This doesn't use the ordering of the tree
    /// at all - nodes are visited in pre-order (a node, then its left subtree, then its right
    /// subtree) until one matches, so every node is checked if nothing does.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::boxed::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for value in [5, 3, 8] {
    ///     tree.insert(value);
    /// }
    ///
    /// assert_eq!(tree.find_by(|v| v % 2 == 0), Some(&8));
    /// assert_eq!(tree.find_by(|v| *v > 10), None);
    /// ```
    pub fn find_by(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        let mut pending: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            if predicate(&node.value) {
                return Some(&node.value);
            }

            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }

        None
    }

    /// Like [`Tree::find_by`] but the found value can be modified. The same caveat as
    /// [`Tree::find_mut`] applies.
    pub fn find_by_mut(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Option<&mut T> {
        let mut pending: Vec<&mut Node<T>> = self.root.as_deref_mut().into_iter().collect();
        while let Some(node) = pending.pop() {
            let Node { value, left, right } = node;
            if predicate(&*value) {
                return Some(value);
            }

            pending.extend(right.as_deref_mut());
            pending.extend(left.as_deref_mut());
        }

        None
    }

    /// Deletes a node holding a value equal to the given one and returns the removed value. If
    /// the tree doesn't contain such a value, nothing happens.
    ///
    /// When the node has two children it's replaced by its in-order successor (the smallest value
    /// in its right subtree).
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::boxed::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.delete(&1), Some(1));
    /// assert_eq!(tree.find(&1), None);
    /// assert_eq!(tree.delete(&1), None);
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let (root, removed) = delete_from(self.root.take(), value);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }

        removed
    }

    /// Writes the tree's structure to stdout. Each value is on its own line, indented one tab
    /// deeper than its parent, followed by its left and then its right child. Missing children
    /// are written as `<no left node>` or `<no right node>`. The root's line is prefixed with
    /// `root: `. An empty tree writes nothing.
    ///
    /// The same text is available through the `Display` implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::boxed::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(5);
    /// tree.insert(5);
    ///
    /// assert_eq!(
    ///     tree.to_string(),
    ///     "root: 5\n\t5\n\t\t<no left node>\n\t\t<no right node>\n\t<no right node>\n",
    /// );
    /// ```
    pub fn print(&self) -> io::Result<()>
    where
        T: fmt::Display,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write!(out, "{}", self)?;
        out.flush()
    }
}

/// Deletes a value equal to `value` from the subtree in `link`. Returns the subtree that should
/// replace `link` in its parent (or the tree's root) along with the removed value, if any.
fn delete_from<T>(link: Link<T>, value: &T) -> (Link<T>, Option<T>)
where
    T: Ord,
{
    let mut node = match link {
        Some(node) => node,
        None => return (None, None),
    };

    match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, removed) = delete_from(node.left.take(), value);
            node.left = left;
            (Some(node), removed)
        }
        Ordering::Greater => {
            let (right, removed) = delete_from(node.right.take(), value);
            node.right = right;
            (Some(node), removed)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => {
                trace!("deleting leaf node");
                (None, Some(node.into_value()))
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("deleting node with one child, promoting the child");
                (Some(child), Some(node.into_value()))
            }
            // With two children we replace this node's value with its in-order successor and
            // release the successor's node instead.
            (Some(left), Some(right)) => {
                trace!("deleting node with two children, splicing in its in-order successor");
                let (successor, rest) = detach_leftmost(right);
                node.left = Some(left);
                node.right = rest;
                let removed = mem::replace(&mut node.value, successor.into_value());
                (Some(node), Some(removed))
            }
        },
    }
}

/// Detaches the leftmost node of the subtree rooted at `node`, splicing that node's right child
/// into the slot it leaves behind. Returns the detached node and what remains of the subtree.
///
/// If `node` itself is leftmost, what remains is just its right child. Otherwise the leftmost
/// node's parent gets that right child as its new left child.
fn detach_leftmost<T>(mut node: Box<Node<T>>) -> (Box<Node<T>>, Link<T>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (node, rest)
        }
        Some(left) => {
            let (leftmost, rest) = detach_leftmost(left);
            node.left = rest;
            (leftmost, Some(node))
        }
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    /// Releases a node whose children have already been moved out, returning its value.
    fn into_value(self: Box<Self>) -> T {
        debug_assert!(self.left.is_none() && self.right.is_none());
        self.value
    }
}

//! A BST whose nodes live in an arena owned by the tree. Nodes refer to their children by
//! `NodeId` - an index into the arena - rather than by owning pointers. Traversals only ever
//! hold these non-owning ids while the tree is responsible for every node's storage.
//!
//! Releasing a node returns its slot to a free list for later insertions to reuse. A released id
//! is unlinked from its parent before it's freed so it is never reachable from the root.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::arena::Tree;
//!
//! let mut tree = Tree::with_capacity(3);
//!
//! tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//! assert_eq!(tree.find(&3), Some(&3));
//!
//! // 2 has two children so its in-order successor (3) takes its place.
//! assert_eq!(tree.delete(&2), Some(2));
//! assert_eq!(tree.to_string(), "root: 3\n\t1\n\t\t<no left node>\n\t\t<no right node>\n\t<no right node>\n");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};
use std::mem;

use log::trace;

use crate::util;

/// The position of a node in its tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeId(usize);

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// An unbalanced Binary Search Tree backed by an arena. This can be used for inserting, finding,
/// and deleting values. Duplicate values are allowed and are stored to the left of equal values.
#[derive(Clone)]
pub struct Tree<T> {
    /// Every node ever allocated. `None` marks a released slot which must also be in `free`.
    nodes: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len())
            .field("root", &self.root.map(|id| DebugNode { tree: self, id }))
            .finish()
    }
}

/// Shows the node structure nested the way the boxed tree's `Debug` does instead of as a flat
/// arena.
struct DebugNode<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<T> fmt::Debug for DebugNode<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.tree.node(self.id);
        let child = |id: Option<NodeId>| id.map(|id| DebugNode { tree: self.tree, id });
        f.debug_struct("Node")
            .field("value", &node.value)
            .field("left", &child(node.left))
            .field("right", &child(node.right))
            .finish()
    }
}

/// Renders the tree structure for a human to read. See [`Tree::print`].
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => util::render(f, root, move |id| {
                let node = self.node(id);
                (&node.value, node.left, node.right)
            }),
            None => Ok(()),
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Generates a new, empty `Tree` with room for `capacity` nodes before the arena has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: None,
        }
    }

    /// The number of values stored in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every value from the tree. The arena keeps its capacity.
    pub fn clear(&mut self) {
        self.root = None;
        self.free.clear();
        self.nodes.clear();
    }

    /// Inserts the value into the tree. The value is placed in the left subtree of any node whose
    /// value is greater than or equal to it and in the right subtree otherwise. No rebalancing
    /// is done.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::arena::Tree;
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
        let new = self.allocate(value);
        let Some(mut current) = self.root else {
            self.root = Some(new);
            return;
        };

        // Walk down to an empty slot, remembering the last node we passed through.
        let mut depth = 1;
        let parent = loop {
            let node = self.node(current);
            let next = if self.node(new).value <= node.value {
                node.left
            } else {
                node.right
            };
            match next {
                Some(next) => {
                    current = next;
                    depth += 1;
                }
                None => break current,
            }
        };

        let goes_left = self.node(new).value <= self.node(parent).value;
        let parent = self.node_mut(parent);
        if goes_left {
            parent.left = Some(new);
        } else {
            parent.right = Some(new);
        }
        trace!("inserted node at depth {}", depth);
    }

    /// Potentially finds a value equal to the given one in this tree. If no node holds an equal
    /// value, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::arena::Tree;
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
        self.locate(value).map(|id| &self.node(id).value)
    }

    /// Like [`Tree::find`] but the found value can be modified.
    ///
    /// **Note** The tree isn't re-sorted after the value is modified. Changing how the value
    /// compares to its neighbours breaks later searches.
    pub fn find_mut(&mut self, value: &T) -> Option<&mut T>
    where
        T: Ord,
    {
        let id = self.locate(value)?;
        Some(&mut self.node_mut(id).value)
    }

    /// Finds the first value matching the predicate. This doesn't use the ordering of the tree
    /// at all - nodes are visited in pre-order (a node, then its left subtree, then its right
    /// subtree) until one matches, so every node is checked if nothing does.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for value in [5, 3, 8] {
    ///     tree.insert(value);
    /// }
    ///
    /// assert_eq!(tree.find_by(|v| v % 2 == 0), Some(&8));
    /// assert_eq!(tree.find_by(|v| *v > 10), None);
    /// ```
    pub fn find_by(&self, predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.locate_by(predicate).map(|id| &self.node(id).value)
    }

    /// Like [`Tree::find_by`] but the found value can be modified. The same caveat as
    /// [`Tree::find_mut`] applies.
    pub fn find_by_mut(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<&mut T> {
        let id = self.locate_by(predicate)?;
        Some(&mut self.node_mut(id).value)
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
    /// use ordered_bst::arena::Tree;
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
        let (root, removed) = self.delete_from(self.root, value);
        self.root = root;
        removed
    }

    /// Writes the tree's structure to stdout. Each value is on its own line, indented one tab
    /// deeper than its parent, followed by its left and then its right child. Missing children
    /// are written as `<no left node>` or `<no right node>`. The root's line is prefixed with
    /// `root: `. An empty tree writes nothing.
    ///
    /// The same text is available through the `Display` implementation.
    pub fn print(&self) -> io::Result<()>
    where
        T: fmt::Display,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write!(out, "{}", self)?;
        out.flush()
    }

    /// Deletes a value equal to `value` from the subtree rooted at `subtree`. Returns the id that
    /// should replace `subtree` in its parent (or the tree's root) along with the removed value,
    /// if any.
    fn delete_from(&mut self, subtree: Option<NodeId>, value: &T) -> (Option<NodeId>, Option<T>)
    where
        T: Ord,
    {
        let Some(id) = subtree else {
            return (None, None);
        };

        let node = self.node(id);
        let (left, right) = (node.left, node.right);
        match value.cmp(&node.value) {
            Ordering::Less => {
                let (left, removed) = self.delete_from(left, value);
                self.node_mut(id).left = left;
                (Some(id), removed)
            }
            Ordering::Greater => {
                let (right, removed) = self.delete_from(right, value);
                self.node_mut(id).right = right;
                (Some(id), removed)
            }
            Ordering::Equal => match (left, right) {
                (None, None) => {
                    trace!("deleting leaf node {}", id.0);
                    (None, Some(self.release(id)))
                }
                (Some(child), None) | (None, Some(child)) => {
                    trace!("deleting node {} with one child, promoting the child", id.0);
                    (Some(child), Some(self.release(id)))
                }
                (Some(_), Some(right)) => {
                    trace!(
                        "deleting node {} with two children, splicing in its in-order successor",
                        id.0
                    );
                    (Some(id), Some(self.replace_with_successor(id, right)))
                }
            },
        }
    }

    /// Moves the in-order successor's value into the node `id` (whose right child is `right`) and
    /// releases the successor's node. Returns the value `id` held before.
    fn replace_with_successor(&mut self, id: NodeId, right: NodeId) -> T {
        let mut parent = id;
        let mut successor = right;
        while let Some(left) = self.node(successor).left {
            parent = successor;
            successor = left;
        }

        // The successor has no left child by construction so its right child is all that needs
        // re-homing.
        let orphan = self.node(successor).right;
        if parent == id {
            self.node_mut(parent).right = orphan;
        } else {
            self.node_mut(parent).left = orphan;
        }

        let successor_value = self.release(successor);
        mem::replace(&mut self.node_mut(id).value, successor_value)
    }

    /// Finds the node holding a value equal to `value` using the ordering of the tree.
    fn locate(&self, value: &T) -> Option<NodeId>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            if node.value == *value {
                return Some(id);
            }

            current = if node.value < *value {
                node.right
            } else {
                node.left
            };
        }

        None
    }

    /// Finds the first node in pre-order whose value matches `predicate`.
    fn locate_by(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<NodeId> {
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = pending.pop() {
            let node = self.node(id);
            if predicate(&node.value) {
                return Some(id);
            }

            pending.extend(node.right);
            pending.extend(node.left);
        }

        None
    }

    /// Stores a new childless node, reusing a released slot if there is one.
    fn allocate(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            left: None,
            right: None,
        };

        match self.free.pop() {
            Some(id) => {
                trace!("reusing released slot {}", id.0);
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Releases the node's slot and returns its value. The caller must already have unlinked `id`
    /// from its parent (or the root) and re-homed any children.
    fn release(&mut self, id: NodeId) -> T {
        let node = self.nodes[id.0]
            .take()
            .expect("Only live nodes are released");
        self.free.push(id);
        node.value
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes[id.0]
            .as_ref()
            .expect("Reachable ids point at live nodes")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes[id.0]
            .as_mut()
            .expect("Reachable ids point at live nodes")
    }
}

//! AVL tree over 2D integer points, keyed on x and augmented with subtree metadata.
//!
//! Every node caches its subtree height, point count and tight bounding box. Insertion is the
//! usual descend-then-rebalance-on-unwind scheme: each ancestor on the way back recomputes its
//! metadata in O(1) from its children and rotates if its balance factor reached ±2.
//!
//! Nodes are stored in a single arena and addressed by [`NodeId`]. Nothing is ever removed, so a
//! node's id is its insertion order.

use tracing::trace;

use crate::error::{Error, Result};
use crate::node::{Bounds, Node, NodeId, height_of, recompute};

/// Augmented AVL tree for circle range counting
///
/// Memory layout:
/// - `nodes`: arena of all nodes, index = insertion order
/// - `root`: handle of the current root, `None` while empty
///
/// Each node exclusively owns its two children through their handles; there are no parent
/// links and no shared subtrees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AugmentedTree {
    /// Node arena
    pub(crate) nodes: Vec<Node>,
    /// Current root
    pub(crate) root: Option<NodeId>,
}

impl AugmentedTree {
    /// Creates a new empty tree
    ///
    /// # Example
    /// ```
    /// use avlbox::AugmentedTree;
    /// let tree = AugmentedTree::new();
    /// assert_eq!(tree.len(), 0);
    /// assert_eq!(tree.height(), -1);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new tree with room for `capacity` points before the arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Inserts a point and returns its id.
    ///
    /// Nodes are ordered by the key `(x, id)`. A new point has the largest id so far, so on
    /// insertion it goes right of every node with the same x. Duplicate points are kept.
    ///
    /// # Panics
    /// Panics if the arena cannot grow. Use [`try_insert`](Self::try_insert) to handle that
    /// case instead.
    ///
    /// # Example
    /// ```
    /// use avlbox::AugmentedTree;
    /// let mut tree = AugmentedTree::new();
    /// let a = tree.insert(0, 0);
    /// let b = tree.insert(3, 4);
    /// assert_eq!((a, b), (0, 1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, x: i32, y: i32) -> NodeId {
        match self.try_insert(x, y) {
            Ok(id) => id,
            Err(e) => panic!("failed to insert point ({x}, {y}): {e}"),
        }
    }

    /// Inserts a point, reporting allocation failure instead of panicking.
    ///
    /// Space for the node is reserved before any link changes, so on error the tree is
    /// exactly as it was.
    ///
    /// # Errors
    /// - [`Error::Allocation`] if the arena cannot grow.
    /// - [`Error::CapacityExceeded`] if the tree already holds `u32::MAX` points.
    pub fn try_insert(&mut self, x: i32, y: i32) -> Result<NodeId> {
        let id = NodeId::try_from(self.nodes.len()).map_err(|_| Error::CapacityExceeded)?;
        // Subtree counts are u32, so the last handle stays unused.
        if id == NodeId::MAX {
            return Err(Error::CapacityExceeded);
        }
        self.nodes.try_reserve(1)?;
        self.nodes.push(Node::leaf(x, y));

        let root = self.root;
        self.root = Some(self.insert_at(root, id));
        Ok(id)
    }

    /// Links the already allocated leaf `new` below `link` and returns the subtree's new root.
    ///
    /// Recursion depth is bounded by the tree height, which the AVL balance keeps below
    /// 1.45 * log2(n).
    fn insert_at(&mut self, link: Option<NodeId>, new: NodeId) -> NodeId {
        let Some(id) = link else {
            return new;
        };

        if self.key(new) < self.key(id) {
            let child = self.insert_at(self.nodes[id as usize].left, new);
            self.nodes[id as usize].left = Some(child);
        } else {
            let child = self.insert_at(self.nodes[id as usize].right, new);
            self.nodes[id as usize].right = Some(child);
        }

        self.rebalance(id)
    }

    /// Ordering key: x first, insertion order breaks ties.
    fn key(&self, id: NodeId) -> (i32, NodeId) {
        (self.nodes[id as usize].x, id)
    }

    /// Refreshes the metadata of `id` and rotates if it is out of balance.
    ///
    /// Children must already be balanced with correct metadata. Returns the subtree's root.
    fn rebalance(&mut self, id: NodeId) -> NodeId {
        recompute(&mut self.nodes, id);

        let node = &self.nodes[id as usize];
        let balance = height_of(&self.nodes, node.left) - height_of(&self.nodes, node.right);

        if balance < -1 {
            let (inner, outer) = self.child_heights(node.right);
            if inner > outer {
                self.rotate_right_left(id)
            } else {
                self.rotate_left(id)
            }
        } else if balance > 1 {
            let (outer, inner) = self.child_heights(node.left);
            if outer >= inner {
                self.rotate_right(id)
            } else {
                self.rotate_left_right(id)
            }
        } else {
            id
        }
    }

    /// Heights of the (left, right) children of `id`.
    fn child_heights(&self, id: Option<NodeId>) -> (i32, i32) {
        id.map_or((-1, -1), |i| {
            let node = &self.nodes[i as usize];
            (height_of(&self.nodes, node.left), height_of(&self.nodes, node.right))
        })
    }

    /// Single left rotation; the right child becomes the subtree root.
    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id as usize].right else {
            return id;
        };
        self.nodes[id as usize].right = self.nodes[pivot as usize].left;
        self.nodes[pivot as usize].left = Some(id);

        recompute(&mut self.nodes, id);
        recompute(&mut self.nodes, pivot);
        trace!(node = id, pivot, "rotate left");
        pivot
    }

    /// Single right rotation; the left child becomes the subtree root.
    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id as usize].left else {
            return id;
        };
        self.nodes[id as usize].left = self.nodes[pivot as usize].right;
        self.nodes[pivot as usize].right = Some(id);

        recompute(&mut self.nodes, id);
        recompute(&mut self.nodes, pivot);
        trace!(node = id, pivot, "rotate right");
        pivot
    }

    fn rotate_left_right(&mut self, id: NodeId) -> NodeId {
        if let Some(left) = self.nodes[id as usize].left {
            let new_left = self.rotate_left(left);
            self.nodes[id as usize].left = Some(new_left);
        }
        self.rotate_right(id)
    }

    fn rotate_right_left(&mut self, id: NodeId) -> NodeId {
        if let Some(right) = self.nodes[id as usize].right {
            let new_right = self.rotate_right(right);
            self.nodes[id as usize].right = Some(new_right);
        }
        self.rotate_left(id)
    }

    /// Number of points under the root (0 when empty).
    ///
    /// Read from the root's cached subtree count; equals [`len`](Self::len) on a valid tree.
    pub fn root_count(&self) -> usize {
        self.root_node().map_or(0, |n| n.subtree_count as usize)
    }

    /// Returns the number of points in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the tree: -1 when empty, 0 for a single point.
    pub fn height(&self) -> i32 {
        height_of(&self.nodes, self.root)
    }

    /// Bounding box of every point, or `None` for an empty tree.
    pub fn bounds(&self) -> Option<Bounds> {
        self.root_node().map(Node::bounds)
    }

    /// The root node, if any.
    pub fn root_node(&self) -> Option<&Node> {
        self.root.map(|id| &self.nodes[id as usize])
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Coordinates of the point with the given id.
    pub fn point(&self, id: NodeId) -> Option<(i32, i32)> {
        self.node(id).map(|n| (n.x, n.y))
    }

    /// Iterates over all points in ascending `(x, id)` order, so equal x come out in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Walks the whole tree and checks every structural invariant.
    ///
    /// Verifies strict `(x, id)` ordering, AVL balance, and that cached heights, subtree counts
    /// and bounding boxes equal the values recomputed from scratch. Also checks that every
    /// arena node is reachable from the root.
    ///
    /// # Errors
    /// Returns [`Error::Invariant`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let reachable = match self.root {
            Some(root) => self.validate_subtree(root)?.count,
            None => 0,
        };
        if reachable as usize != self.nodes.len() {
            return Err(Error::Invariant(format!(
                "{} nodes reachable from root, {} stored",
                reachable,
                self.nodes.len()
            )));
        }
        Ok(())
    }

    fn validate_subtree(&self, id: NodeId) -> Result<Summary> {
        let node = &self.nodes[id as usize];
        let left = node.left.map(|c| self.validate_subtree(c)).transpose()?;
        let right = node.right.map(|c| self.validate_subtree(c)).transpose()?;

        let key = self.key(id);
        let mut actual = Summary {
            height: 0,
            count: 1,
            bounds: Bounds::point(node.x, node.y),
            min_key: key,
            max_key: key,
        };
        let (mut left_height, mut right_height) = (-1, -1);

        if let Some(l) = &left {
            if l.max_key >= key {
                return Err(Error::Invariant(format!(
                    "node {id} with key {key:?} has left descendant with key {:?}",
                    l.max_key
                )));
            }
            left_height = l.height;
            actual.merge(l);
        }
        if let Some(r) = &right {
            if r.min_key <= key {
                return Err(Error::Invariant(format!(
                    "node {id} with key {key:?} has right descendant with key {:?}",
                    r.min_key
                )));
            }
            right_height = r.height;
            actual.merge(r);
        }

        if (left_height - right_height).abs() > 1 {
            return Err(Error::Invariant(format!(
                "node {id} unbalanced: left height {left_height}, right height {right_height}"
            )));
        }
        if node.height != actual.height {
            return Err(Error::Invariant(format!(
                "node {id} caches height {} but has height {}",
                node.height, actual.height
            )));
        }
        if node.subtree_count != actual.count {
            return Err(Error::Invariant(format!(
                "node {id} caches count {} but holds {} points",
                node.subtree_count, actual.count
            )));
        }
        if node.bounds != actual.bounds {
            return Err(Error::Invariant(format!(
                "node {id} caches bounds {:?} but points span {:?}",
                node.bounds, actual.bounds
            )));
        }
        Ok(actual)
    }
}

/// Metadata recomputed from scratch during validation.
#[derive(Debug)]
struct Summary {
    height: i32,
    count: u32,
    bounds: Bounds,
    /// Smallest and largest `(x, id)` key in the subtree
    min_key: (i32, NodeId),
    max_key: (i32, NodeId),
}

impl Summary {
    fn merge(&mut self, child: &Self) {
        self.height = self.height.max(child.height + 1);
        self.count += child.count;
        self.bounds = self.bounds.union(child.bounds);
        self.min_key = self.min_key.min(child.min_key);
        self.max_key = self.max_key.max(child.max_key);
    }
}

impl FromIterator<(i32, i32)> for AugmentedTree {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<(i32, i32)> for AugmentedTree {
    fn extend<I: IntoIterator<Item = (i32, i32)>>(&mut self, iter: I) {
        for (x, y) in iter {
            let _ = self.insert(x, y);
        }
    }
}

/// In-order iterator over the points of an [`AugmentedTree`].
#[derive(Debug)]
pub struct Iter<'a> {
    nodes: &'a [Node],
    stack: Vec<NodeId>,
}

impl Iter<'_> {
    fn push_left_spine(&mut self, mut link: Option<NodeId>) {
        while let Some(id) = link {
            self.stack.push(id);
            link = self.nodes[id as usize].left;
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.nodes[id as usize];
        self.push_left_spine(node.right);
        Some((node.x, node.y))
    }
}

impl<'a> IntoIterator for &'a AugmentedTree {
    type Item = (i32, i32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

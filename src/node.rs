//! Node and bounding-box types for the augmented AVL tree.
//!
//! Nodes live in a flat arena owned by [`AugmentedTree`](crate::AugmentedTree) and refer to
//! their children by `u32` handle. A handle is the node's insertion order, so it is also the
//! point id reported by [`query_circle`](crate::AugmentedTree::query_circle).

/// Handle of a node inside the tree arena.
pub type NodeId = u32;

/// Tight axis-aligned bounding box: minX, minY, maxX, maxY (16 bytes for i32)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Left edge
    pub min_x: i32,
    /// Bottom edge
    pub min_y: i32,
    /// Right edge
    pub max_x: i32,
    /// Top edge
    pub max_y: i32,
}

impl Bounds {
    /// Creates a box from its four edges.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Degenerate box covering a single point.
    pub fn point(x: i32, y: i32) -> Self {
        Self::new(x, y, x, y)
    }

    /// Smallest box enclosing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true if the point lies inside the box or on its edge.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Squared distance from `(cx, cy)` to the closest point of the box.
    ///
    /// Zero when the center is inside the box.
    pub fn min_dist_sq(&self, cx: i32, cy: i32) -> u64 {
        let closest_x = cx.clamp(self.min_x, self.max_x);
        let closest_y = cy.clamp(self.min_y, self.max_y);
        dist_sq(closest_x, closest_y, cx, cy)
    }

    /// Squared distance from `(cx, cy)` to the farthest corner of the box.
    pub fn max_dist_sq(&self, cx: i32, cy: i32) -> u64 {
        let dx = axis_dist(self.min_x, cx).max(axis_dist(self.max_x, cx));
        let dy = axis_dist(self.min_y, cy).max(axis_dist(self.max_y, cy));
        (dx * dx).saturating_add(dy * dy)
    }
}

/// Absolute difference of two i32 values; always fits in 32 bits unsigned.
#[inline]
fn axis_dist(a: i32, b: i32) -> u64 {
    (i64::from(a) - i64::from(b)).unsigned_abs()
}

/// Squared euclidean distance between two i32 points.
///
/// Each squared axis term is below 2^64; the sum saturates. Any radius accepted by the
/// queries is at most `i32::MAX`, so `r²` stays below 2^62 and a saturated sum still
/// compares as "outside".
#[inline]
pub fn dist_sq(ax: i32, ay: i32, bx: i32, by: i32) -> u64 {
    let dx = axis_dist(ax, bx);
    let dy = axis_dist(ay, by);
    (dx * dx).saturating_add(dy * dy)
}

/// One ingested point plus cached facts about the subtree rooted at it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// X coordinate (the search key)
    pub(crate) x: i32,
    /// Y coordinate
    pub(crate) y: i32,
    /// Height of this subtree; a missing child counts as -1, a leaf is 0
    pub(crate) height: i32,
    /// Number of nodes in this subtree including this one
    pub(crate) subtree_count: u32,
    /// Bounding box of every point in this subtree
    pub(crate) bounds: Bounds,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl Node {
    /// Fresh leaf for a newly inserted point.
    pub(crate) fn leaf(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            height: 0,
            subtree_count: 1,
            bounds: Bounds::point(x, y),
            left: None,
            right: None,
        }
    }

    /// X coordinate of the point stored here.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y coordinate of the point stored here.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Cached subtree height (leaf = 0).
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of points in the subtree rooted here.
    pub fn subtree_count(&self) -> u32 {
        self.subtree_count
    }

    /// Bounding box of the subtree rooted here.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Left child handle.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child handle.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }
}

/// Height of an optional child; -1 when absent.
#[inline]
pub(crate) fn height_of(nodes: &[Node], id: Option<NodeId>) -> i32 {
    id.map_or(-1, |i| nodes[i as usize].height)
}

/// Recomputes height, subtree count and bounds of `id` from its two children.
///
/// The children must already carry correct metadata.
pub(crate) fn recompute(nodes: &mut [Node], id: NodeId) {
    let node = &nodes[id as usize];
    let (left, right) = (node.left, node.right);

    let mut height = -1;
    let mut count = 1;
    let mut bounds = Bounds::point(node.x, node.y);
    for child in [left, right].into_iter().flatten() {
        let c = &nodes[child as usize];
        height = height.max(c.height);
        count += c.subtree_count;
        bounds = bounds.union(c.bounds);
    }

    let node = &mut nodes[id as usize];
    node.height = height + 1;
    node.subtree_count = count;
    node.bounds = bounds;
}

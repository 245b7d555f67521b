//! Circle range queries for [`AugmentedTree`].
//!
//! Both queries walk the tree with an explicit work stack and use each node's cached bounding
//! box to decide a whole subtree at once:
//! - closest point of the box is outside the circle: skip the subtree
//! - farthest corner of the box is inside the circle: take the whole subtree
//! - otherwise test the node's own point and descend into both children
//!
//! Pruning only skips work; results always equal a linear scan.

use crate::AugmentedTree;
use crate::node::{NodeId, dist_sq};

/// What a node's bounding box says about a circle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Coverage {
    Outside,
    Inside,
    Straddling,
}

impl AugmentedTree {
    /// Counts the points whose distance to `(cx, cy)` is at most `r`.
    ///
    /// Points exactly on the circle are included; `r = 0` counts the points equal to the center.
    /// A negative radius selects nothing.
    ///
    /// # Arguments
    /// * `cx`, `cy` - Circle center
    /// * `r` - Circle radius
    ///
    /// # Example
    /// ```
    /// use avlbox::AugmentedTree;
    /// let mut tree = AugmentedTree::new();
    /// tree.insert(0, 0);
    /// tree.insert(3, 4);
    /// tree.insert(10, 10);
    ///
    /// assert_eq!(tree.count_in_circle(0, 0, 5), 2);
    /// assert_eq!(tree.count_in_circle(0, 0, 4), 1);
    /// ```
    pub fn count_in_circle(&self, cx: i32, cy: i32, r: i32) -> usize {
        let Some(r_sq) = radius_sq(r) else {
            return 0;
        };
        let Some(root) = self.root else {
            return 0;
        };

        let mut count = 0usize;
        let mut stack = self.work_stack();
        stack.push(root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            match self.coverage(id, cx, cy, r_sq) {
                Coverage::Outside => {}
                Coverage::Inside => count += node.subtree_count as usize,
                Coverage::Straddling => {
                    if dist_sq(node.x, node.y, cx, cy) <= r_sq {
                        count += 1;
                    }
                    stack.extend(node.right);
                    stack.extend(node.left);
                }
            }
        }
        count
    }

    /// Finds the ids of all points within distance `r` of `(cx, cy)`.
    ///
    /// Ids are insertion order, as returned by [`insert`](Self::insert). Results are in
    /// traversal order, not sorted.
    ///
    /// # Arguments
    /// * `cx`, `cy` - Circle center
    /// * `r` - Circle radius
    /// * `results` - Output vector; will be cleared and populated with matching point ids
    ///
    /// # Example
    /// ```
    /// use avlbox::AugmentedTree;
    /// let mut tree = AugmentedTree::new();
    /// tree.insert(0, 0);   // Point 0
    /// tree.insert(3, 4);   // Point 1
    /// tree.insert(10, 10); // Point 2
    ///
    /// let mut results = Vec::new();
    /// tree.query_circle(0, 0, 5, &mut results);
    /// results.sort();
    /// assert_eq!(results, vec![0, 1]);
    /// ```
    pub fn query_circle(&self, cx: i32, cy: i32, r: i32, results: &mut Vec<usize>) {
        results.clear();
        let Some(r_sq) = radius_sq(r) else {
            return;
        };
        let Some(root) = self.root else {
            return;
        };

        let mut stack = self.work_stack();
        stack.push(root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            match self.coverage(id, cx, cy, r_sq) {
                Coverage::Outside => {}
                Coverage::Inside => self.collect_subtree(id, results),
                Coverage::Straddling => {
                    if dist_sq(node.x, node.y, cx, cy) <= r_sq {
                        results.push(id as usize);
                    }
                    stack.extend(node.right);
                    stack.extend(node.left);
                }
            }
        }
    }

    /// Counts matching points by checking every point. Reference for the pruned queries.
    pub fn brute_force_count(&self, cx: i32, cy: i32, r: i32) -> usize {
        let Some(r_sq) = radius_sq(r) else {
            return 0;
        };
        self.nodes
            .iter()
            .filter(|n| dist_sq(n.x, n.y, cx, cy) <= r_sq)
            .count()
    }

    fn coverage(&self, id: NodeId, cx: i32, cy: i32, r_sq: u64) -> Coverage {
        let bounds = &self.nodes[id as usize].bounds;
        if bounds.min_dist_sq(cx, cy) > r_sq {
            Coverage::Outside
        } else if bounds.max_dist_sq(cx, cy) <= r_sq {
            Coverage::Inside
        } else {
            Coverage::Straddling
        }
    }

    /// Pushes every id in the subtree rooted at `id`.
    fn collect_subtree(&self, id: NodeId, results: &mut Vec<usize>) {
        results.reserve(self.nodes[id as usize].subtree_count as usize);
        let mut stack = self.work_stack();
        stack.push(id);
        while let Some(next) = stack.pop() {
            let node = &self.nodes[next as usize];
            results.push(next as usize);
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /// Stack sized for a depth-first walk: at most one pending sibling per level.
    fn work_stack(&self) -> Vec<NodeId> {
        let depth = usize::try_from(self.height()).unwrap_or(0);
        Vec::with_capacity(depth + 2)
    }
}

/// Squared radius, or `None` for a negative radius.
fn radius_sq(r: i32) -> Option<u64> {
    u64::try_from(r).ok().map(|r| r * r)
}

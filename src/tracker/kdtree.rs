//! Two-dimensional k-d tree over integer centroids.

use std::collections::BinaryHeap;

use crate::tracker::rect::Centroid;

#[derive(Debug, Clone)]
struct Node {
    /// Index into the point set the tree was built from.
    point: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Static k-d tree for nearest-neighbour queries.
///
/// Neighbours at equal distance are ordered by their index in the input
/// slice, so queries are deterministic.
#[derive(Debug, Clone)]
pub struct KdTree {
    points: Vec<Centroid>,
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl KdTree {
    pub fn build(points: &[Centroid]) -> Self {
        let mut tree = Self {
            points: points.to_vec(),
            nodes: Vec::with_capacity(points.len()),
            root: None,
        };
        let mut order: Vec<usize> = (0..points.len()).collect();
        tree.root = tree.build_node(&mut order, 0);
        tree
    }

    fn build_node(&mut self, order: &mut [usize], depth: usize) -> Option<usize> {
        if order.is_empty() {
            return None;
        }
        let axis = depth % 2;
        let points = &self.points;
        order.sort_unstable_by_key(|&i| (coord(points[i], axis), i));

        let mid = order.len() / 2;
        let point = order[mid];
        let (lower, rest) = order.split_at_mut(mid);
        let upper = &mut rest[1..];

        let left = self.build_node(lower, depth + 1);
        let right = self.build_node(upper, depth + 1);

        self.nodes.push(Node {
            point,
            axis,
            left,
            right,
        });
        Some(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the point closest to `query`.
    pub fn nearest(&self, query: Centroid) -> Option<usize> {
        self.k_nearest(query, 1).first().copied()
    }

    /// Indices of the `k` closest points, closest first.
    pub fn k_nearest(&self, query: Centroid, k: usize) -> Vec<usize> {
        if k == 0 {
            return Vec::new();
        }
        let mut best = BinaryHeap::with_capacity(k + 1);
        if let Some(root) = self.root {
            self.search(root, query, k, &mut best);
        }
        best.into_sorted_vec().into_iter().map(|(_, i)| i).collect()
    }

    fn search(
        &self,
        node_idx: usize,
        query: Centroid,
        k: usize,
        best: &mut BinaryHeap<(i64, usize)>,
    ) {
        let node = &self.nodes[node_idx];
        let point = self.points[node.point];

        best.push((squared_distance(point, query), node.point));
        if best.len() > k {
            best.pop();
        }

        let diff = i64::from(coord(query, node.axis)) - i64::from(coord(point, node.axis));
        let (near, far) = if diff < 0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.search(near, query, k, best);
        }
        if let Some(far) = far {
            // Equal distances must still be visited so lower indices win ties.
            let worst = best.peek().map_or(i64::MAX, |&(d, _)| d);
            if best.len() < k || diff * diff <= worst {
                self.search(far, query, k, best);
            }
        }
    }
}

#[inline]
fn coord(p: Centroid, axis: usize) -> i32 {
    if axis == 0 { p.0 } else { p.1 }
}

#[inline]
fn squared_distance(a: Centroid, b: Centroid) -> i64 {
    let dx = i64::from(a.0) - i64::from(b.0);
    let dy = i64::from(a.1) - i64::from(b.1);
    dx * dx + dy * dy
}

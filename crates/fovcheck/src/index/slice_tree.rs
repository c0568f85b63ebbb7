//! Binary slice tree over longitude.
//!
//! Nodes live in one arena (`Vec<Node>`); a node holds its longitude bounds,
//! midpoint, and either children or a leaf candidate list. Splitting stops when
//! the candidate list is small enough (`max_leaf_edges`), the depth limit is
//! reached (`max_depth`), or the node is saturated: every candidate covers the
//! whole node width, so both children would get the same list.

use std::f64::consts::TAU;

use super::EdgeIndex;
use crate::polygon::Edge;

/// Split thresholds for [`SliceTree`].
///
/// Smaller `max_leaf_edges` and larger `max_depth` mean deeper lookups and
/// shorter leaf scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceTreeCfg {
    /// A node with at most this many candidates is a leaf.
    pub max_leaf_edges: usize,
    /// Nodes at this depth are leaves (root depth 0).
    pub max_depth: usize,
}

impl Default for SliceTreeCfg {
    fn default() -> Self {
        Self {
            max_leaf_edges: 4,
            max_depth: 16,
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    lo: f64,
    hi: f64,
    mid: f64,
    edges: Vec<usize>,
    children: Option<[usize; 2]>,
}

impl Node {
    fn new(lo: f64, hi: f64, edges: Vec<usize>) -> Self {
        Self {
            lo,
            hi,
            mid: 0.5 * (lo + hi),
            edges,
            children: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SliceTree {
    nodes: Vec<Node>,
    cfg: SliceTreeCfg,
    num_edges: usize,
}

impl SliceTree {
    pub fn build(edges: &[Edge], cfg: SliceTreeCfg) -> Self {
        let mut nodes = vec![Node::new(0.0, TAU, (0..edges.len()).collect())];
        let mut stack = vec![(0usize, 0usize)];
        while let Some((k, depth)) = stack.pop() {
            let node = &nodes[k];
            if node.edges.len() <= cfg.max_leaf_edges
                || depth >= cfg.max_depth
                || saturated(edges, node)
            {
                continue;
            }
            let (lo, mid, hi) = (node.lo, node.mid, node.hi);
            let parent = std::mem::take(&mut nodes[k].edges);
            let left: Vec<usize> = parent
                .iter()
                .copied()
                .filter(|&i| edges[i].overlaps(lo, mid))
                .collect();
            let right: Vec<usize> = parent
                .into_iter()
                .filter(|&i| edges[i].overlaps(mid, hi))
                .collect();
            let l = nodes.len();
            nodes.push(Node::new(lo, mid, left));
            nodes.push(Node::new(mid, hi, right));
            nodes[k].children = Some([l, l + 1]);
            stack.push((l, depth + 1));
            stack.push((l + 1, depth + 1));
        }
        let tree = Self {
            nodes,
            cfg,
            num_edges: edges.len(),
        };
        tracing::debug!(
            edges = edges.len(),
            nodes = tree.nodes.len(),
            leaves = tree.num_leaves(),
            depth = tree.depth(),
            "slice tree built"
        );
        tree
    }

    #[inline]
    pub fn cfg(&self) -> SliceTreeCfg {
        self.cfg
    }

    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.children.is_none()).count()
    }

    /// Longest leaf candidate list.
    pub fn max_leaf_len(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.children.is_none())
            .map(|n| n.edges.len())
            .max()
            .unwrap_or(0)
    }

    /// Depth of the deepest leaf (root only = 0).
    pub fn depth(&self) -> usize {
        let mut best = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((k, d)) = stack.pop() {
            best = best.max(d);
            if let Some([l, r]) = self.nodes[k].children {
                stack.push((l, d + 1));
                stack.push((r, d + 1));
            }
        }
        best
    }

    /// Longitude bounds of the leaf reached for `lon`.
    pub fn leaf_bounds(&self, lon: f64) -> (f64, f64) {
        let n = &self.nodes[self.leaf_of(lon)];
        (n.lo, n.hi)
    }

    #[inline]
    fn leaf_of(&self, lon: f64) -> usize {
        let mut k = 0;
        while let Some([l, r]) = self.nodes[k].children {
            k = if lon < self.nodes[k].mid { l } else { r };
        }
        k
    }
}

impl EdgeIndex for SliceTree {
    #[inline]
    fn candidates(&self, lon: f64) -> &[usize] {
        &self.nodes[self.leaf_of(lon)].edges
    }
    #[inline]
    fn num_edges(&self) -> usize {
        self.num_edges
    }
    fn name(&self) -> &'static str {
        "slice-tree"
    }
}

fn saturated(edges: &[Edge], node: &Node) -> bool {
    node.edges
        .iter()
        .all(|&i| edges[i].covers(node.lo, node.hi))
}

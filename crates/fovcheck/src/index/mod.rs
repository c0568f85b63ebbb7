//! Longitude-sliced edge indexes (polygon accelerators).
//!
//! Purpose
//! - Replace the per-query scan over all edges with a lookup that returns the
//!   few edges whose longitude span can contain the query longitude.
//!
//! Contract
//! - An index is built once from an edge array (`build`), then only read.
//!   There is no "not yet preprocessed" state: a value of an index type is
//!   always ready to answer.
//! - `candidates(lon)` returns a superset of the edges whose closed longitude
//!   span contains `lon`. Extra edges are harmless (the edge test re-checks
//!   bounds); a missing edge changes results.
//! - Indexes store edge indices only, never references into the polygon. A
//!   polygon hands its indexes out as `PolygonIndex`, stamped with its
//!   `FrameId`, and only takes back ones carrying that stamp.
//!
//! Code cross-refs: `polygon::Edge::{overlaps, covers}`, `SlicedPolygon::attach_accelerator`.

mod slice_array;
mod slice_tree;

pub use slice_array::SliceArray;
pub use slice_tree::{SliceTree, SliceTreeCfg};

use crate::polygon::Edge;

/// Lookup from query longitude to candidate edge indices.
pub trait EdgeIndex: std::fmt::Debug + Send + Sync {
    /// Indices of edges that may be crossed at longitude `lon` ∈ [0, 2π).
    fn candidates(&self, lon: f64) -> &[usize];
    /// Length of the edge array the index was built from.
    fn num_edges(&self) -> usize;
    /// Short name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Built-in accelerator choice for `SlicedPolygon::attach_accelerator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcceleratorKind {
    SliceArray,
    SliceTree(SliceTreeCfg),
}

impl AcceleratorKind {
    /// `SliceTree` with default thresholds.
    #[inline]
    pub fn slice_tree() -> Self {
        AcceleratorKind::SliceTree(SliceTreeCfg::default())
    }

    /// Build the index for `edges`.
    pub fn build(self, edges: &[Edge]) -> Box<dyn EdgeIndex> {
        match self {
            AcceleratorKind::SliceArray => Box::new(SliceArray::build(edges)),
            AcceleratorKind::SliceTree(cfg) => Box::new(SliceTree::build(edges, cfg)),
        }
    }
}

#[cfg(test)]
mod tests;

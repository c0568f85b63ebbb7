//! Sorted-boundary slice array.
//!
//! Slice boundaries are the sorted, deduplicated edge longitudes plus 0 and 2π
//! (0 stands in for the 2π sentinel of the first vertex). Every pair of
//! consecutive boundaries is one slice. Candidate lists are filled by recursive
//! bisection over boundary indices: the surviving edges of `[lo, hi]` are split
//! into those overlapping `[lo, mid]` and those overlapping `[mid, hi]`; an edge
//! may land in both halves. Lists are stored flattened (`offsets` + `members`).
//!
//! Cost: O(V log V + E log V) to build, O(log V) plus the slice list per query.

use std::f64::consts::TAU;

use super::EdgeIndex;
use crate::polygon::Edge;

#[derive(Clone, Debug)]
pub struct SliceArray {
    /// Slice boundaries, ascending; `breaks[0] = 0`, last = 2π.
    breaks: Vec<f64>,
    /// `members[offsets[k]..offsets[k + 1]]` are the candidates of slice `k`.
    offsets: Vec<usize>,
    members: Vec<usize>,
    num_edges: usize,
}

impl SliceArray {
    pub fn build(edges: &[Edge]) -> Self {
        let mut breaks: Vec<f64> = Vec::with_capacity(2 * edges.len() + 2);
        breaks.push(0.0);
        breaks.push(TAU);
        for e in edges {
            let (b1, b2) = e.bounds();
            breaks.push(b1);
            breaks.push(b2);
        }
        breaks.sort_by(f64::total_cmp);
        breaks.dedup();

        let num_slices = breaks.len() - 1;
        let mut lists: Vec<Vec<usize>> = vec![Vec::new(); num_slices];
        let all: Vec<usize> = (0..edges.len()).collect();
        bisect(edges, &breaks, 0, num_slices, all, &mut lists);

        let mut offsets = Vec::with_capacity(num_slices + 1);
        let mut members = Vec::with_capacity(lists.iter().map(Vec::len).sum());
        offsets.push(0);
        for list in lists {
            members.extend(list);
            offsets.push(members.len());
        }
        tracing::debug!(
            edges = edges.len(),
            slices = num_slices,
            members = members.len(),
            "slice array built"
        );
        Self {
            breaks,
            offsets,
            members,
            num_edges: edges.len(),
        }
    }

    #[inline]
    pub fn num_slices(&self) -> usize {
        self.breaks.len() - 1
    }

    /// Slice boundaries, ascending from 0 to 2π.
    #[inline]
    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    /// Slice `k` containing `lon`, i.e. `breaks[k] <= lon < breaks[k + 1]`.
    #[inline]
    pub fn slice_of(&self, lon: f64) -> usize {
        let k = self.breaks.partition_point(|&b| b <= lon);
        k.saturating_sub(1).min(self.num_slices() - 1)
    }

    #[inline]
    pub fn slice(&self, k: usize) -> &[usize] {
        &self.members[self.offsets[k]..self.offsets[k + 1]]
    }
}

impl EdgeIndex for SliceArray {
    #[inline]
    fn candidates(&self, lon: f64) -> &[usize] {
        self.slice(self.slice_of(lon))
    }
    #[inline]
    fn num_edges(&self) -> usize {
        self.num_edges
    }
    fn name(&self) -> &'static str {
        "slice-array"
    }
}

// Fill `out[lo..hi]` with the members of `cand` overlapping each slice.
fn bisect(
    edges: &[Edge],
    breaks: &[f64],
    lo: usize,
    hi: usize,
    cand: Vec<usize>,
    out: &mut [Vec<usize>],
) {
    if hi - lo == 1 {
        out[lo] = cand;
        return;
    }
    let mid = (lo + hi) / 2;
    let (a, m, b) = (breaks[lo], breaks[mid], breaks[hi]);
    let left: Vec<usize> = cand
        .iter()
        .copied()
        .filter(|&i| edges[i].overlaps(a, m))
        .collect();
    let right: Vec<usize> = cand
        .into_iter()
        .filter(|&i| edges[i].overlaps(m, b))
        .collect();
    bisect(edges, breaks, lo, mid, left, out);
    bisect(edges, breaks, mid, hi, right, out);
}

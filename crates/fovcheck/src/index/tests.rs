use super::*;
use crate::coords::ConeClock;
use crate::fov::regular_cap;
use crate::polygon::{LonBound, SlicedPolygon};
use crate::rand::{draw_star, ReplayToken, StarCfg, VertexCount};
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_4, TAU};

fn twelve_gon() -> SlicedPolygon {
    SlicedPolygon::from_cone_clock(&regular_cap(FRAC_PI_4, 12), ConeClock::new(0.0, 0.0)).unwrap()
}

fn bounded_at(edges: &[Edge], lon: f64) -> Vec<usize> {
    (0..edges.len())
        .filter(|&i| edges[i].bounds_point(lon) != LonBound::Outside)
        .collect()
}

fn assert_superset(index: &dyn EdgeIndex, edges: &[Edge], lon: f64) {
    let got = index.candidates(lon);
    for i in bounded_at(edges, lon) {
        assert!(
            got.contains(&i),
            "{} misses edge {i} at lon {lon}: {got:?}",
            index.name()
        );
    }
}

#[test]
fn slice_array_breaks_and_lookup() {
    let p = twelve_gon();
    let a = SliceArray::build(p.edges());
    assert_eq!(a.num_slices(), 12);
    let b = a.breaks();
    assert_eq!(b[0], 0.0);
    assert_eq!(*b.last().unwrap(), TAU);
    assert!(b.windows(2).all(|w| w[0] < w[1]));
    for k in 0..a.num_slices() {
        assert_eq!(a.slice_of(b[k]), k);
        assert_eq!(a.slice_of(0.5 * (b[k] + b[k + 1])), k);
    }
    assert_eq!(a.slice_of(TAU - 1e-12), a.num_slices() - 1);
    // one edge per slice interior, plus the neighbours that touch its ends
    let mid = a.candidates(0.5 * (b[3] + b[4]));
    assert!(mid.contains(&3));
    assert!(mid.len() <= 3);
}

#[test]
fn candidates_cover_bounded_edges_at_every_break() {
    let p = twelve_gon();
    let array = SliceArray::build(p.edges());
    let tree = SliceTree::build(p.edges(), SliceTreeCfg::default());
    for &lon in array.breaks().iter().filter(|&&b| b < TAU) {
        assert_superset(&array, p.edges(), lon);
        assert_superset(&tree, p.edges(), lon);
    }
}

#[test]
fn tree_root_only_when_thresholds_allow() {
    let p = twelve_gon();
    let wide = SliceTree::build(
        p.edges(),
        SliceTreeCfg {
            max_leaf_edges: 12,
            max_depth: 16,
        },
    );
    assert_eq!(wide.num_leaves(), 1);
    assert_eq!(wide.depth(), 0);
    assert_eq!(wide.candidates(1.0).len(), 12);

    let flat = SliceTree::build(
        p.edges(),
        SliceTreeCfg {
            max_leaf_edges: 0,
            max_depth: 0,
        },
    );
    assert_eq!(flat.num_leaves(), 1);
    assert_eq!(flat.leaf_bounds(3.0), (0.0, TAU));
}

#[test]
fn tree_respects_depth_and_leaf_size() {
    let p = twelve_gon();
    let t = SliceTree::build(p.edges(), SliceTreeCfg::default());
    assert!(t.depth() >= 2);
    assert!(t.depth() <= 16);
    assert!(t.max_leaf_len() <= 4);
    let shallow = SliceTree::build(
        p.edges(),
        SliceTreeCfg {
            max_leaf_edges: 1,
            max_depth: 3,
        },
    );
    assert_eq!(shallow.depth(), 3);
    assert_eq!(shallow.num_leaves(), 8);
    let (lo, hi) = shallow.leaf_bounds(0.1);
    assert_eq!((lo, hi), (0.0, TAU / 8.0));
}

#[test]
fn saturated_nodes_stop_splitting() {
    // With leaf size 0 only empty or saturated nodes stop early; without the
    // saturation rule every non-empty node would split down to max_depth.
    let p = twelve_gon();
    let t = SliceTree::build(
        p.edges(),
        SliceTreeCfg {
            max_leaf_edges: 0,
            max_depth: 16,
        },
    );
    assert_eq!(t.depth(), 16);
    assert!(t.num_leaves() < 2048, "leaves = {}", t.num_leaves());
    // away from any break the leaf holds just the one edge spanning it
    let (lo, hi) = t.leaf_bounds(0.8);
    assert!(p.edges()[1].covers(lo, hi));
    assert_eq!(t.candidates(0.8), &[1]);
}

#[test]
fn kind_builds_matching_index() {
    let p = twelve_gon();
    for kind in [AcceleratorKind::SliceArray, AcceleratorKind::slice_tree()] {
        let idx = kind.build(p.edges());
        assert_eq!(idx.num_edges(), 12);
    }
    assert_eq!(AcceleratorKind::SliceArray.build(p.edges()).name(), "slice-array");
    assert_eq!(AcceleratorKind::slice_tree().build(p.edges()).name(), "slice-tree");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn candidates_are_supersets(
        seed in any::<u64>(),
        cone in 0.0f64..3.0,
        clock in 0.0f64..6.28,
        lons in proptest::collection::vec(0.0f64..TAU, 32),
        leaf in 0usize..6,
        depth in 0usize..12,
    ) {
        let cfg = StarCfg {
            vertex_count: VertexCount::Uniform { min: 4, max: 60 },
            ..StarCfg::default()
        };
        let star = draw_star(cfg, ConeClock::new(cone, clock), ReplayToken::new(seed, 0));
        let p = star.polygon().unwrap();
        let edges = p.edges();
        let array = SliceArray::build(edges);
        let tree = SliceTree::build(edges, SliceTreeCfg { max_leaf_edges: leaf, max_depth: depth });
        prop_assert!(tree.depth() <= depth);
        let breaks: Vec<f64> = array.breaks().iter().copied().filter(|&b| b < TAU).collect();
        for lon in lons.into_iter().chain(breaks) {
            for index in [&array as &dyn EdgeIndex, &tree] {
                let got = index.candidates(lon);
                for i in bounded_at(edges, lon) {
                    prop_assert!(got.contains(&i), "{} lon {} edge {}", index.name(), lon, i);
                }
            }
        }
    }
}

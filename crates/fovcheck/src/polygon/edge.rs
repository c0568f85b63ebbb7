//! One great-circle arc of a polygon, expressed in the polygon's query frame.
//!
//! The crossing test is the spherical ray cast: the shooter runs from the
//! frame's +Z pole down the query's meridian to the query. An edge is crossed
//! iff its longitude span contains the query longitude and the edge's great
//! circle separates the shooter origin from the query.
//!
//! Longitude tie-break: a crossing is only counted on the half-open span
//! (western end included, eastern end excluded), so a vertex met by the shooter
//! counts once when its two edges lie on opposite sides of the meridian.

use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::coords::{clock_of, wrap_clock};

/// Result of testing one edge against one query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeHit {
    Miss,
    Crossed,
    /// The query lies on the edge (vertex or interior of the arc).
    OnEdge,
}

/// Where a longitude falls relative to an edge's closed longitude span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LonBound {
    Outside,
    /// Equal to the western end of the span.
    AtStart,
    Within,
    /// Equal to the eastern end of the span.
    AtEnd,
}

/// Great-circle arc `v1 → v2` in query-frame coordinates.
///
/// Invariants:
/// - `pole = v1 × v2` (not normalized).
/// - `bound1 <= bound2`, both in [0, 2π).
/// - The span is the arc's eastward sweep. `wraps` iff that sweep passes longitude 0;
///   the span is then `[bound2, 2π) ∪ [0, bound1]`.
/// - `shooter_dot = pole · Ẑ`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    v1: Vector3<f64>,
    v2: Vector3<f64>,
    pole: Vector3<f64>,
    bound1: f64,
    bound2: f64,
    wraps: bool,
    shooter_dot: f64,
}

impl Edge {
    /// Build from two consecutive vertices already rotated into the query frame.
    pub fn new(v1: Vector3<f64>, v2: Vector3<f64>) -> Self {
        let pole = v1.cross(&v2);
        let (l1, l2) = (endpoint_lon(&v1, &v2), endpoint_lon(&v2, &v1));
        let (bound1, bound2, wraps) = if runs_east(l1, l2, pole.z) {
            eastward_span(l1, l2)
        } else {
            eastward_span(l2, l1)
        };
        Self {
            v1,
            v2,
            pole,
            bound1,
            bound2,
            wraps,
            shooter_dot: pole.z,
        }
    }

    #[inline]
    pub fn endpoints(&self) -> (Vector3<f64>, Vector3<f64>) {
        (self.v1, self.v2)
    }
    #[inline]
    pub fn pole(&self) -> Vector3<f64> {
        self.pole
    }
    /// Endpoint longitudes, ascending.
    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        (self.bound1, self.bound2)
    }
    #[inline]
    pub fn wraps(&self) -> bool {
        self.wraps
    }
    #[inline]
    pub fn shooter_dot(&self) -> f64 {
        self.shooter_dot
    }

    /// Crossing test for query `q` (query frame) at longitude `lon`.
    #[inline]
    pub fn contains(&self, q: &Vector3<f64>, lon: f64) -> EdgeHit {
        let at = self.bounds_point(lon);
        if at == LonBound::Outside {
            return EdgeHit::Miss;
        }
        if *q == self.v1 || *q == self.v2 {
            return EdgeHit::OnEdge;
        }
        self.crosses_boundary(q, at)
    }

    /// Classify `lon` against the closed longitude span.
    #[inline]
    pub fn bounds_point(&self, lon: f64) -> LonBound {
        let (start, end) = if self.wraps {
            if lon > self.bound1 && lon < self.bound2 {
                return LonBound::Outside;
            }
            (self.bound2, self.bound1)
        } else {
            if lon < self.bound1 || lon > self.bound2 {
                return LonBound::Outside;
            }
            (self.bound1, self.bound2)
        };
        if lon == start {
            LonBound::AtStart
        } else if lon == end {
            LonBound::AtEnd
        } else {
            LonBound::Within
        }
    }

    /// Side test for a query whose longitude is already bounded by this edge.
    #[inline]
    pub fn crosses_boundary(&self, q: &Vector3<f64>, at: LonBound) -> EdgeHit {
        let d = q.dot(&self.pole);
        if d == 0.0 {
            return if self.spans(q) {
                EdgeHit::OnEdge
            } else {
                EdgeHit::Miss
            };
        }
        if at == LonBound::AtEnd {
            return EdgeHit::Miss;
        }
        let s = self.shooter_dot;
        if (d > 0.0 && s < 0.0) || (d < 0.0 && s > 0.0) {
            EdgeHit::Crossed
        } else {
            EdgeHit::Miss
        }
    }

    /// Does the closed span intersect `[lo, hi]`?
    #[inline]
    pub fn overlaps(&self, lo: f64, hi: f64) -> bool {
        if self.wraps {
            lo <= self.bound1 || hi >= self.bound2
        } else {
            self.bound1 <= hi && lo <= self.bound2
        }
    }

    /// Does the closed span contain all of `[lo, hi]`?
    #[inline]
    pub fn covers(&self, lo: f64, hi: f64) -> bool {
        if self.wraps {
            hi <= self.bound1 || lo >= self.bound2
        } else {
            self.bound1 <= lo && hi <= self.bound2
        }
    }

    /// Exact test: does `p` lie on this arc?
    pub fn lies_on(&self, p: &Vector3<f64>) -> bool {
        *p == self.v1 || *p == self.v2 || (p.dot(&self.pole) == 0.0 && self.spans(p))
    }

    // p is on the great circle; is it between v1 and v2 along the arc?
    #[inline]
    fn spans(&self, p: &Vector3<f64>) -> bool {
        if self.pole == Vector3::zeros() {
            return false;
        }
        self.v1.cross(p).dot(&self.pole) >= 0.0 && p.cross(&self.v2).dot(&self.pole) >= 0.0
    }
}

// Does the arc sweep eastward (counter-clockwise about +Z) from v1 to v2?
//
// With endpoint longitudes about π apart the arc passes close to a frame pole and
// the longitudes alone cannot tell on which side; the sign of `pole.z` can. Away
// from that, the short way round is exact and is immune to the rounding noise
// `pole.z` picks up on edges that lie along one meridian.
#[inline]
fn runs_east(l1: f64, l2: f64, pole_z: f64) -> bool {
    let sweep = wrap_clock(l2 - l1);
    if pole_z != 0.0 && (sweep - PI).abs() < FRAC_PI_2 {
        pole_z > 0.0
    } else {
        sweep < PI
    }
}

// (bound1, bound2, wraps) for the span running east from `west` to `east`.
#[inline]
fn eastward_span(west: f64, east: f64) -> (f64, f64, bool) {
    if west <= east {
        (west, east, false)
    } else {
        (east, west, true)
    }
}

// An endpoint sitting on a frame pole takes the other endpoint's longitude:
// the arc leaves the pole along that meridian.
#[inline]
fn endpoint_lon(v: &Vector3<f64>, other: &Vector3<f64>) -> f64 {
    if v.x == 0.0 && v.y == 0.0 {
        clock_of(other)
    } else {
        let lon = clock_of(v);
        debug_assert!((0.0..TAU).contains(&lon));
        lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::spherical_to_cartesian;
    use std::f64::consts::{FRAC_PI_4, FRAC_PI_6};

    fn cap_edge(cone: f64, from: f64, to: f64) -> Edge {
        Edge::new(
            spherical_to_cartesian(cone, from),
            spherical_to_cartesian(cone, to),
        )
    }

    #[test]
    fn bounds_sorted_and_shooter_dot_cached() {
        let e = cap_edge(FRAC_PI_4, 1.0, 0.5);
        let (b1, b2) = e.bounds();
        assert!((b1 - 0.5).abs() < 1e-15 && (b2 - 1.0).abs() < 1e-15);
        assert!(!e.wraps());
        // clockwise about +Z → negative shooter dot
        assert!(e.shooter_dot() < 0.0);
        assert_eq!(e.shooter_dot(), e.pole().z);
    }

    #[test]
    fn wrapping_span_through_zero() {
        let e = cap_edge(FRAC_PI_4, 11.0 * FRAC_PI_6, 0.0);
        assert!(e.wraps());
        assert_eq!(e.bounds_point(0.0), LonBound::AtEnd);
        assert_eq!(e.bounds_point(11.0 * FRAC_PI_6 + 0.1), LonBound::Within);
        assert_eq!(e.bounds_point(PI), LonBound::Outside);
        let (_, b2) = e.bounds();
        assert_eq!(e.bounds_point(b2), LonBound::AtStart);
    }

    #[test]
    fn crossing_only_beyond_the_arc() {
        let e = cap_edge(FRAC_PI_4, 0.0, FRAC_PI_6);
        let lon = 0.2;
        let near = spherical_to_cartesian(0.3, lon);
        let far = spherical_to_cartesian(1.2, lon);
        assert_eq!(e.contains(&near, lon), EdgeHit::Miss);
        assert_eq!(e.contains(&far, lon), EdgeHit::Crossed);
        // outside the span: never crossed
        let beside = spherical_to_cartesian(1.2, 1.0);
        assert_eq!(e.contains(&beside, 1.0), EdgeHit::Miss);
    }

    #[test]
    fn eastern_end_never_counts() {
        let e = cap_edge(FRAC_PI_4, 0.0, FRAC_PI_6);
        let (_, b2) = e.bounds();
        let far = spherical_to_cartesian(1.2, b2);
        assert_eq!(e.contains(&far, b2), EdgeHit::Miss);
        let far0 = spherical_to_cartesian(1.2, 0.0);
        assert_eq!(e.contains(&far0, 0.0), EdgeHit::Crossed);
    }

    #[test]
    fn vertex_and_arc_points_are_on_edge() {
        let v1 = spherical_to_cartesian(FRAC_PI_4, 0.0);
        let v2 = spherical_to_cartesian(FRAC_PI_4, FRAC_PI_6);
        let e = Edge::new(v1, v2);
        assert_eq!(e.contains(&v1, 0.0), EdgeHit::OnEdge);
        assert_eq!(e.contains(&v2, clock_of(&v2)), EdgeHit::OnEdge);
        assert!(e.lies_on(&v1));
        assert!(!e.lies_on(&-v1));
        assert!(!e.lies_on(&Vector3::z()));
    }

    #[test]
    fn meridian_edge_never_counts() {
        // Both endpoints on clock 0: the great circle passes through the frame poles.
        let e = Edge::new(spherical_to_cartesian(0.5, 0.0), spherical_to_cartesian(1.0, 0.0));
        assert_eq!(e.shooter_dot(), 0.0);
        assert_eq!(e.bounds(), (0.0, 0.0));
        let beyond = spherical_to_cartesian(2.0, 0.0);
        assert_eq!(e.contains(&beyond, 0.0), EdgeHit::Miss);
        let on = spherical_to_cartesian(0.75, 0.0);
        assert_eq!(e.contains(&on, 0.0), EdgeHit::OnEdge);
    }

    #[test]
    fn pole_endpoint_takes_neighbor_longitude() {
        let e = Edge::new(spherical_to_cartesian(FRAC_PI_2, 2.0), -Vector3::z());
        let (b1, b2) = e.bounds();
        assert!((b1 - 2.0).abs() < 1e-15 && (b2 - 2.0).abs() < 1e-15);
        assert!(e.lies_on(&-Vector3::z()));
        assert_eq!(e.contains(&-Vector3::z(), b1), EdgeHit::OnEdge);
    }

    #[test]
    fn half_turn_arc_follows_its_pole() {
        // sin(π) is not 0: the arc passes −Z on its +Y side, sweeping [0, π].
        let a = spherical_to_cartesian(FRAC_PI_2, 0.0);
        let b = spherical_to_cartesian(2.5, PI);
        for e in [Edge::new(a, b), Edge::new(b, a)] {
            assert!(!e.wraps());
            let (b1, b2) = e.bounds();
            assert_eq!(b1, 0.0);
            assert!((b2 - PI).abs() < 1e-15);
            assert_eq!(e.bounds_point(3.0 * FRAC_PI_2), LonBound::Outside);
            let q = spherical_to_cartesian(0.3, 3.0 * FRAC_PI_2);
            assert_eq!(e.contains(&q, 3.0 * FRAC_PI_2), EdgeHit::Miss);
        }
        assert!(Edge::new(a, b).shooter_dot() > 0.0);
        // Everything above the arc stays uncrossed on the swept side too.
        let e = Edge::new(a, b);
        let q = spherical_to_cartesian(2.0, FRAC_PI_2);
        assert_eq!(e.contains(&q, FRAC_PI_2), EdgeHit::Miss);
    }

    #[test]
    fn half_turn_arc_near_the_interior_pole() {
        // Same longitudes, but the arc passes +Z on its −Y side: every query on the
        // swept side lies beyond it.
        let a = spherical_to_cartesian(FRAC_PI_2, 0.0);
        let b = Vector3::new(-0.5, -1e-17, 0.8).normalize();
        let e = Edge::new(a, b);
        assert!(e.shooter_dot() < 0.0);
        assert!(e.wraps());
        let lon = 3.0 * FRAC_PI_2;
        assert_eq!(e.bounds_point(lon), LonBound::Within);
        let q = spherical_to_cartesian(1.0, lon);
        assert_eq!(e.contains(&q, lon), EdgeHit::Crossed);
        assert_eq!(e.bounds_point(FRAC_PI_2), LonBound::Outside);
    }

    #[test]
    fn meridian_rounding_keeps_a_narrow_span() {
        for clock in [0.3, 1.0, 2.0, 4.0, 5.5] {
            let e = Edge::new(
                spherical_to_cartesian(0.5, clock),
                spherical_to_cartesian(1.4, clock),
            );
            let (b1, b2) = e.bounds();
            assert!(!e.wraps(), "clock {clock}");
            assert!(b2 - b1 < 1e-12, "clock {clock}");
        }
    }

    #[test]
    fn overlap_and_cover_respect_wrap() {
        let plain = cap_edge(FRAC_PI_4, 1.0, 2.0);
        assert!(plain.overlaps(0.0, 1.1));
        assert!(plain.overlaps(1.5, 1.6));
        assert!(!plain.overlaps(2.1, 3.0));
        assert!(plain.covers(1.2, 1.8));
        assert!(!plain.covers(0.5, 1.5));

        let wrap = cap_edge(FRAC_PI_4, 6.0, 0.5);
        assert!(wrap.wraps());
        assert!(wrap.overlaps(0.0, 0.1));
        assert!(wrap.overlaps(6.1, TAU));
        assert!(!wrap.overlaps(1.0, 5.0));
        assert!(wrap.covers(0.0, 0.4));
        assert!(wrap.covers(6.1, TAU));
        assert!(!wrap.covers(0.0, 1.0));
    }
}

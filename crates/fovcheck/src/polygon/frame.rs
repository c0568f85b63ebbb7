//! Query-frame construction and frame-tagged query points.

use nalgebra::{Matrix3, Vector3};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::clock_of;

/// Below this norm the interior × first-vertex product is treated as zero.
pub const FRAME_EPS: f64 = 1e-12;

/// Rotation `QI` into the query frame of `interior`.
///
/// Rows are the frame axes in original coordinates:
/// `Z = interior`, `Y = normalize(interior × first_vertex)`, `X = Y × Z`.
/// Returns `None` when `interior` is zero or parallel to `first_vertex`.
pub fn query_frame(interior: &Vector3<f64>, first_vertex: &Vector3<f64>) -> Option<Matrix3<f64>> {
    let z = interior.try_normalize(0.0)?;
    let y = z.cross(first_vertex).try_normalize(FRAME_EPS)?;
    let x = y.cross(&z);
    Some(Matrix3::from_rows(&[
        x.transpose(),
        y.transpose(),
        z.transpose(),
    ]))
}

/// Identifier stamped on every query point produced by a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub(crate) u64);

impl FrameId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A direction already rotated into one polygon's query frame, with its longitude.
///
/// Only a polygon can create one (`SlicedPolygon::to_query_frame`), so a
/// `QueryPoint` is never mistaken for an unrotated direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryPoint {
    v: Vector3<f64>,
    lon: f64,
    frame: FrameId,
}

impl QueryPoint {
    #[inline]
    pub(crate) fn in_frame(v: Vector3<f64>, frame: FrameId) -> Self {
        Self {
            v,
            lon: clock_of(&v),
            frame,
        }
    }
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.v
    }
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }
    #[inline]
    pub fn frame(&self) -> FrameId {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::spherical_to_cartesian;

    #[test]
    fn frame_is_orthonormal_and_centers_interior() {
        let p = spherical_to_cartesian(0.7, 2.1);
        let v0 = spherical_to_cartesian(1.1, 2.9);
        let qi = query_frame(&p, &v0).expect("frame");
        assert!((qi * qi.transpose() - Matrix3::identity()).norm() < 1e-12);
        assert!((qi.determinant() - 1.0).abs() < 1e-12);
        assert!((qi * p - Vector3::z()).norm() < 1e-12);
        // first vertex lands on longitude 0
        let w = qi * v0;
        assert!(w.y.abs() < 1e-12 && w.x > 0.0);
    }

    #[test]
    fn identity_for_north_pole_interior() {
        let qi = query_frame(&Vector3::z(), &spherical_to_cartesian(0.5, 0.0)).unwrap();
        assert!((qi - Matrix3::identity()).norm() < 1e-15);
    }

    #[test]
    fn parallel_inputs_have_no_frame() {
        let p = spherical_to_cartesian(0.3, 0.4);
        assert!(query_frame(&p, &p).is_none());
        assert!(query_frame(&p, &-p).is_none());
        assert!(query_frame(&Vector3::zeros(), &p).is_none());
    }

    #[test]
    fn frame_ids_are_unique() {
        assert_ne!(FrameId::fresh(), FrameId::fresh());
    }
}

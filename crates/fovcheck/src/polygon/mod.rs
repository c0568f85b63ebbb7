//! Spherical polygons and the shooter crossing test.
//!
//! Purpose
//! - Classify directions as inside, outside, or on the boundary of a closed
//!   spherical polygon whose edges are great-circle arcs.
//!
//! Model
//! - The caller supplies one interior point. It becomes +Z of the query frame,
//!   the first vertex fixes +X, and every vertex and query is rotated into that
//!   frame once.
//! - A query is inside iff the arc from +Z down its meridian crosses the
//!   boundary an even number of times. Any edge reporting the query on itself
//!   ends the scan with `OnBoundary`.
//! - An optional `EdgeIndex` narrows the scan to the edges whose longitude span
//!   can contain the query longitude; results are identical to the full scan.
//!
//! Code cross-refs: `edge::Edge`, `frame::query_frame`, `crate::index`.

mod edge;
mod frame;
mod sliced;

pub use edge::{Edge, EdgeHit, LonBound};
pub use frame::{query_frame, FrameId, QueryPoint, FRAME_EPS};
pub use sliced::{Containment, Crossings, PolygonBuilder, PolygonIndex, SlicedPolygon};

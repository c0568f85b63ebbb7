//! Spherical point-in-polygon classification for sensor fields of view.
//!
//! Cross-refs live in doc comments; module docs carry the model and conventions.
//!
//! Layout
//! - `coords`: (cone, clock) ↔ unit vector, clock wrapping, rotations.
//! - `polygon`: `SlicedPolygon`, its query frame, and the per-edge crossing test.
//! - `index`: longitude-sliced accelerators (`SliceArray`, `SliceTree`).
//! - `fov`: a footprint polygon mounted on a body via a body→sensor rotation.
//! - `rand`: deterministic star-shaped footprints and random directions.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.

pub mod coords;
pub mod error;
pub mod fov;
pub mod index;
pub mod polygon;
pub mod rand;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use coords::ConeClock;
pub use error::PolygonError;
pub use fov::FieldOfView;
pub use index::{AcceleratorKind, EdgeIndex, SliceArray, SliceTree, SliceTreeCfg};
pub use nalgebra::{Matrix3 as Mat3, Vector3 as Vec3};
pub use polygon::{Containment, Crossings, PolygonIndex, QueryPoint, SlicedPolygon};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::coords::{cartesian_to_spherical, spherical_to_cartesian, ConeClock};
    pub use crate::fov::{regular_cap, FieldOfView};
    pub use crate::index::{AcceleratorKind, EdgeIndex, SliceTreeCfg};
    pub use crate::polygon::{Containment, Crossings, PolygonBuilder, QueryPoint, SlicedPolygon};
    pub use crate::rand::{draw_star, random_directions, ReplayToken, StarCfg, VertexCount};
    pub use crate::PolygonError;
    pub use nalgebra::{Matrix3 as Mat3, Vector3 as Vec3};
}

//! `SlicedPolygon`: vertex ring, query frame, edges, optional edge index.

use nalgebra::{Matrix3, Vector3};
use rayon::prelude::*;

use super::edge::{Edge, EdgeHit};
use super::frame::{query_frame, FrameId, QueryPoint};
use crate::coords::{clock_of, latitude_of, ConeClock};
use crate::error::PolygonError;
use crate::index::{AcceleratorKind, EdgeIndex};

/// Classification of a query direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    Inside,
    Outside,
    /// Exactly on a vertex or edge. Callers must treat this as a third outcome.
    OnBoundary,
}

impl Containment {
    #[inline]
    pub fn is_inside(self) -> bool {
        matches!(self, Containment::Inside)
    }
    #[inline]
    pub fn is_boundary(self) -> bool {
        matches!(self, Containment::OnBoundary)
    }
    pub fn as_str(self) -> &'static str {
        match self {
            Containment::Inside => "inside",
            Containment::Outside => "outside",
            Containment::OnBoundary => "boundary",
        }
    }
}

impl std::fmt::Display for Containment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shooter crossing tally for one query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossings {
    Count(usize),
    Boundary,
}

impl Crossings {
    /// Parity rule: even → inside, odd → outside.
    #[inline]
    pub fn containment(self) -> Containment {
        match self {
            Crossings::Count(n) if n % 2 == 0 => Containment::Inside,
            Crossings::Count(_) => Containment::Outside,
            Crossings::Boundary => Containment::OnBoundary,
        }
    }
}

/// Closed spherical polygon with a known interior point.
///
/// Invariants:
/// - `vertices` is a closed ring (first = last) of unit vectors, len ≥ 2.
/// - `framed[i] = qi * vertices[i]`; `edges[i]` joins `framed[i]` and `framed[i + 1]`.
/// - `qi` maps the interior point to +Z and never changes after construction.
/// - An attached index was built from exactly these edges: it carries this
///   polygon's `FrameId`.
#[derive(Debug)]
pub struct SlicedPolygon {
    vertices: Vec<Vector3<f64>>,
    interior: Vector3<f64>,
    qi: Matrix3<f64>,
    framed: Vec<Vector3<f64>>,
    lon: Vec<f64>,
    lat: Vec<f64>,
    edges: Vec<Edge>,
    interior_on_boundary: bool,
    frame: FrameId,
    index: Option<Box<dyn EdgeIndex>>,
}

impl SlicedPolygon {
    /// Build from unit vectors. An open ring is closed by repeating the first vertex.
    pub fn new(vertices: &[Vector3<f64>], interior: Vector3<f64>) -> Result<Self, PolygonError> {
        Self::builder().vertices(vertices).interior(interior).build()
    }

    /// Build from (cone, clock) pairs.
    pub fn from_cone_clock(
        vertices: &[ConeClock],
        interior: ConeClock,
    ) -> Result<Self, PolygonError> {
        Self::builder()
            .cone_clock_vertices(vertices)
            .interior(interior.to_unit())
            .build()
    }

    pub fn builder() -> PolygonBuilder {
        PolygonBuilder::default()
    }

    fn assemble(raw: &[Vector3<f64>], interior: &Vector3<f64>) -> Result<Self, PolygonError> {
        if raw.len() < 2 {
            return Err(PolygonError::TooFewVertices(raw.len()));
        }
        let mut vertices = raw
            .iter()
            .enumerate()
            .map(|(i, v)| unit(v).ok_or(PolygonError::InvalidVertex(i)))
            .collect::<Result<Vec<_>, _>>()?;
        if vertices.first() != vertices.last() {
            vertices.push(vertices[0]);
        }
        let interior = unit(interior).ok_or(PolygonError::InvalidInteriorPoint)?;
        let qi = query_frame(&interior, &vertices[0]).ok_or(PolygonError::DegenerateFrame)?;

        let framed: Vec<Vector3<f64>> = vertices.iter().map(|v| qi * v).collect();
        let lon = framed.iter().map(clock_of).collect();
        let lat = framed.iter().map(latitude_of).collect();
        let edges: Vec<Edge> = framed.windows(2).map(|w| Edge::new(w[0], w[1])).collect();

        let shooter = qi * interior;
        let interior_on_boundary = edges.iter().any(|e| e.lies_on(&shooter));
        if interior_on_boundary {
            tracing::warn!(
                edges = edges.len(),
                "interior point lies on the polygon boundary; every query classifies as boundary"
            );
        }
        Ok(Self {
            vertices,
            interior,
            qi,
            framed,
            lon,
            lat,
            edges,
            interior_on_boundary,
            frame: FrameId::fresh(),
            index: None,
        })
    }

    /// Build one of the built-in indexes over this polygon's edges without attaching it.
    pub fn build_index(&self, kind: AcceleratorKind) -> PolygonIndex {
        PolygonIndex {
            frame: self.frame,
            index: kind.build(&self.edges),
        }
    }

    /// Build and attach one of the built-in indexes, replacing any attached one.
    pub fn attach_accelerator(&mut self, kind: AcceleratorKind) {
        let index = kind.build(&self.edges);
        tracing::debug!(index = index.name(), edges = self.edges.len(), "accelerator attached");
        self.index = Some(index);
    }

    /// Attach an index from [`build_index`](Self::build_index) or
    /// [`detach_accelerator`](Self::detach_accelerator), replacing any attached one.
    ///
    /// Fails with `IndexMismatch` when the index was built for another polygon.
    pub fn attach_index(&mut self, index: PolygonIndex) -> Result<(), PolygonError> {
        if index.frame != self.frame {
            return Err(PolygonError::IndexMismatch {
                expected: self.frame.get(),
                found: index.frame.get(),
            });
        }
        self.index = Some(index.index);
        Ok(())
    }

    pub fn detach_accelerator(&mut self) -> Option<PolygonIndex> {
        let frame = self.frame;
        self.index.take().map(|index| PolygonIndex { frame, index })
    }

    #[inline]
    pub fn accelerator(&self) -> Option<&dyn EdgeIndex> {
        self.index.as_deref()
    }

    /// Rotate `p` into the query frame and stamp it with this polygon's frame.
    #[inline]
    pub fn to_query_frame(&self, p: &Vector3<f64>) -> QueryPoint {
        QueryPoint::in_frame(self.qi * unit_or_raw(p), self.frame)
    }

    /// Crossing tally for direction `p` (original frame).
    pub fn num_crossings(&self, p: &Vector3<f64>) -> Crossings {
        let q = self.to_query_frame(p);
        self.tally(&q.vector(), q.lon())
    }

    /// Crossing tally for a point already in this polygon's query frame.
    pub fn num_crossings_framed(&self, q: &QueryPoint) -> Result<Crossings, PolygonError> {
        self.check_frame(q)?;
        Ok(self.tally(&q.vector(), q.lon()))
    }

    /// Inside / outside / boundary for direction `p` (original frame).
    #[inline]
    pub fn contains(&self, p: &Vector3<f64>) -> Containment {
        self.num_crossings(p).containment()
    }

    #[inline]
    pub fn contains_cone_clock(&self, a: ConeClock) -> Containment {
        self.contains(&a.to_unit())
    }

    pub fn contains_framed(&self, q: &QueryPoint) -> Result<Containment, PolygonError> {
        Ok(self.num_crossings_framed(q)?.containment())
    }

    /// Classify direction `p` given in a frame that `m` maps into the query frame
    /// (`m = QI · R` for a caller rotation `R` into the polygon's original frame).
    #[inline]
    pub(crate) fn contains_via(&self, m: &Matrix3<f64>, p: &Vector3<f64>) -> Containment {
        let v = m * unit_or_raw(p);
        self.tally(&v, clock_of(&v)).containment()
    }

    /// Element-wise `contains`; output has the input's length and order.
    pub fn contains_many(&self, ps: &[Vector3<f64>]) -> Vec<Containment> {
        ps.iter().map(|p| self.contains(p)).collect()
    }

    /// Parallel `contains_many`; identical results.
    pub fn par_contains_many(&self, ps: &[Vector3<f64>]) -> Vec<Containment> {
        ps.par_iter().map(|p| self.contains(p)).collect()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
    /// Closed vertex ring in the original frame (unit vectors).
    #[inline]
    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }
    /// Closed vertex ring in the query frame.
    #[inline]
    pub fn framed_vertices(&self) -> &[Vector3<f64>] {
        &self.framed
    }
    /// Per-vertex longitude in the query frame, [0, 2π).
    #[inline]
    pub fn longitudes(&self) -> &[f64] {
        &self.lon
    }
    /// Per-vertex latitude in the query frame, [−π/2, π/2].
    #[inline]
    pub fn latitudes(&self) -> &[f64] {
        &self.lat
    }
    /// Rotation `QI` from the original frame into the query frame.
    #[inline]
    pub fn rotation(&self) -> &Matrix3<f64> {
        &self.qi
    }
    #[inline]
    pub fn interior(&self) -> Vector3<f64> {
        self.interior
    }
    #[inline]
    pub fn frame_id(&self) -> FrameId {
        self.frame
    }
    #[inline]
    pub fn interior_on_boundary(&self) -> bool {
        self.interior_on_boundary
    }

    fn check_frame(&self, q: &QueryPoint) -> Result<(), PolygonError> {
        if q.frame() != self.frame {
            return Err(PolygonError::ForeignFrame {
                expected: self.frame.get(),
                found: q.frame().get(),
            });
        }
        Ok(())
    }

    fn tally(&self, q: &Vector3<f64>, lon: f64) -> Crossings {
        if self.interior_on_boundary {
            return Crossings::Boundary;
        }
        // Longitude is meaningless at the frame poles; check the whole ring.
        if q.x == 0.0 && q.y == 0.0 && self.edges.iter().any(|e| e.lies_on(q)) {
            return Crossings::Boundary;
        }
        match &self.index {
            Some(index) => sum_hits(
                index.candidates(lon).iter().map(|&i| &self.edges[i]),
                q,
                lon,
            ),
            None => sum_hits(self.edges.iter(), q, lon),
        }
    }
}

/// An edge index stamped with the frame of the polygon it was built from.
///
/// Only a polygon hands these out, so [`SlicedPolygon::attach_index`] can reject
/// one that belongs to a different polygon.
#[derive(Debug)]
pub struct PolygonIndex {
    frame: FrameId,
    index: Box<dyn EdgeIndex>,
}

impl PolygonIndex {
    #[inline]
    pub fn frame(&self) -> FrameId {
        self.frame
    }
    #[inline]
    pub fn index(&self) -> &dyn EdgeIndex {
        self.index.as_ref()
    }
}

fn sum_hits<'a>(edges: impl Iterator<Item = &'a Edge>, q: &Vector3<f64>, lon: f64) -> Crossings {
    let mut n = 0;
    for e in edges {
        match e.contains(q, lon) {
            EdgeHit::Miss => {}
            EdgeHit::Crossed => n += 1,
            EdgeHit::OnEdge => return Crossings::Boundary,
        }
    }
    Crossings::Count(n)
}

#[inline]
fn unit(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    if !v.iter().all(|c| c.is_finite()) {
        return None;
    }
    v.try_normalize(0.0)
}

// Queries are normalized like vertices so a query equal to a vertex stays bit-identical.
#[inline]
fn unit_or_raw(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(0.0).unwrap_or(*v)
}

/// Builder for [`SlicedPolygon`].
#[derive(Clone, Debug, Default)]
pub struct PolygonBuilder {
    vertices: Vec<Vector3<f64>>,
    interior: Option<Vector3<f64>>,
    accelerator: Option<AcceleratorKind>,
}

impl PolygonBuilder {
    pub fn vertices(mut self, vertices: &[Vector3<f64>]) -> Self {
        self.vertices = vertices.to_vec();
        self
    }
    pub fn cone_clock_vertices(mut self, vertices: &[ConeClock]) -> Self {
        self.vertices = vertices.iter().map(|a| a.to_unit()).collect();
        self
    }
    pub fn interior(mut self, interior: Vector3<f64>) -> Self {
        self.interior = Some(interior);
        self
    }
    pub fn accelerator(mut self, kind: AcceleratorKind) -> Self {
        self.accelerator = Some(kind);
        self
    }
    pub fn build(self) -> Result<SlicedPolygon, PolygonError> {
        let interior = self.interior.ok_or(PolygonError::MissingInteriorPoint)?;
        let mut poly = SlicedPolygon::assemble(&self.vertices, &interior)?;
        if let Some(kind) = self.accelerator {
            poly.attach_accelerator(kind);
        }
        Ok(poly)
    }
}

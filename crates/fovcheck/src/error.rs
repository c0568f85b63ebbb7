//! Error types for polygon construction and frame-checked queries.

/// Errors raised while building a polygon or when a query violates a precondition.
///
/// Boundary hits are not errors; they surface as
/// [`Containment::OnBoundary`](crate::Containment::OnBoundary).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PolygonError {
    /// The vertex ring has fewer than two vertices.
    #[error("polygon needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    /// The builder was finished without an interior point.
    #[error("no interior point supplied")]
    MissingInteriorPoint,

    /// A vertex is the zero vector or has non-finite components.
    #[error("vertex {0} is not a finite non-zero direction")]
    InvalidVertex(usize),

    /// The interior point is the zero vector or has non-finite components.
    #[error("interior point is not a finite non-zero direction")]
    InvalidInteriorPoint,

    /// The interior point is parallel to the first vertex, so the query frame has no +Y axis.
    #[error("interior point is parallel to the first vertex; query frame is undefined")]
    DegenerateFrame,

    /// A frame-tagged query point was produced by a different polygon.
    #[error("query point belongs to frame {found}, polygon uses frame {expected}")]
    ForeignFrame {
        /// Frame of the polygon being queried.
        expected: u64,
        /// Frame stamped on the query point.
        found: u64,
    },

    /// An edge index was built from another polygon's edges.
    #[error("edge index belongs to frame {found}, polygon uses frame {expected}")]
    IndexMismatch {
        /// Frame of the polygon the index is attached to.
        expected: u64,
        /// Frame stamped on the index.
        found: u64,
    },
}

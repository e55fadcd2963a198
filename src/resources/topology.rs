//! Geometry Topology Records
//!
//! Topology is split off from geometry data so several instances can draw
//! the same vertex buffers with different primitive interpretations, and so
//! the buffers themselves stay freely shareable.

/// How a backend assembles primitives from a vertex/index stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    #[default]
    TriangleList,
    TriangleStrip,
}

/// A geometry-topology resource record.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryTopologyRecord {
    pub topology: PrimitiveTopology,
    /// Draw with the index buffer rather than raw vertex order.
    pub indexed: bool,
}

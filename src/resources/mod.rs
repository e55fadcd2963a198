//! Core resource definitions
//!
//! Everything a drawable composes into an instance, with no GPU dependency:
//! - `pool` / `table`: handle identity and record ownership
//! - `geometry`: vertex/index data records with the two-phase lifecycle
//! - `topology`: primitive assembly records
//! - `appearance`: shader template + texture reference records
//! - `transform`: model matrix records
//! - `render_state`: depth/blend/line-width records
//! - `primitives`: procedural mesh generators for the quadric drawables

pub mod appearance;
pub mod geometry;
pub mod pool;
pub mod primitives;
pub mod render_state;
pub mod table;
pub mod topology;
pub mod transform;

use slotmap::new_key_type;

new_key_type! {
    /// Handle to a geometry-data record.
    pub struct GeometryDataHandle;
    /// Handle to a geometry-topology record.
    pub struct GeometryTopologyHandle;
    /// Handle to an appearance record.
    pub struct AppearanceHandle;
    /// Handle to a spatial-transform record.
    pub struct SpatialTransformHandle;
    /// Handle to a render-state record.
    pub struct RenderStateHandle;
}

pub use appearance::{AppearanceRecord, ShaderTemplate};
pub use geometry::{
    AttributeSet, GeometryDataDescriptor, GeometryDataRecord, INDEX_STRIDE, VertexAttribute,
};
pub use pool::IdPool;
pub use render_state::{BlendMode, RenderStateRecord};
pub use table::ResourceTable;
pub use topology::{GeometryTopologyRecord, PrimitiveTopology};
pub use transform::SpatialTransformRecord;

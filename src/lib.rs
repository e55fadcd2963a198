//! # strata
//!
//! A retained-mode scene resource layer sitting above a low-level graphics
//! API. Drawable objects describe geometry, appearance, spatial transform
//! and render state through small opaque handles; this crate mints and
//! recycles those handles, composes them into instances and collections,
//! and drives the create → finalize → dispose lifecycle so no GPU resource
//! dangles or leaks. The actual device lives behind the
//! [`RenderBackend`](renderer::RenderBackend) trait.

pub mod errors;
pub mod renderer;
pub mod resources;
pub mod scene;

pub use errors::{ResourceKind, Result, SceneError};
pub use renderer::{
    CollectionHandle, CollectionInfo, ContextId, InstanceHandle, InstanceInfo, NullBackend,
    RenderBackend, ResourceManager, SceneLimits, TextureId, ViewId,
};
pub use resources::{
    AppearanceHandle, AppearanceRecord, AttributeSet, BlendMode, GeometryDataDescriptor,
    GeometryDataHandle, GeometryTopologyHandle, GeometryTopologyRecord, PrimitiveTopology,
    RenderStateHandle, RenderStateRecord, ShaderTemplate, SpatialTransformHandle,
    VertexAttribute,
};
pub use scene::{
    BoundingBox, Drawable, DrawableState, DrawableType, GridDrawable, MultiQuadricDrawable,
    QuadricDrawable, QuadricShape, TriadDrawable, VolumeSliceDrawable,
};

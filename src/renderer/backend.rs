//! Render Backend Seam
//!
//! The actual graphics device (Vulkan, Metal, a test recorder) lives behind
//! [`RenderBackend`]. The resource manager owns the authoritative records
//! and notifies the backend as resources move through their lifecycle; the
//! backend mirrors them into GPU objects however it likes. Every method has
//! a no-op default so a backend only implements the notifications it cares
//! about, and [`NullBackend`] runs the whole layer headless.
//!
//! All calls are synchronous with respect to the caller. Any asynchronous
//! GPU transfer is the backend's responsibility behind this interface.

use std::ops::Range;

use crate::renderer::collection::{CollectionHandle, InstanceBinding};
use crate::resources::{
    AppearanceHandle, AppearanceRecord, GeometryDataHandle, GeometryDataRecord,
    GeometryTopologyHandle, GeometryTopologyRecord, RenderStateHandle, RenderStateRecord,
    SpatialTransformHandle, SpatialTransformRecord, VertexAttribute,
};

/// Opaque id of a view owned by the external scene layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// Opaque id of a rendering context owned by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(pub u64);

/// Opaque id of a texture owned by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Notification surface the resource manager drives.
#[allow(unused_variables)]
pub trait RenderBackend {
    // ------------------------------------------------------------------
    // Geometry data
    // ------------------------------------------------------------------
    fn geometry_data_created(&mut self, handle: GeometryDataHandle, record: &GeometryDataRecord) {}
    fn geometry_data_updated(
        &mut self,
        handle: GeometryDataHandle,
        attribute: VertexAttribute,
        byte_range: Range<u64>,
    ) {
    }
    fn geometry_data_indices_updated(&mut self, handle: GeometryDataHandle, byte_range: Range<u64>) {
    }
    /// The record will never change again; immutable GPU buffers may be built.
    fn geometry_data_finalized(&mut self, handle: GeometryDataHandle, record: &GeometryDataRecord) {
    }
    fn geometry_data_disposed(&mut self, handle: GeometryDataHandle) {}

    // ------------------------------------------------------------------
    // Geometry topology
    // ------------------------------------------------------------------
    fn geometry_topology_created(
        &mut self,
        handle: GeometryTopologyHandle,
        record: &GeometryTopologyRecord,
    ) {
    }
    fn geometry_topology_disposed(&mut self, handle: GeometryTopologyHandle) {}

    // ------------------------------------------------------------------
    // Appearance
    // ------------------------------------------------------------------
    fn appearance_created(&mut self, handle: AppearanceHandle, record: &AppearanceRecord) {}
    fn appearance_updated(&mut self, handle: AppearanceHandle, record: &AppearanceRecord) {}
    fn appearance_disposed(&mut self, handle: AppearanceHandle) {}

    // ------------------------------------------------------------------
    // Spatial transform (streaming)
    // ------------------------------------------------------------------
    fn spatial_transform_created(
        &mut self,
        handle: SpatialTransformHandle,
        record: &SpatialTransformRecord,
    ) {
    }
    fn spatial_transform_updated(
        &mut self,
        handle: SpatialTransformHandle,
        record: &SpatialTransformRecord,
    ) {
    }
    fn spatial_transform_disposed(&mut self, handle: SpatialTransformHandle) {}

    // ------------------------------------------------------------------
    // Render state (streaming)
    // ------------------------------------------------------------------
    fn render_state_created(&mut self, handle: RenderStateHandle, record: &RenderStateRecord) {}
    fn render_state_updated(&mut self, handle: RenderStateHandle, record: &RenderStateRecord) {}
    fn render_state_disposed(&mut self, handle: RenderStateHandle) {}

    // ------------------------------------------------------------------
    // Collections & views
    // ------------------------------------------------------------------
    /// The collection froze; `batch` is its ordered instance bindings.
    fn collection_finalized(
        &mut self,
        handle: CollectionHandle,
        context: Option<ContextId>,
        batch: &[InstanceBinding],
    ) {
    }
    fn collection_disposed(&mut self, handle: CollectionHandle) {}
    fn view_add_collection(&mut self, view: ViewId, collection: CollectionHandle) {}
}

/// A backend that ignores every notification. Useful headless and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl RenderBackend for NullBackend {}

//! Drawables
//!
//! A drawable is a scene-level object that owns a set of resource handles
//! and zero or more collections, and exposes one uniform lifecycle/query
//! contract to the scene above. Drawables are the only clients that talk to
//! the instance/collection layer directly.
//!
//! # Lifecycle
//!
//! `Uninitialized → GeometryReady → ViewReady → Disposed`
//!
//! `init` runs `init_geometry` then `init_view`. Either step may fail, and a
//! failed `init_view` leaves the drawable half-built — which is why
//! `dispose` always attempts *both* teardown halves, each idempotent, so a
//! partially initialized drawable tears down exactly like a healthy one.
//! Creation errors propagate to the caller; dispose never fails.

mod benchmark;
mod grid;
mod quadric;
mod triad;
mod volume;

pub use benchmark::BenchmarkDrawable;
pub use grid::GridDrawable;
pub use quadric::{MultiQuadricDrawable, QuadricDrawable, QuadricShape};
pub use triad::TriadDrawable;
pub use volume::VolumeSliceDrawable;

use smallvec::SmallVec;

use crate::errors::Result;
use crate::renderer::collection::CollectionHandle;
use crate::renderer::resource_manager::ResourceManager;
use crate::resources::primitives::MeshBuffers;
use crate::resources::{
    AttributeSet, GeometryDataDescriptor, GeometryDataHandle, VertexAttribute,
};
use crate::scene::bounds::BoundingBox;

/// Lifecycle state of a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawableState {
    Uninitialized,
    GeometryReady,
    ViewReady,
    Disposed,
}

/// Tag identifying a concrete drawable variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableType {
    Grid,
    Triad,
    Quadric,
    MultiQuadric,
    VolumeSlice,
    Benchmark,
}

/// State every drawable variant shares: name, lifecycle state, accumulated
/// bounds and owned collection handles.
#[derive(Debug)]
pub struct DrawableCore {
    name: String,
    state: DrawableState,
    bounds: BoundingBox,
    collections: SmallVec<[CollectionHandle; 2]>,
}

impl DrawableCore {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: DrawableState::Uninitialized,
            bounds: BoundingBox::empty(),
            collections: SmallVec::new(),
        }
    }

    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    pub fn register_collection(&mut self, handle: CollectionHandle) {
        self.collections.push(handle);
    }

    pub fn clear_collections(&mut self) {
        self.collections.clear();
    }
}

/// The capability set every drawable implements.
pub trait Drawable {
    fn core(&self) -> &DrawableCore;
    fn core_mut(&mut self) -> &mut DrawableCore;
    fn drawable_type(&self) -> DrawableType;

    /// Builds geometry buffers and the resource records they need.
    fn init_geometry(&mut self, res: &mut ResourceManager) -> Result<()>;
    /// Composes instances into collections and attaches them to views.
    fn init_view(&mut self, res: &mut ResourceManager) -> Result<()>;
    /// Tears down collections and instances. Must be idempotent.
    fn dispose_view(&mut self, res: &mut ResourceManager);
    /// Tears down resource records. Must be idempotent.
    fn dispose_geometry(&mut self, res: &mut ResourceManager);

    /// Full initialization; aborts on the first failing step, leaving the
    /// drawable safely disposable.
    fn init(&mut self, res: &mut ResourceManager) -> Result<()> {
        self.init_geometry(res)?;
        self.core_mut().state = DrawableState::GeometryReady;
        self.init_view(res)?;
        self.core_mut().state = DrawableState::ViewReady;
        Ok(())
    }

    /// Best-effort teardown. Always attempts both halves, whatever state the
    /// drawable is in.
    fn dispose(&mut self, res: &mut ResourceManager) {
        self.dispose_view(res);
        self.dispose_geometry(res);
        let core = self.core_mut();
        core.collections.clear();
        core.state = DrawableState::Disposed;
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn state(&self) -> DrawableState {
        self.core().state
    }

    /// Accumulated bounds; the empty box before geometry exists.
    fn bounds(&self) -> BoundingBox {
        self.core().bounds
    }

    /// Collection handles owned by this drawable, for view attach/detach by
    /// the scene without knowing drawable internals.
    fn collections(&self) -> &[CollectionHandle] {
        &self.core().collections
    }
}

/// Uploads a generated mesh as a finalized geometry-data record.
///
/// Shared by the concrete drawables: declares the attribute set, streams
/// each buffer by byte range, then finalizes so the backend can build
/// immutable GPU buffers.
pub fn upload_mesh(
    res: &mut ResourceManager,
    mesh: &MeshBuffers,
    attributes: AttributeSet,
) -> Result<GeometryDataHandle> {
    let handle = res.geometry_data_create(&GeometryDataDescriptor {
        vertex_count: mesh.vertex_count(),
        index_count: mesh.index_count(),
        attributes,
    })?;
    res.geometry_data_update(
        handle,
        VertexAttribute::Position,
        0,
        bytemuck::cast_slice(&mesh.positions),
    )?;
    if attributes.contains(AttributeSet::NORMAL) {
        res.geometry_data_update(
            handle,
            VertexAttribute::Normal,
            0,
            bytemuck::cast_slice(&mesh.normals),
        )?;
    }
    if attributes.contains(AttributeSet::TEXCOORD) {
        res.geometry_data_update(
            handle,
            VertexAttribute::Texcoord,
            0,
            bytemuck::cast_slice(&mesh.texcoords),
        )?;
    }
    if !mesh.indices.is_empty() {
        res.geometry_data_update_indices(handle, 0, bytemuck::cast_slice(&mesh.indices))?;
    }
    res.geometry_data_finalize(handle)?;
    Ok(handle)
}

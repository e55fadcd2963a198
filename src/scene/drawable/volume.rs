//! Volumetric slice drawable: a stack of alpha-blended textured quads
//! through a volume, composited back to front by the draw order of a single
//! collection.

use crate::errors::Result;
use crate::renderer::backend::{TextureId, ViewId};
use crate::renderer::collection::{CollectionHandle, CollectionInfo, InstanceInfo};
use crate::renderer::resource_manager::ResourceManager;
use crate::resources::primitives::MeshBuffers;
use crate::resources::{
    AppearanceHandle, AppearanceRecord, AttributeSet, GeometryDataHandle, GeometryTopologyHandle,
    GeometryTopologyRecord, PrimitiveTopology, RenderStateHandle, RenderStateRecord,
    ShaderTemplate,
};
use crate::scene::bounds::BoundingBox;
use crate::scene::drawable::{Drawable, DrawableCore, DrawableType, upload_mesh};

pub struct VolumeSliceDrawable {
    core: DrawableCore,
    width: f32,
    height: f32,
    depth: f32,
    slice_count: u32,
    texture: TextureId,
    view: Option<ViewId>,
    geometry: Option<GeometryDataHandle>,
    topology: Option<GeometryTopologyHandle>,
    appearance: Option<AppearanceHandle>,
    render_state: Option<RenderStateHandle>,
    collection: Option<CollectionHandle>,
}

impl VolumeSliceDrawable {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        size: (f32, f32, f32),
        slice_count: u32,
        texture: TextureId,
        view: Option<ViewId>,
    ) -> Self {
        Self {
            core: DrawableCore::new(name),
            width: size.0,
            height: size.1,
            depth: size.2,
            slice_count: slice_count.max(1),
            texture,
            view,
            geometry: None,
            topology: None,
            appearance: None,
            render_state: None,
            collection: None,
        }
    }

    /// One quad per slice, stacked back to front along Z so alpha blending
    /// composites correctly within a single draw.
    fn slice_mesh(&self) -> MeshBuffers {
        let hx = self.width * 0.5;
        let hy = self.height * 0.5;
        let hz = self.depth * 0.5;
        let mut mesh = MeshBuffers::default();

        for s in 0..self.slice_count {
            let t = if self.slice_count == 1 {
                0.5
            } else {
                s as f32 / (self.slice_count - 1) as f32
            };
            let z = -hz + t * self.depth;
            let base = mesh.vertex_count();
            mesh.push_vertex([-hx, -hy, z], [0.0, 0.0, 1.0], [0.0, 0.0]);
            mesh.push_vertex([hx, -hy, z], [0.0, 0.0, 1.0], [1.0, 0.0]);
            mesh.push_vertex([hx, hy, z], [0.0, 0.0, 1.0], [1.0, 1.0]);
            mesh.push_vertex([-hx, hy, z], [0.0, 0.0, 1.0], [0.0, 1.0]);
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }
}

impl Drawable for VolumeSliceDrawable {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    fn drawable_type(&self) -> DrawableType {
        DrawableType::VolumeSlice
    }

    fn init_geometry(&mut self, res: &mut ResourceManager) -> Result<()> {
        let mesh = self.slice_mesh();
        self.geometry = Some(upload_mesh(
            res,
            &mesh,
            AttributeSet::POSITION | AttributeSet::TEXCOORD,
        )?);
        self.topology = Some(res.geometry_topology_create(GeometryTopologyRecord {
            topology: PrimitiveTopology::TriangleList,
            indexed: true,
        })?);
        self.appearance = Some(res.appearance_create(AppearanceRecord::with_texture(
            ShaderTemplate::Textured,
            self.texture,
        ))?);
        self.render_state = Some(res.render_state_create(RenderStateRecord::translucent())?);

        let mut bounds = BoundingBox::empty();
        bounds.expand_by_positions(&mesh.positions);
        self.core.set_bounds(bounds);
        Ok(())
    }

    fn init_view(&mut self, res: &mut ResourceManager) -> Result<()> {
        let collection = res.collection_create(&CollectionInfo { capacity: 1 })?;
        self.collection = Some(collection);
        res.collection_instance_create(
            collection,
            &InstanceInfo {
                geometry_data: self.geometry.expect("init_geometry ran first"),
                geometry_topology: self.topology.expect("init_geometry ran first"),
                appearance: self.appearance.expect("init_geometry ran first"),
                spatial_transform: None,
                render_state: self.render_state,
            },
        )?;
        res.collection_finalize(collection, None, self.view)?;
        self.core.register_collection(collection);
        Ok(())
    }

    fn dispose_view(&mut self, res: &mut ResourceManager) {
        if let Some(collection) = self.collection.take() {
            res.collection_dispose(collection);
        }
        self.core.clear_collections();
    }

    fn dispose_geometry(&mut self, res: &mut ResourceManager) {
        if let Some(h) = self.geometry.take() {
            res.geometry_data_dispose(h);
        }
        if let Some(h) = self.topology.take() {
            res.geometry_topology_dispose(h);
        }
        if let Some(h) = self.appearance.take() {
            res.appearance_dispose(h);
        }
        if let Some(h) = self.render_state.take() {
            res.render_state_dispose(h);
        }
    }
}

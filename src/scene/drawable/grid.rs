//! Reference grid decoration: evenly spaced lines on the XZ plane.

use crate::errors::Result;
use crate::renderer::backend::ViewId;
use crate::renderer::collection::{CollectionHandle, CollectionInfo, InstanceInfo};
use crate::renderer::resource_manager::ResourceManager;
use crate::resources::{
    AppearanceHandle, AppearanceRecord, AttributeSet, GeometryDataDescriptor, GeometryDataHandle,
    GeometryTopologyHandle, GeometryTopologyRecord, PrimitiveTopology, RenderStateHandle,
    RenderStateRecord, ShaderTemplate, VertexAttribute,
};
use crate::scene::bounds::BoundingBox;
use crate::scene::drawable::{Drawable, DrawableCore, DrawableType};

pub struct GridDrawable {
    core: DrawableCore,
    size: f32,
    divisions: u32,
    view: Option<ViewId>,
    geometry: Option<GeometryDataHandle>,
    topology: Option<GeometryTopologyHandle>,
    appearance: Option<AppearanceHandle>,
    render_state: Option<RenderStateHandle>,
    collection: Option<CollectionHandle>,
}

impl GridDrawable {
    #[must_use]
    pub fn new(name: impl Into<String>, size: f32, divisions: u32, view: Option<ViewId>) -> Self {
        Self {
            core: DrawableCore::new(name),
            size,
            divisions: divisions.max(1),
            view,
            geometry: None,
            topology: None,
            appearance: None,
            render_state: None,
            collection: None,
        }
    }

    fn line_positions(&self) -> Vec<[f32; 3]> {
        let half = self.size * 0.5;
        let step = self.size / self.divisions as f32;
        let mut positions = Vec::with_capacity((self.divisions as usize + 1) * 4);
        for i in 0..=self.divisions {
            let t = -half + i as f32 * step;
            // One line along X, one along Z
            positions.push([-half, 0.0, t]);
            positions.push([half, 0.0, t]);
            positions.push([t, 0.0, -half]);
            positions.push([t, 0.0, half]);
        }
        positions
    }
}

impl Drawable for GridDrawable {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    fn drawable_type(&self) -> DrawableType {
        DrawableType::Grid
    }

    fn init_geometry(&mut self, res: &mut ResourceManager) -> Result<()> {
        let positions = self.line_positions();

        let geometry = res.geometry_data_create(&GeometryDataDescriptor {
            vertex_count: positions.len() as u32,
            index_count: 0,
            attributes: AttributeSet::POSITION,
        })?;
        self.geometry = Some(geometry);
        res.geometry_data_update(
            geometry,
            VertexAttribute::Position,
            0,
            bytemuck::cast_slice(&positions),
        )?;
        res.geometry_data_finalize(geometry)?;

        self.topology = Some(res.geometry_topology_create(GeometryTopologyRecord {
            topology: PrimitiveTopology::LineList,
            indexed: false,
        })?);
        self.appearance = Some(res.appearance_create(AppearanceRecord::new(ShaderTemplate::Flat))?);
        self.render_state = Some(res.render_state_create(RenderStateRecord::lines(1.0))?);

        let mut bounds = BoundingBox::empty();
        bounds.expand_by_positions(&positions);
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

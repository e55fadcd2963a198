//! Coordinate triad decoration: three axis lines colored R/G/B for X/Y/Z.

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

pub struct TriadDrawable {
    core: DrawableCore,
    axis_length: f32,
    view: Option<ViewId>,
    geometry: Option<GeometryDataHandle>,
    topology: Option<GeometryTopologyHandle>,
    appearance: Option<AppearanceHandle>,
    render_state: Option<RenderStateHandle>,
    collection: Option<CollectionHandle>,
}

impl TriadDrawable {
    #[must_use]
    pub fn new(name: impl Into<String>, axis_length: f32, view: Option<ViewId>) -> Self {
        Self {
            core: DrawableCore::new(name),
            axis_length,
            view,
            geometry: None,
            topology: None,
            appearance: None,
            render_state: None,
            collection: None,
        }
    }
}

impl Drawable for TriadDrawable {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    fn drawable_type(&self) -> DrawableType {
        DrawableType::Triad
    }

    fn init_geometry(&mut self, res: &mut ResourceManager) -> Result<()> {
        let len = self.axis_length;
        let positions: [[f32; 3]; 6] = [
            [0.0, 0.0, 0.0],
            [len, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, len, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, len],
        ];
        let colors: [[f32; 4]; 6] = [
            [1.0, 0.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
        ];

        let geometry = res.geometry_data_create(&GeometryDataDescriptor {
            vertex_count: 6,
            index_count: 0,
            attributes: AttributeSet::POSITION | AttributeSet::COLOR,
        })?;
        self.geometry = Some(geometry);
        res.geometry_data_update(
            geometry,
            VertexAttribute::Position,
            0,
            bytemuck::cast_slice(&positions),
        )?;
        res.geometry_data_update(
            geometry,
            VertexAttribute::Color,
            0,
            bytemuck::cast_slice(&colors),
        )?;
        res.geometry_data_finalize(geometry)?;

        self.topology = Some(res.geometry_topology_create(GeometryTopologyRecord {
            topology: PrimitiveTopology::LineList,
            indexed: false,
        })?);
        self.appearance =
            Some(res.appearance_create(AppearanceRecord::new(ShaderTemplate::VertexColor))?);
        self.render_state = Some(res.render_state_create(RenderStateRecord::lines(2.0))?);

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

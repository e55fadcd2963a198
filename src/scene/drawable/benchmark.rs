//! Instancing stress drawable: an N×N grid of instances sharing one sphere
//! geometry, each with its own spatial transform. Exercises the read-sharing
//! rule — one geometry-data record referenced by every instance.

use glam::{Mat4, Vec3};
use smallvec::SmallVec;

use crate::errors::Result;
use crate::renderer::backend::ViewId;
use crate::renderer::collection::{CollectionHandle, CollectionInfo, InstanceInfo};
use crate::renderer::resource_manager::ResourceManager;
use crate::resources::primitives::{SphereOptions, create_sphere};
use crate::resources::{
    AppearanceHandle, AppearanceRecord, AttributeSet, GeometryDataHandle, GeometryTopologyHandle,
    GeometryTopologyRecord, PrimitiveTopology, ShaderTemplate, SpatialTransformHandle,
};
use crate::scene::bounds::BoundingBox;
use crate::scene::drawable::{Drawable, DrawableCore, DrawableType, upload_mesh};

pub struct BenchmarkDrawable {
    core: DrawableCore,
    grid_dim: u32,
    spacing: f32,
    view: Option<ViewId>,
    geometry: Option<GeometryDataHandle>,
    topology: Option<GeometryTopologyHandle>,
    appearance: Option<AppearanceHandle>,
    spatials: Vec<SpatialTransformHandle>,
    collections: SmallVec<[CollectionHandle; 2]>,
}

impl BenchmarkDrawable {
    #[must_use]
    pub fn new(name: impl Into<String>, grid_dim: u32, spacing: f32, view: Option<ViewId>) -> Self {
        Self {
            core: DrawableCore::new(name),
            grid_dim: grid_dim.max(1),
            spacing,
            view,
            geometry: None,
            topology: None,
            appearance: None,
            spatials: Vec::new(),
            collections: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.grid_dim as usize * self.grid_dim as usize
    }
}

impl Drawable for BenchmarkDrawable {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    fn drawable_type(&self) -> DrawableType {
        DrawableType::Benchmark
    }

    fn init_geometry(&mut self, res: &mut ResourceManager) -> Result<()> {
        // Low-poly sphere; the point is instance volume, not vertex volume
        let mesh = create_sphere(&SphereOptions {
            radius: 0.4,
            width_segments: 8,
            height_segments: 6,
        });
        self.geometry = Some(upload_mesh(
            res,
            &mesh,
            AttributeSet::POSITION | AttributeSet::NORMAL | AttributeSet::TEXCOORD,
        )?);
        self.topology = Some(res.geometry_topology_create(GeometryTopologyRecord {
            topology: PrimitiveTopology::TriangleList,
            indexed: true,
        })?);
        self.appearance = Some(res.appearance_create(AppearanceRecord::new(ShaderTemplate::Lit))?);

        let n = self.grid_dim;
        let half = (n as f32 - 1.0) * 0.5;
        let mut bounds = BoundingBox::empty();
        self.spatials.reserve(self.instance_count());
        for row in 0..n {
            for col in 0..n {
                let offset = Vec3::new(
                    (col as f32 - half) * self.spacing,
                    0.0,
                    (row as f32 - half) * self.spacing,
                );
                self.spatials
                    .push(res.spatial_transform_create(Mat4::from_translation(offset))?);
                bounds.expand_by_point3(offset - Vec3::splat(0.4));
                bounds.expand_by_point3(offset + Vec3::splat(0.4));
            }
        }
        self.core.set_bounds(bounds);
        Ok(())
    }

    fn init_view(&mut self, res: &mut ResourceManager) -> Result<()> {
        let collection = res.collection_create(&CollectionInfo {
            capacity: self.instance_count(),
        })?;
        self.collections.push(collection);
        for spatial in &self.spatials {
            res.collection_instance_create(
                collection,
                &InstanceInfo {
                    geometry_data: self.geometry.expect("init_geometry ran first"),
                    geometry_topology: self.topology.expect("init_geometry ran first"),
                    appearance: self.appearance.expect("init_geometry ran first"),
                    spatial_transform: Some(*spatial),
                    render_state: None,
                },
            )?;
        }
        res.collection_finalize(collection, None, self.view)?;
        self.core.register_collection(collection);
        Ok(())
    }

    fn dispose_view(&mut self, res: &mut ResourceManager) {
        for collection in self.collections.drain(..) {
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
        for h in self.spatials.drain(..) {
            res.spatial_transform_dispose(h);
        }
    }
}

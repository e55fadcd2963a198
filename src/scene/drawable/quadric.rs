//! Quadric drawables
//!
//! [`QuadricDrawable`] shows a single primitive shape; [`MultiQuadricDrawable`]
//! shows one instance per shape inside a single collection, laid out along
//! the X axis with spacing derived from the accumulated bounding-box
//! diagonal divided by the instance count.

use glam::{Mat4, Vec3};
use smallvec::SmallVec;

use crate::errors::Result;
use crate::renderer::backend::ViewId;
use crate::renderer::collection::{CollectionHandle, CollectionInfo, InstanceInfo};
use crate::renderer::resource_manager::ResourceManager;
use crate::resources::primitives::{
    BoxOptions, ConeOptions, CylinderOptions, MeshBuffers, SphereOptions, create_box, create_cone,
    create_cylinder, create_sphere,
};
use crate::resources::{
    AppearanceHandle, AppearanceRecord, AttributeSet, GeometryDataHandle, GeometryTopologyHandle,
    GeometryTopologyRecord, PrimitiveTopology, ShaderTemplate, SpatialTransformHandle,
};
use crate::scene::bounds::BoundingBox;
use crate::scene::drawable::{Drawable, DrawableCore, DrawableType, upload_mesh};

/// The primitive shapes the quadric drawables can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadricShape {
    Sphere,
    Box,
    Cylinder,
    Cone,
}

impl QuadricShape {
    /// Every shape, in display order.
    pub const ALL: [QuadricShape; 4] = [
        QuadricShape::Sphere,
        QuadricShape::Box,
        QuadricShape::Cylinder,
        QuadricShape::Cone,
    ];

    #[must_use]
    pub fn mesh(self) -> MeshBuffers {
        match self {
            QuadricShape::Sphere => create_sphere(&SphereOptions::default()),
            QuadricShape::Box => create_box(&BoxOptions::default()),
            QuadricShape::Cylinder => create_cylinder(&CylinderOptions::default()),
            QuadricShape::Cone => create_cone(&ConeOptions::default()),
        }
    }
}

const QUADRIC_ATTRIBUTES: AttributeSet = AttributeSet::POSITION
    .union(AttributeSet::NORMAL)
    .union(AttributeSet::TEXCOORD);

// ============================================================================
// Single quadric
// ============================================================================

pub struct QuadricDrawable {
    core: DrawableCore,
    shape: QuadricShape,
    transform: Mat4,
    view: Option<ViewId>,
    geometry: Option<GeometryDataHandle>,
    topology: Option<GeometryTopologyHandle>,
    appearance: Option<AppearanceHandle>,
    spatial: Option<SpatialTransformHandle>,
    collection: Option<CollectionHandle>,
}

impl QuadricDrawable {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        shape: QuadricShape,
        transform: Mat4,
        view: Option<ViewId>,
    ) -> Self {
        Self {
            core: DrawableCore::new(name),
            shape,
            transform,
            view,
            geometry: None,
            topology: None,
            appearance: None,
            spatial: None,
            collection: None,
        }
    }
}

impl Drawable for QuadricDrawable {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    fn drawable_type(&self) -> DrawableType {
        DrawableType::Quadric
    }

    fn init_geometry(&mut self, res: &mut ResourceManager) -> Result<()> {
        let mesh = self.shape.mesh();
        self.geometry = Some(upload_mesh(res, &mesh, QUADRIC_ATTRIBUTES)?);
        self.topology = Some(res.geometry_topology_create(GeometryTopologyRecord {
            topology: PrimitiveTopology::TriangleList,
            indexed: true,
        })?);
        self.appearance = Some(res.appearance_create(AppearanceRecord::new(ShaderTemplate::Lit))?);
        self.spatial = Some(res.spatial_transform_create(self.transform)?);

        let mut bounds = BoundingBox::empty();
        for p in &mesh.positions {
            bounds.expand_by_point3(self.transform.transform_point3(Vec3::from_array(*p)));
        }
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
                spatial_transform: self.spatial,
                render_state: None,
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
        if let Some(h) = self.spatial.take() {
            res.spatial_transform_dispose(h);
        }
    }
}

// ============================================================================
// Multi quadric
// ============================================================================

pub struct MultiQuadricDrawable {
    core: DrawableCore,
    shapes: Vec<QuadricShape>,
    view: Option<ViewId>,
    geometries: SmallVec<[GeometryDataHandle; 4]>,
    spatials: SmallVec<[SpatialTransformHandle; 4]>,
    topology: Option<GeometryTopologyHandle>,
    appearance: Option<AppearanceHandle>,
    collection: Option<CollectionHandle>,
    /// Union of the untransformed shape boxes, drives the layout spacing.
    local_bounds: BoundingBox,
}

impl MultiQuadricDrawable {
    #[must_use]
    pub fn new(name: impl Into<String>, shapes: Vec<QuadricShape>, view: Option<ViewId>) -> Self {
        Self {
            core: DrawableCore::new(name),
            shapes,
            view,
            geometries: SmallVec::new(),
            spatials: SmallVec::new(),
            topology: None,
            appearance: None,
            collection: None,
            local_bounds: BoundingBox::empty(),
        }
    }

    /// All four primitive shapes in display order.
    #[must_use]
    pub fn with_all_shapes(name: impl Into<String>, view: Option<ViewId>) -> Self {
        Self::new(name, QuadricShape::ALL.to_vec(), view)
    }

    /// X offset of instance `index` out of `count`, centered on the origin.
    fn layout_offset(&self, index: usize, count: usize) -> f32 {
        let spacing = self.local_bounds.diagonal() / count as f32;
        (index as f32 - (count as f32 - 1.0) * 0.5) * spacing
    }
}

impl Drawable for MultiQuadricDrawable {
    fn core(&self) -> &DrawableCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DrawableCore {
        &mut self.core
    }

    fn drawable_type(&self) -> DrawableType {
        DrawableType::MultiQuadric
    }

    fn init_geometry(&mut self, res: &mut ResourceManager) -> Result<()> {
        let count = self.shapes.len();
        let mut shape_boxes = Vec::with_capacity(count);

        for shape in self.shapes.clone() {
            let mesh = shape.mesh();
            let mut shape_box = BoundingBox::empty();
            shape_box.expand_by_positions(&mesh.positions);

            self.geometries.push(upload_mesh(res, &mesh, QUADRIC_ATTRIBUTES)?);
            self.local_bounds = self.local_bounds.union(&shape_box);
            shape_boxes.push(shape_box);
        }

        self.topology = Some(res.geometry_topology_create(GeometryTopologyRecord {
            topology: PrimitiveTopology::TriangleList,
            indexed: true,
        })?);
        self.appearance = Some(res.appearance_create(AppearanceRecord::new(ShaderTemplate::Lit))?);

        let mut bounds = BoundingBox::empty();
        for (i, shape_box) in shape_boxes.iter().enumerate() {
            let offset = Vec3::X * self.layout_offset(i, count);
            let transform = Mat4::from_translation(offset);
            self.spatials.push(res.spatial_transform_create(transform)?);

            bounds.expand_by_point3(shape_box.min().truncate() + offset);
            bounds.expand_by_point3(shape_box.max().truncate() + offset);
        }
        self.core.set_bounds(bounds);
        Ok(())
    }

    fn init_view(&mut self, res: &mut ResourceManager) -> Result<()> {
        let collection = res.collection_create(&CollectionInfo {
            capacity: self.shapes.len(),
        })?;
        self.collection = Some(collection);
        for (geometry, spatial) in self.geometries.iter().zip(&self.spatials) {
            res.collection_instance_create(
                collection,
                &InstanceInfo {
                    geometry_data: *geometry,
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
        if let Some(collection) = self.collection.take() {
            res.collection_dispose(collection);
        }
        self.core.clear_collections();
    }

    fn dispose_geometry(&mut self, res: &mut ResourceManager) {
        for h in self.geometries.drain(..) {
            res.geometry_data_dispose(h);
        }
        for h in self.spatials.drain(..) {
            res.spatial_transform_dispose(h);
        }
        if let Some(h) = self.topology.take() {
            res.geometry_topology_dispose(h);
        }
        if let Some(h) = self.appearance.take() {
            res.appearance_dispose(h);
        }
        self.local_bounds = BoundingBox::empty();
    }
}

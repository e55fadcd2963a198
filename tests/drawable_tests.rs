//! Drawable Tests
//!
//! Tests for:
//! - The uniform drawable lifecycle across concrete variants
//! - Teardown of a half-initialized drawable
//! - The multi-quadric layout and the instancing benchmark
//! - A hand-rolled drawable driving the full resource lifecycle end to end

use glam::{Mat4, Vec3, Vec4};

use strata::errors::Result;
use strata::renderer::{
    CollectionHandle, CollectionInfo, InstanceInfo, NullBackend, ResourceManager, SceneLimits,
};
use strata::resources::{
    AppearanceHandle, AppearanceRecord, AttributeSet, BlendMode, GeometryDataDescriptor,
    GeometryDataHandle, GeometryTopologyHandle, GeometryTopologyRecord, PrimitiveTopology,
    ShaderTemplate, VertexAttribute,
};
use strata::scene::drawable::{BenchmarkDrawable, DrawableCore};
use strata::{
    BoundingBox, Drawable, DrawableState, DrawableType, GridDrawable, MultiQuadricDrawable,
    QuadricDrawable, QuadricShape, TextureId, TriadDrawable, VolumeSliceDrawable,
};

fn manager() -> ResourceManager {
    ResourceManager::new(Box::new(NullBackend), &SceneLimits::default())
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn grid_walks_the_full_lifecycle() {
    let mut res = manager();
    let mut grid = GridDrawable::new("floor", 10.0, 10, None);
    assert_eq!(grid.state(), DrawableState::Uninitialized);
    assert!(grid.bounds().is_empty());

    grid.init(&mut res).unwrap();
    assert_eq!(grid.state(), DrawableState::ViewReady);
    assert_eq!(grid.collections().len(), 1);
    assert_eq!(res.live_instance_count(), 1);

    let bounds = grid.bounds();
    assert_eq!(bounds.min().truncate(), Vec3::new(-5.0, 0.0, -5.0));
    assert_eq!(bounds.max().truncate(), Vec3::new(5.0, 0.0, 5.0));

    grid.dispose(&mut res);
    assert_eq!(grid.state(), DrawableState::Disposed);
    assert!(grid.collections().is_empty());
    assert_eq!(res.live_instance_count(), 0);

    // Double dispose tears down nothing twice
    grid.dispose(&mut res);
    assert_eq!(res.live_instance_count(), 0);
}

#[test]
fn triad_bounds_span_the_axis_lines() {
    let mut res = manager();
    let mut triad = TriadDrawable::new("axes", 2.0, None);
    triad.init(&mut res).unwrap();

    assert_eq!(triad.drawable_type(), DrawableType::Triad);
    let bounds = triad.bounds();
    assert_eq!(bounds.min().truncate(), Vec3::ZERO);
    assert_eq!(bounds.max().truncate(), Vec3::splat(2.0));
    assert!(bounds.is_inside(Vec4::new(1.0, 0.0, 0.0, 1.0)));

    triad.dispose(&mut res);
}

#[test]
fn quadric_bounds_follow_its_transform() {
    let mut res = manager();
    let transform = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
    let mut quadric = QuadricDrawable::new("ball", QuadricShape::Sphere, transform, None);
    quadric.init(&mut res).unwrap();

    // Default sphere radius is 1, translated to x = 10
    assert!(quadric.bounds().is_inside(Vec4::new(10.0, 0.0, 0.0, 1.0)));
    assert!(!quadric.bounds().is_inside(Vec4::new(0.0, 0.0, 0.0, 1.0)));

    quadric.dispose(&mut res);
}

// ============================================================================
// Half-initialized teardown
// ============================================================================

#[test]
fn failed_view_init_still_disposes_cleanly() {
    // No collection slots at all, so init_view must fail after the geometry
    // phase succeeded
    let mut res = ResourceManager::new(
        Box::new(NullBackend),
        &SceneLimits {
            collections: 0,
            ..SceneLimits::default()
        },
    );
    let mut grid = GridDrawable::new("floor", 10.0, 10, None);

    assert!(grid.init(&mut res).is_err());
    assert_eq!(grid.state(), DrawableState::GeometryReady);
    assert!(grid.collections().is_empty());
    assert!(!grid.bounds().is_empty());

    grid.dispose(&mut res);
    assert_eq!(grid.state(), DrawableState::Disposed);
    assert_eq!(res.live_instance_count(), 0);
}

// ============================================================================
// Multi quadric & benchmark
// ============================================================================

#[test]
fn multi_quadric_packs_one_instance_per_shape() {
    let mut res = manager();
    let mut multi = MultiQuadricDrawable::with_all_shapes("lineup", None);
    multi.init(&mut res).unwrap();

    assert_eq!(multi.collections().len(), 1);
    let collection = res.collection(multi.collections()[0]).unwrap();
    assert_eq!(collection.len(), QuadricShape::ALL.len());
    assert!(collection.is_finalized());

    // Instances spread along X, so the box is wider than it is tall
    let size = multi.bounds().size();
    assert!(size.x > size.y);

    multi.dispose(&mut res);
    assert_eq!(res.live_instance_count(), 0);
}

#[test]
fn volume_slices_stack_back_to_front() {
    let mut res = manager();
    let mut volume = VolumeSliceDrawable::new("fog", (2.0, 2.0, 2.0), 4, TextureId(5), None);
    volume.init(&mut res).unwrap();

    assert_eq!(volume.drawable_type(), DrawableType::VolumeSlice);
    assert_eq!(volume.collections().len(), 1);
    let collection = res.collection(volume.collections()[0]).unwrap();
    assert_eq!(collection.len(), 1);
    let info = res.instance(collection.instances()[0]).unwrap().info;

    // One quad per slice
    let geometry = res.geometry_data(info.geometry_data).unwrap();
    assert_eq!(geometry.vertex_count(), 16);
    assert_eq!(geometry.index_count(), 24);
    assert!(geometry.attributes().contains(AttributeSet::TEXCOORD));

    // Slices run from the back face to the front face along Z, so alpha
    // blending composites in draw order
    let positions = geometry.attribute_bytes(VertexAttribute::Position).unwrap();
    let first_z: f32 = bytemuck::pod_read_unaligned(&positions[8..12]);
    let last_z: f32 = bytemuck::pod_read_unaligned(&positions[188..192]);
    assert_eq!(first_z, -1.0);
    assert_eq!(last_z, 1.0);

    let appearance = res.appearance(info.appearance).unwrap();
    assert_eq!(appearance.template, ShaderTemplate::Textured);
    assert_eq!(appearance.texture, Some(TextureId(5)));
    let state = res.render_state(info.render_state.unwrap()).unwrap();
    assert_eq!(state.blend, BlendMode::Alpha);
    assert!(!state.depth_write);

    let bounds = volume.bounds();
    assert_eq!(bounds.min().truncate(), Vec3::splat(-1.0));
    assert_eq!(bounds.max().truncate(), Vec3::splat(1.0));

    volume.dispose(&mut res);
    assert_eq!(volume.state(), DrawableState::Disposed);
    assert_eq!(res.live_instance_count(), 0);
}

#[test]
fn single_volume_slice_sits_at_the_volume_center() {
    let mut res = manager();
    let mut volume = VolumeSliceDrawable::new("slab", (2.0, 2.0, 2.0), 1, TextureId(1), None);
    volume.init(&mut res).unwrap();

    let bounds = volume.bounds();
    assert_eq!(bounds.min().truncate(), Vec3::new(-1.0, -1.0, 0.0));
    assert_eq!(bounds.max().truncate(), Vec3::new(1.0, 1.0, 0.0));

    volume.dispose(&mut res);
    assert_eq!(res.live_instance_count(), 0);
}

#[test]
fn benchmark_instances_share_one_geometry() {
    let mut res = manager();
    let mut bench = BenchmarkDrawable::new("stress", 4, 2.0, None);
    bench.init(&mut res).unwrap();

    assert_eq!(bench.instance_count(), 16);
    assert_eq!(res.live_instance_count(), 16);

    let collection = res.collection(bench.collections()[0]).unwrap();
    let first = res.instance(collection.instances()[0]).unwrap().info;
    for &instance in collection.instances() {
        let info = res.instance(instance).unwrap().info;
        assert_eq!(info.geometry_data, first.geometry_data);
        assert_ne!(info.spatial_transform, None);
    }

    bench.dispose(&mut res);
    assert_eq!(res.live_instance_count(), 0);
}

#[test]
fn benchmark_instance_count_survives_large_grids() {
    // 2^17 squared exceeds u32; the count must not wrap
    let bench = BenchmarkDrawable::new("wall", 1 << 17, 1.0, None);
    assert_eq!(bench.instance_count(), 1usize << 34);
}

// ============================================================================
// End-to-end with a hand-rolled drawable
// ============================================================================

/// A textured quad built by explicit byte-range updates rather than the
/// primitive generators.
struct QuadDrawable {
    core: DrawableCore,
    geometry: Option<GeometryDataHandle>,
    topology: Option<GeometryTopologyHandle>,
    appearance: Option<AppearanceHandle>,
    collection: Option<CollectionHandle>,
}

impl QuadDrawable {
    fn new() -> Self {
        Self {
            core: DrawableCore::new("quad"),
            geometry: None,
            topology: None,
            appearance: None,
            collection: None,
        }
    }
}

impl Drawable for QuadDrawable {
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
        let positions: [[f32; 3]; 4] = [
            [-1.0, -1.0, 0.0],
            [1.0, -1.0, 0.0],
            [1.0, 1.0, 0.0],
            [-1.0, 1.0, 0.0],
        ];
        let colors = [[1.0f32, 1.0, 1.0, 1.0]; 4];
        let texcoords: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let indices: [u32; 6] = [0, 1, 2, 0, 2, 3];

        let geometry = res.geometry_data_create(&GeometryDataDescriptor {
            vertex_count: 4,
            index_count: 6,
            attributes: AttributeSet::POSITION | AttributeSet::COLOR | AttributeSet::TEXCOORD,
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
        res.geometry_data_update(
            geometry,
            VertexAttribute::Texcoord,
            0,
            bytemuck::cast_slice(&texcoords),
        )?;
        res.geometry_data_update_indices(geometry, 0, bytemuck::cast_slice(&indices))?;
        res.geometry_data_finalize(geometry)?;

        self.topology = Some(res.geometry_topology_create(GeometryTopologyRecord {
            topology: PrimitiveTopology::TriangleList,
            indexed: true,
        })?);
        self.appearance =
            Some(res.appearance_create(AppearanceRecord::new(ShaderTemplate::VertexColor))?);

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
                render_state: None,
            },
        )?;
        res.collection_finalize(collection, None, None)?;
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
    }
}

#[test]
fn hand_rolled_quad_runs_the_full_resource_lifecycle() {
    let mut res = manager();
    let mut quad = QuadDrawable::new();

    quad.init(&mut res).unwrap();
    assert_eq!(quad.state(), DrawableState::ViewReady);
    assert_eq!(quad.collections().len(), 1);

    let geometry = res.geometry_data(quad.geometry.unwrap()).unwrap();
    assert!(geometry.is_finalized());
    assert_eq!(geometry.attribute_bytes(VertexAttribute::Position).unwrap().len(), 48);
    assert_eq!(geometry.attribute_bytes(VertexAttribute::Color).unwrap().len(), 64);
    assert_eq!(geometry.attribute_bytes(VertexAttribute::Texcoord).unwrap().len(), 32);
    assert_eq!(geometry.index_bytes().len(), 24);

    assert_eq!(
        quad.bounds(),
        BoundingBox::from_min_max(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0))
    );

    quad.dispose(&mut res);
    assert_eq!(quad.state(), DrawableState::Disposed);
    assert_eq!(res.live_instance_count(), 0);
}

//! Procedural mesh generators
//!
//! CPU-side builders for the primitive shapes the quadric drawables display:
//! - `sphere`: latitude/longitude sphere
//! - `box_shape`: axis-aligned box with per-face normals
//! - `cylinder`: open-angle cylinder with caps
//! - `cone`: cylinder degenerated to a point at the top

pub mod box_shape;
pub mod cone;
pub mod cylinder;
pub mod sphere;

pub use box_shape::{BoxOptions, create_box};
pub use cone::{ConeOptions, create_cone};
pub use cylinder::{CylinderOptions, create_cylinder};
pub use sphere::{SphereOptions, create_sphere};

/// CPU-side buffers produced by a generator, ready for byte-range upload
/// into a geometry-data record.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) {
        self.positions.push(position);
        self.normals.push(normal);
        self.texcoords.push(texcoord);
    }
}

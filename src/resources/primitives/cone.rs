use crate::resources::primitives::{CylinderOptions, MeshBuffers, create_cylinder};

pub struct ConeOptions {
    pub radius: f32,
    pub height: f32,
    pub radial_segments: u32,
}

impl Default for ConeOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 1.0,
            radial_segments: 32,
        }
    }
}

/// A cone is a cylinder whose top ring collapses to the apex.
pub fn create_cone(options: &ConeOptions) -> MeshBuffers {
    create_cylinder(&CylinderOptions {
        radius_top: 0.0,
        radius_bottom: options.radius,
        height: options.height,
        radial_segments: options.radial_segments,
    })
}

use std::f32::consts::PI;

use crate::resources::primitives::MeshBuffers;

pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 32,
        }
    }
}

pub fn create_cylinder(options: &CylinderOptions) -> MeshBuffers {
    let radial_segments = options.radial_segments.max(3);
    let half_height = options.height * 0.5;

    let mut mesh = MeshBuffers::default();

    // Side wall: two rings sharing slanted normals
    let slope = (options.radius_bottom - options.radius_top) / options.height;
    for (ring, (y, radius)) in [
        (-half_height, options.radius_bottom),
        (half_height, options.radius_top),
    ]
    .into_iter()
    .enumerate()
    {
        for x in 0..=radial_segments {
            let u = x as f32 / radial_segments as f32;
            let phi = u * 2.0 * PI;
            let (sin, cos) = phi.sin_cos();

            let normal = glam::Vec3::new(sin, slope, cos).normalize();
            mesh.push_vertex(
                [radius * sin, y, radius * cos],
                normal.to_array(),
                [u, ring as f32],
            );
        }
    }

    let stride = radial_segments + 1;
    for x in 0..radial_segments {
        let v0 = x;
        let v1 = x + 1;
        let v2 = stride + x;
        let v3 = stride + x + 1;
        mesh.indices.extend_from_slice(&[v0, v1, v2]);
        mesh.indices.extend_from_slice(&[v1, v3, v2]);
    }

    // Caps: a triangle fan around a center vertex, skipped for zero radius
    for (y, radius, up) in [
        (-half_height, options.radius_bottom, -1.0f32),
        (half_height, options.radius_top, 1.0),
    ] {
        if radius <= 0.0 {
            continue;
        }
        let center = mesh.vertex_count();
        mesh.push_vertex([0.0, y, 0.0], [0.0, up, 0.0], [0.5, 0.5]);
        for x in 0..=radial_segments {
            let phi = x as f32 / radial_segments as f32 * 2.0 * PI;
            let (sin, cos) = phi.sin_cos();
            mesh.push_vertex(
                [radius * sin, y, radius * cos],
                [0.0, up, 0.0],
                [(sin + 1.0) * 0.5, (cos + 1.0) * 0.5],
            );
        }
        for x in 0..radial_segments {
            let a = center + 1 + x;
            let b = center + 2 + x;
            if up > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    mesh
}

use crate::resources::primitives::MeshBuffers;

pub struct BoxOptions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }
}

pub fn create_box(options: &BoxOptions) -> MeshBuffers {
    let hx = options.width * 0.5;
    let hy = options.height * 0.5;
    let hz = options.depth * 0.5;

    let mut mesh = MeshBuffers::default();

    // 4 vertices per face so normals stay hard-edged
    // (normal, tangent axis u, tangent axis v)
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let half = [hx, hy, hz];

    for (normal, u_axis, v_axis) in faces {
        let base = mesh.vertex_count();
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let mut position = [0.0f32; 3];
            for i in 0..3 {
                position[i] = (normal[i] + u_axis[i] * su + v_axis[i] * sv) * half[i];
            }
            mesh.push_vertex(position, normal, [(su + 1.0) * 0.5, (sv + 1.0) * 0.5]);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

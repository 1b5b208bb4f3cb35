use glam::Mat4;

use crate::scene::BoxInstance;

/// Per-frame uniform block
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// Blend toward white, 0..1
    pub mix: f32,
    pub _pad: [f32; 3],
}

impl CameraUniform {
    pub fn new(view_projection: Mat4, mix: f32) -> Self {
        Self {
            view_projection: view_projection.to_cols_array_2d(),
            mix,
            _pad: [0.0; 3],
        }
    }
}

/// Cube vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Per-instance data for one box
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl From<&BoxInstance> for InstanceData {
    fn from(instance: &BoxInstance) -> Self {
        Self {
            model: instance.model_matrix().to_cols_array_2d(),
            color: instance.color.extend(1.0).to_array(),
        }
    }
}

pub const CUBE_VERTEX_COUNT: u32 = 36;

/// Unit cube centred on the origin, two triangles per face, no index buffer
pub fn cube_vertices() -> Vec<Vertex> {
    // (normal, tangent u, tangent v) per face, u x v = normal
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    const CORNERS: [(f32, f32); 6] = [
        (-0.5, -0.5),
        (0.5, -0.5),
        (0.5, 0.5),
        (-0.5, -0.5),
        (0.5, 0.5),
        (-0.5, 0.5),
    ];

    FACES
        .iter()
        .flat_map(|&(normal, u, v)| {
            CORNERS.iter().map(move |&(a, b)| Vertex {
                position: [
                    normal[0] * 0.5 + u[0] * a + v[0] * b,
                    normal[1] * 0.5 + u[1] * a + v[1] * b,
                    normal[2] * 0.5 + u[2] * a + v[2] * b,
                ],
                normal,
            })
        })
        .collect()
}

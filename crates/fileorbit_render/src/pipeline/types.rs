//! GPU-compatible data types for the marker pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use fileorbit_math::{mat4, Mat4};

/// A mesh vertex in model space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MarkerVertex {
    pub position: [f32; 3],
    /// Outward unit normal (unused by line meshes)
    pub normal: [f32; 3],
}

impl MarkerVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Per-instance data: one drawn copy of a mesh
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    /// Model matrix, column-major (64 bytes)
    pub model: Mat4,
    /// RGBA color (16 bytes)
    pub color: [f32; 4],
}

impl MarkerInstance {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self { model, color }
    }
}

/// Uniforms shared by every draw of a frame
/// Layout: 144 bytes total (must match marker.wgsl FrameUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Camera translation times camera rotation (64 bytes)
    pub view: Mat4,
    /// Perspective projection (64 bytes)
    pub projection: Mat4,
    /// Direction towards the light, in view space (12 bytes)
    pub light_dir: [f32; 3],
    /// Ambient term for lit pipelines (4 bytes)
    pub ambient: f32,
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            light_dir: [0.0, 0.0, 1.0],
            ambient: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_marker_vertex_size() {
        // 3 floats position + 3 floats normal = 24 bytes
        assert_eq!(size_of::<MarkerVertex>(), 24);
    }

    #[test]
    fn test_marker_instance_size() {
        // 16 floats model + 4 floats color = 80 bytes
        assert_eq!(size_of::<MarkerInstance>(), 80);
    }

    #[test]
    fn test_frame_uniforms_size() {
        // 2 * 16 floats matrices + 3 floats light + 1 float ambient = 144 bytes
        assert_eq!(size_of::<FrameUniforms>(), 144);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<MarkerVertex>(), 4);
        assert_eq!(std::mem::align_of::<MarkerInstance>(), 4);
        assert_eq!(std::mem::align_of::<FrameUniforms>(), 4);
    }
}

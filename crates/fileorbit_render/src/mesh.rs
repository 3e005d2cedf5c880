//! Marker meshes
//!
//! All meshes are unit sized and centred on the origin; instances scale them.
//! The cube has edge length 1, the spheres have radius 1.

use std::f32::consts::{PI, TAU};
use crate::pipeline::MarkerVertex;

/// Stacks and slices of the solid directory sphere
pub const SPHERE_DETAIL: u16 = 25;

/// Stacks and slices of the wire sphere overlay
pub const WIRE_SPHERE_DETAIL: u16 = 15;

/// Which mesh a batch draws
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
    WireSphere,
}

impl MeshKind {
    pub const ALL: [MeshKind; 3] = [MeshKind::Cube, MeshKind::Sphere, MeshKind::WireSphere];

    /// Position in [`MeshKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            MeshKind::Cube => 0,
            MeshKind::Sphere => 1,
            MeshKind::WireSphere => 2,
        }
    }

    /// Build the CPU-side geometry for this mesh
    pub fn build(self) -> MeshData {
        match self {
            MeshKind::Cube => cube(),
            MeshKind::Sphere => uv_sphere(SPHERE_DETAIL, SPHERE_DETAIL),
            MeshKind::WireSphere => wire_sphere(WIRE_SPHERE_DETAIL, WIRE_SPHERE_DETAIL),
        }
    }
}

/// Indexed geometry ready for upload
///
/// Triangle meshes index triangles; line meshes index line segments.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MarkerVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// Unit cube with flat face normals, counter-clockwise from outside
pub fn cube() -> MeshData {
    // (normal, u, v) with u × v = normal
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = MeshData::default();
    for (normal, u, v) in FACES {
        let base = mesh.vertices.len() as u16;
        for (su, sv) in CORNERS {
            let position = [
                0.5 * (normal[0] + su * u[0] + sv * v[0]),
                0.5 * (normal[1] + su * u[1] + sv * v[1]),
                0.5 * (normal[2] + su * u[2] + sv * v[2]),
            ];
            mesh.vertices.push(MarkerVertex::new(position, normal));
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Latitude/longitude grid of the unit sphere, poles on the y axis
fn sphere_grid(stacks: u16, slices: u16) -> Vec<MarkerVertex> {
    let mut vertices = Vec::with_capacity((stacks as usize + 1) * (slices as usize + 1));
    for i in 0..=stacks {
        let theta = PI * i as f32 / stacks as f32;
        for j in 0..=slices {
            let phi = TAU * j as f32 / slices as f32;
            let p = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
            vertices.push(MarkerVertex::new(p, p));
        }
    }
    vertices
}

/// Solid unit sphere
pub fn uv_sphere(stacks: u16, slices: u16) -> MeshData {
    let vertices = sphere_grid(stacks, slices);
    let row = slices + 1;

    let mut indices = Vec::with_capacity(stacks as usize * slices as usize * 6);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = a + row;
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    MeshData { vertices, indices }
}

/// Unit sphere as latitude rings and meridians, for line drawing
pub fn wire_sphere(stacks: u16, slices: u16) -> MeshData {
    let vertices = sphere_grid(stacks, slices);
    let row = slices + 1;

    let mut indices = Vec::new();
    // Rings; the poles collapse to points and are skipped
    for i in 1..stacks {
        for j in 0..slices {
            let a = i * row + j;
            indices.extend_from_slice(&[a, a + 1]);
        }
    }
    // Meridians
    for j in 0..slices {
        for i in 0..stacks {
            let a = i * row + j;
            indices.extend_from_slice(&[a, a + row]);
        }
    }

    MeshData { vertices, indices }
}

//! Cube meshes
//!
//! Four vertices per face so every face can carry its own colors, UVs and
//! normal. Faces come in the order near (-z), far (+z), left (-x), right (+x),
//! bottom (-y), top (+y); within a face the corners run (-,-), (+,-), (-,+),
//! (+,+) over the face's two free axes.

use crate::effects::{ColorVertex, NormalVertex, PositionVertex, TextureVertex};
use crate::rasterizer::{Mesh, Vec2, Vec3};

/// Two triangles per face
pub const CUBE_INDICES: [usize; 36] = [
    0, 2, 1, 2, 3, 1, // near
    4, 5, 7, 4, 7, 6, // far
    8, 10, 9, 10, 11, 9, // left
    12, 13, 15, 12, 15, 14, // right
    16, 17, 18, 18, 17, 19, // bottom
    20, 23, 21, 20, 22, 23, // top
];

pub const FACE_NORMALS: [Vec3; 6] = [
    Vec3 { x: 0.0, y: 0.0, z: -1.0 },
    Vec3 { x: 0.0, y: 0.0, z: 1.0 },
    Vec3 { x: -1.0, y: 0.0, z: 0.0 },
    Vec3 { x: 1.0, y: 0.0, z: 0.0 },
    Vec3 { x: 0.0, y: -1.0, z: 0.0 },
    Vec3 { x: 0.0, y: 1.0, z: 0.0 },
];

const CORNER_COLORS: [Vec3; 4] = [
    Vec3 { x: 1.0, y: 0.0, z: 0.0 },
    Vec3 { x: 0.0, y: 1.0, z: 0.0 },
    Vec3 { x: 0.0, y: 0.0, z: 1.0 },
    Vec3 { x: 1.0, y: 1.0, z: 0.0 },
];

const CORNER_UVS: [Vec2; 4] = [
    Vec2 { x: 0.0, y: 0.0 },
    Vec2 { x: 1.0, y: 0.0 },
    Vec2 { x: 0.0, y: 1.0 },
    Vec2 { x: 1.0, y: 1.0 },
];

fn corner(face: usize, corner: usize, half: f32) -> Vec3 {
    let a = if corner & 1 == 0 { -half } else { half };
    let b = if corner & 2 == 0 { -half } else { half };
    match face {
        0 => Vec3::new(a, b, -half),
        1 => Vec3::new(a, b, half),
        2 => Vec3::new(-half, a, b),
        3 => Vec3::new(half, a, b),
        4 => Vec3::new(a, -half, b),
        _ => Vec3::new(a, half, b),
    }
}

/// Build a cube centered on the origin, asking `make` for each vertex given
/// its face, corner and position.
fn build<V>(side: f32, make: impl Fn(usize, usize, Vec3) -> V) -> Mesh<V> {
    let half = side / 2.0;
    let mut vertices = Vec::with_capacity(24);
    for face in 0..6 {
        for c in 0..4 {
            vertices.push(make(face, c, corner(face, c, half)));
        }
    }
    Mesh::new(vertices, CUBE_INDICES.to_vec())
}

pub fn positions(side: f32) -> Mesh<PositionVertex> {
    build(side, |_, _, pos| PositionVertex { pos })
}

/// Red, green, blue and yellow corners on every face
pub fn colored(side: f32) -> Mesh<ColorVertex> {
    build(side, |_, c, pos| ColorVertex { pos, color: CORNER_COLORS[c] })
}

/// The whole texture stretched over each face
pub fn textured(side: f32) -> Mesh<TextureVertex> {
    build(side, |_, c, pos| TextureVertex { pos, uv: CORNER_UVS[c] })
}

pub fn with_normals(side: f32) -> Mesh<NormalVertex> {
    build(side, |face, _, pos| NormalVertex { pos, normal: FACE_NORMALS[face] })
}

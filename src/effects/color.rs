//! Per-vertex colors blended across the triangle

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Color, Effect, Mat4, Transforms, Varying, Vec3, Vec4, Viewport};

/// Mesh vertex with an RGB color in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorVertex {
    pub pos: Vec3,
    pub color: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorOut {
    pub pos: Vec4,
    pub color: Vec3,
}

crate::impl_attributes!(ColorOut { pos, color });

impl Varying for ColorOut {
    fn position(&self) -> Vec4 {
        self.pos
    }
}

#[derive(Debug, Clone)]
pub struct ColorEffect {
    viewport: Viewport,
    transforms: Transforms,
}

impl ColorEffect {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            transforms: Transforms::default(),
        }
    }

    pub fn bind_world(&mut self, world: Mat4) {
        self.transforms.bind_world(world);
    }

    pub fn bind_projection(&mut self, projection: Mat4) {
        self.transforms.bind_projection(projection);
    }
}

impl Effect for ColorEffect {
    type Vertex = ColorVertex;
    type VsOut = ColorOut;
    type GsOut = ColorOut;

    fn vertex_shader(&self, vertex: &ColorVertex) -> ColorOut {
        ColorOut {
            pos: self.transforms.proj_world().transform_point(vertex.pos),
            color: vertex.color,
        }
    }

    fn geometry_shader(&self, v0: &ColorOut, v1: &ColorOut, v2: &ColorOut, _triangle_index: usize) -> [ColorOut; 3] {
        [*v0, *v1, *v2]
    }

    fn screen_transform(&self, vertex: &ColorOut) -> ColorOut {
        let pos = self.viewport.to_screen(vertex.pos);
        ColorOut {
            pos,
            color: vertex.color * pos.w,
        }
    }

    fn pixel_shader(&self, vertex: &ColorOut) -> Color {
        Color::from_unit_rgb(vertex.color * (1.0 / vertex.pos.w))
    }
}

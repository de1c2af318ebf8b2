//! Nearest-texel texture mapping with perspective-correct UVs

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Color, Effect, Mat4, Texture, Transforms, Varying, Vec2, Vec3, Vec4, Viewport};

/// Mesh vertex with texture coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureVertex {
    pub pos: Vec3,
    pub uv: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureOut {
    pub pos: Vec4,
    pub uv: Vec2,
}

crate::impl_attributes!(TextureOut { pos, uv });

impl Varying for TextureOut {
    fn position(&self) -> Vec4 {
        self.pos
    }
}

#[derive(Debug, Clone)]
pub struct TextureEffect {
    viewport: Viewport,
    transforms: Transforms,
    texture: Texture,
}

impl TextureEffect {
    pub fn new(viewport: Viewport, texture: Texture) -> Self {
        Self {
            viewport,
            transforms: Transforms::default(),
            texture,
        }
    }

    pub fn bind_world(&mut self, world: Mat4) {
        self.transforms.bind_world(world);
    }

    pub fn bind_projection(&mut self, projection: Mat4) {
        self.transforms.bind_projection(projection);
    }
}

impl Effect for TextureEffect {
    type Vertex = TextureVertex;
    type VsOut = TextureOut;
    type GsOut = TextureOut;

    fn vertex_shader(&self, vertex: &TextureVertex) -> TextureOut {
        TextureOut {
            pos: self.transforms.proj_world().transform_point(vertex.pos),
            uv: vertex.uv,
        }
    }

    fn geometry_shader(&self, v0: &TextureOut, v1: &TextureOut, v2: &TextureOut, _triangle_index: usize) -> [TextureOut; 3] {
        [*v0, *v1, *v2]
    }

    fn screen_transform(&self, vertex: &TextureOut) -> TextureOut {
        let pos = self.viewport.to_screen(vertex.pos);
        TextureOut {
            pos,
            uv: vertex.uv * pos.w,
        }
    }

    fn pixel_shader(&self, vertex: &TextureOut) -> Color {
        let uv = vertex.uv * (1.0 / vertex.pos.w);
        self.texture.sample(uv.x, uv.y)
    }
}

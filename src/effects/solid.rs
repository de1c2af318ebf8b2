//! Flat-colored geometry, optionally one color per quad

use serde::{Serialize, Deserialize};
use crate::rasterizer::{Color, Effect, Mat4, Transforms, Varying, Vec3, Vec4, Viewport};

/// Position-only mesh vertex
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionVertex {
    pub pos: Vec3,
}

impl PositionVertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { pos: Vec3::new(x, y, z) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidOut {
    pub pos: Vec4,
    pub color: Vec3,
}

crate::impl_attributes!(SolidOut { pos, color });

impl Varying for SolidOut {
    fn position(&self) -> Vec4 {
        self.pos
    }
}

/// Paints every pixel of a triangle one color.
///
/// With a face palette, triangle `i` takes `face_colors[(i / 2) % len]`, so
/// the two triangles of a quad share a color.
#[derive(Debug, Clone)]
pub struct SolidEffect {
    viewport: Viewport,
    transforms: Transforms,
    color: Color,
    face_colors: Vec<Color>,
}

impl SolidEffect {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            transforms: Transforms::default(),
            color: Color::WHITE,
            face_colors: Vec::new(),
        }
    }

    pub fn bind_world(&mut self, world: Mat4) {
        self.transforms.bind_world(world);
    }

    pub fn bind_projection(&mut self, projection: Mat4) {
        self.transforms.bind_projection(projection);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_face_colors(&mut self, colors: Vec<Color>) {
        self.face_colors = colors;
    }

    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    fn triangle_color(&self, triangle_index: usize) -> Color {
        if self.face_colors.is_empty() {
            self.color
        } else {
            self.face_colors[(triangle_index / 2) % self.face_colors.len()]
        }
    }
}

impl Effect for SolidEffect {
    type Vertex = PositionVertex;
    type VsOut = Vec4;
    type GsOut = SolidOut;

    fn vertex_shader(&self, vertex: &PositionVertex) -> Vec4 {
        self.transforms.proj_world().transform_point(vertex.pos)
    }

    fn geometry_shader(&self, v0: &Vec4, v1: &Vec4, v2: &Vec4, triangle_index: usize) -> [SolidOut; 3] {
        let color = self.triangle_color(triangle_index).to_unit_rgb();
        [*v0, *v1, *v2].map(|pos| SolidOut { pos, color })
    }

    fn screen_transform(&self, vertex: &SolidOut) -> SolidOut {
        // Constant across the triangle, so no perspective correction needed
        SolidOut {
            pos: self.viewport.to_screen(vertex.pos),
            color: vertex.color,
        }
    }

    fn pixel_shader(&self, vertex: &SolidOut) -> Color {
        Color::from_unit_rgb(vertex.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_per_quad() {
        let mut effect = SolidEffect::new(Viewport::new(4, 4));
        effect.set_face_colors(vec![Color::RED, Color::GREEN]);
        let v = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let colors: Vec<Color> = (0..6)
            .map(|i| effect.pixel_shader(&effect.geometry_shader(&v, &v, &v, i)[0]))
            .collect();
        assert_eq!(
            colors,
            vec![Color::RED, Color::RED, Color::GREEN, Color::GREEN, Color::RED, Color::RED]
        );
    }

    #[test]
    fn test_without_palette_uses_bound_color() {
        let mut effect = SolidEffect::new(Viewport::new(4, 4));
        effect.set_color(Color::new(10, 200, 30));
        let v = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let out = effect.geometry_shader(&v, &v, &v, 7);
        assert_eq!(effect.pixel_shader(&out[2]), Color::new(10, 200, 30));
    }

    #[test]
    fn test_vertex_shader_applies_projection_after_world() {
        let mut effect = SolidEffect::new(Viewport::new(4, 4));
        effect.bind_world(Mat4::translation(0.0, 0.0, -2.0));
        effect.bind_projection(Mat4::projection(90.0, 1.0, 1.0, 10.0));
        let clip = effect.vertex_shader(&PositionVertex::new(0.0, 0.0, 0.0));
        assert!((clip.w - 2.0).abs() < 1e-5);
        let screen = effect.screen_transform(&SolidOut { pos: clip, color: Vec3::ZERO });
        assert!((screen.pos.x - 2.0).abs() < 1e-5);
        assert!((screen.pos.y - 2.0).abs() < 1e-5);
        assert!((screen.pos.w - 0.5).abs() < 1e-5);
    }
}

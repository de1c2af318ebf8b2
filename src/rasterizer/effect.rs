//! The shading contract the pipeline is generic over

use serde::{Serialize, Deserialize};
use super::interpolate::Interpolate;
use super::math::{Mat4, Vec4};
use super::types::Color;

/// A vertex bundle the rasterizer can interpolate and place on screen.
///
/// After the screen transform, `position()` holds pixel-space `x`/`y`,
/// NDC `z` and `w = 1/w_clip`. The pipeline uses that `w` as the depth test
/// value, larger meaning nearer.
pub trait Varying: Interpolate {
    fn position(&self) -> Vec4;
}

/// A pluggable shading strategy: four shader stages plus the vertex types
/// flowing between them.
///
/// Effects carry their own bound state (matrices, lights, textures); the
/// pipeline only calls the stages in order.
pub trait Effect {
    /// Vertex type stored in the mesh
    type Vertex;
    /// Vertex shader output
    type VsOut: Copy;
    /// Geometry shader output, interpolated across the triangle
    type GsOut: Varying;

    fn vertex_shader(&self, vertex: &Self::Vertex) -> Self::VsOut;

    /// Runs once per triangle with the triangle's ordinal in the mesh.
    fn geometry_shader(
        &self,
        v0: &Self::VsOut,
        v1: &Self::VsOut,
        v2: &Self::VsOut,
        triangle_index: usize,
    ) -> [Self::GsOut; 3];

    /// Perspective divide and viewport mapping
    fn screen_transform(&self, vertex: &Self::GsOut) -> Self::GsOut;

    fn pixel_shader(&self, vertex: &Self::GsOut) -> Color;
}

/// Target size in pixels, used by screen transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Perspective-divide a clip-space position and map it to pixels.
    ///
    /// Returns `(screen_x, screen_y, ndc_z, 1/w)`. Row 0 is the top of the
    /// screen, so NDC `y` is flipped. No clipping: points behind the camera
    /// come out mirrored with negative `w`.
    pub fn to_screen(&self, clip: Vec4) -> Vec4 {
        let inv_w = 1.0 / clip.w;
        let ndc_x = clip.x * inv_w;
        let ndc_y = clip.y * inv_w;
        let ndc_z = clip.z * inv_w;
        Vec4::new(
            (self.width as f32 / 2.0) * (ndc_x + 1.0),
            (self.height as f32 / 2.0) * (1.0 - ndc_y),
            ndc_z,
            inv_w,
        )
    }
}

/// World and projection matrices with their cached product
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transforms {
    world: Mat4,
    projection: Mat4,
    proj_world: Mat4,
}

impl Transforms {
    pub fn new(world: Mat4, projection: Mat4) -> Self {
        Self {
            world,
            projection,
            proj_world: projection * world,
        }
    }

    pub fn bind_world(&mut self, world: Mat4) {
        self.world = world;
        self.proj_world = self.projection * self.world;
    }

    pub fn bind_projection(&mut self, projection: Mat4) {
        self.projection = projection;
        self.proj_world = self.projection * self.world;
    }

    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// `projection * world`
    pub fn proj_world(&self) -> Mat4 {
        self.proj_world
    }
}

//! Draw-call orchestration and scan conversion
//!
//! `draw` runs vertex shading over the whole mesh, then for each index
//! triple: geometry shading, screen transform, and flat-top/flat-bottom scan
//! conversion with a depth test and pixel shading per covered pixel.
//!
//! Coverage follows pixel centers: pixel `(x, y)` belongs to a triangle when
//! `(x + 0.5, y + 0.5)` lies inside it, with the left and top edges
//! inclusive. Two triangles sharing an edge therefore cover each pixel along
//! it exactly once. Nothing is clipped; rows and spans are only clamped to
//! the framebuffer so that off-screen parts produce no writes.

use super::depth::DepthBuffer;
use super::effect::{Effect, Varying};
use super::framebuffer::Framebuffer;
use super::interpolate::Interpolate;
use super::mesh::Mesh;

/// Counters for one draw call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Triangles taken through the geometry stage
    pub triangles: usize,
    /// Triangles skipped for having zero screen-space height
    pub degenerate: usize,
    /// Pixels that reached the depth test
    pub depth_tests: usize,
    /// Pixels that passed the depth test and were shaded
    pub pixels_shaded: usize,
}

impl std::ops::AddAssign for DrawStats {
    fn add_assign(&mut self, other: DrawStats) {
        self.triangles += other.triangles;
        self.degenerate += other.degenerate;
        self.depth_tests += other.depth_tests;
        self.pixels_shaded += other.pixels_shaded;
    }
}

/// Triangle pipeline parametrized over its shading strategy
#[derive(Debug, Clone)]
pub struct Pipeline<E: Effect> {
    pub effect: E,
}

impl<E: Effect> Pipeline<E> {
    pub fn new(effect: E) -> Self {
        Self { effect }
    }

    /// Render every triangle of `mesh` in index order.
    ///
    /// The buffers are borrowed for the duration of the call only. Panics if
    /// the framebuffer and depth buffer differ in size.
    pub fn draw(&self, mesh: &Mesh<E::Vertex>, fb: &mut Framebuffer, depth: &mut DepthBuffer) -> DrawStats {
        assert!(
            fb.width() == depth.width() && fb.height() == depth.height(),
            "framebuffer is {}x{} but depth buffer is {}x{}",
            fb.width(),
            fb.height(),
            depth.width(),
            depth.height()
        );

        let shaded: Vec<E::VsOut> = mesh
            .vertices()
            .iter()
            .map(|v| self.effect.vertex_shader(v))
            .collect();

        let mut raster = Raster {
            effect: &self.effect,
            fb,
            depth,
            stats: DrawStats::default(),
        };

        for (triangle_index, [i0, i1, i2]) in mesh.triangles().enumerate() {
            let [g0, g1, g2] =
                self.effect.geometry_shader(&shaded[i0], &shaded[i1], &shaded[i2], triangle_index);

            let s0 = self.effect.screen_transform(&g0);
            let s1 = self.effect.screen_transform(&g1);
            let s2 = self.effect.screen_transform(&g2);

            raster.draw_triangle(s0, s1, s2);
        }

        log::trace!(
            "draw: {} vertices, {} triangles ({} degenerate), {} depth tests, {} pixels shaded",
            mesh.vertices().len(),
            raster.stats.triangles,
            raster.stats.degenerate,
            raster.stats.depth_tests,
            raster.stats.pixels_shaded
        );

        raster.stats
    }
}

/// Borrowed render state for the duration of one draw call
struct Raster<'a, E: Effect> {
    effect: &'a E,
    fb: &'a mut Framebuffer,
    depth: &'a mut DepthBuffer,
    stats: DrawStats,
}

/// Clamp a ceil'd coordinate into `[0, max]`; NaN maps to 0
fn clamp_coord(v: f32, max: usize) -> usize {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, max as f32) as usize
}

impl<'a, E: Effect> Raster<'a, E> {
    /// Split into flat-bottom and flat-top halves at the middle vertex
    fn draw_triangle(&mut self, v0: E::GsOut, v1: E::GsOut, v2: E::GsOut) {
        self.stats.triangles += 1;

        let (mut v0, mut v1, mut v2) = (v0, v1, v2);
        if v0.position().y > v1.position().y {
            std::mem::swap(&mut v0, &mut v1);
        }
        if v0.position().y > v2.position().y {
            std::mem::swap(&mut v0, &mut v2);
        }
        if v1.position().y > v2.position().y {
            std::mem::swap(&mut v1, &mut v2);
        }

        let (y0, y1, y2) = (v0.position().y, v1.position().y, v2.position().y);

        // Also rejects NaN positions
        if !(y2 > y0) {
            self.stats.degenerate += 1;
            return;
        }

        let q = v0.interpolate(v2, (y1 - y0) / (y2 - y0));

        let (left, right) = if q.position().x > v1.position().x {
            (v1, q)
        } else {
            (q, v1)
        };

        // Flat bottom: apex v0, base left-right
        if y1 > y0 {
            let inv_height = 1.0 / (y1 - y0);
            let left_inc = (left - v0).scale(inv_height);
            let right_inc = (right - v0).scale(inv_height);
            self.draw_flat(v0, v0, left_inc, right_inc, y0, y1);
        }

        // Flat top: base left-right, apex v2
        if y2 > y1 {
            let inv_height = 1.0 / (y2 - y1);
            let left_inc = (v2 - left).scale(inv_height);
            let right_inc = (v2 - right).scale(inv_height);
            self.draw_flat(left, right, left_inc, right_inc, y1, y2);
        }
    }

    /// Walk scanlines between `top` and `bottom`, stepping both edges
    fn draw_flat(
        &mut self,
        left_start: E::GsOut,
        right_start: E::GsOut,
        left_inc: E::GsOut,
        right_inc: E::GsOut,
        top: f32,
        bottom: f32,
    ) {
        let y_start = clamp_coord((top - 0.5).ceil(), self.fb.height());
        let y_end = clamp_coord((bottom - 0.5).ceil(), self.fb.height());
        if y_start >= y_end {
            return;
        }

        // Pre-step to the first pixel center
        let row_center = y_start as f32 + 0.5;
        let mut left = left_start.mul_add(left_inc, row_center - left_start.position().y);
        let mut right = right_start.mul_add(right_inc, row_center - right_start.position().y);

        let width = self.fb.width();
        for y in y_start..y_end {
            let left_x = left.position().x;
            let right_x = right.position().x;

            let x_start = clamp_coord((left_x - 0.5).ceil(), width);
            let x_end = clamp_coord((right_x - 0.5).ceil(), width);
            let span = right_x - left_x;

            for x in x_start..x_end {
                let scan = left.interpolate(right, (x as f32 + 0.5 - left_x) / span);
                self.shade_pixel(x, y, &scan);
            }

            left = left + left_inc;
            right = right + right_inc;
        }
    }

    fn shade_pixel(&mut self, x: usize, y: usize, vertex: &E::GsOut) {
        self.stats.depth_tests += 1;
        if self.depth.test_and_set(x, y, vertex.position().w) {
            let color = self.effect.pixel_shader(vertex);
            self.fb.set_pixel(x, y, color);
            self.stats.pixels_shaded += 1;
        }
    }
}

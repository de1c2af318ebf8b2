//! CPU triangle rasterizer
//!
//! Features:
//! - Programmable vertex, geometry, screen-transform and pixel stages
//! - One scan converter for any vertex layout (see [`Interpolate`])
//! - Perspective-correct attributes, pixel-center coverage
//! - Z-buffer with "larger is nearer" depth values

mod depth;
mod effect;
mod framebuffer;
mod interpolate;
mod math;
mod mesh;
mod pipeline;
mod texture;
mod types;

pub use depth::*;
pub use effect::*;
pub use framebuffer::*;
pub use interpolate::*;
pub use math::*;
pub use mesh::*;
pub use pipeline::*;
pub use texture::*;
pub use types::*;

/// Default target dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;

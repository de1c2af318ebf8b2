//! bloop - a CPU software triangle rasterizer
//!
//! Triangles go through a programmable pipeline (vertex, geometry,
//! screen-transform and pixel stages supplied by an [`rasterizer::Effect`]),
//! get scan converted with a pixel-center rule and land in a framebuffer
//! behind a depth test. Frames can be written out as PNG.

pub mod config;
pub mod effects;
pub mod error;
pub mod rasterizer;
pub mod scene;

pub use config::{ConfigError, RenderConfig};
pub use error::Error;
pub use scene::{build_scene, Scene, SceneKind};

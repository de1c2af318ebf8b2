//! Concrete shading effects
//!
//! Each effect owns its vertex type, its interpolated output type, and the
//! state it needs bound before a draw (matrices, palette, texture, light).

pub mod color;
pub mod phong;
pub mod solid;
pub mod texture;

pub use color::{ColorEffect, ColorOut, ColorVertex};
pub use phong::{NormalVertex, PhongEffect, PhongLight, PhongOut};
pub use solid::{PositionVertex, SolidEffect, SolidOut};
pub use texture::{TextureEffect, TextureOut, TextureVertex};

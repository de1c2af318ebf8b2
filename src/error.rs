//! Top-level error type

use std::path::PathBuf;
use thiserror::Error;
use crate::config::ConfigError;
use crate::rasterizer::TextureError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error("failed to write frame {path}: {source}")]
    Frame { path: PathBuf, source: image::ImageError },
    #[error("failed to create {path}: {source}")]
    OutputDir { path: PathBuf, source: std::io::Error },
}

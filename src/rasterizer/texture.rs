//! Texture images sampled by pixel shaders

use std::path::{Path, PathBuf};
use thiserror::Error;
use super::types::Color;

/// Error type for texture loading
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("texture has no pixels")]
    Empty,
}

/// RGBA texture, row-major with row 0 at the top
#[derive(Debug, Clone)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    name: String,
}

impl Texture {
    /// White texture. Panics on a zero dimension.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_pixels(width, height, vec![Color::WHITE; width * height])
    }

    /// Texture from row-major texels. Panics on a zero dimension or when
    /// `pixels` does not hold exactly `width * height` texels.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Self {
        assert!(width > 0 && height > 0, "texture must not be empty, got {width}x{height}");
        assert_eq!(pixels.len(), width * height, "{width}x{height} texture needs {} texels", width * height);
        Self { width, height, pixels, name: String::new() }
    }

    /// Load a texture from an image file (PNG, JPEG or BMP)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let texture = Self::from_image(img, name)?;
        log::info!("Loaded texture: {} ({}x{})", texture.name, texture.width, texture.height);
        Ok(texture)
    }

    /// Decode a texture from in-memory image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(img, name)
    }

    fn from_image(img: image::DynamicImage, name: String) -> Result<Self, TextureError> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a checkerboard with square cells of `cell` texels. Panics on a
    /// zero dimension.
    pub fn checkerboard(width: usize, height: usize, cell: usize, color1: Color, color2: Color) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / cell) + (y / cell)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        let mut texture = Self::from_pixels(width, height, pixels);
        texture.name = "checkerboard".to_string();
        texture
    }

    /// Texel at (x, y). Panics when out of range.
    pub fn at(&self, x: usize, y: usize) -> Color {
        assert!(x < self.width && y < self.height, "texel ({x}, {y}) outside {}x{}", self.width, self.height);
        self.pixels[y * self.width + x]
    }

    /// Nearest-texel sample. UVs are clamped to [0, 1]; `(1, 1)` is the
    /// bottom-right texel.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        let tx = (u * self.width.saturating_sub(1) as f32) as usize;
        let ty = (v * self.height.saturating_sub(1) as f32) as usize;
        self.at(tx, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_cells() {
        let tex = Texture::checkerboard(8, 8, 4, Color::WHITE, Color::BLACK);
        assert_eq!(tex.at(0, 0), Color::WHITE);
        assert_eq!(tex.at(3, 3), Color::WHITE);
        assert_eq!(tex.at(4, 0), Color::BLACK);
        assert_eq!(tex.at(4, 4), Color::WHITE);
    }

    #[test]
    fn test_sample_corners_and_clamping() {
        let tex = Texture::from_pixels(2, 2, vec![Color::RED, Color::GREEN, Color::BLUE, Color::BLACK]);
        assert_eq!(tex.sample(0.0, 0.0), Color::RED);
        assert_eq!(tex.sample(1.0, 0.0), Color::GREEN);
        assert_eq!(tex.sample(0.0, 1.0), Color::BLUE);
        assert_eq!(tex.sample(1.0, 1.0), Color::BLACK);
        assert_eq!(tex.sample(-3.0, 7.0), Color::BLUE);
        assert_eq!(tex.sample(f32::NAN, 0.0), Color::RED);
    }

    #[test]
    fn test_new_is_white() {
        let tex = Texture::new(3, 2);
        assert_eq!((tex.width(), tex.height()), (3, 2));
        assert_eq!(tex.at(2, 1), Color::WHITE);
        assert_eq!(tex.sample(0.5, 0.5), Color::WHITE);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_new_rejects_empty() {
        Texture::new(0, 0);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_checkerboard_rejects_empty() {
        Texture::checkerboard(0, 4, 2, Color::WHITE, Color::BLACK);
    }

    #[test]
    #[should_panic(expected = "texels")]
    fn test_from_pixels_rejects_wrong_length() {
        Texture::from_pixels(2, 2, vec![Color::RED; 3]);
    }

    #[test]
    #[should_panic]
    fn test_at_out_of_range_panics() {
        Texture::new(2, 2).at(0, 2);
    }

    #[test]
    fn test_from_bytes_round_trips_png() {
        let mut img = image::RgbaImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgba([10, 20, 30, 40]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let tex = Texture::from_bytes(&bytes, "tiny".to_string()).unwrap();
        assert_eq!((tex.width(), tex.height()), (3, 2));
        assert_eq!(tex.at(2, 1), Color::with_alpha(10, 20, 30, 40));
        assert_eq!(tex.name(), "tiny");
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(Texture::from_bytes(b"not an image", String::new()).is_err());
    }

    #[test]
    fn test_from_file_reports_missing_path() {
        let err = Texture::from_file("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, TextureError::Open { .. }));
    }
}

//! Framebuffer for software rendering

use std::path::Path;
use super::types::Color;

/// Owned pixel buffer of packed `R,G,B,A` colors, row 0 at the top
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
    }

    /// Write one pixel. Out-of-range coordinates are rejected and
    /// `false` is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> bool {
        if x < self.width && y < self.height {
            self.pixels[x + y * self.width] = color.to_u32();
            true
        } else {
            false
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color::from_u32(self.pixels[x + y * self.width]))
        } else {
            None
        }
    }

    /// Raw packed pixels for a presentation layer
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixels as RGBA bytes, 4 per pixel
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_be_bytes()).collect()
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            image::Rgba(self.pixels[x as usize + y as usize * self.width].to_be_bytes())
        })
    }

    /// Write the framebuffer to an image file; the format follows the
    /// extension
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(Color::BLUE);
        assert!(fb.pixels().iter().all(|&p| p == Color::BLUE.to_u32()));
        assert_eq!(fb.pixels().len(), 12);
    }

    #[test]
    fn test_set_pixel_rejects_out_of_range() {
        let mut fb = Framebuffer::new(4, 3);
        fb.clear(Color::BLACK);
        assert!(fb.set_pixel(3, 2, Color::RED));
        assert!(!fb.set_pixel(4, 0, Color::RED));
        assert!(!fb.set_pixel(0, 3, Color::RED));
        assert_eq!(fb.get_pixel(3, 2), Some(Color::RED));
        assert_eq!(fb.get_pixel(4, 0), None);
        let red = fb.pixels().iter().filter(|&&p| p == Color::RED.to_u32()).count();
        assert_eq!(red, 1);
    }

    #[test]
    fn test_row_major_layout() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel(1, 2, Color::GREEN);
        assert_eq!(fb.pixels()[1 + 2 * 4], Color::GREEN.to_u32());
    }

    #[test]
    fn test_rgba_bytes_and_image_agree() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set_pixel(0, 0, Color::with_alpha(1, 2, 3, 4));
        fb.set_pixel(1, 0, Color::WHITE);
        assert_eq!(fb.to_rgba_bytes(), vec![1, 2, 3, 4, 255, 255, 255, 255]);
        let img = fb.to_image();
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 4]);
        assert_eq!(img.as_raw(), &fb.to_rgba_bytes());
    }

    #[test]
    fn test_save_png_writes_a_readable_file() {
        let mut fb = Framebuffer::new(5, 4);
        fb.clear(Color::RED);
        let path = std::env::temp_dir().join(format!("bloop-fb-{}.png", std::process::id()));
        fb.save_png(&path).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (5, 4));
        assert_eq!(img.get_pixel(4, 3).0, [255, 0, 0, 255]);
        let _ = std::fs::remove_file(&path);
    }
}

//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::Vec3;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const YELLOW: Color = Color { r: 255, g: 255, b: 0, a: 255 };
    pub const CYAN: Color = Color { r: 0, g: 255, b: 255, a: 255 };
    pub const MAGENTA: Color = Color { r: 255, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from channels in [0, 1]; out-of-range channels saturate
    pub fn from_unit_rgb(rgb: Vec3) -> Self {
        let rgb = rgb.saturate() * 255.0;
        Self::new(rgb.x.round() as u8, rgb.y.round() as u8, rgb.z.round() as u8)
    }

    /// Channels as [0, 1] floats (alpha dropped)
    pub fn to_unit_rgb(self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) * (1.0 / 255.0)
    }

    /// Pack as `R,G,B,A` from the high byte down
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | (self.a as u32)
    }

    pub fn from_u32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self { r, g, b, a }
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> u32 {
        color.to_u32()
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Color {
        Color::from_u32(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_puts_alpha_in_low_byte() {
        let c = Color::with_alpha(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.to_u32(), 0x1234_5678);
        assert_eq!(Color::from_u32(0x1234_5678), c);
        assert_eq!(u32::from(Color::BLACK), 0x0000_00ff);
        assert_eq!(Color::from(0xffff_ffffu32), Color::WHITE);
    }

    #[test]
    fn test_unit_rgb_saturates() {
        let c = Color::from_unit_rgb(Vec3::new(1.5, 0.5, -0.2));
        assert_eq!(c, Color::with_alpha(255, 128, 0, 255));
        let v = Color::WHITE.to_unit_rgb();
        assert!((v.x - 1.0).abs() < 1e-6);
    }
}

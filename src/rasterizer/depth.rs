//! Per-pixel occlusion buffer
//!
//! Larger stored values are nearer. Cells start at -∞ so the first test at
//! any pixel always passes.

#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![f32::NEG_INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.values.fill(f32::NEG_INFINITY);
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "depth access ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        x + y * self.width
    }

    /// Stored depth at (x, y). Panics when out of range.
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.values[self.index(x, y)]
    }

    /// Store `depth` if it is strictly nearer than the current value.
    ///
    /// Returns `true` when the pixel is visible. Ties are occluded, so the
    /// first writer wins on exact coincidence. Panics when out of range.
    pub fn test_and_set(&mut self, x: usize, y: usize, depth: f32) -> bool {
        let i = self.index(x, y);
        if depth > self.values[i] {
            self.values[i] = depth;
            true
        } else {
            false
        }
    }
}

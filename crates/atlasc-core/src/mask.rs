use crate::model::Rect;
use image::RgbaImage;

/// Single-channel binary mask of a sprite's opaque silhouette.
///
/// Out-of-bounds lookups read as transparent, so edge pixels need no
/// special casing in neighbourhood scans.
#[derive(Debug, Clone)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Thresholds the alpha channel: pixel set iff `alpha >= threshold`.
    ///
    /// A threshold of 0 marks every pixel opaque.
    pub fn from_alpha(rgba: &RgbaImage, threshold: u8) -> Self {
        let (width, height) = rgba.dimensions();
        let mut data = vec![0u8; (width as usize) * (height as usize)];
        for (i, px) in rgba.pixels().enumerate() {
            if px[3] >= threshold {
                data[i] = 1;
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.data[(y as usize) * (self.width as usize) + (x as usize)] != 0
    }

    /// One round of morphological dilation with a 3x3 structuring element:
    /// pixel set iff it or any 8-neighbour is set.
    pub fn dilate(&self) -> Mask {
        let mut data = vec![0u8; self.data.len()];
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                'probe: for dy in -1..=1 {
                    for dx in -1..=1 {
                        if self.get(x + dx, y + dy) {
                            data[(y as usize) * (self.width as usize) + (x as usize)] = 1;
                            break 'probe;
                        }
                    }
                }
            }
        }
        Mask {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// True if the pixel is set and so are all eight neighbours.
    pub fn interior(&self, x: i32, y: i32) -> bool {
        if !self.get(x, y) {
            return false;
        }
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) != (0, 0) && !self.get(x + dx, y + dy) {
                    return false;
                }
            }
        }
        true
    }

    /// First set pixel in row-major scan order, if any.
    pub fn first_set_pixel(&self) -> Option<(i32, i32)> {
        let i = self.data.iter().position(|&v| v != 0)?;
        let x = (i % self.width as usize) as i32;
        let y = (i / self.width as usize) as i32;
        Some((x, y))
    }

    /// Tight axis-aligned bounds of the set pixels (inclusive min,
    /// exclusive max), or `None` for an all-transparent mask. This is the
    /// sprite's trim rectangle.
    pub fn opaque_bounds(&self) -> Option<Rect> {
        let mut x1 = u32::MAX;
        let mut y1 = u32::MAX;
        let mut x2 = 0u32;
        let mut y2 = 0u32;
        let mut any = false;
        for y in 0..self.height {
            let row = &self.data[(y as usize) * (self.width as usize)..][..self.width as usize];
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    let x = x as u32;
                    x1 = x1.min(x);
                    y1 = y1.min(y);
                    x2 = x2.max(x);
                    y2 = y2.max(y);
                    any = true;
                }
            }
        }
        if !any {
            return None;
        }
        Some(Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1))
    }
}

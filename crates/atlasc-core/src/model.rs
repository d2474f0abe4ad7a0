use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// `[xmin, ymin, xmax, ymax]` with exclusive maxes.
    pub fn min_max(&self) -> [u32; 4] {
        [self.x, self.y, self.x + self.w, self.y + self.h]
    }
}

/// Integer point in pixel coordinates (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// In-memory image to pack (key + decoded image).
#[derive(Debug)]
pub struct InputImage {
    pub key: String,
    pub image: image::DynamicImage,
}

/// Triangulated silhouette of one sprite.
///
/// `positions` are in source-image coordinates, `uvs` in sheet pixel
/// coordinates; both have the same length and every index in `indices`
/// addresses them.
#[derive(Debug, Clone)]
pub struct SpriteMesh {
    pub positions: Vec<Point>,
    pub uvs: Vec<Point>,
    pub indices: Vec<u16>,
}

impl SpriteMesh {
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }
}

/// One placed sprite within the atlas.
#[derive(Debug, Clone)]
pub struct SpriteFrame {
    /// User-specified key (e.g., the input file path).
    pub key: String,
    /// Original (untrimmed) image size.
    pub source_size: (u32, u32),
    /// Trimmed opaque region within the source image. Zero-area when the
    /// input had no pixel above the alpha threshold.
    pub sprite_rect: Rect,
    /// Placed rectangle within the sheet: exactly the blitted pixels,
    /// inside the slot's border and padding bands. Always the same
    /// dimensions as `sprite_rect`.
    pub sheet_rect: Rect,
    /// Present only when mesh generation is on and produced triangles.
    pub mesh: Option<SpriteMesh>,
}

/// Atlas layout: final sheet dimensions plus the placed sprites in
/// input order.
#[derive(Debug, Clone)]
pub struct Atlas {
    pub width: u32,
    pub height: u32,
    pub sprites: Vec<SpriteFrame>,
}

/// Output of a build: the atlas record and the composited RGBA sheet.
#[derive(Debug)]
pub struct AtlasOutput {
    pub atlas: Atlas,
    pub rgba: RgbaImage,
}

/// Statistics about packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtlasStats {
    pub num_sprites: usize,
    /// Sheet area in pixels (width * height).
    pub sheet_area: u64,
    /// Sum of trimmed sprite areas.
    pub used_area: u64,
    /// used_area / sheet_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
}

impl Atlas {
    /// Computes packing statistics for this atlas.
    pub fn stats(&self) -> AtlasStats {
        let sheet_area = (self.width as u64) * (self.height as u64);
        let used_area: u64 = self
            .sprites
            .iter()
            .map(|s| (s.sprite_rect.w as u64) * (s.sprite_rect.h as u64))
            .sum();
        let occupancy = if sheet_area > 0 {
            used_area as f64 / sheet_area as f64
        } else {
            0.0
        };
        AtlasStats {
            num_sprites: self.sprites.len(),
            sheet_area,
            used_area,
            occupancy,
        }
    }
}

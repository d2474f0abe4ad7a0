use serde::{Deserialize, Serialize};

/// Build configuration for one atlas.
///
/// Key notes:
///   - `border` is the transparent gutter around each sprite's slot;
///     `padding` is the inner margin between that slot and the blitted
///     pixels. Both inflate the packed rectangle by `2 * (border + padding)`.
///   - `mesh` enables silhouette meshes; `max_verts` caps the simplified
///     polygon size per sprite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Maximum sheet width in pixels.
    pub max_width: u32,
    /// Maximum sheet height in pixels.
    pub max_height: u32,
    /// Transparent border around each sprite slot.
    pub border: u32,
    /// Padding band inside each sprite slot, around the blitted pixels.
    pub padding: u32,
    /// Round final sheet dimensions up to powers of two.
    pub power_of_two: bool,
    /// Generate a triangle mesh per sprite covering its opaque silhouette.
    pub mesh: bool,
    /// Cap on the simplified outline vertex count (>= 3).
    pub max_verts: u32,
    /// Pixels with alpha >= this value count as opaque (0 means every pixel).
    pub alpha_threshold: u8,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            max_width: 2048,
            max_height: 2048,
            border: 2,
            padding: 1,
            power_of_two: false,
            mesh: false,
            max_verts: 25,
            alpha_threshold: 20,
        }
    }
}

impl AtlasConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if dimensions are zero, `max_verts` cannot form a
    /// triangle, or border/padding leave no room for even a 1x1 sprite.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(AtlasError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }

        if self.mesh && self.max_verts < 3 {
            return Err(AtlasError::InvalidConfig(format!(
                "max_verts must be at least 3 to form a polygon (got {})",
                self.max_verts
            )));
        }

        // Smallest possible slot is a 1x1 sprite plus its border/padding band.
        let slot = 1 + 2 * (self.border + self.padding);
        if slot > self.max_width || slot > self.max_height {
            return Err(AtlasError::InvalidConfig(format!(
                "border ({}) and padding ({}) leave no usable space in a {}x{} sheet",
                self.border, self.padding, self.max_width, self.max_height
            )));
        }

        Ok(())
    }

    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn border(mut self, v: u32) -> Self {
        self.cfg.border = v;
        self
    }
    pub fn padding(mut self, v: u32) -> Self {
        self.cfg.padding = v;
        self
    }
    pub fn pow2(mut self, v: bool) -> Self {
        self.cfg.power_of_two = v;
        self
    }
    pub fn mesh(mut self, v: bool) -> Self {
        self.cfg.mesh = v;
        self
    }
    pub fn max_verts(mut self, v: u32) -> Self {
        self.cfg.max_verts = v;
        self
    }
    pub fn alpha_threshold(mut self, v: u8) -> Self {
        self.cfg.alpha_threshold = v;
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}

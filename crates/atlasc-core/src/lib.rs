//! Core library for building sprite atlases from alpha-carrying images.
//!
//! - Per-sprite geometry: alpha thresholding, mask dilation, boundary
//!   tracing, outline simplification under a vertex budget, outward
//!   correction, Delaunay triangulation, UV resolution.
//! - Atlas layout: skyline rect packing into a bounded sheet, canvas
//!   sizing (4-pixel alignment, optional power-of-two), compositing.
//! - The data model is serde-serializable; `export` builds the JSON
//!   manifest record, the CLI crate writes files.
//!
//! Quick example:
//! ```ignore
//! use image::ImageReader;
//! use atlasc_core::{build_atlas, AtlasConfig, InputImage};
//! # fn main() -> anyhow::Result<()> {
//! let img = ImageReader::open("hero.png")?.decode()?;
//! let inputs = vec![InputImage { key: "hero.png".into(), image: img }];
//! let cfg = AtlasConfig { mesh: true, ..Default::default() };
//! let out = build_atlas(inputs, cfg)?;
//! println!("sheet: {}x{}", out.atlas.width, out.atlas.height);
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod correct;
pub mod error;
pub mod export;
pub mod mask;
pub mod mesh;
pub mod model;
pub mod outline;
pub mod packer;
pub mod pipeline;
pub mod simplify;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
pub mod prelude {
    pub use crate::config::{AtlasConfig, AtlasConfigBuilder};
    pub use crate::error::{AtlasError, Result};
    pub use crate::export::{to_manifest, Manifest};
    pub use crate::model::{Atlas, AtlasOutput, AtlasStats, InputImage, Point, Rect, SpriteFrame, SpriteMesh};
    pub use crate::pipeline::build_atlas;
}

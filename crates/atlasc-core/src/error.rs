use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid dimensions: width and height must be greater than 0 (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("out of space: unable to fit sprite '{key}' ({width}x{height}) into the {max_width}x{max_height} sheet")]
    OutOfSpace {
        key: String,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("nothing to pack: input list is empty")]
    Empty,

    #[error("mesh for sprite '{key}' has {count} triangles, which exceeds the 16-bit index budget")]
    TooManyTriangles { key: String, count: usize },

    #[error("encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, AtlasError>;

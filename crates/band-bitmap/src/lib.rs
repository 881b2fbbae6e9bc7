//! Uncompressed bitmap decoding and monochrome packing for band displays.
//!
//! Decodes BMP files into a read-only [`RasterSource`], exposes zero-copy
//! transformed views of it (crop, rotate, flip, negate) and packs a view into
//! the column-major 1-bpp buffer consumed by the band's display.

pub mod compose;
pub mod mono;
pub mod options;
pub mod pixel;
pub mod raster;
pub mod sample;
pub mod view;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use compose::Layered;
pub use mono::{debug_dump, hex_dump, pack_monochrome, packed_len};
pub use options::ImageOptions;
pub use pixel::Pixel;
pub use raster::{BitDepth, RasterSource};
pub use sample::{PixelSource, Sample, View, resolve, sample};
pub use view::{Reorient, Rotation, ViewTransform};

/// Length of the file header plus the smallest supported info header.
pub const MIN_HEADER_LEN: usize = 54;

/// Errors that can occur while decoding a bitmap.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Unsupported BMP format: invalid header")]
    InvalidHeader,

    #[error("Unsupported BMP format: compression {0}")]
    UnsupportedCompression(u16),

    #[error("Unsupported BMP format: {0} bits-per-pixel")]
    UnsupportedDepth(u16),

    #[error("Pixel data truncated: need {needed} bytes, have {actual}")]
    Truncated { needed: u64, actual: u64 },

    #[error("Failed to read bitmap file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

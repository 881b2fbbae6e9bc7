//! BMP header parsing and pixel buffer layout.
//!
//! A [`RasterSource`] owns the whole file and records where each row lives.
//! Rows are normalized so that row 0 is always the top of the image, whether
//! the file stores them bottom-up (positive height) or top-down.

use std::path::Path;

use tracing::debug;

use crate::sample::View;
use crate::{DecodeError, MIN_HEADER_LEN, Result};

// -- Header field offsets (little-endian) --
const OFF_DATA: usize = 0x0A;
const OFF_HEADER_SIZE: usize = 0x0E;
const OFF_WIDTH: usize = 0x12;
const OFF_HEIGHT: usize = 0x16;
const OFF_BITS: usize = 0x1C;
const OFF_COMPRESSION: usize = 0x1E;

/// Supported pixel depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 1-bit palette index, leftmost pixel in the MSB.
    One,
    /// 4-bit palette index, leftmost pixel in the high nibble.
    Four,
    /// 8-bit palette index.
    Eight,
    /// BGR888.
    TwentyFour,
    /// BGRA8888.
    ThirtyTwo,
}

impl BitDepth {
    /// Map the header's bits-per-pixel field to a supported depth.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(Self::One),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            24 => Some(Self::TwentyFour),
            32 => Some(Self::ThirtyTwo),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::One => 1,
            Self::Four => 4,
            Self::Eight => 8,
            Self::TwentyFour => 24,
            Self::ThirtyTwo => 32,
        }
    }

    /// Whether pixel values index a color table.
    pub fn is_paletted(self) -> bool {
        matches!(self, Self::One | Self::Four | Self::Eight)
    }

    /// Padded size of one row: rows are aligned to 32 bits.
    fn row_bytes(self, width: u32) -> u64 {
        (u64::from(width) * u64::from(self.bits())).div_ceil(32) * 4
    }

    /// Bytes of a row actually holding pixel values (no padding).
    fn used_bytes(self, width: u32) -> u64 {
        (u64::from(width) * u64::from(self.bits())).div_ceil(8)
    }
}

/// A decoded bitmap: the file bytes plus their row layout.
///
/// Immutable after construction. Any number of [`View`]s may borrow it.
#[derive(Debug, Clone)]
pub struct RasterSource {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    depth: BitDepth,
    row_bytes: usize,
    bottom_up: bool,
    data_offset: usize,
    palette_offset: usize,
}

impl RasterSource {
    /// Decode BMP data, taking ownership of the buffer.
    pub fn decode(buffer: Vec<u8>) -> Result<Self> {
        if buffer.len() < MIN_HEADER_LEN || !buffer.starts_with(b"BM") {
            return Err(DecodeError::InvalidHeader);
        }

        let palette_offset = u64::from(read_u32(&buffer, OFF_HEADER_SIZE)) + OFF_HEADER_SIZE as u64;
        let width = read_u32(&buffer, OFF_WIDTH);
        let signed_height = read_i32(&buffer, OFF_HEIGHT);
        let height = signed_height.unsigned_abs();
        let bits = read_u16(&buffer, OFF_BITS);
        let compression = read_u16(&buffer, OFF_COMPRESSION);

        if compression != 0 {
            return Err(DecodeError::UnsupportedCompression(compression));
        }
        let depth = BitDepth::from_bits(bits).ok_or(DecodeError::UnsupportedDepth(bits))?;

        let row_bytes = depth.row_bytes(width);
        let first_row = u64::from(read_u32(&buffer, OFF_DATA));
        let bottom_up = signed_height > 0;
        let actual = buffer.len() as u64;

        // Every row, including the last one's pixel bytes, must be in the buffer.
        let top_row = if height == 0 {
            first_row
        } else {
            let last_row = u64::from(height - 1)
                .checked_mul(row_bytes)
                .and_then(|span| span.checked_add(first_row));
            let needed = last_row.and_then(|last| last.checked_add(depth.used_bytes(width)));
            match needed {
                Some(needed) if needed <= actual => {}
                needed => {
                    return Err(DecodeError::Truncated {
                        needed: needed.unwrap_or(u64::MAX),
                        actual,
                    });
                }
            }
            // Bottom-up files store the top row last.
            if bottom_up {
                last_row.unwrap_or(first_row)
            } else {
                first_row
            }
        };

        debug!(
            width,
            height,
            bits,
            bottom_up,
            row_bytes,
            "Decoded bitmap header"
        );

        // All offsets below are bounded by buffer.len(), so they fit in usize.
        Ok(Self {
            width,
            height,
            depth,
            row_bytes: row_bytes as usize,
            bottom_up,
            data_offset: top_row as usize,
            palette_offset: usize::try_from(palette_offset).unwrap_or(usize::MAX),
            buffer,
        })
    }

    /// Read a BMP file from disk and decode it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading bitmap file");
        let data = std::fs::read(path)?;
        Self::decode(data)
    }

    /// Borrow an untransformed view covering the whole image.
    pub fn view(&self) -> View<'_> {
        View::new(self)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.depth.bits()
    }

    /// Signed byte distance from one row to the next one down.
    ///
    /// Negative for bottom-up files.
    pub fn stride(&self) -> isize {
        let stride = self.row_bytes as isize;
        if self.bottom_up { -stride } else { stride }
    }

    /// Byte offset of the top row.
    pub fn data_offset(&self) -> usize {
        self.data_offset
    }

    /// Byte offset of the BGRA color table.
    pub fn palette_offset(&self) -> usize {
        self.palette_offset
    }

    /// The whole underlying file.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Byte offset of the start of row `y` (0 = top).
    ///
    /// Only meaningful for `y < height`, which decode has bounds-checked.
    pub(crate) fn row_start(&self, y: u32) -> usize {
        let span = y as usize * self.row_bytes;
        if self.bottom_up {
            self.data_offset - span
        } else {
            self.data_offset + span
        }
    }
}

fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_i32(buf: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

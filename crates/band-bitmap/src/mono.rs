//! Monochrome packing for the band display, plus text renderings for logs.
//!
//! The display takes 8 vertically stacked pixels per byte: bit 0 is the top
//! row of each 8-row band, and consecutive bytes step along `x` before moving
//! down to the next band.

use std::fmt::Write as _;

use tracing::debug;

use crate::sample::PixelSource;

/// Bytes per line in [`hex_dump`].
const HEX_BYTES_PER_LINE: usize = 16;

/// Size of the packed buffer for an image of the given apparent size.
pub fn packed_len(width: u32, height: u32) -> usize {
    width as usize * height.div_ceil(8) as usize
}

/// Pack an image into the display's column-major 1-bpp format.
///
/// A bit is set where the pixel is light.
pub fn pack_monochrome<S: PixelSource + ?Sized>(image: &S) -> Vec<u8> {
    let (width, height) = (image.width(), image.height());
    debug!(width, height, "Packing monochrome image");

    let stride = width as usize;
    let mut data = vec![0u8; packed_len(width, height)];
    for y in 0..height {
        let band = (y >> 3) as usize * stride;
        let bit = 1u8 << (y & 7);
        for x in 0..width {
            if image.pixel_at(i64::from(x), i64::from(y)).is_light() {
                data[band + x as usize] |= bit;
            }
        }
    }
    data
}

/// Render an image as text, two rows per line, for diagnostics.
///
/// Light pixels are drawn with half/full block glyphs. Lines end in CRLF.
pub fn debug_dump<S: PixelSource + ?Sized>(image: &S) -> String {
    let (width, height) = (image.width(), image.height());
    let mut out = String::new();
    for y in (0..height).step_by(2) {
        for x in 0..width {
            let (x, y) = (i64::from(x), i64::from(y));
            let upper = image.pixel_at(x, y).is_light();
            let lower = y + 1 < i64::from(height) && image.pixel_at(x, y + 1).is_light();
            out.push(match (upper, lower) {
                (true, true) => '\u{2588}',
                (true, false) => '\u{2580}',
                (false, true) => '\u{2584}',
                (false, false) => ' ',
            });
        }
        out.push_str("\r\n");
    }
    out
}

/// Format bytes as `0xHH, ` entries, 16 per line.
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 6 + data.len() / HEX_BYTES_PER_LINE + 1);
    for line in data.chunks(HEX_BYTES_PER_LINE) {
        for byte in line {
            let _ = write!(out, "0x{byte:02X}, ");
        }
        out.push('\n');
    }
    out
}

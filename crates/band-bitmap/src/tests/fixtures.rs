//! In-memory BMP files for tests.

use crate::MIN_HEADER_LEN;

/// Two-entry palette (BGRA): black, white.
pub(crate) const BLACK_WHITE: [[u8; 4]; 2] = [[0, 0, 0, 0], [255, 255, 255, 0]];

/// Writes a BITMAPINFOHEADER bitmap with arbitrary field values.
pub(crate) struct BmpBuilder {
    width: u32,
    height: u32,
    bits: u16,
    compression: u16,
    top_down: bool,
    palette: Vec<[u8; 4]>,
    rows: Vec<Vec<u8>>,
}

impl BmpBuilder {
    pub(crate) fn new(width: u32, height: u32, bits: u16) -> Self {
        Self {
            width,
            height,
            bits,
            compression: 0,
            top_down: false,
            palette: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn compression(mut self, val: u16) -> Self {
        self.compression = val;
        self
    }

    pub(crate) fn top_down(mut self) -> Self {
        self.top_down = true;
        self
    }

    /// Palette entries in on-disk BGRA order.
    pub(crate) fn palette(mut self, entries: &[[u8; 4]]) -> Self {
        self.palette = entries.to_vec();
        self
    }

    /// Unpadded pixel rows, top row first. Missing rows are zero.
    pub(crate) fn rows(mut self, rows: &[Vec<u8>]) -> Self {
        self.rows = rows.to_vec();
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize * usize::from(self.bits)).div_ceil(32) * 4;
        let data_offset = MIN_HEADER_LEN + self.palette.len() * 4;
        let file_size = data_offset + row_bytes * self.height as usize;
        let height = if self.top_down {
            -(self.height as i32)
        } else {
            self.height as i32
        };

        let mut out = Vec::with_capacity(file_size);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(data_offset as u32).to_le_bytes());
        // Info header
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bits.to_le_bytes());
        out.extend_from_slice(&u32::from(self.compression).to_le_bytes());
        out.extend_from_slice(&[0; 20]);
        assert_eq!(out.len(), MIN_HEADER_LEN);

        for entry in &self.palette {
            out.extend_from_slice(entry);
        }

        let mut stored: Vec<Vec<u8>> = (0..self.height as usize)
            .map(|y| {
                let mut row = self.rows.get(y).cloned().unwrap_or_default();
                row.resize(row_bytes, 0);
                row
            })
            .collect();
        if !self.top_down {
            stored.reverse();
        }
        for row in stored {
            out.extend_from_slice(&row);
        }
        out
    }
}

/// 24-bit image filled with one RGB color.
pub(crate) fn solid_rgb(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let [r, g, b] = rgb;
    let row: Vec<u8> = (0..width).flat_map(|_| [b, g, r]).collect();
    let rows = vec![row; height as usize];
    BmpBuilder::new(width, height, 24).rows(&rows).build()
}

/// 24-bit image where every pixel is distinct: r = 16x, g = 16y, b = 128.
///
/// Dimensions must not exceed 16.
pub(crate) fn corner_image(width: u32, height: u32) -> Vec<u8> {
    let rows: Vec<Vec<u8>> = (0..height)
        .map(|y| {
            (0..width)
                .flat_map(|x| [128, (y * 16) as u8, (x * 16) as u8])
                .collect()
        })
        .collect();
    BmpBuilder::new(width, height, 24).rows(&rows).build()
}

//! Per-pixel resolution through a view, across all supported depths.

use crate::compose::Layered;
use crate::pixel::Pixel;
use crate::raster::{BitDepth, RasterSource};
use crate::view::{Reorient, ViewTransform};

/// Outcome of sampling one apparent coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sample {
    /// A pixel read from the image.
    Pixel(Pixel),
    /// Nothing here: outside the view window or outside the source image.
    Empty,
}

impl Sample {
    /// Collapse to a pixel, using [`Pixel::BLACK`] where there is none.
    pub fn or_black(self) -> Pixel {
        match self {
            Self::Pixel(pixel) => pixel,
            Self::Empty => Pixel::BLACK,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Anything that can be sampled at apparent coordinates.
pub trait PixelSource {
    /// Apparent width in pixels.
    fn width(&self) -> u32;

    /// Apparent height in pixels.
    fn height(&self) -> u32;

    /// Resolve apparent `(x, y)`; never fails.
    fn resolve(&self, x: i64, y: i64) -> Sample;

    /// Resolve apparent `(x, y)`, black-transparent where there is no pixel.
    fn pixel_at(&self, x: i64, y: i64) -> Pixel {
        self.resolve(x, y).or_black()
    }
}

/// Sample the source through `view`, black-transparent where there is no pixel.
pub fn sample(source: &RasterSource, view: &ViewTransform, x: i64, y: i64) -> Pixel {
    resolve(source, view, x, y).or_black()
}

/// Sample the source through `view`, reporting [`Sample::Empty`] explicitly.
pub fn resolve(source: &RasterSource, view: &ViewTransform, x: i64, y: i64) -> Sample {
    let Some((sx, sy)) = view.locate(x, y) else {
        return Sample::Empty;
    };
    let (Ok(sx), Ok(sy)) = (u32::try_from(sx), u32::try_from(sy)) else {
        return Sample::Empty;
    };
    if sx >= source.width() || sy >= source.height() {
        return Sample::Empty;
    }

    match read_pixel(source, sx, sy) {
        Some(pixel) if view.is_negative() => Sample::Pixel(pixel.negate()),
        Some(pixel) => Sample::Pixel(pixel),
        None => Sample::Empty,
    }
}

/// Read stored pixel `(x, y)`; `None` if a palette entry lies past the buffer.
fn read_pixel(source: &RasterSource, x: u32, y: u32) -> Option<Pixel> {
    let buffer = source.as_bytes();
    let row = source.row_start(y);
    let x = x as usize;

    match source.depth() {
        // Leftmost pixel in the MSB
        BitDepth::One => {
            let byte = *buffer.get(row + x / 8)?;
            let index = (byte >> (7 - (x & 7))) & 0x01;
            palette_entry(source, index)
        }
        // Leftmost pixel in the high nibble
        BitDepth::Four => {
            let byte = *buffer.get(row + x / 2)?;
            let index = if x & 1 == 0 { byte >> 4 } else { byte & 0x0f };
            palette_entry(source, index)
        }
        BitDepth::Eight => {
            let index = *buffer.get(row + x)?;
            palette_entry(source, index)
        }
        BitDepth::TwentyFour => Pixel::from_bgr(buffer.get(row + x * 3..)?),
        BitDepth::ThirtyTwo => Pixel::from_bgra(buffer.get(row + x * 4..)?),
    }
}

fn palette_entry(source: &RasterSource, index: u8) -> Option<Pixel> {
    let offset = source
        .palette_offset()
        .checked_add(usize::from(index) * 4)?;
    Pixel::from_bgra(source.as_bytes().get(offset..)?)
}

/// A [`ViewTransform`] bound to the source it views.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    source: &'a RasterSource,
    transform: ViewTransform,
}

impl<'a> View<'a> {
    /// Untransformed view of the whole source.
    pub fn new(source: &'a RasterSource) -> Self {
        Self {
            source,
            transform: ViewTransform::identity(source.width(), source.height()),
        }
    }

    pub fn with_transform(source: &'a RasterSource, transform: ViewTransform) -> Self {
        Self { source, transform }
    }

    pub fn source(&self) -> &'a RasterSource {
        self.source
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Layer this view over `background`, which shows wherever this one is empty.
    pub fn with_background(self, background: View<'a>) -> Layered<'a> {
        Layered::new(self, Some(background))
    }
}

impl PixelSource for View<'_> {
    fn width(&self) -> u32 {
        self.transform.width()
    }

    fn height(&self) -> u32 {
        self.transform.height()
    }

    fn resolve(&self, x: i64, y: i64) -> Sample {
        resolve(self.source, &self.transform, x, y)
    }
}

impl Reorient for View<'_> {
    fn map_transform(&self, f: impl Fn(&ViewTransform) -> ViewTransform) -> Self {
        Self {
            source: self.source,
            transform: f(&self.transform),
        }
    }
}

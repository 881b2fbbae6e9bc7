//! Image preparation options for the band display.
//!
//! These options describe the transform sequence applied to a source image
//! before it is packed: crop, flips, optional background, negate and rotate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compose::Layered;
use crate::mono::debug_dump;
use crate::raster::RasterSource;
use crate::sample::{PixelSource, View};
use crate::view::Reorient;

/// Side of the square cropped from the image when an offset is given.
pub const DEFAULT_CROP_SIZE: u32 = 32;

/// Largest accepted crop square; larger sizes are clamped.
pub const MAX_CROP_SIZE: u32 = 1024;

/// Default rotation: the display is mounted a quarter turn counter-clockwise.
pub const DEFAULT_ROTATE: i32 = -90;

/// Default first display row the image is placed at.
pub const DEFAULT_DISPLAY_START: u32 = 64;

/// Configuration options for preparing an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Left edge of the crop square.
    pub offset_x: i64,

    /// Top edge of the crop square.
    pub offset_y: i64,

    /// Side of the crop square. Only used when an offset is non-zero.
    ///
    /// Clamped to [`MAX_CROP_SIZE`].
    pub crop_size: u32,

    /// Mirror left-right (applied to the background too).
    pub flip_horizontal: bool,

    /// Mirror top-bottom (applied to the background too).
    pub flip_vertical: bool,

    /// Complement all channels after layering.
    pub negate: bool,

    /// Final clockwise rotation in degrees, snapped to quarter turns.
    pub rotate: i32,

    /// First display row the image is drawn at.
    pub display_start: u32,

    /// Display rows occupied by the image; 0 means the packed width.
    pub display_rows: u32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            crop_size: DEFAULT_CROP_SIZE,
            flip_horizontal: false,
            flip_vertical: false,
            negate: false,
            rotate: DEFAULT_ROTATE,
            display_start: DEFAULT_DISPLAY_START,
            display_rows: 0,
        }
    }
}

impl ImageOptions {
    /// Create options with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set crop offset.
    pub fn with_offset(mut self, x: i64, y: i64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Builder: set crop square size.
    pub fn with_crop_size(mut self, val: u32) -> Self {
        self.crop_size = val;
        self
    }

    /// Builder: set horizontal flip.
    pub fn with_flip_horizontal(mut self, val: bool) -> Self {
        self.flip_horizontal = val;
        self
    }

    /// Builder: set vertical flip.
    pub fn with_flip_vertical(mut self, val: bool) -> Self {
        self.flip_vertical = val;
        self
    }

    /// Builder: set negate flag.
    pub fn with_negate(mut self, val: bool) -> Self {
        self.negate = val;
        self
    }

    /// Builder: set rotation in degrees.
    pub fn with_rotate(mut self, degrees: i32) -> Self {
        self.rotate = degrees;
        self
    }

    /// Builder: set display placement.
    pub fn with_display(mut self, start: u32, rows: u32) -> Self {
        self.display_start = start;
        self.display_rows = rows;
        self
    }

    /// Display rows to reserve for an image packed at `packed_width`.
    ///
    /// The packed width runs down the display, so it is the default height.
    pub fn display_rows_for(&self, packed_width: u32) -> u32 {
        if self.display_rows > 0 {
            self.display_rows
        } else {
            packed_width
        }
    }

    /// Apply the option sequence to `foreground`, layered over `background`.
    ///
    /// Each stage's rendering is logged at debug level.
    pub fn prepare<'a>(
        &self,
        foreground: &'a RasterSource,
        background: Option<&'a RasterSource>,
    ) -> Layered<'a> {
        let mut image = foreground.view();
        log_stage("Original", &image);

        if self.offset_x != 0 || self.offset_y != 0 {
            let size = self.crop_size.min(MAX_CROP_SIZE);
            image = image.crop(self.offset_x, self.offset_y, size, size);
            log_stage("Crop", &image);
        }

        // Over-crop before flipping so both layers mirror within the same window
        let back = background.map(RasterSource::view);
        if let Some(back) = back {
            log_stage("Background", &back);
            image = image.crop(0, 0, back.width(), back.height());
        }

        image = self.apply_flips(image);
        if self.flip_horizontal || self.flip_vertical {
            log_stage("Flip", &image);
        }

        let mut layered = match back {
            Some(back) => {
                let layered = image.with_background(self.apply_flips(back));
                log_stage("Over-crop with background", &layered);
                layered
            }
            None => Layered::from(image),
        };

        if self.negate {
            layered = layered.negate();
            log_stage("Negate", &layered);
        }
        if self.rotate != 0 {
            layered = layered.rotate(self.rotate);
            debug!(degrees = self.rotate, "Rotated image");
            log_stage("Rotate", &layered);
        }
        layered
    }

    fn apply_flips<'a>(&self, mut view: View<'a>) -> View<'a> {
        if self.flip_horizontal {
            view = view.flip_horizontal();
        }
        if self.flip_vertical {
            view = view.flip_vertical();
        }
        view
    }
}

fn log_stage<S: PixelSource>(stage: &str, image: &S) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!(
            stage,
            width = image.width(),
            height = image.height(),
            "Image stage\n{}",
            debug_dump(image)
        );
    }
}

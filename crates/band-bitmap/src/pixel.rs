//! RGBA8888 pixel value and its luminance classification.

/// Weight of the red channel in sRGB relative luminance.
const LUMA_R: f64 = 0.2126;
/// Weight of the green channel in sRGB relative luminance.
const LUMA_G: f64 = 0.7152;
/// Weight of the blue channel in sRGB relative luminance.
const LUMA_B: f64 = 0.0722;

/// Luminance at or above which a pixel is considered light.
const LIGHT_THRESHOLD: f64 = 0.5;

/// A single RGBA pixel with 8-bit channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Black, fully transparent. Returned wherever a view has no pixel.
    pub const BLACK: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Read a pixel stored in BGRA8888 order at the start of `bytes`.
    pub fn from_bgra(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b, g, r, a, ..] => Some(Self::new(*r, *g, *b, *a)),
            _ => None,
        }
    }

    /// Read a pixel stored in BGR888 order at the start of `bytes`.
    ///
    /// The alpha channel is zero.
    pub fn from_bgr(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b, g, r, ..] => Some(Self::new(*r, *g, *b, 0)),
            _ => None,
        }
    }

    /// Complement every channel, alpha included.
    pub const fn negate(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b, 255 - self.a)
    }

    /// CIE 1931 linear luminance (sRGB weights), in `0.0..=1.0`.
    pub fn luminance(self) -> f64 {
        LUMA_R * (f64::from(self.r) / 255.0)
            + LUMA_G * (f64::from(self.g) / 255.0)
            + LUMA_B * (f64::from(self.b) / 255.0)
    }

    /// Monochrome classification: `true` = light, `false` = dark.
    pub fn is_light(self) -> bool {
        self.luminance() >= LIGHT_THRESHOLD
    }
}

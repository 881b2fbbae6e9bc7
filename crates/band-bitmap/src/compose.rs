//! Layering a view over a background view.
//!
//! Where the foreground has no pixel (outside its window or past the edge
//! of its source) the background shows through.

use crate::sample::{PixelSource, Sample, View};
use crate::view::{Reorient, ViewTransform};

/// A foreground view with an optional background behind it.
#[derive(Debug, Clone, Copy)]
pub struct Layered<'a> {
    foreground: View<'a>,
    background: Option<View<'a>>,
}

impl<'a> Layered<'a> {
    pub fn new(foreground: View<'a>, background: Option<View<'a>>) -> Self {
        Self {
            foreground,
            background,
        }
    }

    pub fn foreground(&self) -> View<'a> {
        self.foreground
    }

    pub fn background(&self) -> Option<View<'a>> {
        self.background
    }
}

impl<'a> From<View<'a>> for Layered<'a> {
    fn from(view: View<'a>) -> Self {
        Self::new(view, None)
    }
}

impl PixelSource for Layered<'_> {
    fn width(&self) -> u32 {
        self.foreground.width()
    }

    fn height(&self) -> u32 {
        self.foreground.height()
    }

    fn resolve(&self, x: i64, y: i64) -> Sample {
        match self.foreground.resolve(x, y) {
            Sample::Empty => self
                .background
                .map_or(Sample::Empty, |background| background.resolve(x, y)),
            pixel => pixel,
        }
    }
}

/// Transforms apply to both layers so they stay registered.
impl Reorient for Layered<'_> {
    fn map_transform(&self, f: impl Fn(&ViewTransform) -> ViewTransform) -> Self {
        Self {
            foreground: self.foreground.map_transform(&f),
            background: self.background.map(|b| b.map_transform(&f)),
        }
    }
}

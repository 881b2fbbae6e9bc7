//! Composable view transforms: crop, rotate, flip and negate.
//!
//! A [`ViewTransform`] never touches pixel bytes. Each operation derives a new
//! value from the previous one; sampling applies the accumulated mapping.

use tracing::trace;

/// A rotation snapped to the nearest quarter turn (clockwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Bucket an arbitrary angle in degrees, negative angles included.
    ///
    /// `[45,135)` is 90, `[135,225)` is 180, `[225,315)` is 270, anything
    /// else is 0.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            45..135 => Self::Deg90,
            135..225 => Self::Deg180,
            225..315 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    /// Whether this rotation exchanges width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Mapping from apparent view coordinates to stored pixel coordinates.
///
/// The window (`width` x `height`, in stored orientation) is placed at
/// `offset` within the source. Axis inversion mirrors within the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewTransform {
    offset_x: i64,
    offset_y: i64,
    width: u32,
    height: u32,
    swap_axes: bool,
    invert_x: bool,
    invert_y: bool,
    negative: bool,
}

impl ViewTransform {
    /// The identity view over a `width` x `height` image.
    pub const fn identity(width: u32, height: u32) -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            width,
            height,
            swap_axes: false,
            invert_x: false,
            invert_y: false,
            negative: false,
        }
    }

    /// Apparent width (after any axis swap).
    pub fn width(&self) -> u32 {
        if self.swap_axes { self.height } else { self.width }
    }

    /// Apparent height (after any axis swap).
    pub fn height(&self) -> u32 {
        if self.swap_axes { self.width } else { self.height }
    }

    pub fn offset(&self) -> (i64, i64) {
        (self.offset_x, self.offset_y)
    }

    pub fn swaps_axes(&self) -> bool {
        self.swap_axes
    }

    pub fn inverts_x(&self) -> bool {
        self.invert_x
    }

    pub fn inverts_y(&self) -> bool {
        self.invert_y
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Restrict the view to a rectangle given in apparent coordinates.
    ///
    /// Apparent `(x, y)` of this view becomes `(0, 0)` of the result. The
    /// rectangle may extend past the image; those pixels sample as empty.
    pub fn crop(&self, x: i64, y: i64, width: u32, height: u32) -> Self {
        let (x, y, width, height) = if self.swap_axes {
            (y, x, height, width)
        } else {
            (x, y, width, height)
        };
        trace!(x, y, width, height, "Cropping view");
        Self {
            offset_x: crop_offset(self.offset_x, self.invert_x, x, self.width, width),
            offset_y: crop_offset(self.offset_y, self.invert_y, y, self.height, height),
            width,
            height,
            ..*self
        }
    }

    /// Rotate clockwise by `degrees`, snapped to a quarter turn.
    pub fn rotate(&self, degrees: i32) -> Self {
        let rotation = Rotation::from_degrees(degrees);
        trace!(degrees, ?rotation, "Rotating view");
        match rotation {
            Rotation::Deg0 => *self,
            Rotation::Deg90 => Self {
                swap_axes: !self.swap_axes,
                invert_y: !self.invert_y,
                ..*self
            },
            Rotation::Deg180 => Self {
                invert_x: !self.invert_x,
                invert_y: !self.invert_y,
                ..*self
            },
            Rotation::Deg270 => Self {
                swap_axes: !self.swap_axes,
                invert_x: !self.invert_x,
                ..*self
            },
        }
    }

    /// Mirror left-right.
    pub fn flip_horizontal(&self) -> Self {
        Self {
            invert_x: !self.invert_x,
            ..*self
        }
    }

    /// Mirror top-bottom.
    pub fn flip_vertical(&self) -> Self {
        Self {
            invert_y: !self.invert_y,
            ..*self
        }
    }

    /// Complement every channel of every sampled pixel.
    pub fn negate(&self) -> Self {
        Self {
            negative: !self.negative,
            ..*self
        }
    }

    /// Map apparent `(x, y)` to stored pixel coordinates.
    ///
    /// Returns `None` when the point lies outside the view window. The result
    /// may still lie outside the source image.
    pub fn locate(&self, x: i64, y: i64) -> Option<(i64, i64)> {
        let (x, y) = if self.swap_axes { (y, x) } else { (x, y) };
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        let x = if self.invert_x { w - 1 - x } else { x };
        let y = if self.invert_y { h - 1 - y } else { y };
        Some((
            x.saturating_add(self.offset_x),
            y.saturating_add(self.offset_y),
        ))
    }
}

/// New window offset along one axis after a crop.
///
/// On an inverted axis the window is mirrored, so the crop start is measured
/// from the far edge and the shrink of the window moves the origin.
fn crop_offset(offset: i64, inverted: bool, start: i64, old_extent: u32, new_extent: u32) -> i64 {
    if inverted {
        let shrink = i64::from(old_extent) - i64::from(new_extent);
        offset.saturating_sub(start).saturating_add(shrink)
    } else {
        offset.saturating_add(start)
    }
}

/// Views whose orientation is described by a [`ViewTransform`].
///
/// Implementors only provide [`map_transform`](Reorient::map_transform);
/// every operation returns a new view over the same pixels.
pub trait Reorient: Sized {
    /// Derive a new view by rewriting the transform(s) of this one.
    fn map_transform(&self, f: impl Fn(&ViewTransform) -> ViewTransform) -> Self;

    /// See [`ViewTransform::crop`].
    fn crop(&self, x: i64, y: i64, width: u32, height: u32) -> Self {
        self.map_transform(|t| t.crop(x, y, width, height))
    }

    /// See [`ViewTransform::rotate`].
    fn rotate(&self, degrees: i32) -> Self {
        self.map_transform(|t| t.rotate(degrees))
    }

    fn flip_horizontal(&self) -> Self {
        self.map_transform(ViewTransform::flip_horizontal)
    }

    fn flip_vertical(&self) -> Self {
        self.map_transform(ViewTransform::flip_vertical)
    }

    fn negate(&self) -> Self {
        self.map_transform(ViewTransform::negate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_buckets() {
        assert_eq!(Rotation::from_degrees(0), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(44), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(45), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(134), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(135), Rotation::Deg180);
        assert_eq!(Rotation::from_degrees(225), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(314), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(315), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(360), Rotation::Deg0);
    }

    #[test]
    fn test_negative_rotation_normalizes() {
        assert_eq!(Rotation::from_degrees(-90), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(-180), Rotation::Deg180);
        assert_eq!(Rotation::from_degrees(-270), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-360), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(-1), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(-450), Rotation::Deg270);
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let t = ViewTransform::identity(5, 3);
        assert_eq!(t.rotate(0), t);
        assert_eq!(t.rotate(360), t.rotate(0));
    }

    #[test]
    fn test_rotate_flag_table() {
        let t = ViewTransform::identity(5, 3);

        let r90 = t.rotate(90);
        assert!(r90.swaps_axes() && !r90.inverts_x() && r90.inverts_y());
        assert_eq!((r90.width(), r90.height()), (3, 5));

        let r180 = t.rotate(180);
        assert!(!r180.swaps_axes() && r180.inverts_x() && r180.inverts_y());
        assert_eq!((r180.width(), r180.height()), (5, 3));

        let r270 = t.rotate(270);
        assert!(r270.swaps_axes() && r270.inverts_x() && !r270.inverts_y());
    }

    #[test]
    fn test_rotate_composes_with_existing_flags() {
        let t = ViewTransform::identity(5, 3).flip_vertical();
        // invert_y toggles back off
        let r = t.rotate(90);
        assert!(r.swaps_axes() && !r.inverts_y());
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let t = ViewTransform::identity(7, 4).crop(1, 1, 3, 2);
        assert_eq!(t.rotate(90).rotate(90).rotate(90).rotate(90), t);
        assert_eq!(t.rotate(-90), t.rotate(270));
    }

    #[test]
    fn test_double_flips_and_negate_are_identity() {
        let t = ViewTransform::identity(4, 4);
        assert_eq!(t.flip_horizontal().flip_horizontal(), t);
        assert_eq!(t.flip_vertical().flip_vertical(), t);
        assert_eq!(t.negate().negate(), t);
        assert!(t.negate().is_negative());
    }

    #[test]
    fn test_locate_identity_and_bounds() {
        let t = ViewTransform::identity(4, 3);
        assert_eq!(t.locate(0, 0), Some((0, 0)));
        assert_eq!(t.locate(3, 2), Some((3, 2)));
        assert_eq!(t.locate(4, 0), None);
        assert_eq!(t.locate(0, 3), None);
        assert_eq!(t.locate(-1, 0), None);
    }

    #[test]
    fn test_locate_rotate_90_maps_bottom_left_to_origin() {
        let t = ViewTransform::identity(4, 3).rotate(90);
        assert_eq!(t.locate(0, 0), Some((0, 2)));
        assert_eq!(t.locate(2, 0), Some((0, 0)));
        assert_eq!(t.locate(0, 3), Some((3, 2)));
    }

    #[test]
    fn test_crop_sets_apparent_size() {
        let t = ViewTransform::identity(10, 8).crop(2, 3, 4, 5);
        assert_eq!((t.width(), t.height()), (4, 5));
        assert_eq!(t.offset(), (2, 3));

        let swapped = ViewTransform::identity(10, 8).rotate(90).crop(2, 3, 4, 5);
        assert_eq!((swapped.width(), swapped.height()), (4, 5));
    }

    #[test]
    fn test_crop_origin_matches_prior_view() {
        let base = ViewTransform::identity(10, 8);
        let variants = [
            base,
            base.flip_horizontal(),
            base.flip_vertical(),
            base.rotate(90),
            base.rotate(180),
            base.rotate(270),
            base.rotate(90).flip_horizontal(),
            base.crop(1, 2, 7, 5).rotate(270).flip_vertical(),
        ];
        for view in variants {
            let cropped = view.crop(2, 1, 3, 2);
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (2, 1)] {
                assert_eq!(
                    cropped.locate(dx, dy),
                    view.locate(2 + dx, 1 + dy),
                    "Mismatch at ({dx}, {dy}) for {view:?}"
                );
            }
        }
    }

    #[test]
    fn test_crop_on_full_extent_uses_plain_offset() {
        // Same window size: inverted axis just subtracts the start
        let t = ViewTransform::identity(6, 6).flip_horizontal().crop(2, 0, 6, 6);
        assert_eq!(t.offset(), (-2, 0));
    }

    #[test]
    fn test_oversized_crop_points_outside_window() {
        let t = ViewTransform::identity(2, 2).crop(0, 0, 4, 4);
        assert_eq!(t.locate(3, 3), Some((3, 3)));
        assert_eq!(t.locate(4, 0), None);
    }
}

use crate::{PixelSource, RasterSource, Reorient, View, pack_monochrome, packed_len};

pub(crate) mod fixtures;


/// Collect every pixel of a view, row by row.
fn pixels<S: PixelSource>(image: &S) -> Vec<crate::Pixel> {
    let mut out = Vec::new();
    for y in 0..i64::from(image.height()) {
        for x in 0..i64::from(image.width()) {
            out.push(image.pixel_at(x, y));
        }
    }
    out
}

fn decode(data: Vec<u8>) -> RasterSource {
    RasterSource::decode(data).expect("Failed to decode test bitmap")
}

#[test]
fn test_packed_length_for_every_orientation() {
    let src = decode(fixtures::corner_image(5, 11));
    let base = src.view();
    let views: [View<'_>; 5] = [
        base,
        base.rotate(90),
        base.rotate(180).flip_horizontal(),
        base.crop(1, 2, 3, 9),
        base.crop(1, 2, 3, 9).rotate(-90),
    ];
    for view in views {
        assert_eq!(
            pack_monochrome(&view).len(),
            packed_len(view.width(), view.height())
        );
    }
    assert_eq!(pack_monochrome(&base.rotate(90)).len(), 11);
}

#[test]
fn test_views_share_source_across_threads() {
    let src = decode(fixtures::corner_image(6, 4));
    let expected = pack_monochrome(&src.view().rotate(90));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| pack_monochrome(&src.view().rotate(90))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

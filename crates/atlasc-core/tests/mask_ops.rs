use atlasc_core::mask::Mask;
use atlasc_core::model::Rect;
use image::{Rgba, RgbaImage};

fn image_with_block(w: u32, h: u32, block: Rect, alpha: u8) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
    for y in block.y..block.y + block.h {
        for x in block.x..block.x + block.w {
            img.put_pixel(x, y, Rgba([255, 0, 0, alpha]));
        }
    }
    img
}

#[test]
fn threshold_is_inclusive() {
    let img = image_with_block(4, 4, Rect::new(1, 1, 1, 1), 100);
    assert!(Mask::from_alpha(&img, 100).get(1, 1));
    assert!(!Mask::from_alpha(&img, 101).get(1, 1));
}

#[test]
fn threshold_zero_marks_everything_opaque() {
    let img = RgbaImage::from_pixel(6, 4, Rgba([0, 0, 0, 0]));
    let mask = Mask::from_alpha(&img, 0);
    assert_eq!(mask.opaque_bounds(), Some(Rect::new(0, 0, 6, 4)));
}

#[test]
fn out_of_bounds_reads_transparent() {
    let img = image_with_block(3, 3, Rect::new(0, 0, 3, 3), 255);
    let mask = Mask::from_alpha(&img, 1);
    assert!(!mask.get(-1, 0));
    assert!(!mask.get(0, -1));
    assert!(!mask.get(3, 0));
    assert!(!mask.get(0, 3));
}

#[test]
fn dilate_grows_one_ring() {
    let img = image_with_block(5, 5, Rect::new(2, 2, 1, 1), 255);
    let dilated = Mask::from_alpha(&img, 1).dilate();
    for y in 1..=3 {
        for x in 1..=3 {
            assert!(dilated.get(x, y), "({x},{y}) should be set after dilation");
        }
    }
    assert!(!dilated.get(0, 0));
    assert!(!dilated.get(4, 2));
    assert_eq!(dilated.opaque_bounds(), Some(Rect::new(1, 1, 3, 3)));
}

#[test]
fn dilation_is_clipped_at_image_edges() {
    let img = image_with_block(3, 3, Rect::new(0, 0, 1, 1), 255);
    let dilated = Mask::from_alpha(&img, 1).dilate();
    assert_eq!(dilated.opaque_bounds(), Some(Rect::new(0, 0, 2, 2)));
}

#[test]
fn opaque_bounds_are_tight() {
    // The bounds of a fully opaque rectangular region are that rectangle.
    let img = image_with_block(32, 32, Rect::new(8, 8, 16, 16), 255);
    let mask = Mask::from_alpha(&img, 128);
    assert_eq!(mask.opaque_bounds(), Some(Rect::new(8, 8, 16, 16)));
}

#[test]
fn single_pixel_bounds() {
    let img = image_with_block(8, 8, Rect::new(3, 4, 1, 1), 255);
    let mask = Mask::from_alpha(&img, 20);
    assert_eq!(mask.opaque_bounds(), Some(Rect::new(3, 4, 1, 1)));
}

#[test]
fn transparent_mask_has_no_bounds() {
    let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
    let mask = Mask::from_alpha(&img, 20);
    assert_eq!(mask.opaque_bounds(), None);
    assert_eq!(mask.first_set_pixel(), None);
}

#[test]
fn interior_requires_all_eight_neighbours() {
    let img = image_with_block(5, 5, Rect::new(1, 1, 3, 3), 255);
    let mask = Mask::from_alpha(&img, 1);
    assert!(mask.interior(2, 2));
    assert!(!mask.interior(1, 1));
    assert!(!mask.interior(0, 0));

    // A pixel on the image edge is never interior, even in a full mask.
    let full = Mask::from_alpha(&image_with_block(3, 3, Rect::new(0, 0, 3, 3), 255), 1);
    assert!(!full.interior(0, 0));
    assert!(full.interior(1, 1));
}

use atlasc_core::mask::Mask;
use atlasc_core::model::{Point, Rect};
use atlasc_core::outline::extract_outline;
use image::{Rgba, RgbaImage};

fn mask_with_block(w: u32, h: u32, block: Rect) -> Mask {
    let mut img = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
    for y in block.y..block.y + block.h {
        for x in block.x..block.x + block.w {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    Mask::from_alpha(&img, 1)
}

/// Twice the signed area; positive for clockwise winding in image
/// coordinates (x right, y down).
fn signed_area2(pts: &[Point]) -> i64 {
    let mut sum = 0i64;
    for i in 0..pts.len() {
        let a = pts[i];
        let b = pts[(i + 1) % pts.len()];
        sum += (a.x as i64) * (b.y as i64) - (b.x as i64) * (a.y as i64);
    }
    sum
}

#[test]
fn empty_mask_yields_empty_outline() {
    let mask = mask_with_block(8, 8, Rect::new(0, 0, 0, 0));
    assert!(extract_outline(&mask).is_empty());
}

#[test]
fn isolated_pixel_yields_single_point() {
    let mask = mask_with_block(5, 5, Rect::new(2, 3, 1, 1));
    assert_eq!(extract_outline(&mask), vec![Point::new(2, 3)]);
}

#[test]
fn square_outline_is_closed_and_clockwise() {
    let mask = mask_with_block(8, 8, Rect::new(2, 2, 4, 4));
    let outline = extract_outline(&mask);

    // A 4x4 block has a 12-pixel boundary ring.
    assert_eq!(outline.len(), 12);
    assert_eq!(outline[0], Point::new(2, 2));
    assert!(signed_area2(&outline) > 0, "outline must wind clockwise");

    // No point repeats; every point is a set pixel with a transparent
    // 4-neighbour.
    for (i, p) in outline.iter().enumerate() {
        assert!(!outline[i + 1..].contains(p), "duplicate point {p:?}");
        assert!(mask.get(p.x, p.y));
        assert!(
            !mask.get(p.x - 1, p.y)
                || !mask.get(p.x + 1, p.y)
                || !mask.get(p.x, p.y - 1)
                || !mask.get(p.x, p.y + 1),
            "{p:?} is not a boundary pixel"
        );
    }
}

#[test]
fn full_mask_traces_the_image_border() {
    let mask = mask_with_block(4, 4, Rect::new(0, 0, 4, 4));
    let outline = extract_outline(&mask);
    assert_eq!(outline.len(), 12);
    assert!(signed_area2(&outline) > 0);
    for p in &outline {
        assert!(p.x == 0 || p.x == 3 || p.y == 0 || p.y == 3);
    }
}

#[test]
fn outline_follows_the_outermost_region() {
    // Two disjoint blobs: only the one reached first in scan order is traced.
    let mut img = RgbaImage::from_pixel(12, 6, Rgba([0, 0, 0, 0]));
    for y in 1..3 {
        for x in 1..4 {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    for y in 3..5 {
        for x in 8..11 {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    let mask = Mask::from_alpha(&img, 1);
    let outline = extract_outline(&mask);
    assert!(!outline.is_empty());
    for p in &outline {
        assert!(p.x <= 4, "trace escaped into the second blob: {p:?}");
    }
}

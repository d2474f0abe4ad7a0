use crate::mask::Mask;
use crate::model::{Point, Rect};

/// Distance a vertex is pushed per correction step, in pixels.
const OFFSET_STEP: f32 = 2.0;
/// Below this cross-product magnitude the corner is treated as collinear.
const COLLINEAR_EPS: f32 = 1e-5;

/// Pushes polygon vertices outward until no edge crosses the opaque mask.
///
/// Simplification straightens corners, which can drag edges through the
/// silhouette; this sweep inflates the polygon back out. The mask here is
/// the thresholded silhouette, not the dilated one used for tracing.
/// Vertices are clamped to the sprite's trim box, so a vertex pinned
/// against it ends the correction of that edge.
pub fn correct_outline(pts: &mut [Point], mask: &Mask, bounds: Rect) {
    let n = pts.len();
    if n < 3 {
        return;
    }
    for p in pts.iter_mut() {
        *p = clamp_point(*p, bounds);
    }
    debug_assert!(
        pts.iter().all(|p| !mask.interior(p.x, p.y)),
        "outline vertex starts inside the opaque silhouette"
    );

    // One sweep over all edges; each colliding edge is re-tested after its
    // endpoints move and abandoned once an endpoint stops moving.
    let step_cap = (mask.width() + mask.height()) as usize;
    for i in 0..n {
        let next = (i + 1) % n;
        for _ in 0..step_cap {
            if !line_hits_mask(pts[i], pts[next], mask) {
                break;
            }
            if !offset_vertex(pts, i, bounds) {
                break;
            }
            offset_vertex(pts, next, bounds);
        }
    }
}

/// Moves `pts[i]` one step along its outward corner normal, floored to
/// integers and clamped to `bounds`. Returns whether the vertex moved.
fn offset_vertex(pts: &mut [Point], i: usize, bounds: Rect) -> bool {
    let n = pts.len();
    let prev = pts[(i + n - 1) % n];
    let next = pts[(i + 1) % n];
    let v = pts[i];

    let e1 = normalize((prev.x - v.x) as f32, (prev.y - v.y) as f32);
    let e2 = normalize((next.x - v.x) as f32, (next.y - v.y) as f32);
    let z = e1.0 * e2.1 - e1.1 * e2.0;

    let (dx, dy) = if z.abs() < COLLINEAR_EPS {
        // Straight corner: rotate the incoming edge left, which points
        // outward for a clockwise outline.
        (-e1.1, e1.0)
    } else {
        let k = if z > 0.0 { 1.0 } else { -1.0 };
        let (bx, by) = normalize(e1.0 + e2.0, e1.1 + e2.1);
        (k * bx, k * by)
    };

    let moved = clamp_point(
        Point::new(
            (v.x as f32 + OFFSET_STEP * dx).floor() as i32,
            (v.y as f32 + OFFSET_STEP * dy).floor() as i32,
        ),
        bounds,
    );
    pts[i] = moved;
    moved != v
}

fn normalize(x: f32, y: f32) -> (f32, f32) {
    let len = (x * x + y * y).sqrt();
    if len <= f32::EPSILON {
        return (0.0, 0.0);
    }
    (x / len, y / len)
}

/// Clamps to the trim box, inclusive of its exclusive-max edge: a point
/// on that edge maps to the sheet rect's far edge in UV space.
fn clamp_point(p: Point, bounds: Rect) -> Point {
    Point::new(
        p.x.clamp(bounds.x as i32, (bounds.x + bounds.w) as i32),
        p.y.clamp(bounds.y as i32, (bounds.y + bounds.h) as i32),
    )
}

/// Bresenham line test with inclusive endpoints: true if any traversed
/// pixel is opaque.
pub fn line_hits_mask(a: Point, b: Point, mask: &Mask) -> bool {
    let (mut x0, mut y0) = (a.x, a.y);
    let (x1, y1) = (b.x, b.y);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if mask.get(x0, y0) {
            return true;
        }
        if x0 == x1 && y0 == y1 {
            return false;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

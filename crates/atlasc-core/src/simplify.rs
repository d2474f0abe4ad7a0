use crate::model::Point;

/// Initial simplification distance and the amount it grows by on every
/// retry of the vertex-budget search.
const EPSILON_START: f32 = 0.5;
const EPSILON_STEP: f32 = 0.5;

/// Reduces `outline` to at most `max_verts` points while preserving its
/// shape.
///
/// Runs distance-threshold simplification starting at epsilon 0.5 and
/// retries from the original outline with a larger epsilon until the
/// result fits the budget. The first pass always runs, even when the
/// outline is already small enough, to strip pixel-level noise.
/// Consecutive duplicates and a duplicated closing point are removed.
pub fn simplify_outline(outline: &[Point], max_verts: usize) -> Vec<Point> {
    debug_assert!(max_verts >= 3);
    let mut epsilon = EPSILON_START;
    loop {
        let mut pts = rdp_simplify(outline, epsilon);
        dedup_closed(&mut pts);
        if pts.len() <= max_verts {
            return pts;
        }
        // Each retry weakly decreases the vertex count and ultimately
        // collapses the polyline to its two endpoints, so this terminates.
        epsilon += EPSILON_STEP;
    }
}

/// Ramer-Douglas-Peucker on an open polyline; endpoints are always kept.
fn rdp_simplify(points: &[Point], epsilon: f32) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut spans = vec![(0usize, points.len() - 1)];
    while let Some((first, last)) = spans.pop() {
        let mut max_dist = epsilon;
        let mut split = None;
        for i in first + 1..last {
            let d = perpendicular_distance(points[i], points[first], points[last]);
            if d > max_dist {
                max_dist = d;
                split = Some(i);
            }
        }
        if let Some(i) = split {
            keep[i] = true;
            spans.push((first, i));
            spans.push((i, last));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

fn perpendicular_distance(p: Point, a: Point, b: Point) -> f32 {
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (dx, dy) = (b.x as f32 - ax, b.y as f32 - ay);
    let (px, py) = (p.x as f32, p.y as f32);
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f32::EPSILON {
        return ((px - ax) * (px - ax) + (py - ay) * (py - ay)).sqrt();
    }
    (dx * (ay - py) - (ax - px) * dy).abs() / len_sq.sqrt()
}

/// Removes consecutive duplicates and a last point equal to the first,
/// treating the polyline as a closed ring.
fn dedup_closed(pts: &mut Vec<Point>) {
    pts.dedup();
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
}

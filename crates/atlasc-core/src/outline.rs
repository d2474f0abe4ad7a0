use crate::mask::Mask;
use crate::model::Point;

/// Moore neighbourhood, clockwise from "right" in image coordinates
/// (x right, y down).
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

fn is_boundary(mask: &Mask, x: i32, y: i32) -> bool {
    mask.get(x, y)
        && (!mask.get(x - 1, y) || !mask.get(x + 1, y) || !mask.get(x, y - 1)
            || !mask.get(x, y + 1))
}

/// Traces the outermost boundary of the mask's opaque region and returns
/// it as an ordered polyline, clockwise in image coordinates.
///
/// Every returned point is a set pixel with at least one transparent
/// 4-neighbour. An all-transparent mask yields an empty polyline; an
/// isolated pixel yields a single point.
pub fn extract_outline(mask: &Mask) -> Vec<Point> {
    let Some((sx, sy)) = mask.first_set_pixel() else {
        return Vec::new();
    };

    // Initial search direction: towards the first transparent neighbour,
    // so the clockwise scan starts just outside the region.
    let mut dir = DIRECTIONS
        .iter()
        .position(|&(dx, dy)| !mask.get(sx + dx, sy + dy))
        .unwrap_or(0);

    let mut outline = Vec::new();
    let (mut x, mut y) = (sx, sy);
    let max_steps = (mask.width() as usize) * (mask.height() as usize) * 2;

    for _ in 0..max_steps {
        outline.push(Point::new(x, y));

        let search_start = (dir + 5) % 8;
        let mut advanced = false;
        for k in 0..8 {
            let d = (search_start + k) % 8;
            let (dx, dy) = DIRECTIONS[d];
            let (nx, ny) = (x + dx, y + dy);
            if !mask.get(nx, ny) {
                continue;
            }
            if nx == sx && ny == sy {
                // Closed the loop.
                return outline;
            }
            if is_boundary(mask, nx, ny) {
                x = nx;
                y = ny;
                dir = d;
                advanced = true;
                break;
            }
        }
        if !advanced {
            // Isolated pixel: no neighbour to walk to.
            return outline;
        }
    }
    outline
}

use crate::error::{AtlasError, Result};
use crate::model::{Point, Rect};
use delaunator::{triangulate, Point as DelaunayPoint};

/// Triangulates the corrected silhouette polygon.
///
/// The Delaunay primitive covers the convex hull of the input points; no
/// hole carving is performed. Returns `None` when the input is degenerate
/// (fewer than 3 points, or all collinear), which callers treat as "no
/// mesh". Indices are 16-bit; exceeding that budget is an error.
pub fn triangulate_polygon(key: &str, pts: &[Point]) -> Result<Option<(Vec<Point>, Vec<u16>)>> {
    if pts.len() < 3 {
        return Ok(None);
    }
    let input: Vec<DelaunayPoint> = pts
        .iter()
        .map(|p| DelaunayPoint {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect();

    let triangulation = triangulate(&input);
    if triangulation.triangles.is_empty() {
        return Ok(None);
    }

    let num_tris = triangulation.triangles.len() / 3;
    if num_tris >= 1 << 16 {
        return Err(AtlasError::TooManyTriangles {
            key: key.to_string(),
            count: num_tris,
        });
    }

    let mut indices = Vec::with_capacity(triangulation.triangles.len());
    for idx in triangulation.triangles {
        let idx = u16::try_from(idx)
            .map_err(|_| AtlasError::Encode(format!("mesh vertex index {idx} exceeds u16")))?;
        indices.push(idx);
    }
    Ok(Some((pts.to_vec(), indices)))
}

/// Maps mesh vertices from source-image coordinates into sheet pixel
/// coordinates: `uv = (p - sprite_rect.min) + sheet_rect.min`.
///
/// `sheet_rect` is the blit destination, already inside the slot's border
/// and padding bands, so every vertex lands on its blitted texel. An
/// empty position list yields an empty UV list.
pub fn resolve_uvs(positions: &[Point], sprite_rect: Rect, sheet_rect: Rect) -> Vec<Point> {
    positions
        .iter()
        .map(|p| {
            Point::new(
                p.x - sprite_rect.x as i32 + sheet_rect.x as i32,
                p.y - sprite_rect.y as i32 + sheet_rect.y as i32,
            )
        })
        .collect()
}

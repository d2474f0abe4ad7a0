use crate::model::Atlas;
use serde::{Deserialize, Serialize};

/// Manifest document written next to the sheet PNG.
///
/// All coordinates are integer pixels; rects are `[xmin, ymin, xmax, ymax]`
/// with exclusive maxes. Sprite order matches input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Basename of the sheet image, e.g. `atlas.png`.
    pub image: String,
    pub image_width: u32,
    pub image_height: u32,
    pub sprites: Vec<ManifestSprite>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSprite {
    /// Input path in unix form (forward slashes on all platforms).
    pub name: String,
    /// Original image size `[w, h]`.
    pub size: [u32; 2],
    pub sprite_rect: [u32; 4],
    pub sheet_rect: [u32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<ManifestMesh>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMesh {
    pub num_tris: usize,
    pub num_vertices: usize,
    pub indices: Vec<u16>,
    /// Vertex positions in source-image coordinates.
    pub positions: Vec<[i32; 2]>,
    /// Vertex positions in sheet pixel coordinates.
    pub uvs: Vec<[i32; 2]>,
}

/// Builds the manifest record for `atlas`; `image_name` is the basename
/// the sheet PNG will be written under.
pub fn to_manifest(atlas: &Atlas, image_name: &str) -> Manifest {
    let sprites = atlas
        .sprites
        .iter()
        .map(|s| {
            let mesh = s.mesh.as_ref().map(|m| ManifestMesh {
                num_tris: m.num_triangles(),
                num_vertices: m.num_vertices(),
                indices: m.indices.clone(),
                positions: m.positions.iter().map(|p| [p.x, p.y]).collect(),
                uvs: m.uvs.iter().map(|p| [p.x, p.y]).collect(),
            });
            ManifestSprite {
                name: s.key.clone(),
                size: [s.source_size.0, s.source_size.1],
                sprite_rect: s.sprite_rect.min_max(),
                sheet_rect: s.sheet_rect.min_max(),
                mesh,
            }
        })
        .collect();
    Manifest {
        image: image_name.to_string(),
        image_width: atlas.width,
        image_height: atlas.height,
        sprites,
    }
}

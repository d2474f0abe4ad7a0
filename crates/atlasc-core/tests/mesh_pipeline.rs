use atlasc_core::{build_atlas, AtlasConfig, InputImage};
use image::{DynamicImage, Rgba, RgbaImage};

fn circle_image(size: u32, cx: i32, cy: i32, r: i32) -> DynamicImage {
    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x as u32, y as u32, Rgba([255, 255, 255, 255]));
            }
        }
    }
    DynamicImage::ImageRgba8(img)
}

#[test]
fn circle_sprite_gets_a_valid_mesh() {
    let cfg = AtlasConfig {
        mesh: true,
        max_verts: 12,
        alpha_threshold: 128,
        ..Default::default()
    };
    let out = build_atlas(
        vec![InputImage {
            key: "circle.png".into(),
            image: circle_image(32, 16, 16, 10),
        }],
        cfg,
    )
    .expect("build");

    let s = &out.atlas.sprites[0];
    let mesh = s.mesh.as_ref().expect("circle should produce a mesh");

    assert!(mesh.num_vertices() <= 12);
    assert!(mesh.num_triangles() >= 1);
    assert!(mesh.num_triangles() < 1 << 16);
    assert_eq!(mesh.positions.len(), mesh.uvs.len());
    assert_eq!(mesh.indices.len(), mesh.num_triangles() * 3);

    for &i in &mesh.indices {
        assert!((i as usize) < mesh.num_vertices());
    }

    // Every triangle has positive area.
    for tri in mesh.indices.chunks(3) {
        let [a, b, c] = [
            mesh.positions[tri[0] as usize],
            mesh.positions[tri[1] as usize],
            mesh.positions[tri[2] as usize],
        ];
        let area2 = (b.x - a.x) as i64 * (c.y - a.y) as i64
            - (b.y - a.y) as i64 * (c.x - a.x) as i64;
        assert_ne!(area2, 0, "degenerate triangle {tri:?}");
    }

    // Positions stay inside the trim box; UVs stay inside the sheet rect.
    let r = s.sprite_rect;
    for p in &mesh.positions {
        assert!(p.x >= r.x as i32 && p.x <= (r.x + r.w) as i32, "{p:?} outside {r:?}");
        assert!(p.y >= r.y as i32 && p.y <= (r.y + r.h) as i32, "{p:?} outside {r:?}");
    }
    let sheet = s.sheet_rect;
    for uv in &mesh.uvs {
        assert!(uv.x >= sheet.x as i32 && uv.x <= (sheet.x + sheet.w) as i32, "{uv:?}");
        assert!(uv.y >= sheet.y as i32 && uv.y <= (sheet.y + sheet.h) as i32, "{uv:?}");
    }
}

#[test]
fn minimum_vertex_budget_still_produces_a_mesh_or_skips() {
    let cfg = AtlasConfig {
        mesh: true,
        max_verts: 3,
        alpha_threshold: 128,
        ..Default::default()
    };
    let out = build_atlas(
        vec![InputImage {
            key: "circle.png".into(),
            image: circle_image(32, 16, 16, 10),
        }],
        cfg,
    )
    .expect("build");

    // Either a degenerate-free mesh within budget, or no mesh at all.
    if let Some(mesh) = &out.atlas.sprites[0].mesh {
        assert!(mesh.num_vertices() <= 3);
        assert!(mesh.num_triangles() >= 1);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [
                mesh.positions[tri[0] as usize],
                mesh.positions[tri[1] as usize],
                mesh.positions[tri[2] as usize],
            ];
            let area2 = (b.x - a.x) as i64 * (c.y - a.y) as i64
                - (b.y - a.y) as i64 * (c.x - a.x) as i64;
            assert_ne!(area2, 0);
        }
    }
}

#[test]
fn mesh_generation_is_off_by_default() {
    let out = build_atlas(
        vec![InputImage {
            key: "circle.png".into(),
            image: circle_image(32, 16, 16, 10),
        }],
        AtlasConfig::default(),
    )
    .expect("build");
    assert!(out.atlas.sprites[0].mesh.is_none());
}

#[test]
fn mesh_results_are_reproducible() {
    let cfg = AtlasConfig {
        mesh: true,
        max_verts: 16,
        ..Default::default()
    };
    let build = || {
        build_atlas(
            vec![InputImage {
                key: "circle.png".into(),
                image: circle_image(48, 24, 24, 15),
            }],
            cfg.clone(),
        )
        .expect("build")
    };
    let (a, b) = (build(), build());
    let (ma, mb) = (
        a.atlas.sprites[0].mesh.as_ref().expect("mesh"),
        b.atlas.sprites[0].mesh.as_ref().expect("mesh"),
    );
    assert_eq!(ma.positions, mb.positions);
    assert_eq!(ma.uvs, mb.uvs);
    assert_eq!(ma.indices, mb.indices);
}

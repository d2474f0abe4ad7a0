use crate::compositing::blit_rgba;
use crate::config::AtlasConfig;
use crate::correct::correct_outline;
use crate::error::{AtlasError, Result};
use crate::mask::Mask;
use crate::mesh::{resolve_uvs, triangulate_polygon};
use crate::model::{Atlas, AtlasOutput, InputImage, Point, Rect, SpriteFrame, SpriteMesh};
use crate::outline::extract_outline;
use crate::packer::skyline::SkylinePacker;
use crate::packer::Packer;
use crate::simplify::simplify_outline;
use image::RgbaImage;
use tracing::{debug, instrument, warn};

/// Per-sprite state between the geometry phase and final assembly.
/// The source buffer is dropped as soon as the sprite is composited.
struct Prep {
    key: String,
    rgba: RgbaImage,
    source_size: (u32, u32),
    sprite_rect: Option<Rect>,
    polygon: Option<(Vec<Point>, Vec<u16>)>,
}

/// Builds one atlas from `inputs` and returns the layout plus the
/// composited RGBA sheet.
///
/// Sprites are processed, packed, and emitted in input order. Any failure
/// is fatal: nothing is partially produced.
#[instrument(skip_all)]
pub fn build_atlas(inputs: Vec<InputImage>, cfg: AtlasConfig) -> Result<AtlasOutput> {
    cfg.validate()?;
    if inputs.is_empty() {
        return Err(AtlasError::Empty);
    }

    let mut preps = Vec::with_capacity(inputs.len());
    for input in inputs {
        preps.push(prepare_sprite(input, &cfg)?);
    }

    // Pack padded bounding rects into the bounded sheet. Empty sprites
    // take no slot.
    let inflate = 2 * (cfg.border + cfg.padding);
    let mut packer = SkylinePacker::new(cfg.max_width, cfg.max_height);
    let mut slots: Vec<Option<Rect>> = Vec::with_capacity(preps.len());
    for prep in &preps {
        let slot = match prep.sprite_rect {
            Some(rect) => {
                let placed = packer.pack(rect.w + inflate, rect.h + inflate).ok_or_else(|| {
                    AtlasError::OutOfSpace {
                        key: prep.key.clone(),
                        width: rect.w,
                        height: rect.h,
                        max_width: cfg.max_width,
                        max_height: cfg.max_height,
                    }
                })?;
                debug!(key = %prep.key, x = placed.x, y = placed.y, w = placed.w, h = placed.h, "placed");
                Some(placed)
            }
            None => None,
        };
        slots.push(slot);
    }

    let (width, height) = {
        let (mut ext_w, mut ext_h) = (0u32, 0u32);
        for slot in slots.iter().flatten() {
            ext_w = ext_w.max(slot.x + slot.w);
            ext_h = ext_h.max(slot.y + slot.h);
        }
        canvas_size(ext_w, ext_h, cfg.power_of_two)
    };

    let mut canvas = RgbaImage::new(width, height);
    let mut sprites = Vec::with_capacity(preps.len());
    for (prep, slot) in preps.into_iter().zip(slots) {
        sprites.push(finish_sprite(prep, slot, &cfg, &mut canvas));
    }

    Ok(AtlasOutput {
        atlas: Atlas {
            width,
            height,
            sprites,
        },
        rgba: canvas,
    })
}

/// Per-sprite geometry: mask, trim bounds, and (optionally) the corrected
/// silhouette polygon with its triangulation. Intermediate masks live only
/// within this call.
fn prepare_sprite(input: InputImage, cfg: &AtlasConfig) -> Result<Prep> {
    let rgba = input.image.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mask = Mask::from_alpha(&rgba, cfg.alpha_threshold);
    let sprite_rect = mask.opaque_bounds();
    if sprite_rect.is_none() {
        warn!(key = %input.key, "no pixels above the alpha threshold; sprite will be empty");
    }

    let polygon = match sprite_rect {
        Some(rect) if cfg.mesh => build_polygon(&input.key, &mask, rect, cfg)?,
        _ => None,
    };

    Ok(Prep {
        key: input.key,
        rgba,
        source_size: (w, h),
        sprite_rect,
        polygon,
    })
}

/// Outline -> simplify -> correct -> triangulate. The outline is traced on
/// the dilated mask so it starts outside the true silhouette; correction
/// runs against the undilated mask.
fn build_polygon(
    key: &str,
    mask: &Mask,
    rect: Rect,
    cfg: &AtlasConfig,
) -> Result<Option<(Vec<Point>, Vec<u16>)>> {
    let dilated = mask.dilate();
    let outline = extract_outline(&dilated);
    if outline.len() < 3 {
        warn!(key = %key, points = outline.len(), "outline too small for a mesh; skipping");
        return Ok(None);
    }

    let mut polygon = simplify_outline(&outline, cfg.max_verts as usize);
    if polygon.len() < 3 {
        warn!(key = %key, "outline collapsed during simplification; skipping mesh");
        return Ok(None);
    }

    correct_outline(&mut polygon, mask, rect);

    match triangulate_polygon(key, &polygon)? {
        Some(result) => Ok(Some(result)),
        None => {
            warn!(key = %key, "degenerate silhouette polygon; skipping mesh");
            Ok(None)
        }
    }
}

/// Resolves the sheet rect, maps mesh UVs, and blits the trimmed pixels.
/// Consumes the prep, releasing its source buffer.
fn finish_sprite(prep: Prep, slot: Option<Rect>, cfg: &AtlasConfig, canvas: &mut RgbaImage) -> SpriteFrame {
    let Prep {
        key,
        rgba,
        source_size,
        sprite_rect,
        polygon,
    } = prep;

    let (Some(rect), Some(slot)) = (sprite_rect, slot) else {
        return SpriteFrame {
            key,
            source_size,
            sprite_rect: Rect::new(0, 0, 0, 0),
            sheet_rect: Rect::new(0, 0, 0, 0),
            mesh: None,
        };
    };

    // The sheet rect is the blit destination itself: the border and
    // padding bands sit outside it, inside the placed slot, so its
    // dimensions always equal the trim rect's.
    let band = cfg.border + cfg.padding;
    let sheet_rect = Rect::new(slot.x + band, slot.y + band, rect.w, rect.h);

    let mesh = polygon.map(|(positions, indices)| {
        let uvs = resolve_uvs(&positions, rect, sheet_rect);
        SpriteMesh {
            positions,
            uvs,
            indices,
        }
    });

    blit_rgba(
        &rgba,
        canvas,
        sheet_rect.x,
        sheet_rect.y,
        rect.x,
        rect.y,
        rect.w,
        rect.h,
    );

    SpriteFrame {
        key,
        source_size,
        sprite_rect: rect,
        sheet_rect,
        mesh,
    }
}

/// Final sheet dimensions from the extents of the placed union: rounded up
/// to a multiple of 4 to keep the row pitch 32-bit aligned, then optionally
/// to the next power of two. Applying this twice yields the same size.
pub fn canvas_size(extent_w: u32, extent_h: u32, power_of_two: bool) -> (u32, u32) {
    let mut w = align4(extent_w.max(1));
    let mut h = align4(extent_h.max(1));
    if power_of_two {
        w = next_pow2(w);
        h = next_pow2(h);
    }
    (w, h)
}

fn align4(v: u32) -> u32 {
    (v + 3) & !3
}

fn next_pow2(mut v: u32) -> u32 {
    if v <= 1 {
        return 1;
    }
    v -= 1;
    v |= v >> 1;
    v |= v >> 2;
    v |= v >> 4;
    v |= v >> 8;
    v |= v >> 16;
    v + 1
}

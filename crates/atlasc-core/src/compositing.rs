use image::RgbaImage;

/// Blit a sub-rectangle from `src` into `canvas` at destination (dx, dy).
///
/// Rows are copied as whole 4-byte-per-pixel slices. The caller guarantees
/// the destination fits the canvas; the canvas is zero-initialised, so
/// everything outside blitted regions stays fully transparent.
pub fn blit_rgba(
    src: &RgbaImage,
    canvas: &mut RgbaImage,
    dx: u32,
    dy: u32,
    sx: u32,
    sy: u32,
    sw: u32,
    sh: u32,
) {
    debug_assert!(sx + sw <= src.width() && sy + sh <= src.height());
    debug_assert!(dx + sw <= canvas.width() && dy + sh <= canvas.height());

    let src_pitch = (src.width() as usize) * 4;
    let dst_pitch = (canvas.width() as usize) * 4;
    let row_bytes = (sw as usize) * 4;

    let src_buf: &[u8] = src;
    let dst_buf: &mut [u8] = canvas;
    for row in 0..sh as usize {
        let s = (sy as usize + row) * src_pitch + (sx as usize) * 4;
        let d = (dy as usize + row) * dst_pitch + (dx as usize) * 4;
        dst_buf[d..d + row_bytes].copy_from_slice(&src_buf[s..s + row_bytes]);
    }
}

use crate::{
    assets::decode::SourceImage,
    foundation::error::{ScanwipeError, ScanwipeResult},
    foundation::math::mul_div255_u8,
    render::raster::FrameRGBA,
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Scale a premultiplied pixel by a coverage value in `[0, 255]`.
pub fn scale(px: PremulRgba8, coverage: u8) -> PremulRgba8 {
    let c = u16::from(coverage);
    [
        mul_div255_u8(u16::from(px[0]), c),
        mul_div255_u8(u16::from(px[1]), c),
        mul_div255_u8(u16::from(px[2]), c),
        mul_div255_u8(u16::from(px[3]), c),
    ]
}

/// Composite one premultiplied row `src` over every row of `dst`, starting at column `x0`.
///
/// Columns falling outside the surface are dropped.
pub fn over_row_span(dst: &mut FrameRGBA, src: &[u8], x0: i64) -> ScanwipeResult<()> {
    if !src.len().is_multiple_of(4) {
        return Err(ScanwipeError::render("over_row_span expects an rgba8 row"));
    }
    let width = i64::from(dst.width);
    let span = (src.len() / 4) as i64;
    let start = x0.max(0);
    let end = (x0 + span).min(width);
    if start >= end {
        return Ok(());
    }

    let src = &src[((start - x0) as usize) * 4..((end - x0) as usize) * 4];
    for y in 0..dst.height {
        let row = dst.row_mut(y);
        let row = &mut row[(start as usize) * 4..(end as usize) * 4];
        for (d, s) in row.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Replace columns `[x0, x1)` of `dst` with the same columns of `src`, anchored at the origin.
///
/// This is a hard rectangular clip: pixels are copied, never blended. Where `src` is smaller than
/// `dst`, the uncovered part of the region becomes transparent.
pub fn copy_columns(dst: &mut FrameRGBA, src: &SourceImage, x0: u32, x1: u32) {
    let x1 = x1.min(dst.width);
    if x0 >= x1 {
        return;
    }
    let src_x1 = x1.min(src.width);
    for y in 0..dst.height {
        let row = dst.row_mut(y);
        let region = &mut row[(x0 as usize) * 4..(x1 as usize) * 4];
        region.fill(0);
        if y >= src.height || x0 >= src_x1 {
            continue;
        }
        let copied = ((src_x1 - x0) as usize) * 4;
        region[..copied].copy_from_slice(&src.row(y)[(x0 as usize) * 4..(src_x1 as usize) * 4]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

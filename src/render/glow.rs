use crate::{
    foundation::core::Rgb8,
    foundation::error::{ScanwipeError, ScanwipeResult},
    render::blur::GaussianKernel,
    render::composite::{over_row_span, scale},
    render::raster::FrameRGBA,
};

/// Width of the glow line's solid core, in pixels, independent of canvas size.
pub const LINE_WIDTH_PX: f64 = 10.0;

/// Shadow blur amounts of the two glow layers, wide halo first (see
/// [`GaussianKernel::from_shadow_blur`]).
pub const GLOW_BLURS: [f32; 2] = [30.0, 15.0];

/// Draw a full-height glow line whose solid core spans `[x, x + width)`.
///
/// Each layer is a blurred halo of the color with the solid core composited on top; the second,
/// tighter layer saturates the core. Any part of the line off the canvas is clipped.
pub fn draw_glow_line(
    frame: &mut FrameRGBA,
    x: f64,
    width: f64,
    color: Rgb8,
) -> ScanwipeResult<()> {
    if !x.is_finite() || !width.is_finite() || width <= 0.0 {
        return Err(ScanwipeError::render(format!(
            "glow line needs a finite position and positive width (x={x}, width={width})"
        )));
    }

    let (x0, coverage) = coverage_span(x, width);
    let color = color.to_rgba();
    let core: Vec<u8> = coverage.iter().flat_map(|&c| scale(color, c)).collect();

    for blur in GLOW_BLURS {
        let kernel = GaussianKernel::from_shadow_blur(blur)?;
        let halo = kernel.spread_row(&core)?;
        over_row_span(frame, &halo, x0 - kernel.radius() as i64)?;
        over_row_span(frame, &core, x0)?;
    }
    Ok(())
}

/// Anti-aliased horizontal coverage of `[x, x + width)`, as `(first column, per-column 0..=255)`.
fn coverage_span(x: f64, width: f64) -> (i64, Vec<u8>) {
    let x_end = x + width;
    let first = x.floor() as i64;
    let last = x_end.ceil() as i64;
    let coverage = (first..last)
        .map(|col| {
            let l = (col as f64).max(x);
            let r = ((col + 1) as f64).min(x_end);
            ((r - l).clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect();
    (first, coverage)
}

#[cfg(test)]
#[path = "../../tests/unit/render/glow.rs"]
mod tests;

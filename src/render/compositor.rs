use crate::{
    animation::ease::Ease,
    assets::decode::SourceImage,
    composition::style::StyleParameters,
    foundation::{core::FrameIndex, error::ScanwipeResult},
    render::{
        composite::copy_columns,
        glow::{LINE_WIDTH_PX, draw_glow_line},
        phase::{Phase, PhaseSample, Timeline},
        raster::FrameRGBA,
    },
};

/// Share of the canvas width the scan line travels beyond each edge.
const SCAN_OVERSHOOT: f64 = 0.2;

/// Per-frame geometry, derived only from the phase sample and canvas width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    /// Columns `[0, split)` show "before"; `[split, width)` show "after".
    pub split: u32,
    /// Left edge of the glow line's core, when one is drawn.
    pub line_x: Option<f64>,
}

/// Compute the split column and glow line position for one frame.
pub fn plan_frame(sample: PhaseSample, ease: Ease, width: u32) -> FramePlan {
    let w = f64::from(width);
    let eased = ease.apply(sample.progress);
    match sample.phase {
        Phase::Hold => FramePlan {
            split: width,
            line_x: None,
        },
        Phase::Scan => {
            // Starts `overshoot` off the left edge; the same offset is added back when drawing.
            let x = (w + SCAN_OVERSHOOT * w) * eased - SCAN_OVERSHOOT * w;
            FramePlan {
                split: width,
                line_x: Some(x + SCAN_OVERSHOOT * w - LINE_WIDTH_PX),
            }
        }
        Phase::RevealAfter => {
            let split = w * eased;
            FramePlan {
                split: clamp_column(w - split, width),
                line_x: Some(w - split - LINE_WIDTH_PX),
            }
        }
        Phase::RevealBefore if sample.progress >= 1.0 => FramePlan {
            split: width,
            line_x: None,
        },
        Phase::RevealBefore => {
            let split = w * eased;
            FramePlan {
                split: clamp_column(split, width),
                line_x: Some(split - LINE_WIDTH_PX),
            }
        }
    }
}

fn clamp_column(x: f64, width: u32) -> u32 {
    x.round().clamp(0.0, f64::from(width)) as u32
}

/// Composite frame `frame` of `timeline` onto a canvas the size of `before`.
///
/// Pure in `(before, after, frame)`: every call renders into its own surface.
pub fn render_frame(
    before: &SourceImage,
    after: &SourceImage,
    frame: FrameIndex,
    timeline: Timeline,
    style: &StyleParameters,
) -> ScanwipeResult<FrameRGBA> {
    let sample = timeline.sample(frame)?;
    let plan = plan_frame(sample, style.easing, before.width);

    let mut out = FrameRGBA::from_source(before);
    let width = out.width;
    if plan.split < width {
        copy_columns(&mut out, after, plan.split, width);
    }
    if let Some(x) = plan.line_x {
        draw_glow_line(&mut out, x, LINE_WIDTH_PX, style.line_color)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

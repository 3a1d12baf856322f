use rayon::prelude::*;

use crate::{
    assets::{
        decode::{SourceImage, decode_source},
        source::ImageSource,
    },
    composition::{
        config::{RenderThreading, RunOpts, SizeMismatch},
        style::StyleParameters,
    },
    foundation::{
        core::{Canvas, FrameIndex},
        error::{ScanwipeError, ScanwipeResult},
    },
    render::{compositor::render_frame, phase::Timeline},
};

/// One composited frame, encoded as a PNG still. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Position in the timeline.
    pub index: FrameIndex,
    /// Canvas size the frame was composited at.
    pub canvas: Canvas,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Decode both sources once and render the full timeline in order.
///
/// `on_frame_done(index, total)` runs synchronously after each frame is composited and encoded,
/// in strictly increasing index order. Any failure aborts the run and discards partial output.
#[tracing::instrument(skip_all, fields(total_frames = opts.total_frames))]
pub fn generate_frames(
    before: &ImageSource,
    after: &ImageSource,
    style: &StyleParameters,
    opts: &RunOpts,
    on_frame_done: impl FnMut(FrameIndex, u64),
) -> ScanwipeResult<Vec<Frame>> {
    let (before, after) = decode_pair(before, after, opts)?;
    render_sequence(&before, &after, style, opts, on_frame_done)
}

/// Validate `opts`, decode both sources, and apply the size mismatch policy.
pub fn decode_pair(
    before: &ImageSource,
    after: &ImageSource,
    opts: &RunOpts,
) -> ScanwipeResult<(SourceImage, SourceImage)> {
    opts.validate()?;
    let before = decode_source(before)?;
    let after = decode_source(after)?;
    tracing::info!(
        before = %format_args!("{}x{}", before.width, before.height),
        after = %format_args!("{}x{}", after.width, after.height),
        "decoded sources"
    );
    check_sizes(&before, &after, opts.size_mismatch)?;
    Ok((before, after))
}

/// Render and encode every frame of the timeline from already-decoded sources.
pub fn render_sequence(
    before: &SourceImage,
    after: &SourceImage,
    style: &StyleParameters,
    opts: &RunOpts,
    mut on_frame_done: impl FnMut(FrameIndex, u64),
) -> ScanwipeResult<Vec<Frame>> {
    opts.validate()?;
    let timeline = Timeline::new(opts.total_frames)?;
    let total = timeline.total();
    let mut frames = Vec::with_capacity(total as usize);

    if !opts.threading.parallel {
        for i in 0..total {
            let frame = render_still(before, after, FrameIndex(i), timeline, style)?;
            frames.push(frame);
            on_frame_done(FrameIndex(i), total);
        }
        return Ok(frames);
    }

    let pool = build_thread_pool(&opts.threading)?;
    let chunk = opts.threading.chunk_size.max(1) as u64;
    let mut start = 0u64;
    while start < total {
        let end = (start + chunk).min(total);
        let rendered = pool.install(|| {
            (start as usize..end as usize)
                .into_par_iter()
                .map(|i| render_still(before, after, FrameIndex(i as u64), timeline, style))
                .collect::<Vec<_>>()
        });
        for item in rendered {
            let frame = item?;
            let idx = frame.index;
            frames.push(frame);
            on_frame_done(idx, total);
        }
        start = end;
    }
    Ok(frames)
}

fn render_still(
    before: &SourceImage,
    after: &SourceImage,
    index: FrameIndex,
    timeline: Timeline,
    style: &StyleParameters,
) -> ScanwipeResult<Frame> {
    let raster = render_frame(before, after, index, timeline, style).map_err(|e| match e {
        ScanwipeError::Render(_) => e,
        other => ScanwipeError::render(format!("frame {}: {other}", index.0)),
    })?;
    let png = raster.encode_png()?;
    tracing::debug!(frame = index.0, bytes = png.len(), "frame rendered");
    Ok(Frame {
        index,
        canvas: raster.canvas(),
        png,
    })
}

fn check_sizes(
    before: &SourceImage,
    after: &SourceImage,
    policy: SizeMismatch,
) -> ScanwipeResult<()> {
    if before.canvas() == after.canvas() {
        return Ok(());
    }
    match policy {
        SizeMismatch::Reject => Err(ScanwipeError::validation(format!(
            "before is {}x{} but after is {}x{}",
            before.width, before.height, after.width, after.height
        ))),
        SizeMismatch::AnchorTopLeft => {
            tracing::warn!(
                before = %format_args!("{}x{}", before.width, before.height),
                after = %format_args!("{}x{}", after.width, after.height),
                "source sizes differ; drawing after at its natural size on the before canvas"
            );
            Ok(())
        }
    }
}

fn build_thread_pool(threading: &RenderThreading) -> ScanwipeResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threading.threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScanwipeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

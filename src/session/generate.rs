use crate::{
    assets::source::{ImageSource, require_inputs},
    composition::{config::RunOpts, style::StyleParameters},
    encode::{
        artifact::VideoArtifact,
        orchestrator::{Encoder, check_canvas},
        service::EncoderService,
    },
    foundation::error::ScanwipeResult,
    render::pipeline::{decode_pair, render_sequence},
    session::progress::Progress,
};

/// Everything one generation run needs besides the encoder.
///
/// Inputs are optional so that a caller wiring up user selections can hand over whatever it has;
/// a missing image fails the run with [`crate::ScanwipeError::MissingInput`] before any work starts.
#[derive(Clone, Debug, Default)]
pub struct GenerateRequest {
    /// Image shown at the start and end of the loop.
    pub before: Option<ImageSource>,
    /// Image revealed mid-loop.
    pub after: Option<ImageSource>,
    /// Line color and easing.
    pub style: StyleParameters,
    /// Timeline length, size policy, and threading.
    pub opts: RunOpts,
}

impl GenerateRequest {
    /// Request for `before` and `after` with default style and options.
    pub fn new(before: impl Into<ImageSource>, after: impl Into<ImageSource>) -> Self {
        Self {
            before: Some(before.into()),
            after: Some(after.into()),
            ..Self::default()
        }
    }

    /// Replace the style.
    pub fn with_style(mut self, style: StyleParameters) -> Self {
        self.style = style;
        self
    }

    /// Replace the run options.
    pub fn with_opts(mut self, opts: RunOpts) -> Self {
        self.opts = opts;
        self
    }
}

/// Run the full pipeline: render every frame, encode them, and return the MP4.
///
/// Progress climbs from 0 to 0.8 while frames render and from 0.8 to 1.0 while they are staged,
/// then resets to 0 once the run finishes or fails. Frames are dropped before this returns.
#[tracing::instrument(skip_all, fields(total_frames = req.opts.total_frames))]
pub fn generate<S: EncoderService>(
    req: &GenerateRequest,
    encoder: &Encoder<S>,
    progress: &Progress,
) -> ScanwipeResult<VideoArtifact> {
    progress.start(req.opts.total_frames);
    match run(req, encoder, progress) {
        Ok(video) => {
            tracing::info!(bytes = video.len(), "generation finished");
            progress.finish(video.len());
            Ok(video)
        }
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            progress.fail(&e);
            Err(e)
        }
    }
}

fn run<S: EncoderService>(
    req: &GenerateRequest,
    encoder: &Encoder<S>,
    progress: &Progress,
) -> ScanwipeResult<VideoArtifact> {
    let (before, after) = require_inputs(req.before.as_ref(), req.after.as_ref())?;
    encoder.ensure_init()?;

    let (before, after) = decode_pair(before, after, &req.opts)?;
    check_canvas(before.canvas())?;
    let frames = render_sequence(&before, &after, &req.style, &req.opts, |i, n| {
        progress.frame_rendered(i, n)
    })?;
    encoder.encode(&frames, progress)
}

#[cfg(test)]
#[path = "../../tests/unit/session/generate.rs"]
mod tests;

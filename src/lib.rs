//! Scanwipe turns a "before" and an "after" image into a short, looping before/after transition
//! video.
//!
//! A glowing line sweeps across the "before" image, "after" wipes in from the right, then
//! "before" wipes back in from the left so the last frame matches the first. Frames are
//! composited on the CPU and handed to an injected [`EncoderService`] (system `ffmpeg` by
//! default) which produces an H.264 MP4.
//!
//! - Build a [`GenerateRequest`] from two [`ImageSource`]s
//! - Wrap a service in an [`Encoder`]
//! - Call [`generate`] and save the returned [`VideoArtifact`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing curves.
pub mod animation;
/// Source image loading and decoding.
pub mod assets;
/// Style and run configuration.
pub mod composition;
/// Frames-to-video encoding.
pub mod encode;
/// Shared primitives and errors.
pub mod foundation;
/// Frame compositing and sequencing.
pub mod render;
/// Run-level API.
pub mod session;

pub use crate::animation::ease::Ease;
pub use crate::assets::decode::{SourceImage, decode_image, decode_source};
pub use crate::assets::source::{ImageSource, require_inputs};
pub use crate::composition::config::{RenderThreading, RunConfig, RunOpts, SizeMismatch};
pub use crate::composition::style::StyleParameters;
pub use crate::encode::artifact::{DOWNLOAD_FILE_NAME, VIDEO_MIME, VideoArtifact};
pub use crate::encode::ffmpeg::{FfmpegService, is_ffmpeg_on_path};
pub use crate::encode::memory::{FailAt, InMemoryEncoder};
pub use crate::encode::orchestrator::{Encoder, check_canvas};
pub use crate::encode::service::{ENCODE_ARGS, EncoderService, OUTPUT_FPS};
pub use crate::foundation::core::{Canvas, FrameIndex, Rgb8};
pub use crate::foundation::error::{ScanwipeError, ScanwipeResult};
pub use crate::render::compositor::{FramePlan, plan_frame, render_frame};
pub use crate::render::glow::LINE_WIDTH_PX;
pub use crate::render::phase::{
    DEFAULT_TOTAL_FRAMES, MAX_TOTAL_FRAMES, Phase, PhaseSample, Timeline,
};
pub use crate::render::pipeline::{Frame, decode_pair, generate_frames, render_sequence};
pub use crate::render::raster::FrameRGBA;
pub use crate::session::generate::{GenerateRequest, generate};
pub use crate::session::progress::{Progress, ProgressEvent, ProgressHandle};

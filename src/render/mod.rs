//! CPU compositing of transition frames.
//!
//! Everything here works on premultiplied RGBA8 surfaces. [`compositor::render_frame`] builds one
//! frame; [`pipeline::generate_frames`] runs the whole timeline.

/// Separable gaussian blur.
pub mod blur;
/// Pixel-level `over` and column copies.
pub mod composite;
/// Per-frame geometry and frame composition.
pub mod compositor;
/// Glowing scan line.
pub mod glow;
/// Timeline phases.
pub mod phase;
/// Frame sequencing.
pub mod pipeline;
/// Owned RGBA8 frame surfaces.
pub mod raster;

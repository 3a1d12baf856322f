use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    composition::style::StyleParameters,
    foundation::error::{ScanwipeError, ScanwipeResult},
    render::phase::{DEFAULT_TOTAL_FRAMES, MAX_TOTAL_FRAMES},
};

/// What to do when "after" does not match the "before" canvas size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMismatch {
    /// Draw "after" at its natural size from the canvas origin: larger images are cropped,
    /// smaller ones leave the rest of the revealed region transparent.
    #[default]
    AnchorTopLeft,
    /// Fail the run with a validation error.
    Reject,
}

/// Frame-level parallelism for the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render frames on the rayon pool, each into its own surface.
    pub parallel: bool,
    /// Frames rendered per parallel batch. Progress is reported in order after each batch.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 16,
            threads: None,
        }
    }
}

/// Options controlling a generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunOpts {
    /// Timeline length in frames.
    pub total_frames: u64,
    /// Policy for mismatched source sizes.
    pub size_mismatch: SizeMismatch,
    /// Frame rendering parallelism.
    pub threading: RenderThreading,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self {
            total_frames: DEFAULT_TOTAL_FRAMES,
            size_mismatch: SizeMismatch::default(),
            threading: RenderThreading::default(),
        }
    }
}

impl RunOpts {
    /// Check option values before any work starts.
    pub fn validate(&self) -> ScanwipeResult<()> {
        if self.total_frames == 0 || self.total_frames > MAX_TOTAL_FRAMES {
            return Err(ScanwipeError::validation(format!(
                "total_frames must be in 1..={MAX_TOTAL_FRAMES}, got {}",
                self.total_frames
            )));
        }
        if self.threading.parallel && self.threading.chunk_size == 0 {
            return Err(ScanwipeError::validation(
                "chunk_size must be > 0 when parallel rendering is enabled",
            ));
        }
        Ok(())
    }
}

/// JSON run configuration: style plus run options.
///
/// Every field is optional; missing fields take their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Visual style.
    pub style: StyleParameters,
    /// Run options.
    pub opts: RunOpts,
}

impl RunConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScanwipeResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScanwipeError::validation(format!("parse run config JSON: {e}")))?;
        cfg.opts.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScanwipeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScanwipeError::validation(format!("open run config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/config.rs"]
mod tests;

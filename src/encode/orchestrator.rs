use std::sync::{Mutex, MutexGuard, OnceLock};

use crate::{
    encode::{
        artifact::VideoArtifact,
        service::{ENCODE_ARGS, EncoderService, OUTPUT_FILE_NAME, staged_frame_name},
    },
    foundation::{
        core::Canvas,
        error::{ScanwipeError, ScanwipeResult},
    },
    render::pipeline::Frame,
    session::progress::Progress,
};

/// Injected handle to one encoder service instance.
///
/// - `init` runs at most once per handle; concurrent first callers block until it finishes, and
///   the outcome (success or failure) is cached for the handle's lifetime.
/// - Encode runs are serialized: a second concurrent [`Encoder::encode`] waits for the first to
///   finish and clean up. Use separate handles for independent, concurrent encodes.
pub struct Encoder<S: EncoderService> {
    service: Mutex<S>,
    init: OnceLock<Result<(), String>>,
}

impl<S: EncoderService> Encoder<S> {
    /// Wrap a service. Nothing is initialized until first use.
    pub fn new(service: S) -> Self {
        Self {
            service: Mutex::new(service),
            init: OnceLock::new(),
        }
    }

    /// Initialize the service if this is the first call on this handle.
    pub fn ensure_init(&self) -> ScanwipeResult<()> {
        let res = self.init.get_or_init(|| {
            tracing::info!("initializing encoder service");
            let mut svc = self.lock().map_err(|e| e.to_string())?;
            svc.init().map_err(|e| e.to_string())
        });
        res.clone().map_err(ScanwipeError::encoder_init)
    }

    /// Return `true` once `init` has completed successfully.
    pub fn is_initialized(&self) -> bool {
        matches!(self.init.get(), Some(Ok(())))
    }

    /// Exclusive access to the wrapped service, e.g. to inspect a test double.
    pub fn service(&self) -> ScanwipeResult<MutexGuard<'_, S>> {
        self.lock()
    }

    /// Stage `frames` in order, run the fixed encode command, and read the video back.
    ///
    /// Every staged frame and the output file are deleted from the namespace before this returns,
    /// whether it succeeds or fails.
    #[tracing::instrument(skip_all, fields(frames = frames.len()))]
    pub fn encode(&self, frames: &[Frame], progress: &Progress) -> ScanwipeResult<VideoArtifact> {
        self.ensure_init()?;
        check_frames(frames)?;

        let mut svc = self.lock()?;
        let mut staging = Staging::new(&mut *svc);

        let n = frames.len();
        for (i, frame) in frames.iter().enumerate() {
            let name = staged_frame_name(i);
            staging
                .write(&name, &frame.png)
                .map_err(|e| ScanwipeError::encode(format!("stage '{name}': {e}")))?;
            progress.frame_staged(i + 1, n);
        }

        tracing::info!(command = %ENCODE_ARGS.join(" "), "encoding staged frames");
        progress.encoding();
        staging.track(OUTPUT_FILE_NAME);
        staging
            .service()
            .exec(&ENCODE_ARGS)
            .map_err(|e| ScanwipeError::encode(format!("run encoder: {e}")))?;

        let bytes = staging
            .service()
            .read_file(OUTPUT_FILE_NAME)
            .map_err(|e| ScanwipeError::read(format!("read '{OUTPUT_FILE_NAME}': {e}")))?;
        if bytes.is_empty() {
            return Err(ScanwipeError::read(format!("'{OUTPUT_FILE_NAME}' is empty")));
        }
        tracing::info!(bytes = bytes.len(), "video encoded");
        Ok(VideoArtifact::mp4(bytes))
    }

    fn lock(&self) -> ScanwipeResult<MutexGuard<'_, S>> {
        self.service
            .lock()
            .map_err(|_| ScanwipeError::encode("encoder service lock poisoned"))
    }
}

/// Reject canvases the fixed yuv420p output cannot hold (odd width or height).
pub fn check_canvas(canvas: Canvas) -> ScanwipeResult<()> {
    if !canvas.is_even() {
        return Err(ScanwipeError::validation(format!(
            "canvas {}x{} must have even width and height (required for yuv420p mp4 output)",
            canvas.width, canvas.height
        )));
    }
    Ok(())
}

fn check_frames(frames: &[Frame]) -> ScanwipeResult<()> {
    let Some(first) = frames.first() else {
        return Err(ScanwipeError::validation("no frames to encode"));
    };
    check_canvas(first.canvas)?;
    for (i, f) in frames.iter().enumerate() {
        if f.index.0 != i as u64 {
            return Err(ScanwipeError::validation(format!(
                "frame at position {i} has index {}; frames must be in timeline order",
                f.index.0
            )));
        }
        if f.canvas != first.canvas {
            return Err(ScanwipeError::validation(format!(
                "frame {i} is {}x{}, expected {}x{}",
                f.canvas.width, f.canvas.height, first.canvas.width, first.canvas.height
            )));
        }
    }
    Ok(())
}

/// Names written into the namespace during one run; all of them are deleted on drop.
struct Staging<'a, S: EncoderService + ?Sized> {
    service: &'a mut S,
    names: Vec<String>,
}

impl<'a, S: EncoderService + ?Sized> Staging<'a, S> {
    fn new(service: &'a mut S) -> Self {
        Self {
            service,
            names: Vec::new(),
        }
    }

    fn service(&mut self) -> &mut S {
        self.service
    }

    fn track(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> ScanwipeResult<()> {
        // Tracked first so a partially written file is still cleaned up.
        self.track(name);
        self.service.write_file(name, bytes)
    }
}

impl<S: EncoderService + ?Sized> Drop for Staging<'_, S> {
    fn drop(&mut self) {
        let mut failed = 0usize;
        for name in self.names.drain(..) {
            if let Err(e) = self.service.delete_file(&name) {
                failed += 1;
                tracing::warn!(file = %name, error = %e, "failed to delete staged file");
            }
        }
        tracing::debug!(failed, "encoder namespace cleaned up");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/orchestrator.rs"]
mod tests;

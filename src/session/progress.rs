use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

use crate::foundation::core::FrameIndex;

/// Share of the overall progress budget spent rendering frames; staging takes the rest.
pub const GENERATION_SHARE: f64 = 0.8;

/// Overall progress after `done` of `total` frames have been rendered.
pub fn generation_progress(done: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    GENERATION_SHARE * (done as f64 / total as f64)
}

/// Overall progress after `staged` of `total` frames have been handed to the encoder.
pub fn staging_progress(staged: usize, total: usize) -> f64 {
    if total == 0 {
        return GENERATION_SHARE;
    }
    GENERATION_SHARE + (1.0 - GENERATION_SHARE) * (staged as f64 / total as f64)
}

/// Structured progress notifications for one generation run.
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    /// A run started; progress is back at 0.
    Started {
        /// Timeline length.
        total_frames: u64,
    },
    /// A frame was composited and encoded as a still.
    FrameRendered {
        /// Frame that finished.
        index: FrameIndex,
        /// Timeline length.
        total: u64,
        /// Overall progress after this frame.
        progress: f64,
    },
    /// A frame was staged into the encoder namespace.
    FrameStaged {
        /// Frames staged so far.
        staged: usize,
        /// Frames to stage.
        total: usize,
        /// Overall progress after this frame.
        progress: f64,
    },
    /// All frames are staged and the encoder is running.
    Encoding,
    /// The video is ready.
    Finished {
        /// Size of the encoded video.
        bytes: usize,
    },
    /// The run failed; nothing was produced.
    Failed {
        /// Rendered error message.
        error: String,
    },
}

/// Cheap, cloneable, pollable view of a run's progress in `[0, 1]`.
#[derive(Clone, Debug, Default)]
pub struct ProgressHandle(Arc<AtomicU64>);

impl ProgressHandle {
    /// Current progress.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    fn set(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Release);
    }
}

/// Reporting side of the progress channel.
///
/// Updates are published synchronously, in pipeline order, to the polled [`ProgressHandle`] and,
/// when created with [`Progress::channel`], as [`ProgressEvent`]s. A dropped receiver is ignored.
#[derive(Debug, Default)]
pub struct Progress {
    handle: ProgressHandle,
    events: Option<mpsc::Sender<ProgressEvent>>,
}

impl Progress {
    /// Progress reporter with only the polled handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress reporter that also streams events.
    pub fn channel() -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                handle: ProgressHandle::default(),
                events: Some(tx),
            },
            rx,
        )
    }

    /// Handle for polling from another thread.
    pub fn handle(&self) -> ProgressHandle {
        self.handle.clone()
    }

    /// Current progress.
    pub fn value(&self) -> f64 {
        self.handle.get()
    }

    pub(crate) fn start(&self, total_frames: u64) {
        self.handle.set(0.0);
        self.emit(ProgressEvent::Started { total_frames });
    }

    pub(crate) fn frame_rendered(&self, index: FrameIndex, total: u64) {
        let progress = generation_progress(index.0 + 1, total);
        self.handle.set(progress);
        self.emit(ProgressEvent::FrameRendered {
            index,
            total,
            progress,
        });
    }

    pub(crate) fn frame_staged(&self, staged: usize, total: usize) {
        let progress = staging_progress(staged, total);
        self.handle.set(progress);
        self.emit(ProgressEvent::FrameStaged {
            staged,
            total,
            progress,
        });
    }

    pub(crate) fn encoding(&self) {
        self.emit(ProgressEvent::Encoding);
    }

    pub(crate) fn finish(&self, bytes: usize) {
        self.emit(ProgressEvent::Finished { bytes });
        self.handle.set(0.0);
    }

    pub(crate) fn fail(&self, error: &dyn std::fmt::Display) {
        self.emit(ProgressEvent::Failed {
            error: error.to_string(),
        });
        self.handle.set(0.0);
    }

    fn emit(&self, ev: ProgressEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(ev);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/progress.rs"]
mod tests;
